mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use trading212_api::{Client, ClientConfig};

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "trading212")]
#[command(about = "Manage a Trading 212 equity account from the command line")]
struct Cli {
    /// Output format: table, json, csv or markdown
    #[arg(long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    output: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show cash and investment totals
    Account,
    /// List open positions
    Positions(commands::ListArgs),
    /// List, inspect, place or cancel orders
    Orders(commands::orders::OrdersArgs),
    /// List tradable instruments or exchange schedules
    Instruments(commands::instruments::InstrumentsArgs),
    /// Browse dividends, past orders, transactions and CSV exports
    History(commands::history::HistoryArgs),
    /// List, inspect or delete pies
    Pies(commands::pies::PiesArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("trading212=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let client = Client::new(ClientConfig::from_env()?)?;
    let format = cli.output;

    match &cli.command {
        Commands::Account => commands::account::run(&client, format).await?,
        Commands::Positions(args) => commands::positions::run(args, &client, format).await?,
        Commands::Orders(args) => commands::orders::run(args, &client, format).await?,
        Commands::Instruments(args) => commands::instruments::run(args, &client, format).await?,
        Commands::History(args) => commands::history::run(args, &client, format).await?,
        Commands::Pies(args) => commands::pies::run(args, &client, format).await?,
    }

    Ok(())
}
