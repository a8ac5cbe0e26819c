use anyhow::Result;
use clap::{Args, Subcommand};
use trading212_api::Client;

use super::{take, ListArgs};
use crate::output::{build_pie_instrument_rows, build_pie_rows, print, print_json, OutputFormat};

#[derive(Args)]
pub struct PiesArgs {
    #[command(subcommand)]
    pub command: PiesCommand,
}

#[derive(Subcommand)]
pub enum PiesCommand {
    /// List all pies
    List(ListArgs),
    /// Show one pie and its instruments
    Get {
        /// Pie ID
        id: u64,
    },
    /// Delete a pie
    Delete {
        /// Pie ID
        id: u64,
    },
}

pub async fn run(args: &PiesArgs, client: &Client, format: OutputFormat) -> Result<()> {
    match &args.command {
        PiesCommand::List(list) => {
            let pies = take(client.get_pies().await?, list.max).await?;
            print(&pies, build_pie_rows(&pies), format)
        }
        PiesCommand::Get { id } => {
            let pie = client.get_pie(*id).await?;
            if format == OutputFormat::Json {
                print_json(&pie);
                return Ok(());
            }
            eprintln!("{} (#{})", pie.settings.name, pie.settings.id);
            print(&pie.instruments, build_pie_instrument_rows(&pie), format)
        }
        PiesCommand::Delete { id } => {
            client.delete_pie(*id).await?;
            tracing::info!("Deleted pie {}", id);
            Ok(())
        }
    }
}
