use anyhow::Result;
use clap::{Args, Subcommand};
use trading212_api::Client;

use super::{take, ListArgs};
use crate::output::{build_exchange_rows, build_instrument_rows, print, OutputFormat};

#[derive(Args)]
pub struct InstrumentsArgs {
    #[command(subcommand)]
    pub command: InstrumentsCommand,
}

#[derive(Subcommand)]
pub enum InstrumentsCommand {
    /// List tradable instruments
    List {
        /// Only show instruments whose ticker or name contains this text
        #[arg(long)]
        search: Option<String>,

        #[command(flatten)]
        list: ListArgs,
    },
    /// List exchanges and their working schedules
    Exchanges(ListArgs),
}

pub async fn run(args: &InstrumentsArgs, client: &Client, format: OutputFormat) -> Result<()> {
    match &args.command {
        InstrumentsCommand::List { search, list } => {
            let mut instruments = client.get_all_instruments().await?;
            let instruments = match search {
                Some(search) => {
                    let needle = search.to_lowercase();
                    let mut matched = Vec::new();
                    while let Some(instrument) = instruments.next().await {
                        let instrument = instrument?;
                        if instrument.ticker.to_lowercase().contains(&needle)
                            || instrument.name.to_lowercase().contains(&needle)
                        {
                            matched.push(instrument);
                            if list.max.is_some_and(|max| matched.len() >= max) {
                                break;
                            }
                        }
                    }
                    matched
                }
                None => take(instruments, list.max).await?,
            };
            print(&instruments, build_instrument_rows(&instruments), format)
        }
        InstrumentsCommand::Exchanges(list) => {
            let exchanges = take(client.get_exchanges_metadata().await?, list.max).await?;
            print(&exchanges, build_exchange_rows(&exchanges), format)
        }
    }
}
