use anyhow::Result;
use clap::{Args, Subcommand};
use trading212_api::{Client, HistoryQuery, Query};

use super::{take, ListArgs};
use crate::output::{
    build_dividend_rows, build_historical_order_rows, build_report_rows, build_transaction_rows,
    print, OutputFormat,
};

#[derive(Args)]
pub struct HistoryArgs {
    #[command(subcommand)]
    pub command: HistoryCommand,
}

#[derive(Subcommand)]
pub enum HistoryCommand {
    /// List paid-out dividends
    Dividends(HistoryFilterArgs),
    /// List filled and cancelled orders
    Orders(HistoryFilterArgs),
    /// List deposits, withdrawals, fees and transfers
    Transactions(HistoryFilterArgs),
    /// List requested CSV exports
    Reports(ListArgs),
}

#[derive(Args)]
pub struct HistoryFilterArgs {
    /// Filter by ticker (e.g. AAPL_US_EQ)
    #[arg(long)]
    pub ticker: Option<String>,

    /// Results per page requested from the server
    #[arg(long)]
    pub page_size: Option<u32>,

    #[command(flatten)]
    pub list: ListArgs,
}

impl HistoryFilterArgs {
    fn query(&self) -> HistoryQuery {
        let mut query = HistoryQuery::default();
        if let Some(ticker) = &self.ticker {
            query = query.with_ticker(ticker);
        }
        if let Some(page_size) = self.page_size {
            query = query.with_limit(page_size);
        }
        query
    }
}

pub async fn run(args: &HistoryArgs, client: &Client, format: OutputFormat) -> Result<()> {
    match &args.command {
        HistoryCommand::Dividends(filter) => {
            let dividends = client.get_dividends(&filter.query()).await?;
            let dividends = take(dividends, filter.list.max).await?;
            print(&dividends, build_dividend_rows(&dividends), format)
        }
        HistoryCommand::Orders(filter) => {
            let orders = client.get_historical_orders(&filter.query()).await?;
            let orders = take(orders, filter.list.max).await?;
            print(&orders, build_historical_order_rows(&orders), format)
        }
        HistoryCommand::Transactions(filter) => {
            let transactions = client.get_transactions(&filter.query()).await?;
            let transactions = take(transactions, filter.list.max).await?;
            print(&transactions, build_transaction_rows(&transactions), format)
        }
        HistoryCommand::Reports(list) => {
            let reports = take(client.list_reports().await?, list.max).await?;
            print(&reports, build_report_rows(&reports), format)
        }
    }
}
