use anyhow::Result;
use trading212_api::Client;

use crate::output::{build_account_rows, print, OutputFormat};

pub async fn run(client: &Client, format: OutputFormat) -> Result<()> {
    let summary = client.get_account_summary().await?;
    let summaries = [summary];
    print(&summaries, build_account_rows(&summaries), format)
}
