use anyhow::Result;
use trading212_api::Client;

use super::{take, ListArgs};
use crate::output::{build_position_rows, print, OutputFormat};

pub async fn run(args: &ListArgs, client: &Client, format: OutputFormat) -> Result<()> {
    let positions = take(client.get_positions().await?, args.max).await?;
    print(&positions, build_position_rows(&positions), format)
}
