//! CLI subcommand implementations.

use anyhow::Result;
use clap::Args;
use serde::de::DeserializeOwned;
use trading212_api::Response;

pub mod account;
pub mod history;
pub mod instruments;
pub mod orders;
pub mod pies;
pub mod positions;

#[derive(Args)]
pub struct ListArgs {
    /// Stop after this many results
    #[arg(long)]
    pub max: Option<usize>,
}

/// Pulls up to `max` elements from a lazy listing. Pages past the last
/// element needed are never requested.
pub async fn take<T: DeserializeOwned>(
    mut response: Response<T>,
    max: Option<usize>,
) -> Result<Vec<T>> {
    let mut items = Vec::new();
    while max.map_or(true, |max| items.len() < max) {
        match response.next().await {
            Some(item) => items.push(item?),
            None => break,
        }
    }
    Ok(items)
}
