use crate::{endpoints, types::AccountSummary, Client, Error};

impl Client {
    /// Fetches cash, investment totals and currency of the account.
    pub async fn get_account_summary(&self) -> Result<AccountSummary, Error> {
        self.fetch_one(endpoints::ACCOUNT_SUMMARY).await
    }
}
