use url::Url;

use super::common::{Query, QueryCommon};

/// Filters for the historical events listings (dividends, orders, transactions).
#[derive(Clone, Debug, Default)]
pub struct HistoryQuery {
    pub common: QueryCommon,
    /// Restrict to one instrument, e.g. `AAPL_US_EQ`.
    pub ticker: Option<String>,
}

impl HistoryQuery {
    pub fn with_ticker(mut self, ticker: &str) -> Self {
        self.ticker = Some(ticker.to_string());
        self
    }
}

impl Query for HistoryQuery {
    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }

    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = self.common.add_to_url(url);
        if let Some(ticker) = &self.ticker {
            url.query_pairs_mut().append_pair("ticker", ticker);
        }
        url
    }
}
