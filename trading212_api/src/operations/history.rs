use reqwest::Method;

use crate::{
    endpoints,
    query::HistoryQuery,
    response::Response,
    types::{Dividend, HistoricalOrder, Report, ReportId, ReportRequest, Transaction},
    Client, Error,
};

impl Client {
    /// Lists paid-out dividends, newest first, following `nextPagePath`.
    pub async fn get_dividends(&self, query: &HistoryQuery) -> Result<Response<Dividend>, Error> {
        self.fetch(endpoints::DIVIDENDS, Some(query)).await
    }

    /// Lists filled and cancelled orders together with their fills.
    pub async fn get_historical_orders(
        &self,
        query: &HistoryQuery,
    ) -> Result<Response<HistoricalOrder>, Error> {
        self.fetch(endpoints::HISTORICAL_ORDERS, Some(query)).await
    }

    /// Lists deposits, withdrawals, fees and transfers.
    pub async fn get_transactions(
        &self,
        query: &HistoryQuery,
    ) -> Result<Response<Transaction>, Error> {
        self.fetch(endpoints::TRANSACTIONS, Some(query)).await
    }

    /// Lists requested CSV exports and their status.
    pub async fn list_reports(&self) -> Result<Response<Report>, Error> {
        self.fetch(endpoints::EXPORTS, None).await
    }

    /// Queues a CSV export. Poll [`Client::list_reports`] for the download link.
    pub async fn request_report(&self, report: &ReportRequest) -> Result<ReportId, Error> {
        self.submit(Method::POST, endpoints::EXPORTS, report).await
    }
}
