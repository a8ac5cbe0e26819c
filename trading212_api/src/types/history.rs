use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{instrument::InstrumentRef, order::Order};

/// A paid-out dividend.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dividend {
    pub ticker: String,

    pub instrument: Option<InstrumentRef>,

    pub reference: String,

    /// In the account currency.
    pub amount: f64,

    pub amount_in_euro: Option<f64>,

    pub currency: Option<String>,

    /// In the instrument currency.
    pub gross_amount_per_share: f64,

    pub quantity: f64,

    pub paid_on: DateTime<Utc>,

    pub ticker_currency: Option<String>,

    /// `ORDINARY`, `BONUS`, `INTEREST`, `RETURN_OF_CAPITAL`, ...
    #[serde(rename = "type")]
    pub dividend_type: String,
}

/// A historical order together with its fill.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalOrder {
    pub order: Order,

    pub fill: Option<Fill>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fill {
    pub id: i64,

    pub filled_at: DateTime<Utc>,

    pub price: f64,

    pub quantity: f64,

    pub trading_method: Option<String>,

    #[serde(rename = "type")]
    pub fill_type: Option<String>,

    pub wallet_impact: Option<FillWalletImpact>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FillWalletImpact {
    pub currency: String,

    pub fx_rate: f64,

    pub net_value: f64,

    pub realised_profit_loss: Option<f64>,

    #[serde(default)]
    pub taxes: Vec<Tax>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tax {
    pub name: String,

    pub quantity: f64,

    pub currency: String,

    pub charged_at: Option<DateTime<Utc>>,
}

/// A cash movement to or from the account.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// `DEPOSIT`, `WITHDRAW`, `FEE` or `TRANSFER`.
    #[serde(rename = "type")]
    pub transaction_type: String,

    pub amount: f64,

    pub currency: Option<String>,

    pub reference: String,

    pub date_time: DateTime<Utc>,
}

/// Identifier returned when requesting a CSV export.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportId {
    pub report_id: u64,
}

/// Which data sets to include in a CSV export.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataIncluded {
    pub include_dividends: bool,

    pub include_interest: bool,

    pub include_orders: bool,

    pub include_transactions: bool,
}

/// Status of a requested CSV export.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub report_id: u64,

    pub data_included: DataIncluded,

    pub time_from: DateTime<Utc>,

    pub time_to: DateTime<Utc>,

    /// `Queued`, `Processing`, `Running`, `Finished`, `Canceled` or `Failed`.
    pub status: String,

    /// Set once the report is finished.
    pub download_link: Option<String>,
}

/// Body of `POST /history/exports`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
    pub data_included: DataIncluded,

    pub time_from: DateTime<Utc>,

    pub time_to: DateTime<Utc>,
}
