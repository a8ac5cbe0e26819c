use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What to do with dividends paid into a pie.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DividendCashAction {
    #[default]
    Reinvest,
    ToAccountCash,
}

/// A pie as listed by `GET /pies`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PieSummary {
    pub id: u64,

    pub cash: f64,

    pub dividend_details: DividendDetails,

    pub progress: Option<f64>,

    pub result: PieResult,

    /// `AHEAD`, `ON_TRACK` or `BEHIND`.
    pub status: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DividendDetails {
    pub gained: f64,

    pub in_cash: f64,

    pub reinvested: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PieResult {
    pub price_avg_invested_value: f64,

    pub price_avg_result: f64,

    pub price_avg_result_coef: f64,

    pub price_avg_value: f64,
}

/// A pie with its instruments and settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PieDetails {
    pub instruments: Vec<PieInstrument>,

    pub settings: PieSettings,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PieInstrument {
    pub ticker: String,

    pub current_share: f64,

    pub expected_share: f64,

    pub owned_quantity: f64,

    pub result: PieResult,

    #[serde(default)]
    pub issues: Vec<PieIssue>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PieIssue {
    pub name: String,

    pub severity: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PieSettings {
    pub id: u64,

    pub name: String,

    pub icon: Option<String>,

    pub goal: Option<f64>,

    pub initial_investment: Option<f64>,

    pub dividend_cash_action: Option<DividendCashAction>,

    pub creation_date: Option<DateTime<Utc>>,

    pub end_date: Option<DateTime<Utc>>,

    /// Target weight per ticker.
    #[serde(default)]
    pub instrument_shares: HashMap<String, f64>,

    pub public_url: Option<String>,
}

/// Name and icon of a pie. Body of `POST /pies/{id}/duplicate`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PieMetaRequest {
    pub name: String,

    pub icon: String,
}

/// Body of `POST /pies` and `POST /pies/{id}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PieRequest {
    #[serde(flatten)]
    pub meta: PieMetaRequest,

    pub dividend_cash_action: DividendCashAction,

    pub end_date: Option<DateTime<Utc>>,

    pub goal: Option<f64>,

    /// Target weight per ticker; weights should sum to 1.
    pub instrument_shares: HashMap<String, f64>,
}
