use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Summary of an instrument as embedded in orders, positions and dividends.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstrumentRef {
    pub ticker: String,

    pub name: String,

    pub isin: String,

    /// Instrument currency (ISO 4217).
    pub currency: String,
}

/// A tradable instrument from `/metadata/instruments`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instrument {
    /// Unique identifier, e.g. `AAPL_US_EQ`.
    pub ticker: String,

    #[serde(rename = "type")]
    pub instrument_type: String,

    pub working_schedule_id: u64,

    pub isin: String,

    pub currency_code: String,

    pub name: String,

    pub short_name: Option<String>,

    pub max_open_quantity: Option<f64>,

    #[serde(default)]
    pub extended_hours: bool,

    /// On the platform since.
    pub added_on: Option<DateTime<Utc>>,
}

/// An exchange and its working schedules, from `/metadata/exchanges`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeMetadata {
    pub id: u64,

    pub name: String,

    pub working_schedules: Vec<WorkingSchedule>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkingSchedule {
    pub id: u64,

    pub time_events: Vec<TimeEvent>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeEvent {
    pub date: DateTime<Utc>,

    /// `OPEN`, `CLOSE`, `BREAK_START`, `PRE_MARKET_OPEN`, ...
    #[serde(rename = "type")]
    pub event_type: String,
}
