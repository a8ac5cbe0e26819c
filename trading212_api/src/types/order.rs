use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::instrument::InstrumentRef;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderSide {
    Buy,
    Sell,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderType {
    Limit,
    Stop,
    Market,
    StopLimit,
}

/// How long an order stays active.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimeInForce {
    /// Expires at midnight in the exchange's time zone.
    #[default]
    Day,
    GoodTillCancel,
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderSide::Buy => write!(f, "BUY"),
            OrderSide::Sell => write!(f, "SELL"),
        }
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderType::Limit => write!(f, "LIMIT"),
            OrderType::Stop => write!(f, "STOP"),
            OrderType::Market => write!(f, "MARKET"),
            OrderType::StopLimit => write!(f, "STOP_LIMIT"),
        }
    }
}

/// An equity order, pending or historical.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: i64,

    pub ticker: String,

    pub instrument: Option<InstrumentRef>,

    #[serde(rename = "type")]
    pub order_type: OrderType,

    pub side: Option<OrderSide>,

    /// `NEW`, `CONFIRMED`, `PARTIALLY_FILLED`, `FILLED`, `CANCELLED`, ...
    pub status: String,

    /// `QUANTITY` or `VALUE`.
    pub strategy: Option<String>,

    /// Negative for sell orders.
    pub quantity: Option<f64>,

    #[serde(default)]
    pub filled_quantity: f64,

    pub value: Option<f64>,

    pub filled_value: Option<f64>,

    pub limit_price: Option<f64>,

    pub stop_price: Option<f64>,

    pub time_in_force: Option<TimeInForce>,

    pub currency: Option<String>,

    #[serde(default)]
    pub extended_hours: bool,

    /// `API`, `IOS`, `ANDROID`, `WEB`, `SYSTEM` or `AUTOINVEST`.
    pub initiated_from: Option<String>,

    pub created_at: Option<DateTime<Utc>>,
}

/// Body of `POST /orders/market`. A negative quantity sells.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketOrderRequest {
    pub ticker: String,

    pub quantity: f64,

    /// Allow filling outside the regular session.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub extended_hours: bool,
}

/// Body of `POST /orders/limit`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LimitOrderRequest {
    pub ticker: String,

    pub quantity: f64,

    pub limit_price: f64,

    pub time_in_force: TimeInForce,
}

/// Body of `POST /orders/stop`. Triggers a market order at the stop price.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopOrderRequest {
    pub ticker: String,

    pub quantity: f64,

    pub stop_price: f64,

    pub time_in_force: TimeInForce,
}

/// Body of `POST /orders/stop_limit`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopLimitOrderRequest {
    pub ticker: String,

    pub quantity: f64,

    pub stop_price: f64,

    pub limit_price: f64,

    pub time_in_force: TimeInForce,
}
