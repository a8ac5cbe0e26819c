use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::instrument::InstrumentRef;

/// An open position.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub instrument: InstrumentRef,

    pub quantity: f64,

    pub quantity_available_for_trading: f64,

    #[serde(default)]
    pub quantity_in_pies: f64,

    pub average_price_paid: f64,

    pub current_price: f64,

    pub created_at: Option<DateTime<Utc>>,

    pub wallet_impact: WalletImpact,
}

/// Value of a position in the account currency.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletImpact {
    pub currency: String,

    pub current_value: f64,

    pub total_cost: f64,

    pub unrealized_profit_loss: f64,

    #[serde(default)]
    pub fx_impact: f64,
}
