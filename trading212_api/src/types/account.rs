use serde::{Deserialize, Serialize};

/// Cash and investment breakdown of the primary trading account.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSummary {
    /// Same account ID as shown in the web and mobile apps.
    pub id: u64,

    /// ISO 4217 currency of the account.
    pub currency: String,

    pub total_value: f64,

    pub cash: Cash,

    pub investments: Investments,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cash {
    /// Funds available for investing.
    pub available_to_trade: f64,

    /// Reserved for pending orders.
    pub reserved_for_orders: f64,

    pub in_pies: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Investments {
    pub current_value: f64,

    /// Cost basis of the shares currently owned.
    pub total_cost: f64,

    pub realized_profit_loss: f64,

    pub unrealized_profit_loss: f64,
}
