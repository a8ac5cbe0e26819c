//! Endpoint paths of the equity API, relative to the base URL.

const BASE: &str = "/api/v0/equity";

pub const ACCOUNT_SUMMARY: &str = "/api/v0/equity/account/summary";

pub const EXCHANGES_METADATA: &str = "/api/v0/equity/metadata/exchanges";
pub const INSTRUMENTS: &str = "/api/v0/equity/metadata/instruments";

pub const ORDERS: &str = "/api/v0/equity/orders";
pub const LIMIT_ORDER: &str = "/api/v0/equity/orders/limit";
pub const MARKET_ORDER: &str = "/api/v0/equity/orders/market";
pub const STOP_ORDER: &str = "/api/v0/equity/orders/stop";
pub const STOP_LIMIT_ORDER: &str = "/api/v0/equity/orders/stop_limit";

pub const POSITIONS: &str = "/api/v0/equity/positions";

pub const DIVIDENDS: &str = "/api/v0/equity/history/dividends";
pub const HISTORICAL_ORDERS: &str = "/api/v0/equity/history/orders";
pub const TRANSACTIONS: &str = "/api/v0/equity/history/transactions";
pub const EXPORTS: &str = "/api/v0/equity/history/exports";

pub const PIES: &str = "/api/v0/equity/pies";

/// `/orders/{id}`, used to fetch or cancel one pending order.
pub fn order(id: i64) -> String {
    format!("{}/orders/{}", BASE, id)
}

/// `/pies/{id}`, used to fetch, update or delete one pie.
pub fn pie(id: u64) -> String {
    format!("{}/pies/{}", BASE, id)
}

/// `/pies/{id}/duplicate`.
pub fn duplicate_pie(id: u64) -> String {
    format!("{}/pies/{}/duplicate", BASE, id)
}
