use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};
use trading212_api::types::{
    AccountSummary, Dividend, ExchangeMetadata, HistoricalOrder, Instrument, Order, PieDetails,
    PieSummary, Position, Report, Transaction,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    Markdown,
}

#[derive(Tabled, Serialize)]
pub struct AccountRow {
    #[tabled(rename = "Currency")]
    #[serde(rename = "Currency")]
    currency: String,
    #[tabled(rename = "Total")]
    #[serde(rename = "Total")]
    total: String,
    #[tabled(rename = "Free Cash")]
    #[serde(rename = "Free Cash")]
    free_cash: String,
    #[tabled(rename = "Invested")]
    #[serde(rename = "Invested")]
    invested: String,
    #[tabled(rename = "Unrealized P&L")]
    #[serde(rename = "Unrealized P&L")]
    unrealized: String,
}

#[derive(Tabled, Serialize)]
pub struct PositionRow {
    #[tabled(rename = "Ticker")]
    #[serde(rename = "Ticker")]
    ticker: String,
    #[tabled(rename = "Quantity")]
    #[serde(rename = "Quantity")]
    quantity: String,
    #[tabled(rename = "Avg Price")]
    #[serde(rename = "Avg Price")]
    average_price: String,
    #[tabled(rename = "Price")]
    #[serde(rename = "Price")]
    current_price: String,
    #[tabled(rename = "Value")]
    #[serde(rename = "Value")]
    value: String,
    #[tabled(rename = "P&L")]
    #[serde(rename = "P&L")]
    profit_loss: String,
}

#[derive(Tabled, Serialize)]
pub struct OrderRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: i64,
    #[tabled(rename = "Ticker")]
    #[serde(rename = "Ticker")]
    ticker: String,
    #[tabled(rename = "Type")]
    #[serde(rename = "Type")]
    order_type: String,
    #[tabled(rename = "Quantity")]
    #[serde(rename = "Quantity")]
    quantity: String,
    #[tabled(rename = "Limit")]
    #[serde(rename = "Limit")]
    limit_price: String,
    #[tabled(rename = "Stop")]
    #[serde(rename = "Stop")]
    stop_price: String,
    #[tabled(rename = "Status")]
    #[serde(rename = "Status")]
    status: String,
}

#[derive(Tabled, Serialize)]
pub struct InstrumentRow {
    #[tabled(rename = "Ticker")]
    #[serde(rename = "Ticker")]
    ticker: String,
    #[tabled(rename = "Name")]
    #[serde(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    #[serde(rename = "Type")]
    instrument_type: String,
    #[tabled(rename = "Currency")]
    #[serde(rename = "Currency")]
    currency: String,
    #[tabled(rename = "ISIN")]
    #[serde(rename = "ISIN")]
    isin: String,
}

#[derive(Tabled, Serialize)]
pub struct ExchangeRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: u64,
    #[tabled(rename = "Name")]
    #[serde(rename = "Name")]
    name: String,
    #[tabled(rename = "Schedules")]
    #[serde(rename = "Schedules")]
    schedules: usize,
}

#[derive(Tabled, Serialize)]
pub struct DividendRow {
    #[tabled(rename = "Paid On")]
    #[serde(rename = "Paid On")]
    paid_on: String,
    #[tabled(rename = "Ticker")]
    #[serde(rename = "Ticker")]
    ticker: String,
    #[tabled(rename = "Amount")]
    #[serde(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Per Share")]
    #[serde(rename = "Per Share")]
    per_share: String,
    #[tabled(rename = "Quantity")]
    #[serde(rename = "Quantity")]
    quantity: String,
    #[tabled(rename = "Type")]
    #[serde(rename = "Type")]
    dividend_type: String,
}

#[derive(Tabled, Serialize)]
pub struct HistoricalOrderRow {
    #[tabled(rename = "Date")]
    #[serde(rename = "Date")]
    date: String,
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: i64,
    #[tabled(rename = "Ticker")]
    #[serde(rename = "Ticker")]
    ticker: String,
    #[tabled(rename = "Type")]
    #[serde(rename = "Type")]
    order_type: String,
    #[tabled(rename = "Status")]
    #[serde(rename = "Status")]
    status: String,
    #[tabled(rename = "Filled")]
    #[serde(rename = "Filled")]
    filled_quantity: String,
    #[tabled(rename = "Fill Price")]
    #[serde(rename = "Fill Price")]
    fill_price: String,
}

#[derive(Tabled, Serialize)]
pub struct TransactionRow {
    #[tabled(rename = "Date")]
    #[serde(rename = "Date")]
    date: String,
    #[tabled(rename = "Type")]
    #[serde(rename = "Type")]
    transaction_type: String,
    #[tabled(rename = "Amount")]
    #[serde(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Reference")]
    #[serde(rename = "Reference")]
    reference: String,
}

#[derive(Tabled, Serialize)]
pub struct ReportRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: u64,
    #[tabled(rename = "From")]
    #[serde(rename = "From")]
    from: String,
    #[tabled(rename = "To")]
    #[serde(rename = "To")]
    to: String,
    #[tabled(rename = "Status")]
    #[serde(rename = "Status")]
    status: String,
    #[tabled(rename = "Download")]
    #[serde(rename = "Download")]
    download_link: String,
}

#[derive(Tabled, Serialize)]
pub struct PieRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: u64,
    #[tabled(rename = "Cash")]
    #[serde(rename = "Cash")]
    cash: String,
    #[tabled(rename = "Invested")]
    #[serde(rename = "Invested")]
    invested: String,
    #[tabled(rename = "Value")]
    #[serde(rename = "Value")]
    value: String,
    #[tabled(rename = "Result")]
    #[serde(rename = "Result")]
    result: String,
    #[tabled(rename = "Status")]
    #[serde(rename = "Status")]
    status: String,
}

#[derive(Tabled, Serialize)]
pub struct PieInstrumentRow {
    #[tabled(rename = "Ticker")]
    #[serde(rename = "Ticker")]
    ticker: String,
    #[tabled(rename = "Expected")]
    #[serde(rename = "Expected")]
    expected_share: String,
    #[tabled(rename = "Current")]
    #[serde(rename = "Current")]
    current_share: String,
    #[tabled(rename = "Owned")]
    #[serde(rename = "Owned")]
    owned_quantity: String,
    #[tabled(rename = "Value")]
    #[serde(rename = "Value")]
    value: String,
}

// -- Row builders --

pub fn build_account_rows(summaries: &[AccountSummary]) -> Vec<AccountRow> {
    summaries
        .iter()
        .map(|s| AccountRow {
            currency: s.currency.clone(),
            total: format_amount(s.total_value),
            free_cash: format_amount(s.cash.available_to_trade),
            invested: format_amount(s.investments.current_value),
            unrealized: format_amount(s.investments.unrealized_profit_loss),
        })
        .collect()
}

pub fn build_position_rows(positions: &[Position]) -> Vec<PositionRow> {
    positions
        .iter()
        .map(|p| PositionRow {
            ticker: p.instrument.ticker.clone(),
            quantity: format_quantity(p.quantity),
            average_price: format_amount(p.average_price_paid),
            current_price: format_amount(p.current_price),
            value: format!(
                "{} {}",
                format_amount(p.wallet_impact.current_value),
                p.wallet_impact.currency
            ),
            profit_loss: format_amount(p.wallet_impact.unrealized_profit_loss),
        })
        .collect()
}

pub fn build_order_rows(orders: &[Order]) -> Vec<OrderRow> {
    orders
        .iter()
        .map(|o| OrderRow {
            id: o.id,
            ticker: o.ticker.clone(),
            order_type: o.order_type.to_string(),
            quantity: o.quantity.map(format_quantity).unwrap_or_else(|| {
                o.value
                    .map(|v| format!("value {}", format_amount(v)))
                    .unwrap_or_else(|| "-".to_string())
            }),
            limit_price: format_optional(o.limit_price),
            stop_price: format_optional(o.stop_price),
            status: o.status.clone(),
        })
        .collect()
}

pub fn build_instrument_rows(instruments: &[Instrument]) -> Vec<InstrumentRow> {
    instruments
        .iter()
        .map(|i| InstrumentRow {
            ticker: i.ticker.clone(),
            name: i.name.clone(),
            instrument_type: i.instrument_type.clone(),
            currency: i.currency_code.clone(),
            isin: i.isin.clone(),
        })
        .collect()
}

pub fn build_exchange_rows(exchanges: &[ExchangeMetadata]) -> Vec<ExchangeRow> {
    exchanges
        .iter()
        .map(|e| ExchangeRow {
            id: e.id,
            name: e.name.clone(),
            schedules: e.working_schedules.len(),
        })
        .collect()
}

pub fn build_dividend_rows(dividends: &[Dividend]) -> Vec<DividendRow> {
    dividends
        .iter()
        .map(|d| DividendRow {
            paid_on: format_date(&d.paid_on),
            ticker: d.ticker.clone(),
            amount: format_amount(d.amount),
            per_share: format_amount(d.gross_amount_per_share),
            quantity: format_quantity(d.quantity),
            dividend_type: d.dividend_type.clone(),
        })
        .collect()
}

pub fn build_historical_order_rows(orders: &[HistoricalOrder]) -> Vec<HistoricalOrderRow> {
    orders
        .iter()
        .map(|h| HistoricalOrderRow {
            date: h
                .fill
                .as_ref()
                .map(|f| f.filled_at)
                .or(h.order.created_at)
                .map(|d| format_date(&d))
                .unwrap_or_else(|| "-".to_string()),
            id: h.order.id,
            ticker: h.order.ticker.clone(),
            order_type: h.order.order_type.to_string(),
            status: h.order.status.clone(),
            filled_quantity: format_quantity(h.order.filled_quantity),
            fill_price: format_optional(h.fill.as_ref().map(|f| f.price)),
        })
        .collect()
}

pub fn build_transaction_rows(transactions: &[Transaction]) -> Vec<TransactionRow> {
    transactions
        .iter()
        .map(|t| TransactionRow {
            date: format_date(&t.date_time),
            transaction_type: t.transaction_type.clone(),
            amount: match &t.currency {
                Some(currency) => format!("{} {}", format_amount(t.amount), currency),
                None => format_amount(t.amount),
            },
            reference: t.reference.clone(),
        })
        .collect()
}

pub fn build_report_rows(reports: &[Report]) -> Vec<ReportRow> {
    reports
        .iter()
        .map(|r| ReportRow {
            id: r.report_id,
            from: format_date(&r.time_from),
            to: format_date(&r.time_to),
            status: r.status.clone(),
            download_link: r.download_link.clone().unwrap_or_default(),
        })
        .collect()
}

pub fn build_pie_rows(pies: &[PieSummary]) -> Vec<PieRow> {
    pies.iter()
        .map(|p| PieRow {
            id: p.id,
            cash: format_amount(p.cash),
            invested: format_amount(p.result.price_avg_invested_value),
            value: format_amount(p.result.price_avg_value),
            result: format_percent(p.result.price_avg_result_coef),
            status: p.status.clone().unwrap_or_default(),
        })
        .collect()
}

pub fn build_pie_instrument_rows(pie: &PieDetails) -> Vec<PieInstrumentRow> {
    pie.instruments
        .iter()
        .map(|i| PieInstrumentRow {
            ticker: i.ticker.clone(),
            expected_share: format_percent(i.expected_share),
            current_share: format_percent(i.current_share),
            owned_quantity: format_quantity(i.owned_quantity),
            value: format_amount(i.result.price_avg_value),
        })
        .collect()
}

// -- Output --

/// Prints `items` in the requested format. JSON prints the API models
/// as-is; the other formats print the rows built from them.
pub fn print<T, R>(items: &[T], rows: Vec<R>, format: OutputFormat) -> Result<()>
where
    T: Serialize,
    R: Tabled + Serialize,
{
    match format {
        OutputFormat::Table => println!("{}", Table::new(rows)),
        OutputFormat::Markdown => {
            let mut table = Table::new(rows);
            table.with(Style::markdown());
            println!("{}", table);
        }
        OutputFormat::Csv => print_csv(&rows)?,
        OutputFormat::Json => print_json(&items),
    }
    Ok(())
}

fn print_csv<R: Serialize>(rows: &[R]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn print_json<T: Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

fn format_amount(value: f64) -> String {
    format!("{:.2}", value)
}

/// Fractional shares are shown with up to 4 decimals, trailing zeros trimmed.
fn format_quantity(value: f64) -> String {
    let formatted = format!("{:.4}", value);
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "-0" | "" => "0".to_string(),
        other => other.to_string(),
    }
}

fn format_optional(value: Option<f64>) -> String {
    value.map(format_amount).unwrap_or_else(|| "-".to_string())
}

fn format_percent(coef: f64) -> String {
    format!("{:.2}%", coef * 100.0)
}

fn format_date(date: &DateTime<Utc>) -> String {
    date.format("%Y-%m-%d %H:%M").to_string()
}
