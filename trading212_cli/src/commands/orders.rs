use anyhow::Result;
use clap::{Args, Subcommand, ValueEnum};
use trading212_api::types::{
    LimitOrderRequest, MarketOrderRequest, StopLimitOrderRequest, StopOrderRequest, TimeInForce,
};
use trading212_api::Client;

use super::{take, ListArgs};
use crate::output::{build_order_rows, print, OutputFormat};

#[derive(Args)]
pub struct OrdersArgs {
    #[command(subcommand)]
    pub command: OrdersCommand,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Validity {
    /// Expires at the end of the trading day
    Day,
    /// Stays active until cancelled
    Gtc,
}

impl From<Validity> for TimeInForce {
    fn from(validity: Validity) -> Self {
        match validity {
            Validity::Day => TimeInForce::Day,
            Validity::Gtc => TimeInForce::GoodTillCancel,
        }
    }
}

#[derive(Subcommand)]
pub enum OrdersCommand {
    /// List pending orders
    List(ListArgs),
    /// Show one pending order
    Get {
        /// Order ID
        id: i64,
    },
    /// Cancel a pending order
    Cancel {
        /// Order ID
        id: i64,
    },
    /// Place a market order (negative quantity sells)
    Market {
        #[arg(long)]
        ticker: String,
        #[arg(long, allow_negative_numbers = true)]
        quantity: f64,
        /// Allow execution outside regular trading hours
        #[arg(long)]
        extended_hours: bool,
    },
    /// Place a limit order (negative quantity sells)
    Limit {
        #[arg(long)]
        ticker: String,
        #[arg(long, allow_negative_numbers = true)]
        quantity: f64,
        #[arg(long)]
        limit_price: f64,
        #[arg(long, value_enum, default_value_t = Validity::Day)]
        validity: Validity,
    },
    /// Place a stop order (negative quantity sells)
    Stop {
        #[arg(long)]
        ticker: String,
        #[arg(long, allow_negative_numbers = true)]
        quantity: f64,
        #[arg(long)]
        stop_price: f64,
        #[arg(long, value_enum, default_value_t = Validity::Day)]
        validity: Validity,
    },
    /// Place a stop-limit order (negative quantity sells)
    StopLimit {
        #[arg(long)]
        ticker: String,
        #[arg(long, allow_negative_numbers = true)]
        quantity: f64,
        #[arg(long)]
        stop_price: f64,
        #[arg(long)]
        limit_price: f64,
        #[arg(long, value_enum, default_value_t = Validity::Day)]
        validity: Validity,
    },
}

pub async fn run(args: &OrdersArgs, client: &Client, format: OutputFormat) -> Result<()> {
    let order = match &args.command {
        OrdersCommand::List(list) => {
            let orders = take(client.get_pending_orders().await?, list.max).await?;
            return print(&orders, build_order_rows(&orders), format);
        }
        OrdersCommand::Cancel { id } => {
            client.cancel_order(*id).await?;
            tracing::info!("Cancellation of order {} requested", id);
            return Ok(());
        }
        OrdersCommand::Get { id } => client.get_pending_order(*id).await?,
        OrdersCommand::Market {
            ticker,
            quantity,
            extended_hours,
        } => {
            client
                .place_market_order(&MarketOrderRequest {
                    ticker: ticker.clone(),
                    quantity: *quantity,
                    extended_hours: *extended_hours,
                })
                .await?
        }
        OrdersCommand::Limit {
            ticker,
            quantity,
            limit_price,
            validity,
        } => {
            client
                .place_limit_order(&LimitOrderRequest {
                    ticker: ticker.clone(),
                    quantity: *quantity,
                    limit_price: *limit_price,
                    time_in_force: (*validity).into(),
                })
                .await?
        }
        OrdersCommand::Stop {
            ticker,
            quantity,
            stop_price,
            validity,
        } => {
            client
                .place_stop_order(&StopOrderRequest {
                    ticker: ticker.clone(),
                    quantity: *quantity,
                    stop_price: *stop_price,
                    time_in_force: (*validity).into(),
                })
                .await?
        }
        OrdersCommand::StopLimit {
            ticker,
            quantity,
            stop_price,
            limit_price,
            validity,
        } => {
            client
                .place_stop_limit_order(&StopLimitOrderRequest {
                    ticker: ticker.clone(),
                    quantity: *quantity,
                    stop_price: *stop_price,
                    limit_price: *limit_price,
                    time_in_force: (*validity).into(),
                })
                .await?
        }
    };
    let orders = [order];
    print(&orders, build_order_rows(&orders), format)
}
