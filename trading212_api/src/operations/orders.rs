use reqwest::Method;

use crate::{
    endpoints,
    response::Response,
    types::{
        LimitOrderRequest, MarketOrderRequest, Order, StopLimitOrderRequest, StopOrderRequest,
    },
    Client, Error,
};

impl Client {
    /// Lists orders that are not yet filled or cancelled.
    pub async fn get_pending_orders(&self) -> Result<Response<Order>, Error> {
        self.fetch(endpoints::ORDERS, None).await
    }

    pub async fn get_pending_order(&self, order_id: i64) -> Result<Order, Error> {
        self.fetch_one(&endpoints::order(order_id)).await
    }

    pub async fn place_limit_order(&self, order: &LimitOrderRequest) -> Result<Order, Error> {
        self.submit(Method::POST, endpoints::LIMIT_ORDER, order).await
    }

    /// Places a market order. A negative quantity sells.
    pub async fn place_market_order(&self, order: &MarketOrderRequest) -> Result<Order, Error> {
        self.submit(Method::POST, endpoints::MARKET_ORDER, order).await
    }

    pub async fn place_stop_order(&self, order: &StopOrderRequest) -> Result<Order, Error> {
        self.submit(Method::POST, endpoints::STOP_ORDER, order).await
    }

    pub async fn place_stop_limit_order(
        &self,
        order: &StopLimitOrderRequest,
    ) -> Result<Order, Error> {
        self.submit(Method::POST, endpoints::STOP_LIMIT_ORDER, order)
            .await
    }

    /// Cancels a pending order. Succeeds once the server accepted the
    /// cancellation, which may still be in progress.
    pub async fn cancel_order(&self, order_id: i64) -> Result<(), Error> {
        self.execute(Method::DELETE, &endpoints::order(order_id))
            .await
    }
}
