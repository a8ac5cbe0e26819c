//! HTTP client for the Trading 212 equity API.

use std::sync::Arc;

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::{
    config::{ClientConfig, Environment},
    query::Query,
    rate_limiter::RateLimiter,
    request::{json_body, Executor},
    response::Response,
    secret::SecureString,
    sleeper::{Sleeper, TokioSleeper},
    Error,
};

/// HTTP client for the Trading 212 equity API.
///
/// Every call is authenticated with the configured key pair, throttled
/// against the rate windows the server announced for its path, and retried
/// on 408 and 429. Clones share one executor and rate limiter.
#[derive(Clone)]
pub struct Client {
    executor: Arc<Executor>,
}

impl Client {
    /// Creates a client from a validated configuration.
    pub fn new(config: ClientConfig) -> Result<Self, Error> {
        Self::with_sleeper(config, Arc::new(TokioSleeper))
    }

    /// Creates a client whose throttle and backoff waits go through `sleeper`.
    pub fn with_sleeper(config: ClientConfig, sleeper: Arc<dyn Sleeper>) -> Result<Self, Error> {
        let executor = Executor::new(config, sleeper)?;
        Ok(Self {
            executor: Arc::new(executor),
        })
    }

    /// Creates a client for the real-money environment.
    pub fn live(
        api_key: impl Into<String>,
        api_secret: impl Into<SecureString>,
    ) -> Result<Self, Error> {
        Self::new(ClientConfig::new(Environment::Live, api_key, api_secret))
    }

    /// Creates a client for the practice environment.
    pub fn demo(
        api_key: impl Into<String>,
        api_secret: impl Into<SecureString>,
    ) -> Result<Self, Error> {
        Self::new(ClientConfig::new(Environment::Demo, api_key, api_secret))
    }

    /// Rate windows observed so far, keyed by request path.
    pub fn rate_limiter(&self) -> &RateLimiter {
        self.executor.rate_limiter()
    }

    /// Sends an arbitrary request and returns its elements as a lazy sequence.
    ///
    /// `path` is resolved against the base URL. Useful for endpoints this
    /// crate has no typed operation for.
    pub async fn request<T, B>(
        &self,
        method: Method,
        path: &str,
        query: Option<&dyn Query>,
        body: Option<&B>,
    ) -> Result<Response<T>, Error>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = body.map(json_body).transpose()?;
        self.call(method, path, query, body).await
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: Option<&dyn Query>,
        body: Option<Vec<u8>>,
    ) -> Result<Response<T>, Error> {
        let mut request = self.executor.request(method, path, query, body)?;
        let raw = self.executor.send(&mut request).await?;
        Response::decode(&raw, self.executor.clone(), request)
    }

    /// GETs a listing.
    pub(crate) async fn fetch<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Option<&dyn Query>,
    ) -> Result<Response<T>, Error> {
        self.call(Method::GET, path, query, None).await
    }

    /// GETs a single object.
    pub(crate) async fn fetch_one<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        self.fetch(path, None).await?.first().await
    }

    /// Sends `body` as JSON and decodes the single object returned.
    pub(crate) async fn submit<T, B>(&self, method: Method, path: &str, body: &B) -> Result<T, Error>
    where
        T: DeserializeOwned,
        B: Serialize,
    {
        let body = json_body(body)?;
        self.call(method, path, None, Some(body)).await?.first().await
    }

    /// Sends a request whose response body is of no interest.
    pub(crate) async fn execute(&self, method: Method, path: &str) -> Result<(), Error> {
        let mut request = self.executor.request(method, path, None, None)?;
        self.executor.send(&mut request).await?;
        Ok(())
    }
}
