//! Request execution: authentication, throttling, retries and status classification.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, StatusCode};
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::{
    config::{ClientConfig, DEFAULT_PAGE_SIZE},
    query::Query,
    rate_limiter::RateLimiter,
    secret::SecureString,
    sleeper::Sleeper,
    Error,
};

/// One API call: target URL (with query), body and retry bookkeeping.
///
/// A request is re-sent as-is on retry, and re-sent with a new `cursor`
/// query parameter when a paginated response asks for its next page.
#[derive(Debug)]
pub struct Request {
    method: Method,
    url: Url,
    body: Option<Vec<u8>>,
    retries: u32,
    max_retries: u32,
    cancel: CancellationToken,
}

impl Request {
    fn new(method: Method, mut url: Url, body: Option<Vec<u8>>, max_retries: u32) -> Self {
        if !url.query_pairs().any(|(key, _)| key == "limit") {
            url.query_pairs_mut()
                .append_pair("limit", &DEFAULT_PAGE_SIZE.to_string());
        }
        Self {
            method,
            url,
            body,
            retries: 0,
            max_retries,
            cancel: CancellationToken::new(),
        }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Retries spent by the last send of this request.
    pub fn retries(&self) -> u32 {
        self.retries
    }

    /// The rate-limit bookkeeping key: the URL path without query parameters.
    pub fn rate_limit_path(&self) -> &str {
        self.url.path()
    }

    /// Token that aborts this request (and its page continuations) when cancelled.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Sets `key` to `value`, replacing any existing value and keeping the
    /// other parameters in place.
    pub(crate) fn set_query_param(&mut self, key: &str, value: &str) {
        let kept: Vec<(String, String)> = self
            .url
            .query_pairs()
            .filter(|(k, _)| k != key)
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        self.url
            .query_pairs_mut()
            .clear()
            .extend_pairs(kept)
            .append_pair(key, value);
    }
}

/// Sends requests for one client, sharing its rate limiter across calls.
pub(crate) struct Executor {
    http: reqwest::Client,
    base_url: Url,
    api_key: String,
    api_secret: SecureString,
    max_retries: u32,
    rate_limiter: RateLimiter,
    sleeper: Arc<dyn Sleeper>,
}

impl Executor {
    pub(crate) fn new(config: ClientConfig, sleeper: Arc<dyn Sleeper>) -> Result<Self, Error> {
        let base_url = config.validate()?;
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::InvalidConfig(e.to_string())
            })?;
        Ok(Self {
            http,
            base_url,
            api_key: config.api_key,
            api_secret: config.api_secret,
            max_retries: config.max_retries,
            rate_limiter: RateLimiter::new(sleeper.clone()),
            sleeper,
        })
    }

    pub(crate) fn rate_limiter(&self) -> &RateLimiter {
        &self.rate_limiter
    }

    /// Resolves `path` against the base URL and builds a request for it.
    pub(crate) fn request(
        &self,
        method: Method,
        path: &str,
        query: Option<&dyn Query>,
        body: Option<Vec<u8>>,
    ) -> Result<Request, Error> {
        let url = resolve(&self.base_url, path)?;
        let url = match query {
            Some(query) => query.add_to_url(&url),
            None => url,
        };
        Ok(Request::new(method, url, body, self.max_retries))
    }

    fn build(&self, request: &Request) -> Result<reqwest::Request, Error> {
        let mut builder = self
            .http
            .request(request.method.clone(), request.url.clone())
            .basic_auth(&self.api_key, Some(self.api_secret.expose()));
        if let Some(body) = &request.body {
            builder = builder
                .header(CONTENT_TYPE, "application/json")
                .body(body.clone());
        }
        builder.build().map_err(|e| {
            tracing::error!("Failed to build request: {}", e);
            Error::RequestBuildFailed(e.to_string())
        })
    }

    /// Sends `request` and returns the raw body of the first 2xx response.
    ///
    /// 408 and 429 are retried with a linear backoff (`n` seconds before the
    /// `n`-th retry) until the request's retry ceiling; every other failure
    /// is returned straight away. Rate-limit headers are recorded for every
    /// response, whatever its status.
    pub(crate) async fn send(&self, request: &mut Request) -> Result<Vec<u8>, Error> {
        let call = request.cancel.child_token();
        let _release = call.clone().drop_guard();
        let path = request.rate_limit_path().to_string();
        request.retries = 0;

        loop {
            tokio::select! {
                biased;
                _ = call.cancelled() => return Err(Error::Cancelled),
                _ = self.rate_limiter.throttle(&path) => {}
            }

            let http_request = self.build(request)?;
            let response = tokio::select! {
                biased;
                _ = call.cancelled() => return Err(Error::Cancelled),
                result = self.http.execute(http_request) => result.map_err(|e| {
                    tracing::error!("Failed to send request to {}: {}", path, e);
                    Error::Transport(e)
                })?,
            };

            let status = response.status();
            tracing::debug!("{} {} returned {}", request.method, path, status);

            if let Err(e) = self.rate_limiter.record(&path, response.headers()) {
                tracing::warn!("Failed to parse rate limits for {}: {}", path, e);
            }

            if is_retryable(status) {
                request.retries += 1;
                if request.retries < request.max_retries {
                    let backoff = Duration::from_secs(u64::from(request.retries));
                    tracing::warn!(
                        "{} returned {} (attempt {}/{}), retrying in {}s",
                        path,
                        status,
                        request.retries,
                        request.max_retries,
                        backoff.as_secs()
                    );
                    tokio::select! {
                        biased;
                        _ = call.cancelled() => return Err(Error::Cancelled),
                        _ = self.sleeper.sleep(backoff) => {}
                    }
                    continue;
                }
            }

            if !status.is_success() {
                tracing::error!("Request to {} failed with status {}", path, status);
                return Err(Error::from_status(status));
            }

            let body = response.bytes().await.map_err(|e| {
                tracing::error!("Failed to read response body: {}", e);
                Error::BodyReadFailed(e)
            })?;
            return Ok(body.to_vec());
        }
    }
}

/// Appends `path` to the base URL's own path, so a base like
/// `https://proxy.example/trading212` keeps its prefix.
fn resolve(base_url: &Url, path: &str) -> Result<Url, Error> {
    let joined = format!(
        "{}/{}",
        base_url.path().trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    base_url.join(&joined).map_err(|e| {
        tracing::error!("Invalid URL constructed for {}: {}", path, e);
        Error::RequestBuildFailed(e.to_string())
    })
}

fn is_retryable(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status == StatusCode::REQUEST_TIMEOUT
}

/// Serializes a request model to a JSON body.
pub(crate) fn json_body<B: Serialize + ?Sized>(body: &B) -> Result<Vec<u8>, Error> {
    serde_json::to_vec(body).map_err(Error::Encode)
}
