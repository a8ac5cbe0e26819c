mod client;
mod config;
pub mod endpoints;
mod errors;
mod operations;
mod query;
mod rate_limiter;
mod request;
mod response;
mod secret;
mod sleeper;
pub mod types;
pub use self::client::Client;
pub use self::config::{
    ClientConfig, Environment, DEFAULT_MAX_RETRIES, DEFAULT_PAGE_SIZE, DEFAULT_TIMEOUT,
};
pub use self::errors::Error;
pub use self::query::{HistoryQuery, Query, QueryCommon};
pub use self::rate_limiter::{RateLimiter, RateWindow};
pub use self::request::Request;
pub use self::response::Response;
pub use self::secret::SecureString;
pub use self::sleeper::{Sleeper, TokioSleeper};
pub use reqwest::Method;
