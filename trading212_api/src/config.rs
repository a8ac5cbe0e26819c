//! Client configuration: target environment, credentials, timeout and retry ceiling.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use url::Url;

use crate::{secret::SecureString, Error};

/// Default per-request transport timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Default number of attempts for a call that keeps getting 408 or 429.
pub const DEFAULT_MAX_RETRIES: u32 = 10;

/// Page size forced on every request unless the caller sets `limit`.
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Trading 212 environment to talk to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Environment {
    /// Real-money account.
    Live,
    /// Practice account. This is the default.
    #[default]
    Demo,
}

impl Environment {
    pub fn base_url(&self) -> &'static str {
        match self {
            Environment::Live => "https://live.trading212.com",
            Environment::Demo => "https://demo.trading212.com",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Live => write!(f, "live"),
            Environment::Demo => write!(f, "demo"),
        }
    }
}

impl FromStr for Environment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "live" => Ok(Environment::Live),
            "demo" => Ok(Environment::Demo),
            other => Err(Error::InvalidConfig(format!(
                "unknown environment '{}', expected live or demo",
                other
            ))),
        }
    }
}

/// Settings for a [`Client`](crate::Client).
#[derive(Debug)]
pub struct ClientConfig {
    /// Scheme and host of the API. Endpoint paths are joined onto it.
    pub base_url: String,
    pub api_key: String,
    pub api_secret: SecureString,
    /// Transport timeout for a single HTTP attempt.
    pub timeout: Duration,
    /// Attempts allowed for a call answered with 408 or 429.
    pub max_retries: u32,
}

impl ClientConfig {
    pub fn new(
        environment: Environment,
        api_key: impl Into<String>,
        api_secret: impl Into<SecureString>,
    ) -> Self {
        Self {
            base_url: environment.base_url().to_string(),
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            timeout: DEFAULT_TIMEOUT,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    /// Reads the configuration from the process environment.
    ///
    /// - `TRADING212_API_KEY` and `TRADING212_API_SECRET` (required)
    /// - `TRADING212_ENVIRONMENT`: `live` or `demo` (default `demo`)
    /// - `TRADING212_BASE_URL`: overrides the environment's URL
    /// - `TRADING212_MAX_RETRIES`: retry ceiling (default 10)
    pub fn from_env() -> Result<Self, Error> {
        let api_key = required_env("TRADING212_API_KEY")?;
        let api_secret = required_env("TRADING212_API_SECRET")?;
        let environment = match std::env::var("TRADING212_ENVIRONMENT") {
            Ok(value) => value.parse()?,
            Err(_) => Environment::default(),
        };

        let mut config = Self::new(environment, api_key, api_secret);
        if let Ok(base_url) = std::env::var("TRADING212_BASE_URL") {
            config = config.with_base_url(&base_url);
        }
        if let Ok(raw) = std::env::var("TRADING212_MAX_RETRIES") {
            config = config.with_max_retries(parse_u32("TRADING212_MAX_RETRIES", &raw)?);
        }
        Ok(config)
    }

    /// Points the client at a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Checks the settings and returns the parsed base URL.
    pub(crate) fn validate(&self) -> Result<Url, Error> {
        if self.base_url.is_empty() {
            return Err(Error::InvalidConfig("base URL should not be empty".into()));
        }
        if self.api_key.is_empty() {
            return Err(Error::InvalidConfig("API key should not be empty".into()));
        }
        if self.api_secret.is_empty() {
            return Err(Error::InvalidConfig(
                "API secret should not be empty".into(),
            ));
        }
        let url = Url::parse(&self.base_url).map_err(|e| {
            Error::InvalidConfig(format!("base URL '{}' is invalid: {}", self.base_url, e))
        })?;
        if url.cannot_be_a_base() {
            return Err(Error::InvalidConfig(format!(
                "base URL '{}' cannot be used as a base",
                self.base_url
            )));
        }
        Ok(url)
    }
}

fn required_env(key: &str) -> Result<String, Error> {
    std::env::var(key)
        .map_err(|_| Error::InvalidConfig(format!("{} is not set", key)))
}

fn parse_u32(key: &str, raw: &str) -> Result<u32, Error> {
    raw.trim().parse::<u32>().map_err(|_| {
        Error::InvalidConfig(format!(
            "{} should be a non-negative integer, got '{}'",
            key, raw
        ))
    })
}
