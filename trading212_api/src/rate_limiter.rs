//! Per-endpoint rate limiter driven by server-supplied quota headers.
//!
//! Every response carries the `x-ratelimit-*` headers describing the quota
//! window of the endpoint that served it. The limiter keeps the most recent
//! snapshot per path and, before the next call to that path, sleeps until
//! the window resets if the snapshot says no calls are left. It never
//! guesses: without a recorded window, or with calls remaining, requests go
//! straight through.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::header::HeaderMap;

use crate::{sleeper::Sleeper, Error};

/// Total number of requests allowed in the current period.
pub const HEADER_LIMIT: &str = "x-ratelimit-limit";
/// Duration of the period, in seconds.
pub const HEADER_PERIOD: &str = "x-ratelimit-period";
/// Requests left in the current period.
pub const HEADER_REMAINING: &str = "x-ratelimit-remaining";
/// Unix timestamp at which the period resets.
pub const HEADER_RESET: &str = "x-ratelimit-reset";
/// Requests already made in the current period.
pub const HEADER_USED: &str = "x-ratelimit-used";

/// Quota state of one endpoint path, as last reported by the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateWindow {
    /// Maximum calls per period.
    pub limit: u64,
    pub period: Duration,
    /// Calls left before `reset_at`.
    pub remaining: u64,
    /// Absolute time the window refreshes.
    pub reset_at: DateTime<Utc>,
    pub used: u64,
}

impl RateWindow {
    /// Parses the five required rate-limit headers.
    pub fn from_headers(headers: &HeaderMap) -> Result<Self, Error> {
        let limit = header_u64(headers, HEADER_LIMIT)?;
        let period = header_u64(headers, HEADER_PERIOD)?;
        let remaining = header_u64(headers, HEADER_REMAINING)?;
        let reset = header_u64(headers, HEADER_RESET)?;
        let used = header_u64(headers, HEADER_USED)?;

        let period = i64::try_from(period)
            .map(|secs| Duration::from_secs(secs as u64))
            .map_err(|_| malformed(HEADER_PERIOD, period))?;
        // Resets past chrono's range are clamped to its latest instant.
        let reset_at = i64::try_from(reset)
            .map(|secs| {
                DateTime::<Utc>::from_timestamp(secs, 0).unwrap_or(DateTime::<Utc>::MAX_UTC)
            })
            .map_err(|_| malformed(HEADER_RESET, reset))?;

        Ok(Self {
            limit,
            period,
            remaining,
            reset_at,
            used,
        })
    }
}

fn header_u64(headers: &HeaderMap, header: &'static str) -> Result<u64, Error> {
    let raw = match headers.get(header) {
        Some(value) => value.to_str().map_err(|_| Error::HeaderMalformed {
            header,
            value: String::from_utf8_lossy(value.as_bytes()).into_owned(),
        })?,
        None => return Err(Error::HeaderMissing { header }),
    };
    if raw.is_empty() {
        return Err(Error::HeaderMissing { header });
    }
    // `u64::from_str` accepts a leading '+', the header format does not.
    if !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::HeaderMalformed {
            header,
            value: raw.to_string(),
        });
    }
    raw.parse::<u64>().map_err(|_| Error::HeaderMalformed {
        header,
        value: raw.to_string(),
    })
}

fn malformed(header: &'static str, value: u64) -> Error {
    Error::HeaderMalformed {
        header,
        value: value.to_string(),
    }
}

/// Tracks one [`RateWindow`] per endpoint path.
///
/// Shared by every request issued through one client. The window map sits
/// behind a single mutex, held only for the read or the whole-record
/// replace and never across a sleep.
pub struct RateLimiter {
    windows: Mutex<HashMap<String, RateWindow>>,
    sleeper: Arc<dyn Sleeper>,
}

impl RateLimiter {
    pub fn new(sleeper: Arc<dyn Sleeper>) -> Self {
        Self {
            windows: Mutex::new(HashMap::new()),
            sleeper,
        }
    }

    /// Parses the rate-limit headers of a response from `path` and replaces
    /// the stored window. On error the previous window is left untouched.
    pub fn record(&self, path: &str, headers: &HeaderMap) -> Result<(), Error> {
        let window = RateWindow::from_headers(headers)?;
        tracing::debug!(
            "Rate window for {}: {}/{} remaining, resets at {}",
            path,
            window.remaining,
            window.limit,
            window.reset_at
        );
        self.windows
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(path.to_string(), window);
        Ok(())
    }

    /// Returns a copy of the window last recorded for `path`.
    pub fn window(&self, path: &str) -> Option<RateWindow> {
        self.windows
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(path)
            .cloned()
    }

    /// How long a call to `path` issued at `now` has to wait, if at all.
    pub fn wait_time(&self, path: &str, now: DateTime<Utc>) -> Option<Duration> {
        let window = self.window(path)?;
        if window.remaining > 0 || now >= window.reset_at {
            return None;
        }
        (window.reset_at - now).to_std().ok()
    }

    /// Sleeps until the window of `path` resets when no calls are left.
    ///
    /// Does not touch the window itself: only the next [`record`](Self::record)
    /// updates it.
    pub async fn throttle(&self, path: &str) {
        if let Some(wait) = self.wait_time(path, Utc::now()) {
            tracing::debug!(
                "Rate limit reached for {}, waiting {:.1}s",
                path,
                wait.as_secs_f64()
            );
            self.sleeper.sleep(wait).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;
    use futures_util::future::BoxFuture;
    use reqwest::header::HeaderValue;

    #[derive(Default)]
    struct RecordingSleeper {
        slept: Mutex<Vec<Duration>>,
    }

    impl Sleeper for RecordingSleeper {
        fn sleep(&self, duration: Duration) -> BoxFuture<'static, ()> {
            self.slept.lock().unwrap().push(duration);
            Box::pin(async {})
        }
    }

    fn limiter() -> (RateLimiter, Arc<RecordingSleeper>) {
        let sleeper = Arc::new(RecordingSleeper::default());
        (RateLimiter::new(sleeper.clone()), sleeper)
    }

    fn headers(remaining: u64, reset: i64) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(HEADER_LIMIT, HeaderValue::from(60u64));
        headers.insert(HEADER_PERIOD, HeaderValue::from(60u64));
        headers.insert(HEADER_REMAINING, HeaderValue::from(remaining));
        headers.insert(HEADER_RESET, HeaderValue::from(reset));
        headers.insert(HEADER_USED, HeaderValue::from(60 - remaining));
        headers
    }

    #[test]
    fn record_stores_parsed_window() {
        let (limiter, _) = limiter();
        limiter
            .record("/api/v0/equity/orders", &headers(12, 1_700_000_000))
            .unwrap();

        let window = limiter.window("/api/v0/equity/orders").unwrap();
        assert_eq!(
            window,
            RateWindow {
                limit: 60,
                period: Duration::from_secs(60),
                remaining: 12,
                reset_at: DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap(),
                used: 48,
            }
        );
    }

    #[test]
    fn record_replaces_previous_window() {
        let (limiter, _) = limiter();
        limiter.record("/p", &headers(5, 1_700_000_000)).unwrap();
        limiter.record("/p", &headers(4, 1_700_000_060)).unwrap();

        let window = limiter.window("/p").unwrap();
        assert_eq!(window.remaining, 4);
        assert_eq!(window.used, 56);
        assert_eq!(window.reset_at.timestamp(), 1_700_000_060);
    }

    #[test]
    fn record_missing_header_keeps_prior_window() {
        let (limiter, _) = limiter();
        limiter.record("/p", &headers(5, 1_700_000_000)).unwrap();

        let mut partial = headers(0, 1_700_000_100);
        partial.remove(HEADER_USED);
        let err = limiter.record("/p", &partial).unwrap_err();
        assert!(matches!(
            err,
            Error::HeaderMissing {
                header: HEADER_USED
            }
        ));
        assert_eq!(limiter.window("/p").unwrap().remaining, 5);
    }

    #[test]
    fn record_empty_header_is_missing() {
        let (limiter, _) = limiter();
        let mut h = headers(5, 1_700_000_000);
        h.insert(HEADER_LIMIT, HeaderValue::from_static(""));
        assert!(matches!(
            limiter.record("/p", &h),
            Err(Error::HeaderMissing {
                header: HEADER_LIMIT
            })
        ));
        assert!(limiter.window("/p").is_none());
    }

    #[test]
    fn record_rejects_non_numeric_values() {
        let (limiter, _) = limiter();
        for bad in ["abc", "-1", "+1", "1.5", " 1"] {
            let mut h = headers(5, 1_700_000_000);
            h.insert(HEADER_REMAINING, HeaderValue::from_str(bad).unwrap());
            assert!(
                matches!(
                    limiter.record("/p", &h),
                    Err(Error::HeaderMalformed {
                        header: HEADER_REMAINING,
                        ..
                    })
                ),
                "{bad} should be rejected"
            );
        }
        assert!(limiter.window("/p").is_none());
    }

    #[test]
    fn record_rejects_overflowing_period_and_reset() {
        let (limiter, _) = limiter();
        let too_big = HeaderValue::from(u64::MAX);

        let mut h = headers(5, 1_700_000_000);
        h.insert(HEADER_PERIOD, too_big.clone());
        assert!(matches!(
            limiter.record("/p", &h),
            Err(Error::HeaderMalformed {
                header: HEADER_PERIOD,
                ..
            })
        ));

        let mut h = headers(5, 1_700_000_000);
        h.insert(HEADER_RESET, too_big);
        assert!(matches!(
            limiter.record("/p", &h),
            Err(Error::HeaderMalformed {
                header: HEADER_RESET,
                ..
            })
        ));
    }

    #[test]
    fn record_clamps_reset_beyond_calendar_range() {
        let (limiter, _) = limiter();
        limiter.record("/p", &headers(0, i64::MAX)).unwrap();

        let window = limiter.window("/p").unwrap();
        assert_eq!(window.reset_at, DateTime::<Utc>::MAX_UTC);
        assert!(limiter.wait_time("/p", Utc::now()).is_some());
    }

    #[test]
    fn unknown_path_never_waits() {
        let (limiter, _) = limiter();
        assert_eq!(limiter.wait_time("/new/path", Utc::now()), None);
    }

    #[test]
    fn remaining_calls_never_wait() {
        let (limiter, _) = limiter();
        let far_future = Utc::now().timestamp() + 3600;
        limiter.record("/p", &headers(1, far_future)).unwrap();
        assert_eq!(limiter.wait_time("/p", Utc::now()), None);
    }

    #[test]
    fn exhausted_window_waits_until_reset() {
        let (limiter, _) = limiter();
        limiter.record("/p", &headers(0, 1_700_000_060)).unwrap();

        let now = DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap();
        assert_eq!(
            limiter.wait_time("/p", now),
            Some(Duration::from_secs(60))
        );

        let now = now + TimeDelta::milliseconds(59_500);
        assert_eq!(
            limiter.wait_time("/p", now),
            Some(Duration::from_millis(500))
        );
    }

    #[test]
    fn exhausted_window_past_reset_does_not_wait() {
        let (limiter, _) = limiter();
        limiter.record("/p", &headers(0, 1_700_000_000)).unwrap();

        let at_reset = DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap();
        assert_eq!(limiter.wait_time("/p", at_reset), None);
        assert_eq!(
            limiter.wait_time("/p", at_reset + TimeDelta::seconds(1)),
            None
        );
    }

    #[test]
    fn windows_are_tracked_per_path() {
        let (limiter, _) = limiter();
        let future = Utc::now().timestamp() + 3600;
        limiter.record("/a", &headers(0, future)).unwrap();
        limiter.record("/b", &headers(3, future)).unwrap();

        assert!(limiter.wait_time("/a", Utc::now()).is_some());
        assert!(limiter.wait_time("/b", Utc::now()).is_none());
    }

    #[tokio::test]
    async fn throttle_sleeps_once_for_exhausted_window() {
        let (limiter, sleeper) = limiter();
        let future = Utc::now().timestamp() + 30;
        limiter.record("/p", &headers(0, future)).unwrap();

        limiter.throttle("/p").await;

        let slept = sleeper.slept.lock().unwrap().clone();
        assert_eq!(slept.len(), 1);
        assert!(slept[0] <= Duration::from_secs(30));
        assert!(slept[0] > Duration::from_secs(28));
    }

    #[tokio::test]
    async fn throttle_does_not_consume_quota() {
        let (limiter, sleeper) = limiter();
        let future = Utc::now().timestamp() + 30;
        limiter.record("/p", &headers(2, future)).unwrap();

        limiter.throttle("/p").await;
        limiter.throttle("/p").await;
        limiter.throttle("/p").await;

        assert!(sleeper.slept.lock().unwrap().is_empty());
        assert_eq!(limiter.window("/p").unwrap().remaining, 2);
    }

    #[tokio::test]
    async fn throttle_unknown_path_is_noop() {
        let (limiter, sleeper) = limiter();
        limiter.throttle("/nothing").await;
        assert!(sleeper.slept.lock().unwrap().is_empty());
    }
}
