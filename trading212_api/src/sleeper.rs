//! Injectable sleep used by throttling and retry backoff.

use std::time::Duration;

use futures_util::future::BoxFuture;

/// Suspends the current call chain for a given duration.
///
/// The client awaits this for rate-limit throttling and for the backoff
/// between retries. The default is [`TokioSleeper`]; tests swap in an
/// implementation that returns immediately and records the durations.
pub trait Sleeper: Send + Sync {
    fn sleep(&self, duration: Duration) -> BoxFuture<'static, ()>;
}

/// Sleeps on the tokio timer.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioSleeper;

impl Sleeper for TokioSleeper {
    fn sleep(&self, duration: Duration) -> BoxFuture<'static, ()> {
        Box::pin(tokio::time::sleep(duration))
    }
}
