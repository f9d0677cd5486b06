use std::time::Duration;

use bon::Builder;
use enumset::EnumSet;
use tokio::time::{Instant, sleep};
use tracing::warn;

use crate::error::{ErrorKind, Result};

/// Exponential backoff for the page requests.
#[must_use]
#[derive(Clone, Debug, Builder)]
pub struct RetryPolicy {
    #[builder(default = Duration::from_secs(1))]
    initial_delay: Duration,

    #[builder(default = 2.0)]
    factor: f64,

    /// Single delay ceiling.
    #[builder(default = Duration::from_secs(20))]
    max_delay: Duration,

    /// No retry is started past this time since the first attempt.
    #[builder(default = Duration::from_secs(60))]
    max_elapsed: Duration,

    /// Randomize each delay between zero and the computed value.
    #[builder(default = true)]
    jitter: bool,

    #[builder(default = ErrorKind::Transport | ErrorKind::MalformedPage)]
    retry_on: EnumSet<ErrorKind>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl RetryPolicy {
    /// Run the operation until it succeeds, fails with a kind not in `retry_on`,
    /// or the time runs out. The last error is returned as is.
    pub async fn retry<T, F, Fut>(&self, mut operation: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let started_at = Instant::now();
        let mut attempt = 0;
        loop {
            match operation().await {
                Ok(value) => break Ok(value),
                Err(error) if self.retry_on.contains(error.kind()) => {
                    let delay = self.delay(attempt);
                    if started_at.elapsed() + delay > self.max_elapsed {
                        warn!(attempt, "giving up: {error:?}");
                        break Err(error);
                    }
                    warn!(attempt, ?delay, "retrying: {error:?}");
                    sleep(delay).await;
                    attempt += 1;
                }
                Err(error) => break Err(error),
            }
        }
    }

    fn delay(&self, attempt: u32) -> Duration {
        let exponent = i32::try_from(attempt).unwrap_or(i32::MAX).min(64);
        let seconds = (self.initial_delay.as_secs_f64() * self.factor.powi(exponent))
            .min(self.max_delay.as_secs_f64());
        let delay = Duration::from_secs_f64(seconds.max(0.0));
        if self.jitter { delay.mul_f64(fastrand::f64()) } else { delay }
    }
}
