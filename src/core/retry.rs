//! Bounded exponential-backoff retry for remote calls.

use crate::Result;
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::warn;

/// Upper bound of the random jitter added to every backoff.
pub const DEFAULT_MAX_JITTER: Duration = Duration::from_millis(350);

/// How many times a remote call is attempted and how long to back off
/// between attempts.
///
/// The sleep after failed attempt `i` (0-based) is
/// `base_sleep * 2^i + U[0, max_jitter)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub base_sleep: Duration,
    pub max_jitter: Duration,
}

impl RetryPolicy {
    /// League-wide stat pulls: one large request, few attempts.
    pub const LEAGUE: RetryPolicy = RetryPolicy::new(3, Duration::from_secs(1));

    /// Per-team roster pulls: 30 small requests, one extra attempt each.
    pub const ROSTER: RetryPolicy = RetryPolicy::new(4, Duration::from_secs(1));

    pub const fn new(attempts: u32, base_sleep: Duration) -> Self {
        Self {
            attempts,
            base_sleep,
            max_jitter: DEFAULT_MAX_JITTER,
        }
    }

    pub fn with_jitter(mut self, max_jitter: Duration) -> Self {
        self.max_jitter = max_jitter;
        self
    }

    /// Backoff after the failed attempt `attempt_index`, given a jitter sample
    /// in `[0, 1)`.
    pub fn backoff(&self, attempt_index: u32, jitter_sample: f64) -> Duration {
        let factor = 2u32.saturating_pow(attempt_index);
        let jitter = self.max_jitter.mul_f64(jitter_sample.clamp(0.0, 1.0));
        self.base_sleep.saturating_mul(factor) + jitter
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::LEAGUE
    }
}

/// Run `op` until it succeeds or `policy.attempts` is exhausted.
///
/// On exhaustion the last error is returned unchanged. `what` names the call
/// in log lines.
pub async fn with_retries<T, F, Fut>(policy: &RetryPolicy, what: &str, mut op: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let attempts = policy.attempts.max(1);
    let mut attempt = 0;

    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if attempt + 1 >= attempts => {
                warn!("{what} failed after {attempts} attempts: {e}");
                return Err(e);
            }
            Err(e) => {
                let sleep_for = policy.backoff(attempt, rand::random::<f64>());
                warn!(
                    "{what} failed (attempt {}/{}): {} | sleeping {:.2}s",
                    attempt + 1,
                    attempts,
                    e,
                    sleep_for.as_secs_f64()
                );
                sleep(sleep_for).await;
                attempt += 1;
            }
        }
    }
}
