//! Randomized pacing between outbound requests.

use std::time::Duration;
use tokio::time::sleep;

/// Politeness delay of `base + U[0, jitter)` before each request.
///
/// Not a token bucket: there is no concurrency cap, callers issue requests
/// one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacer {
    pub base: Duration,
    pub jitter: Duration,
}

impl Pacer {
    /// Before every stats-service request.
    pub const REQUEST: Pacer = Pacer::new(Duration::from_millis(350), Duration::from_millis(350));

    /// Between consecutive teams, and before reading a scraped table.
    pub const BETWEEN_TEAMS: Pacer =
        Pacer::new(Duration::from_millis(200), Duration::from_millis(250));

    /// After the defense page first renders.
    pub const PAGE_SETTLE: Pacer =
        Pacer::new(Duration::from_millis(400), Duration::from_millis(400));

    /// No delay at all.
    pub const NONE: Pacer = Pacer::new(Duration::ZERO, Duration::ZERO);

    pub const fn new(base: Duration, jitter: Duration) -> Self {
        Self { base, jitter }
    }

    /// Delay for a jitter sample in `[0, 1)`.
    pub fn delay(&self, jitter_sample: f64) -> Duration {
        self.base + self.jitter.mul_f64(jitter_sample.clamp(0.0, 1.0))
    }

    pub async fn pause(&self) {
        let delay = self.delay(rand::random::<f64>());
        if !delay.is_zero() {
            sleep(delay).await;
        }
    }
}
