use rand::Rng;
use std::time::Duration;

/// Random pause inserted between calls to the parcel service.
#[derive(Debug, Clone, Copy)]
pub struct Pacer {
    max_delay: Duration,
}

impl Pacer {
    pub const fn new(max_delay: Duration) -> Self {
        Self { max_delay }
    }

    pub const fn disabled() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn max_delay(&self) -> Duration {
        self.max_delay
    }

    /// Uniform in `[0, max_delay]`.
    pub fn next_delay(&self) -> Duration {
        if self.max_delay.is_zero() {
            return Duration::ZERO;
        }
        let secs = rand::thread_rng().gen_range(0.0..=self.max_delay.as_secs_f64());
        Duration::from_secs_f64(secs)
    }

    pub async fn pause(&self) {
        let delay = self.next_delay();
        if !delay.is_zero() {
            tracing::debug!("Waiting {:.2}s before next request", delay.as_secs_f64());
            tokio::time::sleep(delay).await;
        }
    }
}

impl Default for Pacer {
    fn default() -> Self {
        Self::new(Duration::from_secs(3))
    }
}
