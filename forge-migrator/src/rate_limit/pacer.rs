//! Courtesy pauses between mutating calls.

use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// Inserts the pause that follows each mutating call.
///
/// The pause keeps a long run under the forges' abuse limits; it carries no
/// ordering meaning, since every call is already awaited before the next one.
#[async_trait]
pub trait Pacer: Send + Sync {
    /// Waits before the next mutating call may be issued.
    async fn pause(&self);
}

/// Sleeps for a fixed interval on the Tokio timer.
#[derive(Debug, Clone)]
pub struct FixedIntervalPacer {
    interval: Duration,
}

impl FixedIntervalPacer {
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

#[async_trait]
impl Pacer for FixedIntervalPacer {
    async fn pause(&self) {
        if self.interval.is_zero() {
            return;
        }
        debug!(secs = self.interval.as_secs(), "Pausing before next call");
        tokio::time::sleep(self.interval).await;
    }
}
