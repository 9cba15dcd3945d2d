//! Pacing and GitHub rate limit handling.
//!
//! Two mechanisms keep a migration polite: a [`Pacer`] inserts the fixed
//! courtesy pause after every mutating call, and [`ensure_core_rate_limit`]
//! waits out GitHub's window when the remaining quota runs low.

mod info;
mod pacer;

pub use info::RateLimitInfo;
pub use pacer::{FixedIntervalPacer, Pacer};

use octocrab::Octocrab;
use std::time::Duration;
use tracing::{info, warn};

/// Maximum time to wait for rate limit reset (1 hour).
const MAX_WAIT_SECS: u64 = 3600;

/// Minimum remaining requests before proactively waiting.
const MIN_REMAINING_THRESHOLD: u32 = 5;

/// Checks the current rate limit status for the core API (issues, labels).
///
/// # Errors
///
/// Returns an error if the rate limit API call fails.
pub async fn check_core_rate_limit(octocrab: &Octocrab) -> Result<RateLimitInfo, octocrab::Error> {
    let rate_limit = octocrab.ratelimit().get().await?;
    let core = &rate_limit.resources.core;

    Ok(RateLimitInfo {
        remaining: u32::try_from(core.remaining).unwrap_or(u32::MAX),
        reset: core.reset,
        limit: u32::try_from(core.limit).unwrap_or(u32::MAX),
    })
}

/// How long to wait before the next call, if at all.
///
/// Returns `None` while enough quota remains or once the window has reset.
#[must_use]
pub fn required_wait(info: &RateLimitInfo, now: u64) -> Option<Duration> {
    if info.remaining >= MIN_REMAINING_THRESHOLD {
        return None;
    }

    let wait_secs = info.secs_until_reset(now)?;
    if wait_secs > MAX_WAIT_SECS {
        warn!(
            wait_secs,
            max_wait = MAX_WAIT_SECS,
            "Rate limit reset too far in future, capping wait time"
        );
    }

    Some(Duration::from_secs(wait_secs.min(MAX_WAIT_SECS)))
}

/// Waits if the rate limit is low, returning true if we waited.
pub async fn wait_if_needed(info: &RateLimitInfo) -> bool {
    let now = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();

    let Some(wait) = required_wait(info, now) else {
        return false;
    };

    info!(
        remaining = info.remaining,
        wait_secs = wait.as_secs(),
        "Rate limit low, waiting for reset"
    );
    tokio::time::sleep(wait).await;
    true
}

/// Ensures sufficient rate limit before making core API calls.
///
/// # Errors
///
/// Returns an error if the rate limit check fails.
pub async fn ensure_core_rate_limit(octocrab: &Octocrab) -> Result<(), octocrab::Error> {
    let info = check_core_rate_limit(octocrab).await?;
    wait_if_needed(&info).await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(remaining: u32, reset: u64) -> RateLimitInfo {
        RateLimitInfo {
            remaining,
            reset,
            limit: 5000,
        }
    }

    #[test]
    fn no_wait_with_quota_left() {
        assert_eq!(required_wait(&info(100, 10_000), 1_000), None);
    }

    #[test]
    fn no_wait_after_reset() {
        assert_eq!(required_wait(&info(1, 500), 1_000), None);
    }

    #[test]
    fn waits_until_reset_when_low() {
        assert_eq!(
            required_wait(&info(1, 1_300), 1_000),
            Some(Duration::from_secs(300))
        );
    }

    #[test]
    fn caps_long_waits() {
        assert_eq!(
            required_wait(&info(0, 100_000), 0),
            Some(Duration::from_secs(MAX_WAIT_SECS))
        );
    }

    #[tokio::test]
    async fn wait_if_needed_no_wait() {
        let waited = wait_if_needed(&info(100, 0)).await;
        assert!(!waited);
    }
}
