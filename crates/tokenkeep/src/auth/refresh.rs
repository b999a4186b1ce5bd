//! The self-rescheduling token refresh loop.

use std::sync::Weak;
use std::time::Duration;

use tracing::debug;

use super::holder::HolderInner;

/// Delay before retrying after any failed refresh attempt.
pub const RETRY_DELAY: Duration = Duration::from_secs(30);

/// Longest a single attempt may wait on the fetcher before it counts as failed.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Where the refresh loop currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshState {
    /// No refresh is scheduled. The token will not be renewed.
    Idle,
    /// One refresh is armed and fires after `delay`.
    Waiting { delay: Duration },
    /// A request to the token endpoint is in flight.
    Refreshing,
}

/// What the loop does after one call to `refresh_once`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Next {
    /// Sleep for the given delay, then attempt again.
    After(Duration),
    /// The server reported no usable period; stop.
    Halt,
    /// Another attempt held the `Refreshing` state; keep the current delay.
    Skipped,
}

impl From<Option<Duration>> for Next {
    fn from(next: Option<Duration>) -> Self {
        match next {
            Some(delay) => Next::After(delay),
            None => Next::Halt,
        }
    }
}

impl RefreshState {
    pub(crate) fn after(next: Option<Duration>) -> Self {
        match next {
            Some(delay) => RefreshState::Waiting { delay },
            None => RefreshState::Idle,
        }
    }
}

/// Converts a refresh period in seconds into a timer delay.
///
/// Only finite, strictly positive periods schedule anything.
pub(crate) fn refresh_delay(period: Option<f64>) -> Option<Duration> {
    period
        .filter(|p| p.is_finite() && *p > 0.0)
        .and_then(|p| Duration::try_from_secs_f64(p).ok())
}

/// Runs until the server stops asking for refreshes or the holder is dropped.
///
/// Each attempt is awaited before the next delay is computed, so at most one
/// timer is pending and attempts never overlap.
pub(crate) async fn run(holder: Weak<HolderInner>, first_delay: Duration) {
    let mut delay = first_delay;

    loop {
        tokio::time::sleep(delay).await;

        let Some(inner) = holder.upgrade() else {
            debug!("Session holder dropped, stopping refresh loop");
            return;
        };

        match inner.refresh_once().await {
            Next::After(next) => delay = next,
            Next::Halt => return,
            Next::Skipped => {}
        }
    }
}
