//! Deadline-bounded condition polling over the tokio clock.
//!
//! The poller re-checks a predicate at a fixed interval until it holds or an
//! absolute deadline passes. Success and timeout share one completion path;
//! callers re-verify the condition afterwards and raise their own failure if
//! it is still false. Because sleeps go through tokio's clock, tests drive
//! the poller deterministically under `#[tokio::test(start_paused = true)]`.

use std::{
    future::{Future, ready},
    time::Duration,
};

use tokio::time::{Instant, sleep};

/// Pacing and total budget for one poll.
#[derive(Clone, Copy, Debug)]
pub struct PollConfig {
    /// Delay between consecutive predicate checks.
    pub interval: Duration,
    /// Total time allowed before the poll gives up.
    pub duration: Duration,
}

impl PollConfig {
    /// Create a poll configuration with the supplied pacing and budget.
    #[must_use]
    pub const fn new(interval: Duration, duration: Duration) -> Self {
        Self { interval, duration }
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(100),
            duration: Duration::from_millis(30_000),
        }
    }
}

/// Re-check `predicate` every `cfg.interval` until it holds or `cfg.duration`
/// elapses, whichever comes first.
///
/// The deadline is computed once at entry and is absolute. There is no
/// cancellation and no distinct timed-out signal.
pub async fn poll<F>(cfg: &PollConfig, mut predicate: F)
where
    F: FnMut() -> bool,
{
    poll_until(cfg, move || ready(predicate())).await;
}

/// Async-predicate variant of [`poll`].
///
/// Each check awaits the future returned by `predicate`; the time it takes
/// counts against the overall budget.
pub async fn poll_until<F, Fut>(cfg: &PollConfig, mut predicate: F)
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    let deadline = Instant::now() + cfg.duration;
    loop {
        if predicate().await {
            return;
        }
        let now = Instant::now();
        if now >= deadline {
            tracing::debug!(budget = ?cfg.duration, "poll deadline elapsed");
            return;
        }
        // Never sleep past the deadline; the final check lands on it.
        sleep(cfg.interval.min(deadline.saturating_duration_since(now))).await;
    }
}
