//! Bounded condition polling.
//!
//! The suite never retries a failed operation; every wait is a single bounded
//! poll loop over an async probe. The probe decides what "done" means by
//! returning `Some(value)`, so callers choose whether they are waiting for
//! presence, absence, or anything else observable through the driver.

use std::time::Duration;

use tokio::time::Instant;

/// Outcome of a bounded poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome<T> {
    /// The probe produced a value before the deadline.
    Completed(T),
    /// The deadline elapsed without the probe producing a value.
    TimedOut,
}

impl<T> PollOutcome<T> {
    /// The produced value, if the poll completed.
    pub fn completed(self) -> Option<T> {
        match self {
            PollOutcome::Completed(value) => Some(value),
            PollOutcome::TimedOut => None,
        }
    }
}

/// Poll `probe` every `interval` until it returns `Some` or `timeout` elapses.
///
/// The probe always runs at least once, so a zero timeout still performs one
/// immediate attempt. The deadline is checked after each attempt; a probe that
/// blocks past the deadline is not cancelled (each driver call carries its own
/// timeout).
pub async fn poll_until<T, F, Fut>(
    timeout: Duration,
    interval: Duration,
    mut probe: F,
) -> PollOutcome<T>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Option<T>>,
{
    let deadline = Instant::now() + timeout;
    loop {
        if let Some(value) = probe().await {
            return PollOutcome::Completed(value);
        }
        if Instant::now() >= deadline {
            return PollOutcome::TimedOut;
        }
        tokio::time::sleep(interval).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test(start_paused = true)]
    async fn completes_on_first_success() {
        let outcome = poll_until(
            Duration::from_secs(5),
            Duration::from_millis(100),
            || async { Some(42) },
        )
        .await;
        assert_eq!(outcome, PollOutcome::Completed(42));
    }

    #[tokio::test(start_paused = true)]
    async fn polls_until_probe_succeeds() {
        let attempts = AtomicU32::new(0);
        let outcome = poll_until(Duration::from_secs(5), Duration::from_millis(100), || {
            let n = attempts.fetch_add(1, Ordering::SeqCst);
            async move { (n >= 3).then_some("ready") }
        })
        .await;
        assert_eq!(outcome, PollOutcome::Completed("ready"));
        assert_eq!(attempts.load(Ordering::SeqCst), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn times_out_when_probe_never_succeeds() {
        let attempts = AtomicU32::new(0);
        let outcome: PollOutcome<()> =
            poll_until(Duration::from_secs(1), Duration::from_millis(250), || {
                attempts.fetch_add(1, Ordering::SeqCst);
                async { None }
            })
            .await;
        assert_eq!(outcome, PollOutcome::TimedOut);
        // t=0, 250, 500, 750, 1000: five attempts inside one second.
        assert_eq!(attempts.load(Ordering::SeqCst), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn zero_timeout_still_probes_once() {
        let attempts = AtomicU32::new(0);
        let outcome: PollOutcome<()> =
            poll_until(Duration::ZERO, Duration::from_millis(100), || {
                attempts.fetch_add(1, Ordering::SeqCst);
                async { None }
            })
            .await;
        assert_eq!(outcome, PollOutcome::TimedOut);
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn completed_accessor() {
        assert_eq!(PollOutcome::Completed(7).completed(), Some(7));
        assert_eq!(PollOutcome::<i32>::TimedOut.completed(), None);
    }
}
