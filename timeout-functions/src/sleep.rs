//! The blocking wait used by the greeting handler.
//!
//! Handlers block through the [`Sleeper`] trait so tests can observe the
//! requested duration without spending it.

use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Blocks the calling thread.
///
/// Implementations must not return early and must not offer cancellation:
/// the only way to stop a sleeping handler is for the platform to kill it.
pub trait Sleeper: Send + Sync {
    /// Blocks the current thread for `duration`.
    fn sleep(&self, duration: Duration);
}

/// Sleeps with [`std::thread::sleep`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        if duration.is_zero() {
            return;
        }
        std::thread::sleep(duration);
    }
}

impl<S: Sleeper + ?Sized> Sleeper for Arc<S> {
    fn sleep(&self, duration: Duration) {
        (**self).sleep(duration)
    }
}

/// A sleeper that records each requested duration and returns immediately.
///
/// Clones share the same record, so a test can keep one handle while the
/// handler owns another.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use timeout_functions::{RecordingSleeper, Sleeper};
///
/// let sleeper = RecordingSleeper::new();
/// sleeper.sleep(Duration::from_secs(5));
/// assert_eq!(sleeper.calls(), vec![Duration::from_secs(5)]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RecordingSleeper {
    calls: Arc<Mutex<Vec<Duration>>>,
}

impl RecordingSleeper {
    /// Creates a new RecordingSleeper with an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every duration requested so far, in order.
    pub fn calls(&self) -> Vec<Duration> {
        self.lock().clone()
    }

    /// Returns the sum of all requested durations.
    pub fn total(&self) -> Duration {
        self.lock().iter().sum()
    }

    /// Forgets all recorded calls.
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Duration>> {
        // A panic while holding the lock cannot leave the Vec inconsistent.
        self.calls.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Sleeper for RecordingSleeper {
    fn sleep(&self, duration: Duration) {
        tracing::trace!(seconds = duration.as_secs(), "Recording sleep request");
        self.lock().push(duration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn test_thread_sleeper_zero_returns_immediately() {
        let start = Instant::now();
        ThreadSleeper.sleep(Duration::ZERO);
        assert!(start.elapsed() < Duration::from_millis(50));
    }

    #[test]
    fn test_thread_sleeper_blocks() {
        let start = Instant::now();
        ThreadSleeper.sleep(Duration::from_millis(30));
        assert!(start.elapsed() >= Duration::from_millis(30));
    }

    #[test]
    fn test_recording_sleeper_records_in_order() {
        let sleeper = RecordingSleeper::new();
        sleeper.sleep(Duration::from_secs(1));
        sleeper.sleep(Duration::from_secs(3));
        assert_eq!(sleeper.calls(), vec![Duration::from_secs(1), Duration::from_secs(3)]);
        assert_eq!(sleeper.total(), Duration::from_secs(4));

        sleeper.clear();
        assert!(sleeper.calls().is_empty());
    }

    #[test]
    fn test_recording_sleeper_clones_share_record() {
        let sleeper = RecordingSleeper::new();
        let handle = sleeper.clone();
        sleeper.sleep(Duration::from_secs(2));
        assert_eq!(handle.calls().len(), 1);
    }

    #[test]
    fn test_arc_sleeper_delegates() {
        let sleeper = Arc::new(RecordingSleeper::new());
        Sleeper::sleep(&sleeper, Duration::from_secs(9));
        assert_eq!(sleeper.total(), Duration::from_secs(9));
    }
}
