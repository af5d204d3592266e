//! Clock sources for stride timing.
//!
//! Stride durations are measured against a clock read at the moment a step is
//! accepted. Production code uses [`MonotonicClock`]; tests drive
//! [`ManualClock`] by hand.

use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Instant;

use step_types::{Duration, Timestamp};

/// A source of "now" for stride timing.
pub trait StepClock: Send + Sync {
    /// Current time as a nanosecond timestamp.
    fn now(&self) -> Timestamp;
}

/// Monotonic wall clock backed by [`Instant`].
///
/// Timestamps count nanoseconds since the clock was created.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    epoch: Instant,
}

impl MonotonicClock {
    /// Creates a clock whose epoch is the current instant.
    #[must_use]
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl StepClock for MonotonicClock {
    fn now(&self) -> Timestamp {
        let elapsed = self.epoch.elapsed().as_nanos();
        Timestamp::from_nanos(i64::try_from(elapsed).unwrap_or(i64::MAX))
    }
}

/// Hand-driven clock for deterministic tests and replays.
///
/// # Example
///
/// ```
/// use step_detect::{ManualClock, StepClock};
/// use step_types::{Duration, Timestamp};
///
/// let clock = ManualClock::new();
/// clock.advance(Duration::from_millis(250));
/// assert_eq!(clock.now(), Timestamp::from_millis(250));
/// ```
#[derive(Debug, Default)]
pub struct ManualClock {
    current_ns: AtomicI64,
}

impl ManualClock {
    /// Creates a clock reading zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            current_ns: AtomicI64::new(0),
        }
    }

    /// Creates a clock reading `start`.
    #[must_use]
    pub const fn starting_at(start: Timestamp) -> Self {
        Self {
            current_ns: AtomicI64::new(start.as_nanos()),
        }
    }

    /// Moves the clock forward.
    pub fn advance(&self, duration: Duration) {
        let span = i64::try_from(duration.as_nanos()).unwrap_or(i64::MAX);
        self.current_ns.fetch_add(span, Ordering::SeqCst);
    }

    /// Sets the clock to an absolute time.
    pub fn set(&self, time: Timestamp) {
        self.current_ns.store(time.as_nanos(), Ordering::SeqCst);
    }
}

impl StepClock for ManualClock {
    fn now(&self) -> Timestamp {
        Timestamp::from_nanos(self.current_ns.load(Ordering::SeqCst))
    }
}
