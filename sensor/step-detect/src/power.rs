//! Windowed signal-power estimation.
//!
//! The detector consults a power gate on every sample to tell genuine motion
//! apart from sensor noise. Crossovers that happen while the accumulated
//! energy is below the cutoff are discarded.

use std::collections::VecDeque;

use step_types::{Duration, Timestamp};
use tracing::warn;

/// Length of the power window: one tenth of a second.
pub const POWER_WINDOW: Duration = Duration::from_millis(100);

/// A push/read/reset signal power estimator.
///
/// Implementations must keep [`SignalPower::read`] free of side effects so it
/// can be called any number of times between pushes.
pub trait SignalPower {
    /// Incorporates one sample. Timestamps must be non-decreasing.
    fn push(&mut self, timestamp: Timestamp, value: f32);

    /// Current power over the active window.
    fn read(&self) -> f64;

    /// Discards all accumulated energy and history.
    fn reset(&mut self);
}

/// Sum of squared values over a trailing time window.
///
/// The window ends at the most recent push and spans [`POWER_WINDOW`] by
/// default. Samples older than `latest - window` are evicted on push.
///
/// # Example
///
/// ```
/// use step_detect::{CumulativeSignalPower, SignalPower};
/// use step_types::Timestamp;
///
/// let mut gate = CumulativeSignalPower::new();
/// gate.push(Timestamp::from_millis(0), 3.0);
/// gate.push(Timestamp::from_millis(50), 4.0);
/// assert!((gate.read() - 25.0).abs() < 1e-9);
///
/// gate.reset();
/// assert_eq!(gate.read(), 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct CumulativeSignalPower {
    window: Duration,
    readings: VecDeque<(Timestamp, f32)>,
}

impl CumulativeSignalPower {
    /// Creates a gate with the standard [`POWER_WINDOW`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_window(POWER_WINDOW)
    }

    /// Creates a gate with a custom window length.
    #[must_use]
    pub fn with_window(window: Duration) -> Self {
        Self {
            window,
            readings: VecDeque::with_capacity(32),
        }
    }

    /// Returns the window length.
    #[must_use]
    pub const fn window(&self) -> Duration {
        self.window
    }

    /// Number of samples currently inside the window.
    #[must_use]
    pub fn len(&self) -> usize {
        self.readings.len()
    }

    /// Returns true if the window holds no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    /// Timestamp of the most recent push since the last reset.
    #[must_use]
    pub fn latest(&self) -> Option<Timestamp> {
        self.readings.back().map(|(t, _)| *t)
    }

    fn evict_before(&mut self, cutoff: Timestamp) {
        while let Some((t, _)) = self.readings.front() {
            if *t < cutoff {
                self.readings.pop_front();
            } else {
                break;
            }
        }
    }
}

impl Default for CumulativeSignalPower {
    fn default() -> Self {
        Self::new()
    }
}

impl SignalPower for CumulativeSignalPower {
    fn push(&mut self, timestamp: Timestamp, value: f32) {
        if let Some(latest) = self.latest() {
            if timestamp < latest {
                warn!(
                    latest_ns = latest.as_nanos(),
                    timestamp_ns = timestamp.as_nanos(),
                    "Dropping out-of-order power sample"
                );
                return;
            }
        }
        self.readings.push_back((timestamp, value));
        self.evict_before(timestamp.saturating_sub(self.window));
    }

    fn read(&self) -> f64 {
        self.readings
            .iter()
            .map(|(_, v)| f64::from(*v) * f64::from(*v))
            .sum()
    }

    fn reset(&mut self) {
        self.readings.clear();
    }
}
