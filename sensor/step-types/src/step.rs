//! Step events emitted by detectors.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::Timestamp;

/// A recognized footfall.
///
/// `stride_duration` is the time in seconds since the previous accepted step,
/// or NaN when that interval is unknown (first step, or a gap longer than the
/// maximum plausible stride).
///
/// # Example
///
/// ```
/// use step_types::{StepEvent, Timestamp};
///
/// let step = StepEvent::new(Timestamp::from_millis(400), 0.5);
/// assert!(step.has_stride());
/// assert!((step.cadence_hz().unwrap_or_default() - 2.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StepEvent {
    /// Timestamp of the sample that completed the step.
    pub timestamp: Timestamp,

    /// Detector confidence in `[0, 1]`.
    pub confidence: f64,

    /// Seconds since the previous accepted step, or NaN.
    pub stride_duration: f64,
}

impl StepEvent {
    /// Confidence reported by detectors that do not score their steps.
    pub const DEFAULT_CONFIDENCE: f64 = 1.0;

    /// Creates a step event with [`Self::DEFAULT_CONFIDENCE`].
    #[must_use]
    pub const fn new(timestamp: Timestamp, stride_duration: f64) -> Self {
        Self::with_confidence(timestamp, Self::DEFAULT_CONFIDENCE, stride_duration)
    }

    /// Creates a step event with an explicit confidence.
    #[must_use]
    pub const fn with_confidence(
        timestamp: Timestamp,
        confidence: f64,
        stride_duration: f64,
    ) -> Self {
        Self {
            timestamp,
            confidence,
            stride_duration,
        }
    }

    /// Checks whether the stride duration is known.
    #[must_use]
    pub fn has_stride(&self) -> bool {
        self.stride_duration.is_finite()
    }

    /// Step frequency implied by the stride duration.
    #[must_use]
    pub fn cadence_hz(&self) -> Option<f64> {
        (self.has_stride() && self.stride_duration > 0.0).then(|| 1.0 / self.stride_duration)
    }
}
