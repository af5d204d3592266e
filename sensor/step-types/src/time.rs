//! Time types for gravity samples and step events.
//!
//! Sensor sources stamp samples with a signed, monotonic nanosecond counter.
//! The epoch is whatever the source uses (boot time on most platforms), so
//! only differences between timestamps carry meaning.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Nanoseconds in one second.
pub const NANOS_PER_SEC: i64 = 1_000_000_000;

/// Signed nanosecond timestamp.
///
/// # Example
///
/// ```
/// use step_types::Timestamp;
///
/// let ts = Timestamp::from_millis(1500);
/// assert_eq!(ts.as_nanos(), 1_500_000_000);
/// assert!((ts.as_secs_f64() - 1.5).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Timestamp {
    nanos: i64,
}

impl Timestamp {
    /// Creates a timestamp from nanoseconds.
    #[must_use]
    pub const fn from_nanos(nanos: i64) -> Self {
        Self { nanos }
    }

    /// Creates a timestamp from milliseconds.
    #[must_use]
    pub const fn from_millis(millis: i64) -> Self {
        Self {
            nanos: millis * 1_000_000,
        }
    }

    /// Creates a timestamp from seconds (floating point).
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn from_secs_f64(secs: f64) -> Self {
        Self {
            nanos: (secs * NANOS_PER_SEC as f64) as i64,
        }
    }

    /// Returns the timestamp as nanoseconds.
    #[must_use]
    pub const fn as_nanos(self) -> i64 {
        self.nanos
    }

    /// Returns the timestamp as seconds (floating point).
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_secs_f64(self) -> f64 {
        self.nanos as f64 / NANOS_PER_SEC as f64
    }

    /// Returns the zero timestamp.
    #[must_use]
    pub const fn zero() -> Self {
        Self { nanos: 0 }
    }

    /// Checks if this is the zero timestamp.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.nanos == 0
    }

    /// Moves the timestamp back by `duration`, saturating at `i64::MIN`.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub const fn saturating_sub(self, duration: Duration) -> Self {
        let span = if duration.as_nanos() > i64::MAX as u64 {
            i64::MAX
        } else {
            duration.as_nanos() as i64
        };
        Self {
            nanos: self.nanos.saturating_sub(span),
        }
    }

    /// Moves the timestamp forward by `duration`.
    ///
    /// Returns `None` on overflow.
    #[must_use]
    pub fn checked_add(self, duration: Duration) -> Option<Self> {
        let span = i64::try_from(duration.as_nanos()).ok()?;
        self.nanos.checked_add(span).map(Self::from_nanos)
    }

    /// Returns the time elapsed since `earlier`.
    ///
    /// Returns `None` if `earlier` is after `self`.
    #[must_use]
    #[allow(clippy::cast_sign_loss)]
    pub const fn checked_duration_since(self, earlier: Self) -> Option<Duration> {
        match self.nanos.checked_sub(earlier.nanos) {
            Some(delta) if delta >= 0 => Some(Duration::from_nanos(delta as u64)),
            _ => None,
        }
    }

    /// Returns `(self - earlier)` in seconds. Negative if `earlier` is later.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn secs_since(self, earlier: Self) -> f64 {
        self.nanos.saturating_sub(earlier.nanos) as f64 / NANOS_PER_SEC as f64
    }
}

/// A non-negative span of time with nanosecond precision.
///
/// # Example
///
/// ```
/// use step_types::Duration;
///
/// let d = Duration::from_millis(100);
/// assert_eq!(d.as_nanos(), 100_000_000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Duration {
    nanos: u64,
}

impl Duration {
    /// Creates a duration from nanoseconds.
    #[must_use]
    pub const fn from_nanos(nanos: u64) -> Self {
        Self { nanos }
    }

    /// Creates a duration from milliseconds.
    #[must_use]
    pub const fn from_millis(millis: u64) -> Self {
        Self {
            nanos: millis * 1_000_000,
        }
    }

    /// Creates a duration from whole seconds.
    #[must_use]
    pub const fn from_secs(secs: u64) -> Self {
        Self {
            nanos: secs * NANOS_PER_SEC.unsigned_abs(),
        }
    }

    /// Creates a duration from seconds (floating point). Negative input clamps to zero.
    #[must_use]
    #[allow(
        clippy::cast_sign_loss,
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss
    )]
    pub fn from_secs_f64(secs: f64) -> Self {
        Self {
            nanos: (secs * NANOS_PER_SEC as f64).max(0.0) as u64,
        }
    }

    /// Returns the duration as nanoseconds.
    #[must_use]
    pub const fn as_nanos(self) -> u64 {
        self.nanos
    }

    /// Returns the duration as milliseconds.
    #[must_use]
    pub const fn as_millis(self) -> u64 {
        self.nanos / 1_000_000
    }

    /// Returns the duration as seconds (floating point).
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_secs_f64(self) -> f64 {
        self.nanos as f64 / NANOS_PER_SEC as f64
    }

    /// Returns the zero duration.
    #[must_use]
    pub const fn zero() -> Self {
        Self { nanos: 0 }
    }

    /// Checks if this is a zero duration.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.nanos == 0
    }
}

impl From<std::time::Duration> for Duration {
    #[allow(clippy::cast_possible_truncation)]
    fn from(value: std::time::Duration) -> Self {
        Self::from_nanos(value.as_nanos().min(u128::from(u64::MAX)) as u64)
    }
}
