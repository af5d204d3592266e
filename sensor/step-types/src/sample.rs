//! Timestamped 3-axis sensor samples.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Result, StepError, Timestamp};

/// Index of the vertical component in [`SensorSample::axes`].
pub const VERTICAL_AXIS: usize = 2;

/// Kind of sensor that produced a sample.
///
/// Step detection only consumes [`SensorKind::Gravity`]; the other kinds
/// exist so a single sensor callback can forward everything it receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SensorKind {
    /// Estimated gravity vector.
    #[default]
    Gravity,
    /// Raw accelerometer (gravity included).
    Accelerometer,
    /// Accelerometer with gravity removed.
    LinearAcceleration,
    /// Gyroscope.
    Gyroscope,
    /// Magnetometer.
    Magnetometer,
}

impl SensorKind {
    /// Returns a human-readable name for the sensor kind.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Gravity => "gravity",
            Self::Accelerometer => "accelerometer",
            Self::LinearAcceleration => "linear acceleration",
            Self::Gyroscope => "gyroscope",
            Self::Magnetometer => "magnetometer",
        }
    }
}

/// A single reading pushed by a sensor source.
///
/// # Units
///
/// - Timestamp: monotonic nanoseconds
/// - Gravity axes: m/s², device frame `[x, y, z]`
///
/// # Example
///
/// ```
/// use step_types::{SensorSample, Timestamp};
///
/// let sample = SensorSample::gravity(Timestamp::from_millis(20), [0.1, 0.3, 9.7]);
/// assert!(sample.is_gravity());
/// assert!((sample.vertical() - 9.7).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SensorSample {
    /// When the sensor produced the reading.
    pub timestamp: Timestamp,

    /// Producing sensor.
    #[cfg_attr(feature = "serde", serde(default))]
    pub kind: SensorKind,

    /// Axis values `[x, y, z]`.
    pub axes: [f32; 3],
}

impl SensorSample {
    /// Creates a new sample.
    #[must_use]
    pub const fn new(timestamp: Timestamp, kind: SensorKind, axes: [f32; 3]) -> Self {
        Self {
            timestamp,
            kind,
            axes,
        }
    }

    /// Creates a gravity-sensor sample.
    #[must_use]
    pub const fn gravity(timestamp: Timestamp, axes: [f32; 3]) -> Self {
        Self::new(timestamp, SensorKind::Gravity, axes)
    }

    /// Creates a gravity sample carrying only a vertical component.
    #[must_use]
    pub const fn vertical_only(timestamp: Timestamp, vertical: f32) -> Self {
        Self::gravity(timestamp, [0.0, 0.0, vertical])
    }

    /// Returns the vertical (z) component.
    #[must_use]
    pub const fn vertical(&self) -> f32 {
        self.axes[VERTICAL_AXIS]
    }

    /// Checks whether the sample came from the gravity sensor.
    #[must_use]
    pub fn is_gravity(&self) -> bool {
        self.kind == SensorKind::Gravity
    }

    /// Returns the magnitude of the axis vector.
    #[must_use]
    pub fn magnitude(&self) -> f32 {
        let [x, y, z] = self.axes;
        x.hypot(y).hypot(z)
    }

    /// Checks that the vertical component is usable by the detector.
    ///
    /// # Errors
    ///
    /// Returns [`StepError::InvalidSample`] when the vertical value is NaN or
    /// infinite.
    pub fn validate(&self) -> Result<()> {
        let vertical = self.vertical();
        if vertical.is_nan() {
            return Err(StepError::invalid_sample(self.timestamp, "vertical axis is NaN"));
        }
        if vertical.is_infinite() {
            return Err(StepError::invalid_sample(
                self.timestamp,
                "vertical axis is infinite",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn gravity_constructor() {
        let sample = SensorSample::gravity(Timestamp::from_nanos(5), [1.0, 2.0, 3.0]);
        assert_eq!(sample.kind, SensorKind::Gravity);
        assert_eq!(sample.vertical(), 3.0);
        assert!(sample.is_gravity());
    }

    #[test]
    fn other_kinds_are_not_gravity() {
        let sample = SensorSample::new(
            Timestamp::zero(),
            SensorKind::Accelerometer,
            [0.0, 0.0, 9.81],
        );
        assert!(!sample.is_gravity());
        assert_eq!(sample.kind.name(), "accelerometer");
    }

    #[test]
    fn vertical_only_zeroes_horizontal_axes() {
        let sample = SensorSample::vertical_only(Timestamp::zero(), 4.0);
        assert_eq!(sample.axes, [0.0, 0.0, 4.0]);
    }

    #[test]
    fn magnitude() {
        let sample = SensorSample::gravity(Timestamp::zero(), [3.0, 0.0, 4.0]);
        assert!((sample.magnitude() - 5.0).abs() < 1e-6);
    }

    #[test]
    fn validate_rejects_non_finite_vertical() {
        let nan = SensorSample::vertical_only(Timestamp::from_nanos(9), f32::NAN);
        let inf = SensorSample::vertical_only(Timestamp::from_nanos(9), f32::INFINITY);
        assert!(matches!(nan.validate(), Err(StepError::InvalidSample { .. })));
        assert!(matches!(inf.validate(), Err(StepError::InvalidSample { .. })));
    }

    #[test]
    fn validate_ignores_horizontal_axes() {
        let sample = SensorSample::gravity(Timestamp::zero(), [f32::NAN, f32::NAN, 9.0]);
        assert!(sample.validate().is_ok());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn sample_kind_defaults_to_gravity() {
        let parsed: SensorSample =
            serde_json::from_str(r#"{"timestamp": 100, "axes": [0.0, 0.5, 9.5]}"#).unwrap();
        assert_eq!(parsed.kind, SensorKind::Gravity);
        assert_eq!(parsed.timestamp, Timestamp::from_nanos(100));
    }
}
