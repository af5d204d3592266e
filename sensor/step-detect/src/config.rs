//! Detector configuration.

use serde::{Deserialize, Serialize};
use step_types::{Result, StepError};

/// Default minimum window power for a crossover to count as a step.
pub const DEFAULT_POWER_CUTOFF: f64 = 2000.0;

/// Longest plausible stride, in seconds. Longer intervals report NaN.
pub const MAX_STRIDE_DURATION_SECS: f64 = 2.0;

/// Which clock stride durations are measured against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrideTiming {
    /// Read the detector's clock when a step is accepted.
    ///
    /// Matches how the detector has always measured strides, but drifts from
    /// the sample stream when samples are buffered or delivered late.
    #[default]
    WallClock,

    /// Use the timestamp of the sample that completed the step.
    SampleClock,
}

/// Configuration for [`GravityStepDetector`](crate::GravityStepDetector).
///
/// # Example
///
/// ```
/// use step_detect::{DetectorConfig, StrideTiming};
///
/// let config = DetectorConfig::default()
///     .power_cutoff(500.0)
///     .stride_timing(StrideTiming::SampleClock);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Minimum windowed signal power for a crossover to be accepted.
    ///
    /// Compared in `f64` without rounding to `f32` first; results can only
    /// differ from an `f32` comparison at the exact boundary.
    pub power_cutoff: f64,

    /// Clock used to measure stride durations.
    pub stride_timing: StrideTiming,

    /// Gravity samples to process before steps are reported.
    ///
    /// The first samples run the crossover test against a zero-filled
    /// buffer; a few samples of warm-up hide the spurious step that can cause.
    /// Timing state still advances during warm-up.
    pub warmup_samples: u32,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            power_cutoff: DEFAULT_POWER_CUTOFF,
            stride_timing: StrideTiming::WallClock,
            warmup_samples: 0,
        }
    }
}

impl DetectorConfig {
    /// Creates a default config with the given power cutoff.
    #[must_use]
    pub fn with_power_cutoff(power_cutoff: f64) -> Self {
        Self {
            power_cutoff,
            ..Default::default()
        }
    }

    /// Set the power cutoff.
    #[must_use]
    pub const fn power_cutoff(mut self, power_cutoff: f64) -> Self {
        self.power_cutoff = power_cutoff;
        self
    }

    /// Set the stride clock.
    #[must_use]
    pub const fn stride_timing(mut self, stride_timing: StrideTiming) -> Self {
        self.stride_timing = stride_timing;
        self
    }

    /// Set the warm-up sample count.
    #[must_use]
    pub const fn warmup_samples(mut self, warmup_samples: u32) -> Self {
        self.warmup_samples = warmup_samples;
        self
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`StepError::InvalidConfig`] if the power cutoff is negative or
    /// not finite.
    pub fn validate(&self) -> Result<()> {
        if !self.power_cutoff.is_finite() {
            return Err(StepError::invalid_config(format!(
                "power cutoff must be finite, got {}",
                self.power_cutoff
            )));
        }
        if self.power_cutoff < 0.0 {
            return Err(StepError::invalid_config(format!(
                "power cutoff must be non-negative, got {}",
                self.power_cutoff
            )));
        }
        Ok(())
    }

    /// Parse and validate a JSON configuration document.
    ///
    /// Missing fields take their default values.
    ///
    /// # Errors
    ///
    /// Returns [`StepError::Parse`] for malformed JSON and
    /// [`StepError::InvalidConfig`] for out-of-range values.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| StepError::parse(e.line(), e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`StepError::Parse`] if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| StepError::parse(0, e.to_string()))
    }
}
