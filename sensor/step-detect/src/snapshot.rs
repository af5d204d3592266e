//! Read-only views of detector state for diagnostics.

use serde::{Deserialize, Serialize};

/// Half-cycle of the vertical signal the crossover detector is tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrossoverPhase {
    /// No valley seen since the last rise ended.
    Falling,
    /// Rising out of the last valley.
    #[default]
    Rising,
}

impl CrossoverPhase {
    /// Phase encoded by the crossover parity flag.
    #[must_use]
    pub const fn from_swap_state(swap_state: bool) -> Self {
        if swap_state { Self::Rising } else { Self::Falling }
    }

    /// Returns true for [`CrossoverPhase::Rising`].
    #[must_use]
    pub const fn is_rising(self) -> bool {
        matches!(self, Self::Rising)
    }
}

/// Running counters kept by a detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DetectorStats {
    /// Gravity samples that reached the state machine.
    pub samples: u64,
    /// Samples from other sensors, ignored.
    pub ignored: u64,
    /// Samples rejected for a non-finite vertical value.
    pub invalid: u64,
    /// Samples whose timestamp went backwards (gate push refused).
    pub out_of_order: u64,
    /// Falling-to-rising transitions.
    pub crossovers: u64,
    /// Steps emitted.
    pub steps: u64,
    /// Crossovers discarded because power was below the cutoff.
    pub gated: u64,
    /// Accepted steps hidden by the warm-up period.
    pub suppressed: u64,
}

/// Copy of a detector's state after its most recent sample.
///
/// Holds values, not references; changing it has no effect on the detector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetectorSnapshot {
    /// Two most recent vertical readings, oldest first.
    pub last_two_values: [f32; 2],
    /// Gate power read on the most recent sample.
    pub current_power: f64,
    /// Whether the most recent sample completed a crossover.
    pub step_detected: bool,
    /// Whether power was below the cutoff on the most recent sample.
    pub signal_power_below_cutoff: bool,
    /// Stride duration computed at the last accepted crossover (NaN if unknown).
    pub last_stride_duration: f64,
    /// Crossover half-cycle.
    pub phase: CrossoverPhase,
    /// Running counters.
    pub stats: DetectorStats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_from_swap_state() {
        assert_eq!(CrossoverPhase::from_swap_state(true), CrossoverPhase::Rising);
        assert_eq!(CrossoverPhase::from_swap_state(false), CrossoverPhase::Falling);
        assert!(CrossoverPhase::default().is_rising());
    }

    #[test]
    fn stats_start_at_zero() {
        let stats = DetectorStats::default();
        assert_eq!(stats.samples, 0);
        assert_eq!(stats.steps, 0);
    }

    #[test]
    fn snapshot_serializes_nan_stride_as_null() {
        let snapshot = DetectorSnapshot {
            last_two_values: [1.0, 2.0],
            current_power: 5.0,
            step_detected: false,
            signal_power_below_cutoff: true,
            last_stride_duration: f64::NAN,
            phase: CrossoverPhase::Falling,
            stats: DetectorStats::default(),
        };
        let json = serde_json::to_string(&snapshot).unwrap_or_default();
        assert!(json.contains("\"last_stride_duration\":null"));
        assert!(json.contains("\"falling\""));
    }
}
