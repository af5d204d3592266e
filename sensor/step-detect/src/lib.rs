//! Step detection from a gravity-sensor stream.
//!
//! # Detection
//!
//! - [`GravityStepDetector`] - Valley/rise crossover on the vertical gravity
//!   component, gated by windowed signal power
//! - [`StepDetector`] - Common interface for detection strategies
//! - [`DetectorConfig`] - Power cutoff, stride clock and warm-up
//! - [`DetectorSnapshot`] - Read-only diagnostic state
//!
//! # Signal Power
//!
//! - [`SignalPower`] - Push/read/reset power estimator interface
//! - [`CumulativeSignalPower`] - Sum of squares over a trailing 100 ms window
//!
//! # Delivery
//!
//! - [`StepListeners`] - Callback registry with channel subscriptions
//! - [`SharedStepDetector`] - Mutex-guarded detector for multi-threaded sources
//!
//! # Timing
//!
//! - [`StepClock`] - Clock read when a step is accepted
//! - [`MonotonicClock`] / [`ManualClock`] - Production and test clocks
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use step_detect::prelude::*;
//! use step_types::{Duration, SensorSample, Timestamp};
//!
//! let clock = Arc::new(ManualClock::new());
//! let mut detector = GravityStepDetector::with_power_cutoff(0.0)?.with_clock(clock.clone());
//!
//! let vertical = [5.0, 1.0, 3.0, 1.0, 6.0];
//! let mut steps = Vec::new();
//! for (i, v) in vertical.into_iter().enumerate() {
//!     clock.advance(Duration::from_millis(100));
//!     let t = Timestamp::from_millis(100 * i as i64);
//!     steps.extend(detector.on_sample(&SensorSample::vertical_only(t, v)));
//! }
//!
//! assert_eq!(steps.len(), 2);
//! assert!(steps[0].stride_duration.is_nan());
//! assert!((steps[1].stride_duration - 0.2).abs() < 1e-9);
//! # Ok::<(), step_types::StepError>(())
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod clock;
mod config;
mod detector;
mod listener;
mod power;
mod shared;
mod snapshot;
mod trace;

// Re-export detection types
pub use config::{DEFAULT_POWER_CUTOFF, DetectorConfig, MAX_STRIDE_DURATION_SECS, StrideTiming};
pub use detector::{GravityStepDetector, StepDetector};
pub use snapshot::{CrossoverPhase, DetectorSnapshot, DetectorStats};

// Re-export signal power types
pub use power::{CumulativeSignalPower, POWER_WINDOW, SignalPower};

// Re-export delivery types
pub use listener::{ListenerId, StepListener, StepListeners};
pub use shared::SharedStepDetector;

// Re-export timing types
pub use clock::{ManualClock, MonotonicClock, StepClock};

// Re-export replay helpers
pub use trace::{read_trace, replay};

/// Prelude for convenient imports.
pub mod prelude {
    pub use super::{
        CrossoverPhase, CumulativeSignalPower, DetectorConfig, DetectorSnapshot, DetectorStats,
        GravityStepDetector, ListenerId, ManualClock, MonotonicClock, SharedStepDetector,
        SignalPower, StepClock, StepDetector, StepListener, StepListeners, StrideTiming,
    };
}
