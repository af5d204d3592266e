//! Sample and event types for gravity-based step detection.
//!
//! This crate holds the data that flows across the step detector's
//! boundaries:
//!
//! - [`SensorSample`] - Timestamped 3-axis reading pushed by a sensor source
//! - [`SensorKind`] - Which sensor produced a sample
//! - [`StepEvent`] - Footfall emitted to listeners, with stride duration
//! - [`Timestamp`] / [`Duration`] - Signed nanosecond timing
//! - [`StepError`] - Errors shared by the detection crates
//!
//! # Layer 0 Crate
//!
//! No platform or sensor-registration dependencies. The detector itself lives
//! in `step-detect`.
//!
//! # Example
//!
//! ```
//! use step_types::{SensorSample, StepEvent, Timestamp};
//!
//! let sample = SensorSample::gravity(Timestamp::from_millis(10), [0.0, 0.2, 9.8]);
//! assert!(sample.validate().is_ok());
//!
//! let step = StepEvent::new(sample.timestamp, f64::NAN);
//! assert!(!step.has_stride());
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod error;
mod sample;
mod step;
mod time;

pub use error::{Result, StepError};
pub use sample::{SensorKind, SensorSample, VERTICAL_AXIS};
pub use step::StepEvent;
pub use time::{Duration, NANOS_PER_SEC, Timestamp};
