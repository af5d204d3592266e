//! Error types for step detection.

use thiserror::Error;

use crate::Timestamp;

/// Errors that can occur while configuring or feeding a step detector.
#[derive(Debug, Error)]
pub enum StepError {
    /// Invalid configuration value.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Sample carries a non-finite axis value.
    #[error("invalid sample at {timestamp_ns} ns: {reason}")]
    InvalidSample {
        /// Timestamp of the offending sample in nanoseconds.
        timestamp_ns: i64,
        /// What was wrong with it.
        reason: String,
    },

    /// Sample timestamp went backwards.
    #[error("non-monotonic timestamp: {current_ns} ns after {previous_ns} ns")]
    NonMonotonic {
        /// Timestamp of the previously accepted sample.
        previous_ns: i64,
        /// Timestamp that arrived out of order.
        current_ns: i64,
    },

    /// A recorded trace or configuration document could not be parsed.
    #[error("parse error at line {line}: {reason}")]
    Parse {
        /// 1-based line number (0 when not line oriented).
        line: usize,
        /// Parser message.
        reason: String,
    },

    /// I/O failure while reading a trace.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl StepError {
    /// Creates an invalid configuration error.
    #[must_use]
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig(reason.into())
    }

    /// Creates an invalid sample error.
    #[must_use]
    pub fn invalid_sample(timestamp: Timestamp, reason: impl Into<String>) -> Self {
        Self::InvalidSample {
            timestamp_ns: timestamp.as_nanos(),
            reason: reason.into(),
        }
    }

    /// Creates a non-monotonic timestamp error.
    #[must_use]
    pub const fn non_monotonic(previous: Timestamp, current: Timestamp) -> Self {
        Self::NonMonotonic {
            previous_ns: previous.as_nanos(),
            current_ns: current.as_nanos(),
        }
    }

    /// Creates a parse error.
    #[must_use]
    pub fn parse(line: usize, reason: impl Into<String>) -> Self {
        Self::Parse {
            line,
            reason: reason.into(),
        }
    }
}

/// Result type for step detection operations.
pub type Result<T> = std::result::Result<T, StepError>;
