//! Offline replay of recorded sample traces.
//!
//! A trace is JSON lines, one [`SensorSample`] per line:
//!
//! ```text
//! {"timestamp": 0, "kind": "gravity", "axes": [0.1, 0.2, 9.7]}
//! {"timestamp": 10000000, "axes": [0.1, 0.2, 9.4]}
//! ```
//!
//! `kind` defaults to `gravity`. Blank lines and lines starting with `#` are
//! skipped.

use std::io::BufRead;

use step_types::{Result, SensorSample, StepError, StepEvent};
use tracing::debug;

use crate::detector::StepDetector;

/// Parses a JSON-lines trace.
///
/// # Errors
///
/// Returns [`StepError::Io`] if reading fails and [`StepError::Parse`] with
/// the 1-based line number for a malformed record.
pub fn read_trace<R: BufRead>(reader: R) -> Result<Vec<SensorSample>> {
    let mut samples = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let sample: SensorSample =
            serde_json::from_str(trimmed).map_err(|e| StepError::parse(index + 1, e.to_string()))?;
        samples.push(sample);
    }
    debug!(samples = samples.len(), "Parsed sample trace");
    Ok(samples)
}

/// Parses a trace and runs it through `detector`.
///
/// # Errors
///
/// Propagates errors from [`read_trace`]; nothing is fed to the detector if
/// the trace is malformed.
pub fn replay<D, R>(detector: &mut D, reader: R) -> Result<Vec<StepEvent>>
where
    D: StepDetector + ?Sized,
    R: BufRead,
{
    let samples = read_trace(reader)?;
    let steps = detector.process_batch(&samples);
    debug!(
        detector = detector.name(),
        samples = samples.len(),
        steps = steps.len(),
        "Replayed trace"
    );
    Ok(steps)
}
