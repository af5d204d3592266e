//! End-to-end scenarios for the gravity step detector.
//!
//! Synthetic gravity traces stand in for a phone carried while walking or
//! lying still. Each scenario feeds whole sample streams through the public
//! API and checks the emitted steps.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::float_cmp)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]

use std::f64::consts::TAU;
use std::sync::Arc;
use std::thread;

use approx::assert_relative_eq;
use step_detect::prelude::*;
use step_detect::{DEFAULT_POWER_CUTOFF, MAX_STRIDE_DURATION_SECS};
use step_types::{Duration, SensorKind, SensorSample, StepEvent, Timestamp};

/// Vertical gravity while walking: a valley at every footfall.
fn walking_trace(rate_hz: u32, cadence_hz: f64, amplitude: f64, cycles: u32) -> Vec<SensorSample> {
    let samples_per_cycle = (f64::from(rate_hz) / cadence_hz).round() as u32;
    (0..samples_per_cycle * cycles)
        .map(|i| {
            let t = f64::from(i) / f64::from(rate_hz);
            let z = 9.8 - amplitude * (TAU * cadence_hz * t).cos();
            SensorSample::gravity(Timestamp::from_secs_f64(t), [0.05, 0.1, z as f32])
        })
        .collect()
}

/// Device at rest: sensor jitter of a hundredth of a m/s² around gravity.
fn resting_trace(rate_hz: u32, count: u32) -> Vec<SensorSample> {
    (0..count)
        .map(|i| {
            let t = f64::from(i) / f64::from(rate_hz);
            let z = if i % 2 == 0 { 9.81 } else { 9.79 };
            SensorSample::vertical_only(Timestamp::from_secs_f64(t), z)
        })
        .collect()
}

fn sample_clock_detector(cutoff: f64) -> GravityStepDetector {
    let config = DetectorConfig::with_power_cutoff(cutoff).stride_timing(StrideTiming::SampleClock);
    GravityStepDetector::new(config).unwrap()
}

// =============================================================================
// Reference scenario
// =============================================================================

#[test]
fn five_sample_scenario_with_wall_clock() {
    let clock = Arc::new(ManualClock::new());
    let mut detector = GravityStepDetector::with_power_cutoff(0.0)
        .unwrap()
        .with_clock(clock.clone());

    let mut emitted = Vec::new();
    for (i, v) in [5.0_f32, 1.0, 3.0, 1.0, 6.0].into_iter().enumerate() {
        clock.advance(Duration::from_millis(100));
        let t = Timestamp::from_millis(100 * i as i64);
        if let Some(step) = detector.on_sample(&SensorSample::vertical_only(t, v)) {
            emitted.push(step);
        }
    }

    assert_eq!(emitted.len(), 2);
    assert_eq!(emitted[0].timestamp, Timestamp::from_millis(200));
    assert_eq!(emitted[1].timestamp, Timestamp::from_millis(400));
    assert!(emitted[0].stride_duration.is_nan());
    // Acceptances happened at wall-clock 300 ms and 500 ms
    assert_relative_eq!(emitted[1].stride_duration, 0.2, epsilon = 1e-9);
    assert!(emitted.iter().all(|s| s.confidence == 1.0));
}

#[test]
fn five_sample_scenario_with_sample_clock() {
    let mut detector = sample_clock_detector(0.0);
    let samples: Vec<_> = [5.0_f32, 1.0, 3.0, 1.0, 6.0]
        .into_iter()
        .enumerate()
        .map(|(i, v)| SensorSample::vertical_only(Timestamp::from_millis(100 * i as i64), v))
        .collect();

    let steps = detector.process_batch(&samples);
    assert_eq!(steps.len(), 2);
    assert_relative_eq!(steps[1].stride_duration, 0.2, epsilon = 1e-9);
}

// =============================================================================
// Walking and resting
// =============================================================================

#[test]
fn steady_walk_yields_one_step_per_cycle() {
    let mut detector = sample_clock_detector(300.0);
    let steps = detector.process_batch(&walking_trace(100, 2.0, 2.0, 10));

    // The valley at t = 0 is swallowed by the zero-filled start-up buffer
    assert_eq!(steps.len(), 9);
    assert!(steps[0].stride_duration.is_nan());
    for step in &steps[1..] {
        assert_relative_eq!(step.stride_duration, 0.5, epsilon = 1e-6);
        assert_relative_eq!(step.cadence_hz().unwrap(), 2.0, epsilon = 1e-4);
    }
}

#[test]
fn resting_jitter_is_gated() {
    let mut detector = sample_clock_detector(300.0);
    let steps = detector.process_batch(&resting_trace(100, 500));

    assert!(steps.is_empty());
    let stats = detector.stats();
    assert!(stats.crossovers > 200, "jitter should cross constantly");
    assert_eq!(stats.gated, stats.crossovers);
}

#[test]
fn same_jitter_counts_without_gate() {
    let mut detector = sample_clock_detector(0.0);
    let steps = detector.process_batch(&resting_trace(100, 500));
    assert_eq!(steps.len() as u64, detector.stats().crossovers);
    assert!(!steps.is_empty());
}

#[test]
fn pause_longer_than_max_stride_reports_nan() {
    let mut detector = sample_clock_detector(300.0);
    let mut trace = walking_trace(100, 2.0, 2.0, 4);

    // Stand still for three seconds, then walk again
    let offset = Duration::from_secs(5);
    trace.extend(
        walking_trace(100, 2.0, 2.0, 4)
            .into_iter()
            .map(|s| SensorSample::gravity(s.timestamp.checked_add(offset).unwrap(), s.axes)),
    );

    let steps = detector.process_batch(&trace);
    let unknown = steps.iter().filter(|s| !s.has_stride()).count();
    assert_eq!(unknown, 2, "first step and first step after the pause");
    assert!(
        steps
            .iter()
            .filter(|s| s.has_stride())
            .all(|s| s.stride_duration <= MAX_STRIDE_DURATION_SECS)
    );
}

#[test]
fn default_cutoff_needs_real_energy() {
    let mut detector = GravityStepDetector::default();
    assert_eq!(detector.power_cutoff(), DEFAULT_POWER_CUTOFF);

    // Eleven samples near a valley hold well under 2000
    let steps = detector.process_batch(&walking_trace(100, 2.0, 2.0, 6));
    assert!(steps.is_empty());

    // At 1 kHz the same window holds about a hundred samples
    let mut detector = GravityStepDetector::default();
    let steps = detector.process_batch(&walking_trace(1000, 2.0, 2.0, 6));
    assert!(!steps.is_empty());
}

#[test]
fn mixed_sensor_stream_only_uses_gravity() {
    let mut detector = sample_clock_detector(300.0);
    let walking = walking_trace(100, 2.0, 2.0, 6);
    let expected = sample_clock_detector(300.0).process_batch(&walking).len();

    let mixed: Vec<_> = walking
        .into_iter()
        .flat_map(|s| {
            let noise =
                SensorSample::new(s.timestamp, SensorKind::Accelerometer, [3.0, -2.0, 40.0]);
            [noise, s]
        })
        .collect();

    assert_eq!(detector.process_batch(&mixed).len(), expected);
    assert_eq!(detector.stats().ignored, detector.stats().samples);
}

// =============================================================================
// Delivery
// =============================================================================

#[test]
fn shared_detector_feeds_channel_consumer() {
    let shared = Arc::new(SharedStepDetector::new(sample_clock_detector(300.0)));
    let (_, rx) = shared.subscribe_channel();

    let consumer = thread::spawn(move || rx.iter().collect::<Vec<StepEvent>>());

    let producer = {
        let shared = Arc::clone(&shared);
        thread::spawn(move || {
            for sample in walking_trace(100, 2.0, 2.0, 10) {
                shared.on_sample(&sample);
            }
        })
    };
    producer.join().expect("producer panicked");

    // Dropping the last handle drops the channel sender and ends the consumer
    let snapshot = shared.snapshot();
    drop(shared);
    let received = consumer.join().expect("consumer panicked");

    assert_eq!(received.len(), 9);
    assert_eq!(snapshot.stats.steps, 9);
}
