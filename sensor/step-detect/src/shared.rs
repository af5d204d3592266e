//! Thread-safe detector wrapper.
//!
//! Sensor callbacks can arrive on more than one thread. [`SharedStepDetector`]
//! puts the detector and its listeners behind a single mutex so that a whole
//! sample transition, including listener delivery, is one critical section.
//!
//! Listeners run while the lock is held. A listener that calls back into the
//! same `SharedStepDetector` will deadlock.

use std::sync::mpsc::Receiver;

use parking_lot::Mutex;
use step_types::{SensorSample, StepEvent};

use crate::detector::{GravityStepDetector, StepDetector};
use crate::listener::{ListenerId, StepListener, StepListeners};
use crate::power::SignalPower;
use crate::snapshot::DetectorSnapshot;

struct Inner<D> {
    detector: D,
    listeners: StepListeners,
}

/// A detector plus listeners, safe to share across sensor threads.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use step_detect::{GravityStepDetector, SharedStepDetector};
/// use step_types::{SensorSample, Timestamp};
///
/// let shared = Arc::new(SharedStepDetector::new(GravityStepDetector::with_power_cutoff(0.0)?));
/// let (_, steps) = shared.subscribe_channel();
///
/// for (t, v) in [(0, 5.0), (100, 1.0), (200, 3.0)] {
///     shared.on_sample(&SensorSample::vertical_only(Timestamp::from_millis(t), v));
/// }
/// assert_eq!(steps.try_iter().count(), 1);
/// # Ok::<(), step_types::StepError>(())
/// ```
pub struct SharedStepDetector<D> {
    inner: Mutex<Inner<D>>,
}

impl<D: StepDetector> SharedStepDetector<D> {
    /// Wraps a detector with an empty listener registry.
    #[must_use]
    pub fn new(detector: D) -> Self {
        Self::with_listeners(detector, StepListeners::new())
    }

    /// Wraps a detector with existing listeners.
    #[must_use]
    pub fn with_listeners(detector: D, listeners: StepListeners) -> Self {
        Self {
            inner: Mutex::new(Inner {
                detector,
                listeners,
            }),
        }
    }

    /// Processes one sample and notifies listeners if it completed a step.
    ///
    /// The returned event is the same one the listeners received.
    pub fn on_sample(&self, sample: &SensorSample) -> Option<StepEvent> {
        let mut inner = self.inner.lock();
        let step = inner.detector.on_sample(sample)?;
        inner.listeners.notify(&step);
        Some(step)
    }

    /// Registers a listener.
    pub fn subscribe<L>(&self, listener: L) -> ListenerId
    where
        L: StepListener + 'static,
    {
        self.inner.lock().listeners.subscribe(listener)
    }

    /// Registers a channel listener and returns its receiver.
    pub fn subscribe_channel(&self) -> (ListenerId, Receiver<StepEvent>) {
        self.inner.lock().listeners.subscribe_channel()
    }

    /// Removes a listener. Returns false if the id was not registered.
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        self.inner.lock().listeners.unsubscribe(id)
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.inner.lock().listeners.len()
    }

    /// Runs `f` with exclusive access to the detector.
    pub fn with_detector<R>(&self, f: impl FnOnce(&mut D) -> R) -> R {
        f(&mut self.inner.lock().detector)
    }

    /// Unwraps the detector, dropping the listeners.
    pub fn into_inner(self) -> D {
        self.inner.into_inner().detector
    }
}

impl<P: SignalPower> SharedStepDetector<GravityStepDetector<P>> {
    /// Copies the detector's diagnostic state.
    #[must_use]
    pub fn snapshot(&self) -> DetectorSnapshot {
        self.inner.lock().detector.snapshot()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    use step_types::Timestamp;

    use super::*;
    use crate::config::{DetectorConfig, StrideTiming};

    fn shared(cutoff: f64) -> SharedStepDetector<GravityStepDetector> {
        let config =
            DetectorConfig::with_power_cutoff(cutoff).stride_timing(StrideTiming::SampleClock);
        SharedStepDetector::new(GravityStepDetector::new(config).unwrap())
    }

    fn sample(millis: i64, vertical: f32) -> SensorSample {
        SensorSample::vertical_only(Timestamp::from_millis(millis), vertical)
    }

    #[test]
    fn listeners_receive_returned_steps() {
        let shared = shared(0.0);
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        shared.subscribe(move |_: &StepEvent| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        let mut returned = 0;
        for (t, v) in [(0, 5.0), (100, 1.0), (200, 3.0), (300, 1.0), (400, 6.0)] {
            returned += usize::from(shared.on_sample(&sample(t, v)).is_some());
        }

        assert_eq!(returned, 2);
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn no_listeners_still_returns_steps() {
        let shared = shared(0.0);
        shared.on_sample(&sample(0, 5.0));
        shared.on_sample(&sample(100, 1.0));
        assert!(shared.on_sample(&sample(200, 3.0)).is_some());
        assert_eq!(shared.listener_count(), 0);
    }

    #[test]
    fn unsubscribe_through_wrapper() {
        let shared = shared(0.0);
        let (id, rx) = shared.subscribe_channel();
        assert_eq!(shared.listener_count(), 1);
        assert!(shared.unsubscribe(id));

        for (t, v) in [(0, 5.0), (100, 1.0), (200, 3.0)] {
            shared.on_sample(&sample(t, v));
        }
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn snapshot_and_with_detector() {
        let shared = shared(0.0);
        shared.on_sample(&sample(0, 5.0));
        assert_eq!(shared.snapshot().last_two_values, [0.0, 5.0]);

        shared.with_detector(GravityStepDetector::reset);
        assert_eq!(shared.snapshot().stats.samples, 0);
    }

    #[test]
    fn concurrent_delivery_keeps_counts_consistent() {
        let shared = Arc::new(shared(0.0));
        let (_, rx) = shared.subscribe_channel();

        let handles: Vec<_> = (0..4)
            .map(|thread_index| {
                let shared = Arc::clone(&shared);
                thread::spawn(move || {
                    for i in 0..250 {
                        let t = i64::from(thread_index) * 1_000_000 + i64::from(i);
                        let v = if i % 2 == 0 { 1.0 } else { 3.0 };
                        shared.on_sample(&sample(t, v));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().expect("sensor thread panicked");
        }

        let detector = Arc::try_unwrap(shared)
            .ok()
            .expect("all sensor threads joined")
            .into_inner();
        let stats = detector.stats();
        assert_eq!(stats.samples, 1000);
        assert_eq!(stats.steps + stats.gated + stats.suppressed, stats.crossovers);
        assert_eq!(rx.try_iter().count(), usize::try_from(stats.steps).unwrap());
    }
}
