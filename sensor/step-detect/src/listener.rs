//! Step listeners.
//!
//! Listeners are plain callbacks kept in a registry. Any `Fn(&StepEvent)`
//! closure is a listener; [`StepListeners::subscribe_channel`] adapts the
//! registry to an `mpsc` receiver for consumers on another thread.

use std::fmt;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver};

use step_types::StepEvent;
use tracing::{info, trace};

/// Receives step events.
pub trait StepListener: Send + Sync {
    /// Called synchronously for every emitted step.
    fn on_step(&self, event: &StepEvent);
}

impl<F> StepListener for F
where
    F: Fn(&StepEvent) + Send + Sync,
{
    fn on_step(&self, event: &StepEvent) {
        (self)(event);
    }
}

/// Handle returned by [`StepListeners::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

impl ListenerId {
    /// Raw id value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "listener#{}", self.0)
    }
}

#[derive(Clone)]
struct ListenerEntry {
    id: ListenerId,
    callback: Arc<dyn StepListener>,
}

/// Registry of step listeners, notified in subscription order.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicUsize, Ordering};
///
/// use step_detect::StepListeners;
/// use step_types::{StepEvent, Timestamp};
///
/// let count = Arc::new(AtomicUsize::new(0));
/// let mut listeners = StepListeners::new();
/// let counter = Arc::clone(&count);
/// listeners.subscribe(move |_: &StepEvent| {
///     counter.fetch_add(1, Ordering::SeqCst);
/// });
///
/// listeners.notify(&StepEvent::new(Timestamp::zero(), f64::NAN));
/// assert_eq!(count.load(Ordering::SeqCst), 1);
/// ```
#[derive(Clone, Default)]
pub struct StepListeners {
    entries: Vec<ListenerEntry>,
    next_id: u64,
}

impl StepListeners {
    /// Creates an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
        }
    }

    /// Registers a listener.
    pub fn subscribe<L>(&mut self, listener: L) -> ListenerId
    where
        L: StepListener + 'static,
    {
        self.subscribe_arc(Arc::new(listener))
    }

    /// Registers a shared listener.
    pub fn subscribe_arc(&mut self, listener: Arc<dyn StepListener>) -> ListenerId {
        // Default leaves next_id at 0; ids start at 1 either way
        self.next_id = self.next_id.max(1);
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push(ListenerEntry {
            id,
            callback: listener,
        });
        info!(%id, listeners = self.entries.len(), "Registered step listener");
        id
    }

    /// Registers a channel and returns its receiving end.
    ///
    /// Events are copied into the channel. Once the receiver is dropped,
    /// sends fail silently until the entry is unsubscribed.
    pub fn subscribe_channel(&mut self) -> (ListenerId, Receiver<StepEvent>) {
        let (tx, rx) = mpsc::channel();
        let id = self.subscribe(move |event: &StepEvent| {
            if tx.send(*event).is_err() {
                trace!("Step channel receiver dropped");
            }
        });
        (id, rx)
    }

    /// Removes a listener. Returns false if the id was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        self.entries.len() != before
    }

    /// Delivers an event to every listener.
    pub fn notify(&self, event: &StepEvent) {
        for entry in &self.entries {
            entry.callback.on_step(event);
        }
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no listener is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes every listener.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl fmt::Debug for StepListeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepListeners")
            .field("ids", &self.entries.iter().map(|e| e.id).collect::<Vec<_>>())
            .finish()
    }
}
