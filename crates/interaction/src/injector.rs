//! Injection gateway.
//!
//! The core hands every synthesized event to an [`InjectionSink`]. Sinks
//! deliver synchronously and report success per event; they never wait for
//! the UI to react.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

use uidrive_event_model::event::InputEvent;

/// Boundary primitive that delivers one event into the UI stack.
pub trait InjectionSink: Send + Sync {
    /// Deliver `event`. Returns `false` if the stack rejected it.
    fn inject(&self, event: &InputEvent) -> bool;

    /// Sink name for logging.
    fn name(&self) -> &str;
}

impl<S: InjectionSink + ?Sized> InjectionSink for Arc<S> {
    fn inject(&self, event: &InputEvent) -> bool {
        (**self).inject(event)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Thin pass-through the orchestrators inject through.
#[derive(Clone)]
pub struct Injector {
    sink: Arc<dyn InjectionSink>,
}

impl Injector {
    pub fn new(sink: Arc<dyn InjectionSink>) -> Self {
        Self { sink }
    }

    /// Inject one event synchronously.
    pub fn inject(&self, event: &InputEvent) -> bool {
        let ok = self.sink.inject(event);
        if !ok {
            tracing::debug!(sink = %self.sink.name(), ?event, "Injection rejected");
        }
        ok
    }
}

/// One event seen by a [`MemorySink`] and the verdict it returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Injected {
    pub event: InputEvent,
    pub accepted: bool,
}

/// In-memory sink that records every event it is handed.
///
/// Accepts everything unless told to reject specific event ordinals
/// (0-based, counted across all events the sink has seen).
#[derive(Debug, Default)]
pub struct MemorySink {
    log: Mutex<Vec<Injected>>,
    reject: HashSet<usize>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject the events at the given ordinals.
    pub fn rejecting(ordinals: impl IntoIterator<Item = usize>) -> Self {
        Self {
            log: Mutex::new(Vec::new()),
            reject: ordinals.into_iter().collect(),
        }
    }

    /// Everything injected so far, in order.
    pub fn injected(&self) -> Vec<Injected> {
        self.lock().clone()
    }

    /// Events only, in order.
    pub fn events(&self) -> Vec<InputEvent> {
        self.lock().iter().map(|i| i.event.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Injected>> {
        self.log.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl InjectionSink for MemorySink {
    fn inject(&self, event: &InputEvent) -> bool {
        let mut log = self.lock();
        let accepted = !self.reject.contains(&log.len());
        log.push(Injected {
            event: event.clone(),
            accepted,
        });
        accepted
    }

    fn name(&self) -> &str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uidrive_event_model::event::Coordinate;

    use crate::builder::EventBuilder;

    #[test]
    fn test_memory_sink_rejects_configured_ordinals() {
        let sink = MemorySink::rejecting([1]);
        let builder = EventBuilder::default();
        let (session, down) = builder.touch_down(Coordinate::new(1, 1));
        let moved = builder.touch_move(&session, Coordinate::new(2, 2));
        let up = builder.touch_up(session, Coordinate::new(3, 3));

        assert!(sink.inject(&down));
        assert!(!sink.inject(&moved));
        assert!(sink.inject(&up));

        let log = sink.injected();
        assert_eq!(log.len(), 3);
        assert!(!log[1].accepted);
    }
}
