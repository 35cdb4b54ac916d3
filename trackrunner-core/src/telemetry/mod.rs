//! In-memory telemetry sink
//!
//! A presentation layer that polls (rather than listening on a link) reads
//! events back out of an [`EventLog`].

use heapless::Deque;
use trackrunner_protocol::NavEvent;

use crate::traits::EventSink;

/// Bounded event ring; the oldest event is dropped when full
#[derive(Debug, Default)]
pub struct EventLog<const N: usize> {
    events: Deque<NavEvent, N>,
    dropped: u32,
}

impl<const N: usize> EventLog<N> {
    pub fn new() -> Self {
        Self {
            events: Deque::new(),
            dropped: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events lost to overflow since creation
    pub fn dropped(&self) -> u32 {
        self.dropped
    }

    /// Take the oldest event
    pub fn pop(&mut self) -> Option<NavEvent> {
        self.events.pop_front()
    }

    /// Oldest-first view without consuming
    pub fn iter(&self) -> impl Iterator<Item = &NavEvent> {
        self.events.iter()
    }
}

impl<const N: usize> EventSink for EventLog<N> {
    fn emit(&mut self, event: NavEvent) {
        if self.events.is_full() {
            self.events.pop_front();
            self.dropped = self.dropped.saturating_add(1);
        }
        // Cannot fail: a slot was freed above
        let _ = self.events.push_back(event);
    }
}
