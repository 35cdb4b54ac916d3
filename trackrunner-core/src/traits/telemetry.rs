//! Telemetry sink seam

use trackrunner_protocol::NavEvent;

/// Receiver of navigation events
///
/// Emitting must never fail from the caller's point of view; a sink that
/// cannot deliver drops the event.
pub trait EventSink {
    fn emit(&mut self, event: NavEvent);
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn emit(&mut self, event: NavEvent) {
        (**self).emit(event)
    }
}
