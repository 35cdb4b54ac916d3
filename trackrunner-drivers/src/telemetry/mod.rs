//! Framed telemetry over UART
//!
//! Every [`NavEvent`] goes out as one checksummed frame, flushed before
//! `emit` returns. A write failure drops that event and is counted;
//! navigation never stalls on the display link.

use trackrunner_core::traits::EventSink;
use trackrunner_hal::UartTx;
use trackrunner_protocol::NavEvent;

#[cfg(feature = "defmt")]
use defmt::warn;

#[cfg(not(feature = "defmt"))]
macro_rules! warn {
    ($fmt:literal $(, $arg:expr)* $(,)?) => {{
        $( let _ = &$arg; )*
    }};
}

pub struct FramedEventSink<U> {
    uart: U,
    failures: u32,
}

impl<U: UartTx> FramedEventSink<U> {
    pub fn new(uart: U) -> Self {
        Self { uart, failures: 0 }
    }

    /// Events that could not be written
    pub fn failures(&self) -> u32 {
        self.failures
    }

    pub fn release(self) -> U {
        self.uart
    }
}

impl<U: UartTx> EventSink for FramedEventSink<U> {
    fn emit(&mut self, event: NavEvent) {
        let bytes = match event.to_frame().to_bytes() {
            Ok(bytes) => bytes,
            Err(_) => {
                self.failures = self.failures.saturating_add(1);
                return;
            }
        };
        let sent = self.uart.write_blocking(&bytes).and_then(|()| self.uart.flush());
        if sent.is_err() {
            self.failures = self.failures.saturating_add(1);
            warn!("telemetry write failed, {} events lost", self.failures);
        }
    }
}
