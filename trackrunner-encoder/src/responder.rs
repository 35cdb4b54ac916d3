//! Bus command handling
//!
//! The board's I2C slave callbacks forward here: received writes to
//! [`EncoderResponder::on_receive`], read requests to
//! [`EncoderResponder::on_request`].

use trackrunner_protocol::{encode_distance, EncoderCommand, DISTANCE_PAYLOAD_LEN};

use crate::counter::TickCounter;
use crate::geometry::{EncoderGeometry, GeometryError};

#[cfg(feature = "defmt")]
use defmt::{debug, warn};

#[cfg(not(feature = "defmt"))]
macro_rules! warn {
    ($fmt:literal $(, $arg:expr)* $(,)?) => {{
        $( let _ = &$arg; )*
    }};
}

#[cfg(not(feature = "defmt"))]
macro_rules! debug {
    ($fmt:literal $(, $arg:expr)* $(,)?) => {{
        $( let _ = &$arg; )*
    }};
}

/// Edge interrupt on the encoder input
pub trait EdgeInterrupt {
    /// Enable the interrupt
    fn arm(&mut self);

    /// Disable the interrupt
    fn disarm(&mut self);
}

pub struct EncoderResponder<'a, I> {
    counter: &'a TickCounter,
    geometry: EncoderGeometry,
    interrupt: I,
}

impl<'a, I: EdgeInterrupt> EncoderResponder<'a, I> {
    /// Fails on a geometry that would report 0 cm for any tick count
    pub fn new(
        counter: &'a TickCounter,
        geometry: EncoderGeometry,
        interrupt: I,
    ) -> Result<Self, GeometryError> {
        geometry.validate()?;
        Ok(Self {
            counter,
            geometry,
            interrupt,
        })
    }

    pub fn geometry(&self) -> &EncoderGeometry {
        &self.geometry
    }

    /// Handle a write from the bus master
    pub fn on_receive(&mut self, bytes: &[u8]) {
        match EncoderCommand::from_bytes(bytes) {
            Ok(EncoderCommand::Start) => {
                self.counter.start();
                self.interrupt.arm();
                debug!("encoder counting started");
            }
            Ok(EncoderCommand::Stop) => {
                self.interrupt.disarm();
                self.counter.stop();
                debug!("encoder stopped at {} ticks", self.counter.ticks());
            }
            Err(_) => warn!("encoder ignored unknown command"),
        }
    }

    /// Answer a read from the bus master
    pub fn on_request(&self) -> [u8; DISTANCE_PAYLOAD_LEN] {
        encode_distance(self.distance_cm())
    }

    pub fn distance_cm(&self) -> f32 {
        self.geometry.distance_cm(self.counter.ticks())
    }

    pub fn release(self) -> I {
        self.interrupt
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trackrunner_protocol::decode_distance;

    #[derive(Default)]
    struct SimIrq {
        armed: bool,
        toggles: u32,
    }

    impl EdgeInterrupt for SimIrq {
        fn arm(&mut self) {
            self.armed = true;
            self.toggles += 1;
        }

        fn disarm(&mut self) {
            self.armed = false;
            self.toggles += 1;
        }
    }

    fn responder(counter: &TickCounter) -> EncoderResponder<'_, SimIrq> {
        EncoderResponder::new(counter, EncoderGeometry::default(), SimIrq::default()).unwrap()
    }

    #[test]
    fn test_start_arms_and_resets() {
        let counter = TickCounter::new();
        counter.start();
        counter.on_edge();

        let mut responder = responder(&counter);
        responder.on_receive(&[1]);
        assert_eq!(counter.ticks(), 0);
        assert!(counter.is_enabled());
        assert!(responder.release().armed);
    }

    #[test]
    fn test_stop_then_read_distance() {
        let counter = TickCounter::new();
        let mut responder = responder(&counter);

        responder.on_receive(&[1]);
        for _ in 0..40 {
            counter.on_edge();
        }
        responder.on_receive(&[0]);
        counter.on_edge();

        let distance = decode_distance(&responder.on_request()).unwrap();
        assert!((distance - 43.982_3).abs() < 1e-3);
        assert!(!responder.release().armed);
    }

    #[test]
    fn test_unknown_and_empty_ignored() {
        let counter = TickCounter::new();
        let mut responder = responder(&counter);
        responder.on_receive(&[7]);
        responder.on_receive(&[]);
        assert!(!counter.is_enabled());
        assert_eq!(responder.release().toggles, 0);
    }

    #[test]
    fn test_zero_slot_disc_refused() {
        let counter = TickCounter::new();
        let geometry = EncoderGeometry {
            ticks_per_rotation: 0,
            ..Default::default()
        };
        assert!(matches!(
            EncoderResponder::new(&counter, geometry, SimIrq::default()),
            Err(GeometryError::ZeroTicksPerRotation)
        ));
    }

    #[test]
    fn test_read_before_start_is_zero() {
        let counter = TickCounter::new();
        let responder = responder(&counter);
        assert_eq!(responder.on_request(), [0, 0, 0, 0]);
    }
}
