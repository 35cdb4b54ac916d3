//! Encoder controller over I2C
//!
//! Each request is a single transaction retried up to `retries` extra
//! times. No retry starts once `timeout_us` has passed on the clock, and a
//! failure past that point reports [`LinkError::Timeout`]. A single
//! transaction is bounded by the bus itself (see [`I2cBus`]).

use trackrunner_core::config::LinkConfig;
use trackrunner_core::traits::{EncoderLink, LinkError};
use trackrunner_hal::{Clock, I2cBus};
use trackrunner_protocol::{decode_distance, EncoderCommand, DISTANCE_PAYLOAD_LEN};

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

pub struct I2cEncoderLink<B, C> {
    bus: B,
    clock: C,
    config: LinkConfig,
}

impl<B: I2cBus, C: Clock> I2cEncoderLink<B, C> {
    pub fn new(bus: B, clock: C, config: LinkConfig) -> Self {
        Self { bus, clock, config }
    }

    pub fn config(&self) -> &LinkConfig {
        &self.config
    }

    pub fn release(self) -> (B, C) {
        (self.bus, self.clock)
    }

    fn transact<T>(
        &mut self,
        mut op: impl FnMut(&mut B, u8) -> Result<T, B::Error>,
    ) -> Result<T, LinkError> {
        let deadline = self.config.timeout_us as u64;
        let started = self.clock.now_us();
        let attempts = u16::from(self.config.retries) + 1;

        for attempt in 0..attempts {
            match op(&mut self.bus, self.config.address) {
                Ok(value) => return Ok(value),
                Err(_) => debug!("encoder link attempt {} failed", attempt + 1),
            }
            if self.clock.elapsed_us(started) > deadline {
                warn!("encoder link timeout after {} attempts", attempt + 1);
                return Err(LinkError::Timeout);
            }
        }

        warn!("encoder link failed after {} attempts", attempts);
        Err(LinkError::Bus)
    }

    fn command(&mut self, command: EncoderCommand) -> Result<(), LinkError> {
        let byte = command.to_byte();
        self.transact(|bus, address| bus.write(address, &[byte]))
    }
}

impl<B: I2cBus, C: Clock> EncoderLink for I2cEncoderLink<B, C> {
    fn start(&mut self) -> Result<(), LinkError> {
        self.command(EncoderCommand::Start)
    }

    fn stop(&mut self) -> Result<(), LinkError> {
        self.command(EncoderCommand::Stop)
    }

    fn distance_cm(&mut self) -> Result<f32, LinkError> {
        let mut payload = [0u8; DISTANCE_PAYLOAD_LEN];
        self.transact(|bus, address| bus.read(address, &mut payload))?;
        decode_distance(&payload).map_err(|_| LinkError::Payload)
    }
}
