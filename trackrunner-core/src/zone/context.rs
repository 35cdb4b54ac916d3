//! Navigation context
//!
//! One [`Navigator`] is built at start-up from the board's hardware and
//! passed by `&mut` into every zone. It is the only place sensors and
//! actuators live.

use embedded_hal::delay::DelayNs;
use trackrunner_protocol::{NavEvent, TrackSide, ZoneId};

use super::{TickBudget, ZoneError};
use crate::config::{ConfigError, RobotConfig, ZoneConfig};
use crate::motion::MotionActuator;
use crate::sense::{LineClassifier, WallClassifier};
use crate::traits::{Direction, EncoderLink, EventSink, LineInput, RangeFinder, WheelDrive};

/// Concrete hardware types of a board
pub trait Platform {
    type Line: LineInput;
    type Range: RangeFinder;
    type Wheel: WheelDrive;
    type Link: EncoderLink;
    type Delay: DelayNs;
    type Sink: EventSink;
}

/// Hardware handed over to [`Navigator::assemble`]
pub struct Parts<P: Platform, L> {
    /// Line channels, left to right
    pub line: L,
    pub left_range: P::Range,
    pub front_range: P::Range,
    pub right_range: P::Range,
    pub left_wheel: P::Wheel,
    pub right_wheel: P::Wheel,
    pub link: P::Link,
    pub delay: P::Delay,
    pub sink: P::Sink,
}

/// Sensors, actuators and zone settings shared by every zone
pub struct Navigator<P: Platform> {
    pub line: LineClassifier<P::Line>,
    pub wall: WallClassifier<P::Range>,
    pub motion: MotionActuator<P::Wheel, P::Link>,
    pub delay: P::Delay,
    pub sink: P::Sink,
    pub config: ZoneConfig,
}

impl<P: Platform> Navigator<P> {
    pub fn new(
        line: LineClassifier<P::Line>,
        wall: WallClassifier<P::Range>,
        motion: MotionActuator<P::Wheel, P::Link>,
        delay: P::Delay,
        sink: P::Sink,
        config: ZoneConfig,
    ) -> Self {
        Self {
            line,
            wall,
            motion,
            delay,
            sink,
            config,
        }
    }

    /// Validate `config` and build every component from `parts`
    pub fn assemble<L>(config: &RobotConfig, parts: Parts<P, L>) -> Result<Self, ConfigError>
    where
        L: IntoIterator<Item = P::Line>,
    {
        config.validate()?;
        let line = LineClassifier::configure(parts.line, &config.line)?;
        let wall = WallClassifier::configure(
            parts.left_range,
            parts.front_range,
            parts.right_range,
            &config.wall,
        )?;
        let motion = MotionActuator::new(
            parts.left_wheel,
            parts.right_wheel,
            parts.link,
            &config.drive,
        );
        Ok(Self::new(line, wall, motion, parts.delay, parts.sink, config.zone))
    }

    /// Log and publish a navigation event
    pub fn emit(&mut self, event: NavEvent) {
        info!("event {}", event);
        self.sink.emit(event);
    }

    /// Blind in-place rotation toward `side`
    pub fn pivot(&mut self, side: TrackSide, magnitude: u16, degrees: u16) {
        self.motion.pivot(side, magnitude, degrees, &mut self.delay);
    }

    /// Blocking wait; nothing is sensed meanwhile
    pub fn wait_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }

    /// Slide back toward the line by the sign of a line error
    pub fn steer(&mut self, err: i32, magnitude: u16) {
        let direction = match err {
            e if e < 0 => Direction::Right,
            e if e > 0 => Direction::Left,
            _ => Direction::Forward,
        };
        self.motion.drive(direction, magnitude);
    }

    /// Spend one tick of `budget` on behalf of `zone`
    ///
    /// When the budget is gone the wheels are stopped before the error is
    /// returned.
    pub fn tick(&mut self, budget: &mut TickBudget, zone: ZoneId) -> Result<(), ZoneError> {
        if budget.consume() {
            return Ok(());
        }
        self.motion.stop();
        error!("{} out of budget after {} ticks", zone, budget.used());
        Err(ZoneError::BudgetExhausted(zone))
    }
}
