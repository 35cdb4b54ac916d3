//! Scripted hardware for host tests
//!
//! Every mock hands out cheap clones that share state with the test, so a
//! test can build a [`Navigator`] and still inspect what the wheels, link,
//! delay and sink saw.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use trackrunner_protocol::NavEvent;

use crate::config::RobotConfig;
use crate::traits::{EncoderLink, EventSink, LineInput, LinkError, RangeError, RangeFinder, WheelDrive};
use crate::zone::{Navigator, Parts, Platform};

/// 8-sensor snapshot, `1` = off-line
pub type Frame = [u8; 8];

pub const STRAIGHT: Frame = [1, 1, 0, 0, 0, 0, 1, 1];
pub const NODE: Frame = [1, 0, 0, 1, 1, 0, 0, 1];
pub const CROSS: Frame = [0; 8];
pub const DRIFT_LEFT: Frame = [1, 1, 1, 1, 0, 0, 0, 1];
pub const DRIFT_RIGHT: Frame = [1, 0, 0, 0, 1, 1, 1, 1];
/// Left edge off the line, but not a whole half
pub const SOFT_DRIFT_LEFT: Frame = [1, 1, 0, 0, 0, 0, 0, 1];
pub const JUNCTION_120: Frame = [1, 1, 1, 0, 0, 1, 1, 1];

// Line

/// Shared frame cursor; a frame is consumed each time channel 0 is read
#[derive(Debug, Default)]
pub struct LineScript {
    frames: Vec<Frame>,
    next: usize,
    current: usize,
}

impl LineScript {
    /// Number of detect cycles so far
    pub fn reads(&self) -> usize {
        self.next
    }
}

#[derive(Debug, Clone)]
pub struct ScriptedLine {
    index: usize,
    script: Rc<RefCell<LineScript>>,
}

impl LineInput for ScriptedLine {
    fn is_off_line(&mut self) -> bool {
        let mut script = self.script.borrow_mut();
        if script.frames.is_empty() {
            return false;
        }
        if self.index == 0 {
            script.current = script.next.min(script.frames.len() - 1);
            script.next += 1;
        }
        script.frames[script.current][self.index] != 0
    }
}

/// Eight channels over `frames`; the last frame repeats forever
pub fn line_inputs(frames: &[Frame]) -> (Vec<ScriptedLine>, Rc<RefCell<LineScript>>) {
    let script = Rc::new(RefCell::new(LineScript {
        frames: frames.to_vec(),
        ..Default::default()
    }));
    let inputs = (0..8)
        .map(|index| ScriptedLine {
            index,
            script: script.clone(),
        })
        .collect();
    (inputs, script)
}

// Range

pub type Echo = Result<u32, RangeError>;

pub const NO_ECHO: Echo = Err(RangeError::NoEcho);

/// Shortest echo that converts back to exactly `mm`
pub fn echo_for_mm(mm: u16) -> u32 {
    (mm as u32 * 1000).div_ceil(173)
}

/// Echo for a wall `mm` away
pub fn wall_at(mm: u16) -> Echo {
    Ok(echo_for_mm(mm))
}

/// Ranger replaying echoes in order; the last one repeats, none means no echo
#[derive(Debug)]
pub struct ScriptedRange {
    echoes: VecDeque<Echo>,
}

impl ScriptedRange {
    pub fn new(echoes: &[Echo]) -> Self {
        Self {
            echoes: echoes.iter().copied().collect(),
        }
    }
}

impl RangeFinder for ScriptedRange {
    fn echo_us(&mut self) -> Result<u32, RangeError> {
        match self.echoes.len() {
            0 => NO_ECHO,
            1 => self.echoes[0],
            _ => self.echoes.pop_front().unwrap_or(NO_ECHO),
        }
    }
}

// Wheels

#[derive(Debug, Clone, Default)]
pub struct RecordingWheel {
    applied: Rc<RefCell<Vec<(u8, u8)>>>,
}

impl RecordingWheel {
    pub fn history(&self) -> Vec<(u8, u8)> {
        self.applied.borrow().clone()
    }

    /// Last `(positive, negative)` duty, `(0, 0)` if never driven
    pub fn last(&self) -> (u8, u8) {
        self.applied.borrow().last().copied().unwrap_or((0, 0))
    }
}

impl WheelDrive for RecordingWheel {
    fn apply(&mut self, positive: u8, negative: u8) {
        self.applied.borrow_mut().push((positive, negative));
    }
}

// Encoder link

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkCall {
    Start,
    Stop,
    Read,
}

#[derive(Debug)]
struct LinkState {
    calls: Vec<LinkCall>,
    distance: Result<f32, LinkError>,
    failure: Option<LinkError>,
}

#[derive(Debug, Clone)]
pub struct RecordingLink {
    state: Rc<RefCell<LinkState>>,
}

impl RecordingLink {
    pub fn with_distance(distance: Result<f32, LinkError>) -> Self {
        Self {
            state: Rc::new(RefCell::new(LinkState {
                calls: Vec::new(),
                distance,
                failure: None,
            })),
        }
    }

    /// Make every request fail with `error`
    pub fn fail_with(&self, error: LinkError) {
        self.state.borrow_mut().failure = Some(error);
    }

    pub fn set_distance(&self, distance: Result<f32, LinkError>) {
        self.state.borrow_mut().distance = distance;
    }

    pub fn calls(&self) -> Vec<LinkCall> {
        self.state.borrow().calls.clone()
    }

    fn record(&mut self, call: LinkCall) -> Result<(), LinkError> {
        let mut state = self.state.borrow_mut();
        state.calls.push(call);
        match state.failure {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

impl EncoderLink for RecordingLink {
    fn start(&mut self) -> Result<(), LinkError> {
        self.record(LinkCall::Start)
    }

    fn stop(&mut self) -> Result<(), LinkError> {
        self.record(LinkCall::Stop)
    }

    fn distance_cm(&mut self) -> Result<f32, LinkError> {
        self.record(LinkCall::Read)?;
        self.state.borrow().distance
    }
}

// Delay

/// Accumulates requested delay instead of sleeping
#[derive(Debug, Clone, Default)]
pub struct RecordingDelay {
    total_ns: Rc<Cell<u64>>,
}

impl RecordingDelay {
    pub fn total_ms(&self) -> u64 {
        self.total_ns.get() / 1_000_000
    }
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns.set(self.total_ns.get() + ns as u64);
    }
}

// Telemetry

#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    events: Rc<RefCell<Vec<NavEvent>>>,
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: NavEvent) {
        self.events.borrow_mut().push(event);
    }
}

// Platform

pub struct MockPlatform;

impl Platform for MockPlatform {
    type Line = ScriptedLine;
    type Range = ScriptedRange;
    type Wheel = RecordingWheel;
    type Link = RecordingLink;
    type Delay = RecordingDelay;
    type Sink = RecordingSink;
}

/// Test-side handles onto the mock hardware
pub struct Bench {
    pub line: Rc<RefCell<LineScript>>,
    pub left_wheel: RecordingWheel,
    pub right_wheel: RecordingWheel,
    pub link: RecordingLink,
    pub delay: RecordingDelay,
    pub sink: RecordingSink,
}

impl Bench {
    pub fn events(&self) -> Vec<NavEvent> {
        self.sink.events.borrow().clone()
    }

    pub fn line_reads(&self) -> usize {
        self.line.borrow().reads()
    }
}

/// Mock hardware over the given line frames and per-side echoes
pub fn parts(
    frames: &[Frame],
    left: &[Echo],
    front: &[Echo],
    right: &[Echo],
) -> (Parts<MockPlatform, Vec<ScriptedLine>>, Bench) {
    let (inputs, script) = line_inputs(frames);
    let bench = Bench {
        line: script,
        left_wheel: RecordingWheel::default(),
        right_wheel: RecordingWheel::default(),
        link: RecordingLink::with_distance(Ok(0.0)),
        delay: RecordingDelay::default(),
        sink: RecordingSink::default(),
    };
    let parts = Parts {
        line: inputs,
        left_range: ScriptedRange::new(left),
        front_range: ScriptedRange::new(front),
        right_range: ScriptedRange::new(right),
        left_wheel: bench.left_wheel.clone(),
        right_wheel: bench.right_wheel.clone(),
        link: bench.link.clone(),
        delay: bench.delay.clone(),
        sink: bench.sink.clone(),
    };
    (parts, bench)
}

/// A ready navigator over mock hardware
pub fn rig(
    frames: &[Frame],
    left: &[Echo],
    front: &[Echo],
    right: &[Echo],
    config: &RobotConfig,
) -> (Navigator<MockPlatform>, Bench) {
    let (parts, bench) = parts(frames, left, front, right);
    let nav = Navigator::assemble(config, parts).expect("mock hardware matches config");
    (nav, bench)
}
