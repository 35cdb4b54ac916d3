//! Zone state machine
//!
//! Sequencing is a pure function of the current state and an event; the
//! course runner feeds it the outcome of each zone.

use trackrunner_protocol::{TrackSide, ZoneId};

use super::{DistanceMeter, MazeSolver, Navigator, Platform, TickBudget, WallFollower, ZoneError};

/// Course states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ZoneState {
    /// Line maze with the hand-on-wall rule on `primary`
    MazeSolving { primary: TrackSide },
    /// Following the wall on `primary`
    WallFollowing { primary: TrackSide },
    /// Measuring the distance between two nodes
    DistanceMeasuring,
    /// Course complete
    Finished,
}

/// Zone outcomes that advance the course
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ZoneEvent {
    /// Maze exit found next to a wall on this side
    WallFound(TrackSide),
    /// Wall segment ended
    SegmentComplete,
    /// Finish line reached
    SectionFinished,
}

impl ZoneState {
    /// Initial state for a run whose maze hand rule uses `primary`
    pub fn start(primary: TrackSide) -> Self {
        ZoneState::MazeSolving { primary }
    }

    /// Process an event and return the next state
    ///
    /// Events that do not belong to the current zone leave it unchanged.
    pub fn transition(self, event: ZoneEvent) -> Self {
        use ZoneEvent::*;
        use ZoneState::*;

        match (self, event) {
            (MazeSolving { .. }, WallFound(side)) => WallFollowing { primary: side },
            (WallFollowing { .. }, SegmentComplete) => DistanceMeasuring,
            (DistanceMeasuring, SectionFinished) => Finished,
            (state, _) => state,
        }
    }

    /// Zone this state runs, `None` when finished
    pub fn zone(&self) -> Option<ZoneId> {
        match self {
            ZoneState::MazeSolving { .. } => Some(ZoneId::MazeSolving),
            ZoneState::WallFollowing { .. } => Some(ZoneId::WallFollowing),
            ZoneState::DistanceMeasuring => Some(ZoneId::DistanceMeasuring),
            ZoneState::Finished => None,
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, ZoneState::Finished)
    }
}

/// Everything a completed course reports
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ZoneResult {
    /// Wall side at the end of the maze
    pub wall_side: TrackSide,
    /// Nodes crossed in the maze
    pub node_count: u8,
    /// Inter-node distance; `None` when the encoder link failed
    pub distance_cm: Option<f32>,
}

/// Run the three zones in order
///
/// Zone-local state is created on entry to each zone and dropped on exit.
/// All zones draw from the same `budget`.
pub fn run_course<P: Platform>(
    nav: &mut Navigator<P>,
    primary: TrackSide,
    budget: &mut TickBudget,
) -> Result<ZoneResult, ZoneError> {
    let mut state = ZoneState::start(primary);
    let mut result = ZoneResult {
        wall_side: primary,
        node_count: 0,
        distance_cm: None,
    };

    loop {
        debug!("course state {}", state);
        state = match state {
            ZoneState::MazeSolving { primary } => {
                let outcome = MazeSolver::new(primary).run(nav, budget)?;
                result.wall_side = outcome.wall_side;
                result.node_count = outcome.node_count;
                state.transition(ZoneEvent::WallFound(outcome.wall_side))
            }
            ZoneState::WallFollowing { primary } => {
                WallFollower::new(primary).run(nav, budget)?;
                state.transition(ZoneEvent::SegmentComplete)
            }
            ZoneState::DistanceMeasuring => {
                result.distance_cm = DistanceMeter::new().run(nav, budget)?;
                state.transition(ZoneEvent::SectionFinished)
            }
            ZoneState::Finished => {
                info!("course finished");
                return Ok(result);
            }
        };
    }
}
