//! Zone orchestration
//!
//! The course is three zones run in order:
//!
//! ```text
//! MazeSolving(primary) ──WallFound(side)──► WallFollowing(side)
//!        ──SegmentComplete──► DistanceMeasuring ──SectionFinished──► Finished
//! ```
//!
//! Each zone is a struct with a `step` (one loop iteration) and a `run`
//! that steps until the zone's completion predicate holds or the shared
//! [`TickBudget`] runs out.

pub mod budget;
pub mod context;
pub mod distance;
pub mod machine;
pub mod maze;
pub mod wall_follow;

pub use budget::TickBudget;
pub use context::{Navigator, Parts, Platform};
pub use distance::{DistanceMeter, DistanceStep};
pub use machine::{run_course, ZoneEvent, ZoneResult, ZoneState};
pub use maze::{MazeOutcome, MazeSolver, MazeStep};
pub use wall_follow::{WallFollower, WallStep};

use trackrunner_protocol::ZoneId;

/// Errors that end a zone early
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ZoneError {
    /// The zone did not finish within its tick budget; motors are stopped
    BudgetExhausted(ZoneId),
}
