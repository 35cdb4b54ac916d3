//! Maze solving zone
//!
//! Line following with a hand-on-wall turn rule. The zone ends at the
//! first cross-section after at least one node where a wall is present on
//! either side; that side becomes the wall to follow next.

use trackrunner_protocol::{NavEvent, TrackSide, ZoneId};

use super::{Navigator, Platform, TickBudget, ZoneError};
use crate::traits::Direction;

const TURN_DEGREES: u16 = 90;
const JUNCTION_DEGREES: u16 = 60;

/// Result of one maze iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MazeStep {
    Continue,
    /// Maze exit found with a wall on this side
    Exit(TrackSide),
}

/// What the maze zone hands to the next zone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MazeOutcome {
    pub wall_side: TrackSide,
    pub node_count: u8,
}

/// Maze zone state, created at zone entry
#[derive(Debug, Clone)]
pub struct MazeSolver {
    primary: TrackSide,
    node_count: u8,
}

impl MazeSolver {
    pub fn new(primary: TrackSide) -> Self {
        Self {
            primary,
            node_count: 0,
        }
    }

    pub fn primary(&self) -> TrackSide {
        self.primary
    }

    pub fn node_count(&self) -> u8 {
        self.node_count
    }

    /// Run one iteration of the maze loop
    pub fn step<P: Platform>(
        &mut self,
        nav: &mut Navigator<P>,
        budget: &mut TickBudget,
    ) -> Result<MazeStep, ZoneError> {
        let err = nav.line.detect();
        let volt = nav.line.calc_volt(err);

        if err != 0 {
            // Sharp and soft turns take the same pivot
            let sharp = nav.line.is_90_turn();
            let side = if err < 0 {
                TrackSide::Right
            } else {
                TrackSide::Left
            };
            debug!("maze turn {} sharp={}", side, sharp);
            nav.pivot(side, volt, TURN_DEGREES);
        } else if nav.line.is_cross_section() {
            if self.node_count > 0 {
                if nav.wall.has_wall(TrackSide::Left) {
                    return Ok(MazeStep::Exit(TrackSide::Left));
                }
                if nav.wall.has_wall(TrackSide::Right) {
                    return Ok(MazeStep::Exit(TrackSide::Right));
                }
            }
            nav.pivot(self.primary, volt, TURN_DEGREES);
        } else if nav.line.is_120_junction() {
            nav.pivot(self.primary, volt, JUNCTION_DEGREES);
        } else if nav.line.is_node() {
            self.cross_node(nav, budget)?;
        } else {
            nav.motion.drive(Direction::Forward, volt);
        }

        Ok(MazeStep::Continue)
    }

    /// Drive over a node: confirm it, read its polarity, settle blind into
    /// the marker, then drive on until its exit edge shows the pattern again
    fn cross_node<P: Platform>(
        &mut self,
        nav: &mut Navigator<P>,
        budget: &mut TickBudget,
    ) -> Result<(), ZoneError> {
        loop {
            nav.tick(budget, ZoneId::MazeSolving)?;
            nav.motion.drive(Direction::Forward, 0);
            nav.line.detect();
            if nav.line.is_node() {
                break;
            }
        }

        let polarity = nav.line.node_type();
        self.node_count = self.node_count.saturating_add(1);
        nav.emit(NavEvent::NodeDetected {
            index: self.node_count,
            polarity,
        });

        let settle_ms = nav.config.node_settle_ms;
        nav.wait_ms(settle_ms);

        loop {
            nav.tick(budget, ZoneId::MazeSolving)?;
            nav.motion.drive(Direction::Forward, 0);
            nav.line.detect();
            if nav.line.is_node() {
                return Ok(());
            }
        }
    }

    /// Step until the maze exit is found
    pub fn run<P: Platform>(
        mut self,
        nav: &mut Navigator<P>,
        budget: &mut TickBudget,
    ) -> Result<MazeOutcome, ZoneError> {
        info!("maze solving, primary {}", self.primary);
        nav.emit(NavEvent::ZoneEntered(ZoneId::MazeSolving));

        loop {
            nav.tick(budget, ZoneId::MazeSolving)?;
            if let MazeStep::Exit(wall_side) = self.step(nav, budget)? {
                nav.motion.stop();
                info!("maze exit, wall {} after {} nodes", wall_side, self.node_count);
                return Ok(MazeOutcome {
                    wall_side,
                    node_count: self.node_count,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RobotConfig;
    use crate::mock::{
        rig, wall_at, CROSS, DRIFT_LEFT, DRIFT_RIGHT, JUNCTION_120, NODE, NO_ECHO, SOFT_DRIFT_LEFT,
        STRAIGHT,
    };
    use crate::motion::MotionCommand;
    use trackrunner_protocol::NodePolarity;

    fn budget() -> TickBudget {
        TickBudget::new(100)
    }

    #[test]
    fn test_single_true_node_on_straight() {
        let frames = [STRAIGHT, NODE, NODE, STRAIGHT, NODE, STRAIGHT, CROSS];
        let config = RobotConfig::default();
        let (mut nav, bench) = rig(&frames, &[wall_at(100)], &[], &[], &config);
        let mut maze = MazeSolver::new(TrackSide::Left);
        let mut budget = budget();

        // Straight
        assert_eq!(maze.step(&mut nav, &mut budget), Ok(MazeStep::Continue));
        // Node entry, confirmation, blind settle, exit edge
        assert_eq!(maze.step(&mut nav, &mut budget), Ok(MazeStep::Continue));
        assert_eq!(maze.node_count(), 1);
        assert_eq!(bench.line_reads(), 5);
        assert_eq!(bench.delay.total_ms(), 2000);
        assert_eq!(
            bench.events(),
            vec![NavEvent::NodeDetected {
                index: 1,
                polarity: NodePolarity::True
            }]
        );

        // Forward motion resumes
        assert_eq!(maze.step(&mut nav, &mut budget), Ok(MazeStep::Continue));
        assert!(matches!(
            nav.motion.last_command(),
            MotionCommand::Drive {
                direction: Direction::Forward,
                ..
            }
        ));

        // Cross-section after a node with the left wall present
        assert_eq!(
            maze.step(&mut nav, &mut budget),
            Ok(MazeStep::Exit(TrackSide::Left))
        );
    }

    #[test]
    fn test_run_reports_wall_side_and_nodes() {
        let frames = [STRAIGHT, NODE, NODE, STRAIGHT, NODE, STRAIGHT, CROSS];
        let (mut nav, bench) = rig(&frames, &[NO_ECHO], &[], &[wall_at(150)], &RobotConfig::default());

        let outcome = MazeSolver::new(TrackSide::Left)
            .run(&mut nav, &mut budget())
            .unwrap();

        assert_eq!(
            outcome,
            MazeOutcome {
                wall_side: TrackSide::Right,
                node_count: 1
            }
        );
        assert_eq!(bench.events()[0], NavEvent::ZoneEntered(ZoneId::MazeSolving));
        assert_eq!(nav.motion.last_command(), MotionCommand::Stop);
    }

    #[test]
    fn test_drift_pivots_back_toward_line() {
        let (mut nav, _) = rig(&[DRIFT_LEFT, DRIFT_RIGHT], &[], &[], &[], &RobotConfig::default());
        let mut maze = MazeSolver::new(TrackSide::Left);

        maze.step(&mut nav, &mut budget()).unwrap();
        assert_eq!(
            nav.motion.last_command(),
            MotionCommand::Pivot {
                side: TrackSide::Right,
                degrees: 90
            }
        );

        maze.step(&mut nav, &mut budget()).unwrap();
        assert_eq!(
            nav.motion.last_command(),
            MotionCommand::Pivot {
                side: TrackSide::Left,
                degrees: 90
            }
        );
    }

    #[test]
    fn test_soft_drift_takes_the_same_pivot() {
        let (mut nav, _) = rig(&[SOFT_DRIFT_LEFT], &[], &[], &[], &RobotConfig::default());
        let mut maze = MazeSolver::new(TrackSide::Left);

        maze.step(&mut nav, &mut budget()).unwrap();
        assert!(!nav.line.is_90_turn());
        assert_eq!(
            nav.motion.last_command(),
            MotionCommand::Pivot {
                side: TrackSide::Right,
                degrees: 90
            }
        );
    }

    #[test]
    fn test_cross_section_before_any_node_turns_to_primary() {
        let (mut nav, bench) = rig(&[CROSS], &[wall_at(100)], &[], &[], &RobotConfig::default());
        let mut maze = MazeSolver::new(TrackSide::Right);

        assert_eq!(maze.step(&mut nav, &mut budget()), Ok(MazeStep::Continue));
        assert_eq!(
            nav.motion.last_command(),
            MotionCommand::Pivot {
                side: TrackSide::Right,
                degrees: 90
            }
        );
        assert_eq!(bench.delay.total_ms(), 450);
    }

    #[test]
    fn test_junction_turns_60_toward_primary() {
        let (mut nav, _) = rig(&[JUNCTION_120], &[], &[], &[], &RobotConfig::default());
        let mut maze = MazeSolver::new(TrackSide::Left);

        maze.step(&mut nav, &mut budget()).unwrap();
        assert_eq!(
            nav.motion.last_command(),
            MotionCommand::Pivot {
                side: TrackSide::Left,
                degrees: 60
            }
        );
    }

    #[test]
    fn test_exit_without_walls_keeps_solving() {
        let frames = [NODE, NODE, STRAIGHT, NODE, CROSS];
        let (mut nav, _) = rig(&frames, &[NO_ECHO], &[], &[NO_ECHO], &RobotConfig::default());
        let mut maze = MazeSolver::new(TrackSide::Left);

        maze.step(&mut nav, &mut budget()).unwrap();
        assert_eq!(maze.step(&mut nav, &mut budget()), Ok(MazeStep::Continue));
        assert_eq!(
            nav.motion.last_command(),
            MotionCommand::Pivot {
                side: TrackSide::Left,
                degrees: 90
            }
        );
    }

    #[test]
    fn test_run_out_of_budget() {
        let (mut nav, _) = rig(&[STRAIGHT], &[], &[], &[], &RobotConfig::default());
        let result = MazeSolver::new(TrackSide::Left).run(&mut nav, &mut TickBudget::new(5));
        assert_eq!(result, Err(ZoneError::BudgetExhausted(ZoneId::MazeSolving)));
        assert_eq!(nav.motion.last_command(), MotionCommand::Stop);
    }
}
