//! Distance measuring zone
//!
//! Follows the line while counting node-pattern matches. A physical node
//! shows the pattern at its entry edge and again at its exit edge, so:
//!
//! ```text
//! match 1  first node, entry edge   stop, start remote encoder
//! match 2  first node, exit edge    -
//! match 3  second node, entry edge  stop, read distance, stop encoder
//! ```
//!
//! The marker inside a node can read as a cross-section, so after the
//! reading the finish line is only accepted once the robot has left the
//! second node: its exit edge matched, or a plain line snapshot was seen.

use trackrunner_protocol::{NavEvent, ZoneId};

use super::{Navigator, Platform, TickBudget, ZoneError};
use crate::traits::LinkError;

/// Match on which the remote encoder starts counting
pub const START_MATCH: u8 = 1;

/// Match on which the distance is read
pub const READ_MATCH: u8 = 3;

/// Result of one distance-zone iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DistanceStep {
    Continue,
    /// Finish line reached
    Finished,
}

/// Distance zone state
#[derive(Debug, Clone, Default)]
pub struct DistanceMeter {
    matches: u8,
    on_node: bool,
    measured: bool,
    cleared: bool,
    distance_cm: Option<f32>,
}

impl DistanceMeter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Node-pattern matches counted so far
    pub fn matches(&self) -> u8 {
        self.matches
    }

    /// Distance read at the third match, if the link answered
    pub fn distance_cm(&self) -> Option<f32> {
        self.distance_cm
    }

    /// Run one iteration of the distance loop
    pub fn step<P: Platform>(&mut self, nav: &mut Navigator<P>) -> DistanceStep {
        let err = nav.line.detect();
        let volt = nav.line.calc_volt(err);

        let on_node = nav.line.is_node();
        if on_node && !self.on_node {
            self.matches = self.matches.saturating_add(1);
            debug!("node match {}", self.matches);
            match self.matches {
                START_MATCH => self.start_measuring(nav),
                READ_MATCH => self.finish_measuring(nav),
                _ => {}
            }
        }
        self.on_node = on_node;

        let cross = nav.line.is_cross_section();
        if self.measured && !self.cleared {
            self.cleared = self.matches > READ_MATCH || (!on_node && !cross);
        }

        if self.cleared && err == 0 && cross {
            nav.motion.stop();
            nav.emit(NavEvent::SectionFinished);
            return DistanceStep::Finished;
        }

        nav.steer(err, volt);
        DistanceStep::Continue
    }

    fn start_measuring<P: Platform>(&mut self, nav: &mut Navigator<P>) {
        nav.motion.stop();
        if let Err(e) = nav.motion.init_encoder() {
            link_fault(nav, e);
        }
    }

    fn finish_measuring<P: Platform>(&mut self, nav: &mut Navigator<P>) {
        nav.motion.stop();
        match nav.motion.distance_travelled() {
            Ok(cm) => {
                info!("measured {} cm", cm);
                self.distance_cm = Some(cm);
                nav.emit(NavEvent::DistanceMeasured { cm });
            }
            Err(e) => link_fault(nav, e),
        }
        if let Err(e) = nav.motion.stop_encoder() {
            link_fault(nav, e);
        }
        self.measured = true;
    }

    /// Step until the finish line; returns the measured distance
    pub fn run<P: Platform>(
        mut self,
        nav: &mut Navigator<P>,
        budget: &mut TickBudget,
    ) -> Result<Option<f32>, ZoneError> {
        info!("distance measuring");
        nav.emit(NavEvent::ZoneEntered(ZoneId::DistanceMeasuring));

        loop {
            nav.tick(budget, ZoneId::DistanceMeasuring)?;
            if self.step(nav) == DistanceStep::Finished {
                return Ok(self.distance_cm);
            }
        }
    }
}

fn link_fault<P: Platform>(nav: &mut Navigator<P>, error: LinkError) {
    warn!("encoder link fault {}", error);
    nav.emit(NavEvent::LinkFault);
}
