//! Tick budget
//!
//! Replaces unbounded polling loops. Every loop iteration, including the
//! inner waits of node crossing and wall reacquisition, spends one tick.

/// Remaining loop iterations for a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickBudget {
    limit: u32,
    used: u32,
}

impl TickBudget {
    pub const fn new(limit: u32) -> Self {
        Self { limit, used: 0 }
    }

    /// Spend one tick; `false` once the budget is gone
    pub fn consume(&mut self) -> bool {
        if self.used >= self.limit {
            return false;
        }
        self.used += 1;
        true
    }

    pub fn used(&self) -> u32 {
        self.used
    }

    pub fn remaining(&self) -> u32 {
        self.limit - self.used
    }

    pub fn is_exhausted(&self) -> bool {
        self.used >= self.limit
    }
}
