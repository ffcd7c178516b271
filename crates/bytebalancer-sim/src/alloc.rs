//! Sample allocation backends for the slot loop.
//!
//! A production MAC allocator would look at buffer occupancy, CQI/MCS,
//! HARQ state and the remaining resource grid; these stand-ins model only
//! the two pieces the simulation needs, a per-slot RB budget and a lossy
//! channel.

use rand::Rng;
use rand::RngExt as _;

use bytebalancer_core::{AllocOutcome, Ue, UeAllocator};

/// Grants one resource block per successful attempt out of a fixed
/// per-slot budget, failing once the budget is exhausted.
#[derive(Debug, Clone)]
pub struct RbBudgetAllocator {
    remaining: u32,
}

impl RbBudgetAllocator {
    pub fn new(rb_budget: u32) -> Self {
        Self {
            remaining: rb_budget,
        }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }
}

impl UeAllocator for RbBudgetAllocator {
    fn allocate(&mut self, ue: &Ue) -> AllocOutcome {
        if self.remaining == 0 {
            return AllocOutcome::Fail;
        }
        self.remaining -= 1;
        tracing::debug!(
            ue_id = ue.ue_id,
            weight = ue.weight,
            remaining = self.remaining,
            "allocated RB"
        );
        AllocOutcome::Success
    }
}

/// Budget allocator behind a lossy channel: each attempt fails with
/// probability `loss_rate` before any budget is consumed.
#[derive(Debug, Clone)]
pub struct LossyAllocator<R: Rng> {
    budget: RbBudgetAllocator,
    loss_rate: f64,
    rng: R,
}

impl<R: Rng> LossyAllocator<R> {
    pub fn new(rb_budget: u32, loss_rate: f64, rng: R) -> Self {
        Self {
            budget: RbBudgetAllocator::new(rb_budget),
            loss_rate: loss_rate.clamp(0.0, 1.0),
            rng,
        }
    }

    pub fn remaining(&self) -> u32 {
        self.budget.remaining()
    }
}

impl<R: Rng> UeAllocator for LossyAllocator<R> {
    fn allocate(&mut self, ue: &Ue) -> AllocOutcome {
        if self.rng.random::<f64>() < self.loss_rate {
            tracing::debug!(ue_id = ue.ue_id, "attempt lost on channel");
            return AllocOutcome::Fail;
        }
        self.budget.allocate(ue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn budget_allocator_grants_until_exhausted() {
        let ue = Ue::new(1, 1, true);
        let mut alloc = RbBudgetAllocator::new(2);
        assert_eq!(alloc.allocate(&ue), AllocOutcome::Success);
        assert_eq!(alloc.allocate(&ue), AllocOutcome::Success);
        assert_eq!(alloc.allocate(&ue), AllocOutcome::Fail);
        assert_eq!(alloc.allocate(&ue), AllocOutcome::Fail);
        assert_eq!(alloc.remaining(), 0);
    }

    #[test]
    fn lossy_allocator_with_zero_loss_matches_budget() {
        let ue = Ue::new(1, 1, true);
        let mut alloc = LossyAllocator::new(3, 0.0, StdRng::seed_from_u64(1));
        for _ in 0..3 {
            assert_eq!(alloc.allocate(&ue), AllocOutcome::Success);
        }
        assert_eq!(alloc.allocate(&ue), AllocOutcome::Fail);
    }

    #[test]
    fn lossy_allocator_with_full_loss_never_spends_budget() {
        let ue = Ue::new(1, 1, true);
        let mut alloc = LossyAllocator::new(3, 1.0, StdRng::seed_from_u64(1));
        for _ in 0..8 {
            assert_eq!(alloc.allocate(&ue), AllocOutcome::Fail);
        }
        assert_eq!(alloc.remaining(), 3);
    }
}
