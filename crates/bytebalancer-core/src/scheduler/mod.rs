//! Weighted Round Robin (WRR) scheduling engine for UE resource allocation.
//!
//! The scheduler walks a circular list of UEs once per slot, granting each
//! eligible UE up to `weight` allocation attempts through a caller-supplied
//! allocator. It supports:
//! - Weight-proportional attempt budgets per round (not single grants)
//! - A caller-owned round cursor so start positions rotate across slots
//! - Pluggable allocation backends via the [`UeAllocator`] trait

pub mod wrr;

use serde::{Deserialize, Serialize};

/// One schedulable entity (a user terminal, keyed by RNTI or index).
///
/// The scheduler only reads these records; weight and activity are owned
/// and mutated by whoever maintains the UE list between slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ue {
    /// UE identifier (RNTI / index), stable across rounds.
    pub ue_id: u16,
    /// WRR weight: allocation attempts granted per round when active.
    pub weight: u8,
    /// Eligible for scheduling this round.
    pub active: bool,
}

impl Ue {
    pub fn new(ue_id: u16, weight: u8, active: bool) -> Self {
        Self {
            ue_id,
            weight,
            active,
        }
    }

    /// A UE takes part in a round only when active with positive weight.
    /// Weight zero is treated exactly like inactive: skipped, not capped.
    pub fn is_eligible(&self) -> bool {
        self.active && self.weight > 0
    }
}

/// Result of a single allocation attempt. Consumed immediately by the
/// scheduler to decide cursor movement; never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocOutcome {
    Fail,
    Success,
}

impl AllocOutcome {
    pub fn is_success(self) -> bool {
        matches!(self, AllocOutcome::Success)
    }
}

/// Allocation backend invoked once per weight unit.
///
/// Real MAC allocators would consult buffer status, CQI/MCS, available RBs
/// and HARQ constraints here; the scheduler treats the decision as opaque.
/// Any per-round context (remaining budget, channel state) lives inside the
/// implementor, so `allocate` takes `&mut self`.
pub trait UeAllocator {
    fn allocate(&mut self, ue: &Ue) -> AllocOutcome;
}

impl<F> UeAllocator for F
where
    F: FnMut(&Ue) -> AllocOutcome,
{
    fn allocate(&mut self, ue: &Ue) -> AllocOutcome {
        self(ue)
    }
}

/// Controls how the round cursor advances after successful grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorPolicy {
    /// Reference behaviour: once any attempt in the pass has succeeded,
    /// every subsequently visited eligible UE pushes the cursor past
    /// itself, so the returned cursor lands after the last eligible UE
    /// visited at or after the first success. Kept for compatibility even
    /// though it rewards position rather than the UE that was granted.
    #[default]
    AnySuccess,
    /// Advance only past UEs that themselves received at least one grant.
    GrantedOnly,
}
