//! The WRR pass itself.
//!
//! One call performs exactly one pass over the UE list: a plain round robin
//! walk, except each eligible UE gets `weight` allocation attempts instead
//! of one. The caller persists the returned cursor between slots; the
//! scheduler holds no state of its own.

use super::{AllocOutcome, CursorPolicy, Ue, UeAllocator};

/// Runs one WRR pass with the reference cursor policy
/// ([`CursorPolicy::AnySuccess`]).
///
/// `ues` is walked circularly starting at `next_idx % ues.len()`; every
/// eligible UE receives exactly `weight` calls to `alloc`, in traversal
/// order. Returns the start index for the next slot, always in
/// `[0, ues.len())` (or `0` for an empty list).
pub fn wrr_schedule<A>(ues: &[Ue], next_idx: usize, alloc: &mut A) -> usize
where
    A: UeAllocator + ?Sized,
{
    wrr_schedule_with(ues, next_idx, CursorPolicy::AnySuccess, alloc)
}

/// Runs one WRR pass with an explicit cursor policy.
///
/// Degenerate cases: an empty UE list returns `0`; a list with no eligible
/// UE returns `next_idx % ues.len()` without invoking the allocator. An
/// out-of-range `next_idx` is reduced modulo the list length, never
/// rejected. If no attempt in the pass succeeds, the cursor does not move.
///
/// The allocator is called for every weight unit of every eligible UE even
/// after failures; signalling exhaustion of a shared resource (by keeping
/// on returning [`AllocOutcome::Fail`]) is the allocator's job, not the
/// scheduler's.
pub fn wrr_schedule_with<A>(
    ues: &[Ue],
    next_idx: usize,
    policy: CursorPolicy,
    alloc: &mut A,
) -> usize
where
    A: UeAllocator + ?Sized,
{
    let n = ues.len();
    if n == 0 {
        return 0;
    }

    // Keep the cursor stable when there is nothing to serve.
    if !ues.iter().any(Ue::is_eligible) {
        return next_idx % n;
    }

    let mut idx = next_idx % n;
    let mut pending = idx;
    let mut any_success = false;

    for _ in 0..n {
        let ue = &ues[idx];

        if ue.is_eligible() {
            let mut successes = 0u32;
            for _ in 0..ue.weight {
                if alloc.allocate(ue).is_success() {
                    successes += 1;
                    // No early break: weight is an attempt budget per
                    // round, not a single grant.
                }
            }
            if successes > 0 {
                any_success = true;
            }

            tracing::trace!(
                ue_id = ue.ue_id,
                weight = ue.weight,
                successes,
                "wrr attempts"
            );

            let advance = match policy {
                CursorPolicy::AnySuccess => any_success,
                CursorPolicy::GrantedOnly => successes > 0,
            };
            if advance {
                pending = (idx + 1) % n;
            }
        }

        idx = (idx + 1) % n;
    }

    pending
}
