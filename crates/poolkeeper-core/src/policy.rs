//! Reclamation policy: the pure decision core
//!
//! Given an oldest-first inventory and the pool's thresholds, decide which
//! entries to delete and when to stop. No I/O happens here; the sweeper
//! executes the resulting plan against the live filesystem.
//!
//! The two thresholds implement a hysteresis: `target_size` is the
//! steady-state goal a pass converges toward, while `max_size` is a hard
//! ceiling above which even entries younger than the grace period lose
//! their protection. Between the two, young entries survive so that a
//! client holding a freshly returned link can still fetch its artifact.

use crate::inventory::PoolEntry;
use std::time::{Duration, SystemTime};

/// Thresholds one policy evaluation runs under
#[derive(Debug, Clone, Copy)]
pub struct PolicyParams {
    /// Steady-state goal in bytes; evaluation stops once the remaining
    /// total drops to this
    pub target_size: u64,

    /// Hard ceiling in bytes above which grace protection is lifted
    pub max_size: u64,

    /// Minimum age during which an entry is protected below `max_size`
    pub grace_period: Duration,
}

/// The ordered deletion plan produced by one policy evaluation
#[derive(Debug, Clone)]
pub struct SweepPlan {
    /// Entries to delete, oldest first
    pub delete: Vec<PoolEntry>,

    /// Entries left in place under grace-period protection
    pub protected: usize,

    /// Pool size projected after every planned deletion succeeds
    pub projected_total: u64,
}

/// Decide which entries of `inventory` to delete
///
/// `inventory` must be ordered oldest creation time first, as produced by
/// [`crate::inventory::list`]. `pool_total` is the authoritative whole-pool
/// recursive size measured at pass start; it, not the sum of the listed
/// entries' sizes, drives the stopping condition (the two can disagree when
/// nested files change between probes, and mixing them within one pass is
/// not allowed).
///
/// For each entry, oldest first:
/// 1. stop once the remaining total is at or below `target_size`;
/// 2. skip entries younger than the grace cutoff while the remaining total
///    is below `max_size`;
/// 3. otherwise plan the deletion and subtract the entry's size.
///
/// A pass where every entry is protected and the total stays between
/// target and max is an accepted outcome, not an error.
pub fn plan(
    inventory: &[PoolEntry],
    pool_total: u64,
    params: &PolicyParams,
    now: SystemTime,
) -> SweepPlan {
    // None when the grace period reaches past the epoch; every entry is
    // younger than that
    let cutoff = now.checked_sub(params.grace_period);
    let mut remaining = pool_total;
    let mut delete = Vec::new();
    let mut protected = 0usize;

    for entry in inventory {
        if remaining <= params.target_size {
            break;
        }

        let in_grace = match cutoff {
            Some(cutoff) => entry.created > cutoff,
            None => true,
        };
        if in_grace && remaining < params.max_size {
            protected += 1;
            continue;
        }

        delete.push(entry.clone());
        remaining = remaining.saturating_sub(entry.size_bytes);
    }

    SweepPlan {
        delete,
        protected,
        projected_total: remaining,
    }
}
