//! Poolkeeper Core
//!
//! Quota-bounded, age-aware reclamation for on-disk storage pools.
//!
//! # Overview
//!
//! A request handler that accepts user uploads, stores analysis logs, and
//! packages export artifacts accumulates disk usage without bound. This
//! crate keeps each of those storage areas ("pools") within a disk-space
//! budget without deleting data that was written too recently to be safely
//! reclaimed:
//!
//! - **Two-threshold hysteresis**: a sweep converges toward `target_size`;
//!   `max_size` is a hard ceiling above which even recent entries lose
//!   their protection.
//! - **Grace period**: entries younger than the grace period survive while
//!   the pool stays below `max_size`, so a client holding a freshly
//!   returned link can still fetch its artifact.
//! - **Oldest-first ordering**: deletions happen strictly oldest creation
//!   time first among eligible entries.
//! - **Partial-failure tolerance**: a deletion that fails is recorded and
//!   skipped; a pass never aborts because one entry would not go.
//!
//! Sweeps are reactive: the caller invokes one inline before its own
//! mutating work, once per configured pool, and blocks until it completes.
//! There is no background scheduler.
//!
//! # Usage
//!
//! ```no_run
//! use poolkeeper_core::{PoolConfig, PoolReclaimer};
//! use std::time::Duration;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = PoolConfig::new("logs", "/var/app/logs", 10 << 20, 100 << 20, 3600)?;
//! let reclaimer = PoolReclaimer::new(config)?.with_deadline(Duration::from_secs(5));
//!
//! let outcome = reclaimer.sweep()?;
//! println!("{}", outcome.summary());
//! # Ok(())
//! # }
//! ```
//!
//! # Error model
//!
//! Only configuration problems and an unavailable pool root fail a pass.
//! Everything that can go wrong per entry (probe races, permission-denied
//! deletions) is absorbed, logged via `tracing`, and surfaced in
//! [`SweepOutcome::errors`]; the triggering caller never fails solely
//! because reclamation hit partial errors.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod inventory;
pub mod outcome;
pub mod policy;
pub mod probe;
pub mod sweeper;

// Re-exports for convenience
pub use config::{PoolConfig, PoolsConfig};
pub use error::ReclaimError;
pub use inventory::PoolEntry;
pub use outcome::{PlannedDeletion, SweepError, SweepOutcome, SweepPreview};
pub use policy::{PolicyParams, SweepPlan};
pub use sweeper::PoolReclaimer;
