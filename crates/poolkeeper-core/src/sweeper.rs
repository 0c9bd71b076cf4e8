//! Sweep orchestration over one configured pool
//!
//! A sweep is a single synchronous pass: probe the whole pool, build the
//! oldest-first inventory, ask the policy for a deletion plan, then execute
//! it against the live filesystem. Per-entry failures are absorbed into the
//! outcome and never abort the pass.

use crate::config::PoolConfig;
use crate::error::ReclaimError;
use crate::inventory::{self, PoolEntry};
use crate::outcome::{PlannedDeletion, SweepError, SweepOutcome, SweepPreview};
use crate::policy::{self, PolicyParams};
use crate::probe;
use std::fs;
use std::io;
use std::sync::{Mutex, TryLockError};
use std::time::{Duration, Instant, SystemTime};

/// Reclaims disk space from one storage pool
///
/// The reclaimer owns the pool's serialization: concurrent sweeps over the
/// same pool would double-count entries or delete what the other pass is
/// mid-probe on, so a caller finding a sweep already in flight gets an
/// empty outcome with its `skipped` flag set instead of queueing a
/// redundant pass. Reclaimers for
/// different pools are independent and may run in parallel.
///
/// # Examples
///
/// ```no_run
/// use poolkeeper_core::{PoolConfig, PoolReclaimer};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = PoolConfig::new("uploads", "/var/app/uploads", 800 << 20, 1 << 30, 1800)?;
/// let reclaimer = PoolReclaimer::new(config)?;
///
/// let outcome = reclaimer.sweep()?;
/// println!("{}", outcome.summary());
/// # Ok(())
/// # }
/// ```
pub struct PoolReclaimer {
    config: PoolConfig,
    deadline: Option<Duration>,
    gate: Mutex<()>,
}

impl PoolReclaimer {
    /// Create a reclaimer for a validated pool configuration
    ///
    /// # Errors
    ///
    /// Returns [`ReclaimError::Config`] if the configuration is invalid;
    /// an invalid pool never enters service.
    pub fn new(config: PoolConfig) -> Result<Self, ReclaimError> {
        config.validate()?;
        Ok(Self {
            config,
            deadline: None,
            gate: Mutex::new(()),
        })
    }

    /// Bound each pass by a wall-clock budget
    ///
    /// When the budget runs out mid-pass, the remainder of the deletion
    /// plan is abandoned and the outcome reports the partial progress with
    /// its `deadline_hit` flag set. Without a budget, a pass over a
    /// pathologically large pool blocks its caller for as long as it takes.
    pub fn with_deadline(mut self, budget: Duration) -> Self {
        self.deadline = Some(budget);
        self
    }

    /// The pool this reclaimer manages
    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Run one sweep pass over the pool
    ///
    /// # Errors
    ///
    /// Fails only when the pass cannot start at all (pool root missing or
    /// unreadable). Individual deletion failures are recorded in the
    /// outcome and never propagate.
    pub fn sweep(&self) -> Result<SweepOutcome, ReclaimError> {
        let _guard = match self.gate.try_lock() {
            Ok(guard) => guard,
            Err(TryLockError::WouldBlock) => {
                tracing::debug!(pool = %self.config.name, "sweep already in flight, skipping");
                let mut outcome = SweepOutcome::new(&self.config.name);
                outcome.skipped = true;
                return Ok(outcome);
            }
            Err(TryLockError::Poisoned(poisoned)) => poisoned.into_inner(),
        };
        self.sweep_locked()
    }

    /// Compute what a sweep would do without deleting anything
    ///
    /// Waits for any in-flight sweep of the same pool to finish, so the
    /// returned plan reflects settled state rather than entries that are
    /// mid-deletion.
    ///
    /// # Errors
    ///
    /// Same start-up conditions as [`PoolReclaimer::sweep`].
    pub fn preview(&self) -> Result<SweepPreview, ReclaimError> {
        let _guard = match self.gate.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let (plan, pool_total) = self.build_plan()?;
        Ok(SweepPreview {
            pool: self.config.name.clone(),
            pool_total,
            would_delete: plan
                .delete
                .iter()
                .map(|e| PlannedDeletion {
                    path: e.path.clone(),
                    size_bytes: e.size_bytes,
                })
                .collect(),
            entries_protected: plan.protected,
            projected_total: plan.projected_total,
        })
    }

    fn sweep_locked(&self) -> Result<SweepOutcome, ReclaimError> {
        let started = Instant::now();
        let (plan, pool_total) = self.build_plan()?;

        tracing::debug!(
            pool = %self.config.name,
            pool_total,
            planned = plan.delete.len(),
            protected = plan.protected,
            "executing sweep plan"
        );

        let mut outcome = SweepOutcome::new(&self.config.name);
        outcome.entries_skipped = plan.protected;

        for entry in &plan.delete {
            if let Some(budget) = self.deadline {
                if started.elapsed() >= budget {
                    tracing::warn!(
                        pool = %self.config.name,
                        "pass deadline reached, abandoning remainder of plan"
                    );
                    outcome.deadline_hit = true;
                    break;
                }
            }

            match remove_entry(entry) {
                Ok(()) => {
                    outcome.entries_deleted += 1;
                    outcome.bytes_freed += entry.size_bytes;
                }
                Err(e) => {
                    tracing::warn!(
                        pool = %self.config.name,
                        path = %entry.path.display(),
                        error = %e,
                        "deletion failed, continuing"
                    );
                    outcome.errors.push(SweepError {
                        path: entry.path.clone(),
                        message: e.to_string(),
                    });
                }
            }
        }

        outcome.duration_ms = started.elapsed().as_millis() as u64;
        tracing::info!(
            pool = %self.config.name,
            bytes_freed = outcome.bytes_freed,
            deleted = outcome.entries_deleted,
            skipped = outcome.entries_skipped,
            errors = outcome.errors.len(),
            "sweep complete"
        );
        Ok(outcome)
    }

    /// Probe the pool and ask the policy for a plan
    ///
    /// The whole-tree probe taken here is the authoritative starting total
    /// for the pass; per-entry sizes from the inventory are only subtracted
    /// from it, never re-probed.
    fn build_plan(&self) -> Result<(policy::SweepPlan, u64), ReclaimError> {
        let root = &self.config.root;
        if !root.is_dir() {
            return Err(ReclaimError::PoolUnavailable {
                root: root.clone(),
                source: io::Error::new(io::ErrorKind::NotFound, "pool root is not a directory"),
            });
        }

        let pool_total = probe::entry_size(root);
        let entries = inventory::list(root).map_err(|source| ReclaimError::PoolUnavailable {
            root: root.clone(),
            source,
        })?;

        let params = PolicyParams {
            target_size: self.config.target_size,
            max_size: self.config.max_size,
            grace_period: self.config.grace_period(),
        };
        let plan = policy::plan(&entries, pool_total, &params, SystemTime::now());
        Ok((plan, pool_total))
    }
}

fn remove_entry(entry: &PoolEntry) -> io::Result<()> {
    if entry.is_dir {
        fs::remove_dir_all(&entry.path)
    } else {
        fs::remove_file(&entry.path)
    }
}
