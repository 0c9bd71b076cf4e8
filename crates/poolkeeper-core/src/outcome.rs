//! Outcome reporting for sweep passes
//!
//! Outcomes are plain values built and returned by the sweeper, never
//! ambient shared state. They exist for observability: the triggering
//! caller never fails because an outcome carries per-entry errors.

use serde::Serialize;
use std::path::PathBuf;

/// One entry that could not be removed during a sweep
#[derive(Debug, Clone, Serialize)]
pub struct SweepError {
    /// Path of the entry the deletion was attempted on
    pub path: PathBuf,

    /// Underlying failure, stringified for reporting
    pub message: String,
}

/// Result of one sweep pass over one pool
#[derive(Debug, Clone, Default, Serialize)]
pub struct SweepOutcome {
    /// Name of the swept pool
    pub pool: String,

    /// Bytes reclaimed by successful deletions
    pub bytes_freed: u64,

    /// Entries successfully removed
    pub entries_deleted: usize,

    /// Entries left in place under grace-period protection
    pub entries_skipped: usize,

    /// Deletions that failed; the pass continued past each one
    pub errors: Vec<SweepError>,

    /// Whether the pass abandoned the remainder of its plan on deadline
    pub deadline_hit: bool,

    /// Whether the pass was skipped because another sweep of the same
    /// pool was already in flight
    pub skipped: bool,

    /// Wall-clock duration of the pass in milliseconds
    pub duration_ms: u64,
}

impl SweepOutcome {
    /// Create an empty outcome for the named pool
    pub fn new(pool: &str) -> Self {
        Self {
            pool: pool.to_string(),
            ..Default::default()
        }
    }

    /// One-line human-readable summary
    pub fn summary(&self) -> String {
        let mut line = format!(
            "pool '{}': freed {} in {} entries, {} protected, {} errors ({} ms)",
            self.pool,
            format_bytes(self.bytes_freed),
            self.entries_deleted,
            self.entries_skipped,
            self.errors.len(),
            self.duration_ms,
        );
        if self.deadline_hit {
            line.push_str(" [deadline hit, plan abandoned]");
        }
        if self.skipped {
            line.push_str(" [skipped, sweep already in flight]");
        }
        line
    }
}

/// What a sweep would do, computed without deleting anything
#[derive(Debug, Clone, Serialize)]
pub struct SweepPreview {
    /// Name of the pool
    pub pool: String,

    /// Whole-pool recursive size at probe time
    pub pool_total: u64,

    /// Entries a sweep would delete, oldest first
    pub would_delete: Vec<PlannedDeletion>,

    /// Entries a sweep would leave under grace protection
    pub entries_protected: usize,

    /// Pool size projected after the planned deletions
    pub projected_total: u64,
}

/// One planned deletion inside a [`SweepPreview`]
#[derive(Debug, Clone, Serialize)]
pub struct PlannedDeletion {
    /// Path of the entry
    pub path: PathBuf,

    /// Bytes the deletion would free
    pub size_bytes: u64,
}

impl SweepPreview {
    /// One-line human-readable summary
    pub fn summary(&self) -> String {
        format!(
            "pool '{}': {} total, would delete {} entries freeing {}, {} protected, {} projected",
            self.pool,
            format_bytes(self.pool_total),
            self.would_delete.len(),
            format_bytes(self.pool_total.saturating_sub(self.projected_total)),
            self.entries_protected,
            format_bytes(self.projected_total),
        )
    }
}

/// Render a byte count with a binary-unit suffix
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [(u64, &str); 3] = [(1 << 30, "GiB"), (1 << 20, "MiB"), (1 << 10, "KiB")];
    for (scale, suffix) in UNITS {
        if bytes >= scale {
            return format!("{:.1} {}", bytes as f64 / scale as f64, suffix);
        }
    }
    format!("{} B", bytes)
}
