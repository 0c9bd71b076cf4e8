//! Error types for pool reclamation

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while configuring or sweeping a pool
///
/// Per-entry problems (an unreadable file during a probe, a deletion that
/// fails) are deliberately NOT represented here: they are absorbed into the
/// running pass and surfaced through [`crate::SweepOutcome::errors`]. This
/// enum covers only failures that prevent a pool from being configured or a
/// pass from starting at all.
#[derive(Error, Debug)]
pub enum ReclaimError {
    /// Invalid configuration, rejected before the pool enters service
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pool root missing or unreadable at sweep start
    #[error("Pool root {} is unavailable: {source}", .root.display())]
    PoolUnavailable {
        /// Root directory of the affected pool
        root: PathBuf,
        /// Underlying filesystem error
        source: std::io::Error,
    },

    /// Pass-level I/O failure outside any single entry
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
