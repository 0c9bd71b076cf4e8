//! Poolkeeper CLI
//!
//! Command-line front end for [`poolkeeper_core`]: loads a TOML pool
//! configuration and runs reclamation sweeps (or dry-run previews) over
//! the configured pools.

pub mod cli;
pub mod commands;

pub use cli::{Cli, Command, Format};
pub use commands::run;
