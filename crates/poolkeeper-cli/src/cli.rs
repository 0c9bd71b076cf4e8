//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Poolkeeper - keep storage pools within their disk-space budgets.
#[derive(Debug, Parser)]
#[command(name = "poolkeeper")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Pool configuration file (TOML)
    #[arg(short, long, global = true, env = "POOLKEEPER_CONFIG", default_value = "poolkeeper.toml")]
    pub config: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, global = true, default_value = "text")]
    pub format: Format,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Format {
    /// One summary line per pool
    Text,
    /// JSON array of outcomes
    Json,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run one reclamation pass per configured pool
    Sweep(SweepArgs),

    /// Report pool sizes and what a pass would delete, deleting nothing
    Status(StatusArgs),
}

/// Arguments for the sweep command.
#[derive(Debug, Parser)]
pub struct SweepArgs {
    /// Sweep only the named pool
    #[arg(short, long)]
    pub pool: Option<String>,

    /// Plan and report without deleting anything
    #[arg(long)]
    pub dry_run: bool,

    /// Abandon a pass after this many seconds
    #[arg(long)]
    pub deadline_secs: Option<u64>,
}

/// Arguments for the status command.
#[derive(Debug, Parser)]
pub struct StatusArgs {
    /// Report only the named pool
    #[arg(short, long)]
    pub pool: Option<String>,
}
