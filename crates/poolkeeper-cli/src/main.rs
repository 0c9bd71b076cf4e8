//! poolkeeper - keep storage pools within their disk-space budgets.

use clap::Parser;
use poolkeeper_cli::{run, Cli};

fn main() {
    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
