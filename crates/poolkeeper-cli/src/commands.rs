//! Command execution: load the pool configuration and run sweeps.

use crate::cli::{Cli, Command, Format, StatusArgs, SweepArgs};
use anyhow::{bail, Context};
use poolkeeper_core::{PoolConfig, PoolReclaimer, PoolsConfig};
use std::time::Duration;

/// Execute the parsed command line.
pub fn run(cli: Cli) -> anyhow::Result<()> {
    init_logging(cli.verbose);

    let config = PoolsConfig::load(&cli.config)
        .with_context(|| format!("loading pool configuration from {}", cli.config.display()))?;

    match cli.command {
        Command::Sweep(args) => execute_sweep(&config, &args, cli.format),
        Command::Status(args) => execute_status(&config, &args, cli.format),
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Select all pools, or just the named one.
fn select<'a>(config: &'a PoolsConfig, pool: Option<&str>) -> anyhow::Result<Vec<&'a PoolConfig>> {
    match pool {
        Some(name) => {
            let found = config
                .get(name)
                .with_context(|| format!("pool '{}' is not configured", name))?;
            Ok(vec![found])
        }
        None => {
            if config.pools.is_empty() {
                bail!("no pools configured");
            }
            Ok(config.pools.iter().collect())
        }
    }
}

fn execute_sweep(config: &PoolsConfig, args: &SweepArgs, format: Format) -> anyhow::Result<()> {
    let pools = select(config, args.pool.as_deref())?;

    if args.dry_run {
        let mut previews = Vec::new();
        for pool in pools {
            let reclaimer = PoolReclaimer::new(pool.clone())?;
            previews.push(reclaimer.preview()?);
        }
        return render(&previews, |p| p.summary(), format);
    }

    let mut outcomes = Vec::new();
    for pool in pools {
        let mut reclaimer = PoolReclaimer::new(pool.clone())?;
        if let Some(secs) = args.deadline_secs {
            reclaimer = reclaimer.with_deadline(Duration::from_secs(secs));
        }
        outcomes.push(reclaimer.sweep()?);
    }
    render(&outcomes, |o| o.summary(), format)
}

fn execute_status(config: &PoolsConfig, args: &StatusArgs, format: Format) -> anyhow::Result<()> {
    let pools = select(config, args.pool.as_deref())?;

    let mut previews = Vec::new();
    for pool in pools {
        let reclaimer = PoolReclaimer::new(pool.clone())?;
        previews.push(reclaimer.preview()?);
    }
    render(&previews, |p| p.summary(), format)
}

fn render<T: serde::Serialize>(
    items: &[T],
    summary: impl Fn(&T) -> String,
    format: Format,
) -> anyhow::Result<()> {
    match format {
        Format::Text => {
            for item in items {
                println!("{}", summary(item));
            }
        }
        Format::Json => println!("{}", serde_json::to_string_pretty(items)?),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use std::io::Write;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, root: &std::path::Path) -> std::path::PathBuf {
        let path = dir.path().join("poolkeeper.toml");
        let doc = format!(
            r#"
            [[pool]]
            name = "logs"
            root = "{}"
            target_size = 50
            max_size = 100
            grace_period_secs = 0
            "#,
            root.display()
        );
        fs::write(&path, doc).unwrap();
        path
    }

    #[test]
    fn test_select_unknown_pool_fails() {
        let config = PoolsConfig { pools: Vec::new() };
        assert!(select(&config, Some("nope")).is_err());
    }

    #[test]
    fn test_select_empty_config_fails() {
        let config = PoolsConfig { pools: Vec::new() };
        assert!(select(&config, None).is_err());
    }

    #[test]
    fn test_sweep_command_end_to_end() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("logs");
        fs::create_dir(&root).unwrap();
        let mut file = File::create(root.join("old.log")).unwrap();
        file.write_all(&[b'x'; 80]).unwrap();
        drop(file);

        let config_path = write_config(&dir, &root);
        let config = PoolsConfig::load(&config_path).unwrap();
        let args = SweepArgs {
            pool: Some("logs".into()),
            dry_run: false,
            deadline_secs: None,
        };
        execute_sweep(&config, &args, Format::Text).unwrap();
        assert!(!root.join("old.log").exists());
    }

    #[test]
    fn test_dry_run_deletes_nothing() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("logs");
        fs::create_dir(&root).unwrap();
        fs::write(root.join("old.log"), vec![b'x'; 80]).unwrap();

        let config_path = write_config(&dir, &root);
        let config = PoolsConfig::load(&config_path).unwrap();
        let args = SweepArgs {
            pool: None,
            dry_run: true,
            deadline_secs: None,
        };
        execute_sweep(&config, &args, Format::Json).unwrap();
        assert!(root.join("old.log").exists());
    }
}
