//! Pool configuration: size thresholds, grace periods, TOML loading
//!
//! Each pool is an independently managed directory with its own thresholds.
//! Validation happens at construction time; a pool whose target exceeds its
//! maximum never enters service.

use crate::error::ReclaimError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// One gibibyte in bytes
pub const GIB: u64 = 1 << 30;

/// One mebibyte in bytes
pub const MIB: u64 = 1 << 20;

/// Configuration for one storage pool
///
/// A pool converges toward `target_size` during a sweep. Entries younger
/// than the grace period are protected from deletion as long as the pool
/// stays below `max_size`; above it, protection is lifted.
///
/// # Examples
///
/// ```
/// use poolkeeper_core::PoolConfig;
///
/// let pool = PoolConfig::new("logs", "/var/app/logs", 10 << 20, 100 << 20, 3600).unwrap();
/// assert_eq!(pool.grace_period(), std::time::Duration::from_secs(3600));
///
/// // target above max is a configuration error, not a runtime condition
/// assert!(PoolConfig::new("bad", "/tmp/p", 200, 100, 0).is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolConfig {
    /// Pool name, used in diagnostics and CLI selection
    pub name: String,

    /// Root directory whose immediate children are the deletion units
    pub root: PathBuf,

    /// Desired steady-state upper bound in bytes; a sweep stops once the
    /// pool drops to this size
    pub target_size: u64,

    /// Hard ceiling in bytes above which grace-period protection is lifted
    pub max_size: u64,

    /// Minimum age in seconds during which an entry is protected from
    /// deletion while the pool stays below `max_size`
    pub grace_period_secs: u64,
}

impl PoolConfig {
    /// Create a validated pool configuration
    ///
    /// # Errors
    ///
    /// Returns [`ReclaimError::Config`] if `target_size > max_size` or the
    /// name is empty.
    pub fn new(
        name: impl Into<String>,
        root: impl Into<PathBuf>,
        target_size: u64,
        max_size: u64,
        grace_period_secs: u64,
    ) -> Result<Self, ReclaimError> {
        let config = Self {
            name: name.into(),
            root: root.into(),
            target_size,
            max_size,
            grace_period_secs,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check the invariants that must hold before the pool enters service
    pub fn validate(&self) -> Result<(), ReclaimError> {
        if self.name.is_empty() {
            return Err(ReclaimError::Config("pool name must not be empty".into()));
        }
        if self.target_size > self.max_size {
            return Err(ReclaimError::Config(format!(
                "pool '{}': target_size ({}) exceeds max_size ({})",
                self.name, self.target_size, self.max_size
            )));
        }
        Ok(())
    }

    /// Grace period as a [`Duration`]
    pub fn grace_period(&self) -> Duration {
        Duration::from_secs(self.grace_period_secs)
    }
}

/// The full set of pools managed by one deployment
///
/// Loaded from a TOML file of `[[pool]]` tables:
///
/// ```toml
/// [[pool]]
/// name = "uploads"
/// root = "/var/app/uploads"
/// target_size = 858993459
/// max_size = 1073741824
/// grace_period_secs = 1800
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolsConfig {
    /// Configured pools, each with a disjoint root
    #[serde(rename = "pool", default)]
    pub pools: Vec<PoolConfig>,
}

impl PoolsConfig {
    /// Load and validate a pool configuration file
    ///
    /// # Errors
    ///
    /// Returns [`ReclaimError::Config`] for unparseable TOML, invalid
    /// thresholds, or duplicate pool names; I/O errors propagate as
    /// [`ReclaimError::Io`].
    pub fn load(path: &Path) -> Result<Self, ReclaimError> {
        let contents = fs::read_to_string(path)?;
        let config: PoolsConfig = toml::from_str(&contents)
            .map_err(|e| ReclaimError::Config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate every pool and reject duplicate names
    pub fn validate(&self) -> Result<(), ReclaimError> {
        let mut seen = HashSet::new();
        for pool in &self.pools {
            pool.validate()?;
            if !seen.insert(pool.name.as_str()) {
                return Err(ReclaimError::Config(format!(
                    "duplicate pool name '{}'",
                    pool.name
                )));
            }
        }
        Ok(())
    }

    /// Look up a pool by name
    pub fn get(&self, name: &str) -> Option<&PoolConfig> {
        self.pools.iter().find(|p| p.name == name)
    }

    /// The reference deployment: uploads, exports, and logs pools rooted
    /// under `base`
    ///
    /// - uploads: 0.8 GiB target, 1 GiB max, 1800 s grace
    /// - exports: 3 GiB target, 4 GiB max, 600 s grace
    /// - logs: 10 MiB target, 100 MiB max, 3600 s grace
    pub fn reference(base: &Path) -> Self {
        let pool = |name: &str, target, max, grace| PoolConfig {
            name: name.to_string(),
            root: base.join(name),
            target_size: target,
            max_size: max,
            grace_period_secs: grace,
        };
        Self {
            pools: vec![
                pool("uploads", 4 * GIB / 5, GIB, 1800),
                pool("exports", 3 * GIB, 4 * GIB, 600),
                pool("logs", 10 * MIB, 100 * MIB, 3600),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_config() {
        let pool = PoolConfig::new("uploads", "/tmp/uploads", 100, 200, 60).unwrap();
        assert_eq!(pool.name, "uploads");
        assert_eq!(pool.grace_period(), Duration::from_secs(60));
    }

    #[test]
    fn test_target_above_max_rejected() {
        let result = PoolConfig::new("uploads", "/tmp/uploads", 201, 200, 60);
        assert!(matches!(result, Err(ReclaimError::Config(_))));
    }

    #[test]
    fn test_target_equal_to_max_allowed() {
        assert!(PoolConfig::new("uploads", "/tmp/uploads", 200, 200, 60).is_ok());
    }

    #[test]
    fn test_empty_name_rejected() {
        assert!(PoolConfig::new("", "/tmp/uploads", 100, 200, 60).is_err());
    }

    #[test]
    fn test_reference_pools() {
        let config = PoolsConfig::reference(Path::new("/var/app"));
        assert_eq!(config.pools.len(), 3);
        config.validate().unwrap();

        let uploads = config.get("uploads").unwrap();
        assert_eq!(uploads.max_size, GIB);
        assert_eq!(uploads.grace_period_secs, 1800);

        let logs = config.get("logs").unwrap();
        assert_eq!(logs.target_size, 10 * MIB);
        assert_eq!(logs.root, Path::new("/var/app/logs"));
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let mut config = PoolsConfig::reference(Path::new("/var/app"));
        let dup = config.pools[0].clone();
        config.pools.push(dup);
        assert!(matches!(config.validate(), Err(ReclaimError::Config(_))));
    }

    #[test]
    fn test_toml_parsing() {
        let doc = r#"
            [[pool]]
            name = "exports"
            root = "/srv/exports"
            target_size = 3221225472
            max_size = 4294967296
            grace_period_secs = 600
        "#;
        let config: PoolsConfig = toml::from_str(doc).unwrap();
        config.validate().unwrap();
        assert_eq!(config.pools.len(), 1);
        assert_eq!(config.pools[0].target_size, 3 * GIB);
    }

    #[test]
    fn test_serde_roundtrip() {
        let config = PoolsConfig::reference(Path::new("/var/app"));
        let serialized = toml::to_string(&config).unwrap();
        let deserialized: PoolsConfig = toml::from_str(&serialized).unwrap();
        assert_eq!(config.pools.len(), deserialized.pools.len());
        assert_eq!(config.pools[1].max_size, deserialized.pools[1].max_size);
    }
}
