//! Pool inventory: immediate children annotated with age and size
//!
//! Only the immediate children of a pool root are listed; a subdirectory is
//! deleted or kept as a whole unit, never partially. The inventory is
//! ordered oldest creation time first, which is the order the policy
//! evaluates and the sweeper deletes in.

use crate::probe;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// One immediate child of a pool root, an atomic deletion unit
#[derive(Debug, Clone)]
pub struct PoolEntry {
    /// Absolute path of the entry
    pub path: PathBuf,

    /// Whether the entry is a directory (removed recursively on deletion)
    pub is_dir: bool,

    /// Creation timestamp from filesystem metadata, falling back to the
    /// modification time where the filesystem reports no birth time
    pub created: SystemTime,

    /// Byte size: the file's own length, or the recursive sum for a
    /// directory
    pub size_bytes: u64,
}

/// List the immediate children of `root`, oldest creation time first
///
/// Timestamp ties are broken by path so the ordering is stable across
/// otherwise-identical entries. Children that vanish between the directory
/// read and their metadata lookup are skipped with a logged anomaly.
///
/// # Errors
///
/// Fails only if `root` itself cannot be read.
pub fn list(root: &Path) -> std::io::Result<Vec<PoolEntry>> {
    let mut entries = Vec::new();
    for child in fs::read_dir(root)? {
        let child = match child {
            Ok(child) => child,
            Err(e) => {
                tracing::warn!(root = %root.display(), error = %e, "inventory anomaly: unreadable directory entry");
                continue;
            }
        };
        let path = child.path();
        let meta = match fs::symlink_metadata(&path) {
            Ok(meta) => meta,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "inventory anomaly: entry vanished");
                continue;
            }
        };
        entries.push(PoolEntry {
            is_dir: meta.is_dir(),
            created: creation_time(&meta),
            size_bytes: probe::entry_size(&path),
            path,
        });
    }
    entries.sort_by(|a, b| a.created.cmp(&b.created).then_with(|| a.path.cmp(&b.path)));
    Ok(entries)
}

fn creation_time(meta: &fs::Metadata) -> SystemTime {
    meta.created()
        .or_else(|_| meta.modified())
        .unwrap_or(SystemTime::UNIX_EPOCH)
}
