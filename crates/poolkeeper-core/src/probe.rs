//! Recursive size probing for filesystem entries
//!
//! Probes are tolerant by design: an entry that vanishes or becomes
//! unreadable mid-traversal (a concurrent deletion race is possible)
//! contributes 0 to the running total and is logged as an anomaly, never
//! treated as fatal.

use std::fs;
use std::path::Path;

/// Maximum directory depth a probe will descend
///
/// Together with never following symlinks, this bounds the traversal even
/// on pathological trees.
const MAX_PROBE_DEPTH: usize = 64;

/// Total byte size of a filesystem entry
///
/// A file reports its own length. A directory reports the recursive sum of
/// the sizes of all files it contains; directory-entry overhead is not
/// counted, so an empty directory reports 0. Symlinks are never followed
/// and contribute only their own link metadata length.
pub fn entry_size(path: &Path) -> u64 {
    entry_size_at(path, 0)
}

fn entry_size_at(path: &Path, depth: usize) -> u64 {
    let meta = match fs::symlink_metadata(path) {
        Ok(meta) => meta,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "probe anomaly: entry unreadable");
            return 0;
        }
    };

    if !meta.is_dir() || meta.file_type().is_symlink() {
        return meta.len();
    }

    if depth >= MAX_PROBE_DEPTH {
        tracing::warn!(path = %path.display(), "probe anomaly: depth bound reached, subtree not counted");
        return 0;
    }

    let reader = match fs::read_dir(path) {
        Ok(reader) => reader,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "probe anomaly: directory unreadable");
            return 0;
        }
    };

    let mut total = 0u64;
    for child in reader {
        match child {
            Ok(child) => total += entry_size_at(&child.path(), depth + 1),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "probe anomaly: child unreadable");
            }
        }
    }
    total
}
