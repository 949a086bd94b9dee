//! Per-pass snapshot types
//!
//! A reconciliation pass works on two snapshots taken at its start: the
//! remote listing (name → content hash) and the set of local entries. Both
//! are recomputed from scratch every pass and never persisted, which is what
//! makes the engine self-correcting after a missed or failed pass.

use std::collections::BTreeMap;
use std::path::PathBuf;

/// Remote directory listing: entry name → content hash
///
/// Taken once at the start of a pass and treated as immutable for its
/// duration. A `BTreeMap` keeps iteration order deterministic.
pub type RemoteSnapshot = BTreeMap<String, String>;

/// An immediate regular-file child of the local directory
///
/// The content hash is deliberately not part of the entry: it is computed on
/// demand so it always reflects the current on-disk bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalEntry {
    /// File name (the entry's name within the local directory)
    pub name: String,
    /// Absolute path of the file on disk
    pub path: PathBuf,
}

impl LocalEntry {
    /// Creates a local entry from a name and its on-disk path
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}
