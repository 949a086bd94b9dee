//! Reconciliation planning
//!
//! A pass plans three disjoint action sets from the two snapshots:
//! entries to delete (remote-only), entries to upload fresh (local-only),
//! and entries to overwrite (present on both sides with differing content).
//! The name partition below is the pure half of that computation; hashing
//! the shared names is left to the engine, which owns the file I/O.

use std::collections::BTreeSet;

use updrive_core::domain::snapshot::RemoteSnapshot;

/// The actions one reconciliation pass will apply
///
/// The three sets are disjoint by construction. A name present on both
/// sides with equal content appears in none of them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncPlan {
    /// Remote entries with no local counterpart
    pub to_delete: Vec<String>,
    /// Local files with no remote counterpart (upload without overwrite)
    pub to_upload_new: Vec<String>,
    /// Names on both sides whose content hashes differ (upload with overwrite)
    pub to_overwrite: Vec<String>,
}

impl SyncPlan {
    /// Returns true when the pass has nothing to apply
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.to_delete.is_empty() && self.to_upload_new.is_empty() && self.to_overwrite.is_empty()
    }

    /// Total number of planned actions
    #[must_use]
    pub fn action_count(&self) -> usize {
        self.to_delete.len() + self.to_upload_new.len() + self.to_overwrite.len()
    }
}

/// Name-level split of the two snapshots
pub(crate) struct NamePartition {
    /// Names only the remote side has
    pub to_delete: Vec<String>,
    /// Names only the local side has
    pub to_upload_new: Vec<String>,
    /// Names both sides have; content comparison decides their fate
    pub shared: Vec<String>,
}

/// Partitions the snapshot names into remote-only, local-only, and shared
///
/// Order within each set follows the snapshots' sorted iteration order, so
/// the resulting plan is deterministic for a given pair of snapshots.
pub(crate) fn partition_names(remote: &RemoteSnapshot, local: &BTreeSet<String>) -> NamePartition {
    let to_delete = remote
        .keys()
        .filter(|name| !local.contains(*name))
        .cloned()
        .collect();

    let to_upload_new = local
        .iter()
        .filter(|name| !remote.contains_key(*name))
        .cloned()
        .collect();

    let shared = local
        .iter()
        .filter(|name| remote.contains_key(*name))
        .cloned()
        .collect();

    NamePartition {
        to_delete,
        to_upload_new,
        shared,
    }
}
