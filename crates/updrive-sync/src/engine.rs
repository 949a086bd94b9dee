//! Reconciliation engine
//!
//! The [`SyncEngine`] runs one reconciliation pass: snapshot both sides,
//! plan the difference, apply it. Local is authoritative: remote entries
//! without a local counterpart are deleted, local files without a remote
//! counterpart are uploaded, and shared names with differing content are
//! overwritten with the local bytes.
//!
//! ## Pass Flow
//!
//! 1. **Snapshotting**: remote listing first (a missing remote directory is
//!    detected before any local file is touched), then the local scan.
//! 2. **Planning**: the three action sets; equal name + equal hash means no
//!    action for that entry.
//! 3. **Applying**: all deletions complete before the first upload begins.
//!
//! Nothing survives a pass. The first failing action aborts the remainder
//! and propagates; the caller's next pass recomputes the plan from current
//! reality, so repetition is the retry mechanism and there is no explicit
//! retry logic here.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, warn};
use updrive_core::domain::snapshot::{LocalEntry, RemoteSnapshot};
use updrive_core::ports::remote_storage::IRemoteStorage;

use crate::hasher::ContentHasher;
use crate::plan::{partition_names, SyncPlan};
use crate::SyncError;

// ============================================================================
// PassSummary
// ============================================================================

/// Summary of one completed reconciliation pass
#[derive(Debug, Clone, Default)]
pub struct PassSummary {
    /// Remote entries deleted
    pub files_deleted: u32,
    /// New files uploaded
    pub files_uploaded: u32,
    /// Changed files overwritten
    pub files_overwritten: u32,
    /// Wall-clock duration of the pass in milliseconds
    pub duration_ms: u64,
}

impl PassSummary {
    /// Total number of actions the pass applied
    #[must_use]
    pub fn total_actions(&self) -> u32 {
        self.files_deleted + self.files_uploaded + self.files_overwritten
    }
}

// ============================================================================
// SyncEngine
// ============================================================================

/// One-way reconciliation engine over a remote storage port
///
/// Holds no state between passes; every pass re-derives its plan from the
/// current snapshots, which makes the engine self-correcting after any
/// missed or failed pass.
pub struct SyncEngine {
    /// Remote storage operations
    remote: Arc<dyn IRemoteStorage>,
    /// Content fingerprinting for local files
    hasher: ContentHasher,
}

impl SyncEngine {
    /// Creates an engine over the given remote storage
    pub fn new(remote: Arc<dyn IRemoteStorage>) -> Self {
        Self {
            remote,
            hasher: ContentHasher::new(),
        }
    }

    /// Creates an engine with a custom hasher configuration
    pub fn with_hasher(remote: Arc<dyn IRemoteStorage>, hasher: ContentHasher) -> Self {
        Self { remote, hasher }
    }

    // ========================================================================
    // Pass execution
    // ========================================================================

    /// Runs one reconciliation pass for `local_dir`
    ///
    /// Returns a [`PassSummary`] on success. The first failing action aborts
    /// the remaining actions of the pass and the error propagates unchanged.
    #[tracing::instrument(skip(self), fields(local_dir = %local_dir.display()))]
    pub async fn run_pass(&self, local_dir: &Path) -> Result<PassSummary, SyncError> {
        let start = std::time::Instant::now();

        // Snapshotting: remote first, so a missing remote directory aborts
        // before the local side is touched.
        let remote_snapshot = self.remote.list_files().await?;
        let local_entries = scan_local_dir(local_dir).await?;

        debug!(
            remote = remote_snapshot.len(),
            local = local_entries.len(),
            "snapshots taken"
        );

        let paths: BTreeMap<&str, &Path> = local_entries
            .iter()
            .map(|entry| (entry.name.as_str(), entry.path.as_path()))
            .collect();

        // Planning
        let plan = self.build_plan(&remote_snapshot, &paths).await?;

        debug!(
            to_delete = plan.to_delete.len(),
            to_upload_new = plan.to_upload_new.len(),
            to_overwrite = plan.to_overwrite.len(),
            "plan computed"
        );

        let mut summary = PassSummary::default();

        // ApplyingDeletes: every deletion completes before any upload begins.
        for name in &plan.to_delete {
            self.remote.delete_file(name).await?;
            info!(name = %name, "deleted remote entry");
            summary.files_deleted += 1;
        }

        // ApplyingUploads: fresh names first, then overwrites.
        for name in &plan.to_upload_new {
            self.remote.upload_file(paths[name.as_str()], false).await?;
            info!(name = %name, "uploaded new file");
            summary.files_uploaded += 1;
        }

        for name in &plan.to_overwrite {
            self.remote.upload_file(paths[name.as_str()], true).await?;
            info!(name = %name, "overwrote changed file");
            summary.files_overwritten += 1;
        }

        summary.duration_ms = start.elapsed().as_millis() as u64;

        info!(
            deleted = summary.files_deleted,
            uploaded = summary.files_uploaded,
            overwritten = summary.files_overwritten,
            duration_ms = summary.duration_ms,
            "reconciliation pass completed"
        );

        Ok(summary)
    }

    // ========================================================================
    // Planning
    // ========================================================================

    /// Computes the action sets for the given snapshots
    ///
    /// Local hashes are computed on demand, and only for names present on
    /// both sides; fresh uploads and deletions need no content comparison.
    async fn build_plan(
        &self,
        remote: &RemoteSnapshot,
        paths: &BTreeMap<&str, &Path>,
    ) -> Result<SyncPlan, SyncError> {
        let local_names: BTreeSet<String> = paths.keys().map(|name| (*name).to_string()).collect();

        let partition = partition_names(remote, &local_names);

        let mut to_overwrite = Vec::new();
        for name in partition.shared {
            let path = paths[name.as_str()];
            let local_hash =
                self.hasher
                    .hash_file(path)
                    .await
                    .map_err(|source| SyncError::Hash {
                        path: path.to_path_buf(),
                        source,
                    })?;

            // Present by construction: the name came from the intersection.
            if remote.get(&name).map(String::as_str) != Some(local_hash.as_str()) {
                to_overwrite.push(name);
            } else {
                debug!(name = %name, "content unchanged");
            }
        }

        Ok(SyncPlan {
            to_delete: partition.to_delete,
            to_upload_new: partition.to_upload_new,
            to_overwrite,
        })
    }
}

// ============================================================================
// Local scanning
// ============================================================================

/// Enumerates the immediate regular-file children of `dir`
///
/// Subdirectories and other non-file entries are skipped. A directory that
/// cannot be read yields [`SyncError::LocalDirUnreadable`], never an empty
/// snapshot, which would plan a full remote wipe.
async fn scan_local_dir(dir: &Path) -> Result<Vec<LocalEntry>, SyncError> {
    let unreadable = |source: std::io::Error| SyncError::LocalDirUnreadable {
        path: dir.to_path_buf(),
        source,
    };

    let mut read_dir = tokio::fs::read_dir(dir).await.map_err(unreadable)?;

    let mut entries = Vec::new();
    while let Some(entry) = read_dir.next_entry().await.map_err(unreadable)? {
        let file_type = entry.file_type().await.map_err(unreadable)?;
        if !file_type.is_file() {
            debug!(path = %entry.path().display(), "skipping non-file entry");
            continue;
        }

        match entry.file_name().into_string() {
            Ok(name) => entries.push(LocalEntry::new(name, entry.path())),
            Err(raw) => {
                warn!(name = ?raw, "skipping entry with non-UTF-8 name");
            }
        }
    }

    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

// ============================================================================
// Tests
// ============================================================================
