//! updrive Sync - Reconciliation engine
//!
//! Provides:
//! - Content fingerprinting of local files (streamed SHA-256)
//! - Per-pass diff planning between the local and remote snapshots
//! - The engine that applies a plan (deletes first, then uploads)
//!
//! ## Modules
//!
//! - [`engine`] - Runs one reconciliation pass against a remote storage port
//! - [`hasher`] - Chunked content hashing with bounded memory use
//! - [`plan`] - The three action sets and the pure diff they come from

pub mod engine;
pub mod hasher;
pub mod plan;

use std::path::PathBuf;

use thiserror::Error;
use updrive_core::domain::errors::StorageError;

/// Errors that can abort a reconciliation pass
#[derive(Debug, Error)]
pub enum SyncError {
    /// A remote storage operation failed
    #[error("remote storage: {0}")]
    Storage(#[from] StorageError),

    /// The local directory could not be enumerated
    ///
    /// Deliberately distinct from an empty directory: an unreadable local
    /// side must never be mistaken for "everything was deleted locally".
    #[error("local directory {path} is not readable: {source}")]
    LocalDirUnreadable {
        /// The configured local directory
        path: PathBuf,
        /// The underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// A local file could not be fingerprinted
    #[error("failed to hash {path}: {source}")]
    Hash {
        /// The file being hashed
        path: PathBuf,
        /// The underlying I/O failure
        #[source]
        source: std::io::Error,
    },
}

impl SyncError {
    /// Stable kind label for structured log fields
    #[must_use]
    pub fn kind_label(&self) -> String {
        match self {
            Self::Storage(err) => err.kind().to_string(),
            Self::LocalDirUnreadable { .. } => "local-dir-unreadable".to_string(),
            Self::Hash { .. } => "local-hash-failed".to_string(),
        }
    }
}
