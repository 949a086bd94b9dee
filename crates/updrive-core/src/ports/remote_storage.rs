//! Remote storage port (driven/secondary port)
//!
//! This module defines the interface the sync engine uses to talk to the
//! remote storage account. The primary implementation targets the cloud Disk
//! REST API (`updrive-disk`), but the trait is storage-agnostic.
//!
//! ## Design Notes
//!
//! - Methods return the closed [`StorageError`] taxonomy rather than an
//!   open-ended error chain; adapters are responsible for classifying every
//!   transport failure into it before it crosses this seam.
//! - Each operation is attempted exactly once per invocation. There is no
//!   internal retry; the caller's next reconciliation pass is the retry
//!   mechanism.

use std::path::Path;

use crate::domain::errors::StorageError;
use crate::domain::snapshot::RemoteSnapshot;

/// Port trait for remote storage operations
///
/// All three operations mutate or read the single remote directory the
/// implementation was configured with.
#[async_trait::async_trait]
pub trait IRemoteStorage: Send + Sync {
    /// Lists the files in the remote directory
    ///
    /// Returns a mapping of entry name to content hash. An existing but
    /// empty directory yields an empty mapping; a directory that does not
    /// exist yields [`StorageError::NotFound`].
    async fn list_files(&self) -> Result<RemoteSnapshot, StorageError>;

    /// Uploads a local file into the remote directory
    ///
    /// The remote entry name is the basename of `local_path`. With
    /// `overwrite` set, an existing remote entry of the same name is
    /// replaced; without it, the upload targets a fresh name.
    ///
    /// # Errors
    /// [`StorageError::FileNotFound`] if `local_path` does not exist
    /// locally; otherwise one of the classified transport kinds.
    async fn upload_file(&self, local_path: &Path, overwrite: bool) -> Result<(), StorageError>;

    /// Deletes a remote entry by name
    ///
    /// # Errors
    /// [`StorageError::InvalidArgument`] if `name` is empty;
    /// [`StorageError::NotFound`] if the entry is already absent.
    async fn delete_file(&self, name: &str) -> Result<(), StorageError>;
}
