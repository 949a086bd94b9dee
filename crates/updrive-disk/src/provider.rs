//! DiskRemoteStorage - IRemoteStorage implementation for the Disk REST API
//!
//! Thin adapter that fulfils the [`IRemoteStorage`] port contract by
//! delegating to [`DiskClient`] and the [`upload`](crate::upload) module.

use std::path::Path;

use tracing::debug;
use updrive_core::domain::{errors::StorageError, snapshot::RemoteSnapshot};
use updrive_core::ports::remote_storage::IRemoteStorage;

use crate::client::DiskClient;
use crate::upload;

/// Remote storage implementation backed by the Disk REST API
pub struct DiskRemoteStorage {
    /// The underlying Disk API client
    client: DiskClient,
}

impl DiskRemoteStorage {
    /// Creates a new `DiskRemoteStorage` wrapping the given [`DiskClient`]
    pub fn new(client: DiskClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl IRemoteStorage for DiskRemoteStorage {
    async fn list_files(&self) -> Result<RemoteSnapshot, StorageError> {
        debug!("DiskRemoteStorage::list_files");
        self.client.list_files().await
    }

    async fn upload_file(&self, local_path: &Path, overwrite: bool) -> Result<(), StorageError> {
        debug!(path = %local_path.display(), overwrite, "DiskRemoteStorage::upload_file");
        upload::upload_file(&self.client, local_path, overwrite).await
    }

    async fn delete_file(&self, name: &str) -> Result<(), StorageError> {
        debug!(name, "DiskRemoteStorage::delete_file");
        self.client.delete_file(name).await
    }
}
