//! Cloud Disk REST API client
//!
//! Provides a typed HTTP client for the Disk resources API. Handles the
//! authorization header, JSON deserialization, and query construction for
//! the single remote directory the client is bound to.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use updrive_disk::client::DiskClient;
//!
//! # async fn example() -> Result<(), updrive_core::domain::errors::StorageError> {
//! let client = DiskClient::new("access-token-here", "disk:/mirror");
//! let snapshot = client.list_files().await?;
//! println!("{} remote entries", snapshot.len());
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use reqwest::{header, Client, Method, RequestBuilder};
use serde::Deserialize;
use tracing::debug;
use updrive_core::domain::{errors::StorageError, snapshot::RemoteSnapshot};

use crate::classify::{check_status, classify_transport};

/// Base URL for the Disk resources API
const DISK_BASE_URL: &str = "https://cloud-api.yandex.net/v1/disk/resources";

/// Transport bound for establishing a connection
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Transport bound for reading from an established connection
const READ_TIMEOUT: Duration = Duration::from_secs(10);

/// Listing fields requested from the service; keeps responses small and the
/// contract explicit.
const LIST_FIELDS: &str = "_embedded.items.name,_embedded.items.type,_embedded.items.sha256";

// ============================================================================
// Disk API response types
// ============================================================================

/// Response from listing a directory resource
#[derive(Debug, Deserialize)]
struct ResourceListing {
    /// Present for directory resources; holds the child entries
    #[serde(rename = "_embedded")]
    embedded: Option<EmbeddedItems>,
}

/// The `_embedded` object of a directory resource
#[derive(Debug, Deserialize)]
struct EmbeddedItems {
    /// Immediate children of the directory
    items: Vec<ResourceItem>,
}

/// A single entry in a directory listing
#[derive(Debug, Deserialize)]
struct ResourceItem {
    /// Entry name within the directory
    name: String,
    /// Resource type: "file" or "dir"
    #[serde(rename = "type")]
    kind: String,
    /// SHA-256 of the entry's content (present for files)
    sha256: Option<String>,
}

// ============================================================================
// DiskClient
// ============================================================================

/// HTTP client for the Disk resources API
///
/// Bound to one remote directory; all operations read or mutate entries
/// directly under it. Wraps `reqwest::Client` with the `OAuth` authorization
/// header and the transport bounds required to keep any single call from
/// hanging indefinitely.
pub struct DiskClient {
    /// The underlying HTTP client
    client: Client,
    /// Base URL for API requests
    base_url: String,
    /// Opaque access token
    token: String,
    /// Remote directory path (e.g. "disk:/mirror")
    remote_dir: String,
}

impl DiskClient {
    /// Creates a new client for the given token and remote directory
    pub fn new(token: impl Into<String>, remote_dir: impl Into<String>) -> Self {
        Self::with_base_url(token, remote_dir, DISK_BASE_URL)
    }

    /// Creates a client with a custom base URL (useful for testing)
    pub fn with_base_url(
        token: impl Into<String>,
        remote_dir: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            client: http_client(),
            base_url: base_url.into(),
            token: token.into(),
            remote_dir: remote_dir.into(),
        }
    }

    /// Returns the base URL for API requests
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the remote directory this client is bound to
    pub fn remote_dir(&self) -> &str {
        &self.remote_dir
    }

    /// Creates an authenticated request builder for the given method and path
    ///
    /// `path` is relative to the resources base URL (e.g. `""` for the
    /// resource itself or `"/upload"` for the upload-target endpoint).
    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client
            .request(method, &url)
            .header(header::AUTHORIZATION, format!("OAuth {}", self.token))
            .header(header::ACCEPT, "application/json")
    }

    /// Full remote path of an entry under the bound directory
    pub(crate) fn remote_path(&self, name: &str) -> String {
        format!("{}/{}", self.remote_dir, name)
    }

    /// Returns the underlying HTTP client
    ///
    /// Used by upload operations that PUT to an absolute, pre-signed URL
    /// rather than an API path.
    pub(crate) fn http(&self) -> &Client {
        &self.client
    }

    // ========================================================================
    // Listing
    // ========================================================================

    /// Lists the files in the remote directory
    ///
    /// Returns a name → content-hash mapping over the directory's immediate
    /// file entries. Subdirectory entries are skipped. An existing but empty
    /// directory yields an empty mapping.
    ///
    /// # Errors
    /// `NotFound` when the directory itself does not exist, `ProtocolError`
    /// when the response is not a directory listing or an entry lacks its
    /// content hash, and the remaining classified transport kinds.
    pub async fn list_files(&self) -> Result<RemoteSnapshot, StorageError> {
        debug!(remote_dir = %self.remote_dir, "listing remote directory");

        let response = self
            .request(Method::GET, "")
            .query(&[
                ("path", self.remote_dir.as_str()),
                ("fields", LIST_FIELDS),
            ])
            .send()
            .await
            .map_err(classify_transport)?;
        let response = check_status(response).await?;

        let listing: ResourceListing = response.json().await.map_err(classify_transport)?;

        let embedded = listing.embedded.ok_or_else(|| {
            StorageError::ProtocolError(format!(
                "listing of '{}' has no embedded items; the path is not a directory",
                self.remote_dir
            ))
        })?;

        let mut snapshot = RemoteSnapshot::new();
        for item in embedded.items {
            if item.kind != "file" {
                debug!(name = %item.name, kind = %item.kind, "skipping non-file entry");
                continue;
            }
            let hash = item.sha256.ok_or_else(|| {
                StorageError::ProtocolError(format!(
                    "listing entry '{}' carries no content hash",
                    item.name
                ))
            })?;
            snapshot.insert(item.name, hash);
        }

        debug!(entries = snapshot.len(), "remote listing complete");
        Ok(snapshot)
    }

    // ========================================================================
    // Deletion
    // ========================================================================

    /// Deletes an entry from the remote directory by name
    ///
    /// # Errors
    /// `InvalidArgument` for an empty name (checked before any network
    /// traffic), `NotFound` when the entry is already absent, and the
    /// remaining classified transport kinds.
    pub async fn delete_file(&self, name: &str) -> Result<(), StorageError> {
        if name.is_empty() {
            return Err(StorageError::InvalidArgument(
                "entry name must not be empty".to_string(),
            ));
        }

        debug!(name, "deleting remote entry");

        let response = self
            .request(Method::DELETE, "")
            .query(&[("path", self.remote_path(name))])
            .send()
            .await
            .map_err(classify_transport)?;
        check_status(response).await?;

        debug!(name, "remote entry deleted");
        Ok(())
    }
}

/// Builds the HTTP client with the transport bounds applied.
///
/// Both the connect and the read phase are bounded so a stalled call cannot
/// hang a reconciliation pass indefinitely.
fn http_client() -> Client {
    Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .read_timeout(READ_TIMEOUT)
        .build()
        .expect("HTTP client construction must not fail")
}
