//! Two-phase upload protocol for the Disk REST API
//!
//! Uploading is a two-step exchange:
//! 1. `GET {base}/upload?path=…&overwrite=…` asks the service for a write
//!    location; the response carries a pre-signed `href`.
//! 2. `PUT {href}` streams the file bytes to that location. The href is
//!    absolute and pre-authorized, so the PUT carries no auth header.
//!
//! A response without a usable `href` is a contract violation by the
//! service and surfaces as `ProtocolError`; it is never silently swallowed.

use std::io::ErrorKind;
use std::path::Path;

use reqwest::Method;
use serde::Deserialize;
use tokio_util::io::ReaderStream;
use tracing::debug;
use updrive_core::domain::errors::StorageError;

use crate::classify::{check_status, classify_transport};
use crate::client::DiskClient;

/// Response from the upload-target endpoint
#[derive(Debug, Deserialize)]
struct UploadTarget {
    /// Pre-signed destination URL for the file bytes
    href: Option<String>,
}

/// Requests a write location for `name` under the client's remote directory
///
/// # Errors
/// `ProtocolError` when the response carries no usable `href`; otherwise the
/// classified transport kinds.
pub(crate) async fn request_upload_target(
    client: &DiskClient,
    name: &str,
    overwrite: bool,
) -> Result<String, StorageError> {
    let response = client
        .request(Method::GET, "/upload")
        .query(&[
            ("path", client.remote_path(name)),
            ("overwrite", overwrite.to_string()),
        ])
        .send()
        .await
        .map_err(classify_transport)?;
    let response = check_status(response).await?;

    let target: UploadTarget = response.json().await.map_err(classify_transport)?;

    match target.href {
        Some(href) if !href.is_empty() => Ok(href),
        _ => Err(StorageError::ProtocolError(format!(
            "upload target for '{name}' carries no destination href"
        ))),
    }
}

/// Uploads a local file into the client's remote directory
///
/// The remote entry name is the basename of `local_path`. The file is opened
/// before any network traffic, then streamed chunk-wise to the write
/// location so memory use stays bounded regardless of file size. The file
/// handle is released on every exit path when the request future completes
/// or fails.
///
/// # Errors
/// `FileNotFound` when `local_path` does not exist locally,
/// `InvalidArgument` when the path has no usable file name, and the
/// classified transport kinds for everything on the wire.
pub async fn upload_file(
    client: &DiskClient,
    local_path: &Path,
    overwrite: bool,
) -> Result<(), StorageError> {
    let name = entry_name(local_path)?;

    let file = tokio::fs::File::open(local_path)
        .await
        .map_err(|err| match err.kind() {
            ErrorKind::NotFound => StorageError::FileNotFound(local_path.to_path_buf()),
            ErrorKind::PermissionDenied => StorageError::PermissionDenied(format!(
                "cannot read local file {}",
                local_path.display()
            )),
            _ => StorageError::UnknownFailure(format!(
                "cannot open local file {}: {err}",
                local_path.display()
            )),
        })?;

    debug!(name, overwrite, "requesting upload target");
    let href = request_upload_target(client, name, overwrite).await?;

    debug!(name, "streaming file bytes to upload target");
    let body = reqwest::Body::wrap_stream(ReaderStream::new(file));
    let response = client
        .http()
        .put(&href)
        .body(body)
        .send()
        .await
        .map_err(classify_transport)?;
    check_status(response).await?;

    debug!(name, "upload complete");
    Ok(())
}

/// Extracts the remote entry name (basename) from a local path
fn entry_name(path: &Path) -> Result<&str, StorageError> {
    path.file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| {
            StorageError::InvalidArgument(format!(
                "path has no usable file name: {}",
                path.display()
            ))
        })
}
