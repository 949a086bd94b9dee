//! Integration tests for the two-phase upload protocol
//!
//! Verifies the write-location request (path and overwrite flag on the
//! wire), the streamed byte transfer, and the protocol-violation and
//! local-file failure modes.

use wiremock::matchers::{body_bytes, method, path};
use wiremock::{Mock, ResponseTemplate};

use updrive_core::domain::errors::{ErrorKind, StorageError};
use updrive_disk::upload::upload_file;

use crate::common;

/// Writes `content` into a file named `name` inside a fresh temp dir.
fn local_file(dir: &tempfile::TempDir, name: &str, content: &[u8]) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("failed to write test file");
    path
}

#[tokio::test]
async fn test_upload_new_file_streams_bytes_to_target() {
    let (server, client) = common::setup_disk_mock().await;
    let dir = tempfile::TempDir::new().unwrap();
    let content = b"file content for the destination";
    let file = local_file(&dir, "report.txt", content);

    let href = format!("{}/up/report-slot", server.uri());
    common::mount_upload_target(&server, "report.txt", false, &href).await;

    Mock::given(method("PUT"))
        .and(path("/up/report-slot"))
        .and(body_bytes(content.to_vec()))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    upload_file(&client, &file, false).await.expect("upload failed");
}

#[tokio::test]
async fn test_upload_overwrite_flag_is_forwarded() {
    let (server, client) = common::setup_disk_mock().await;
    let dir = tempfile::TempDir::new().unwrap();
    let file = local_file(&dir, "changed.txt", b"new bytes");

    let href = format!("{}/up/changed-slot", server.uri());
    // The matcher pins overwrite=true; a request with overwrite=false
    // would find no mock and fail the upload.
    common::mount_upload_target(&server, "changed.txt", true, &href).await;
    common::mount_upload_destination(&server, "/up/changed-slot", 201).await;

    upload_file(&client, &file, true).await.expect("upload failed");
}

#[tokio::test]
async fn test_upload_empty_file() {
    let (server, client) = common::setup_disk_mock().await;
    let dir = tempfile::TempDir::new().unwrap();
    let file = local_file(&dir, "empty.txt", b"");

    let href = format!("{}/up/empty-slot", server.uri());
    common::mount_upload_target(&server, "empty.txt", false, &href).await;
    common::mount_upload_destination(&server, "/up/empty-slot", 201).await;

    upload_file(&client, &file, false).await.expect("upload failed");
}

#[tokio::test]
async fn test_upload_target_without_href_is_protocol_error() {
    let (server, client) = common::setup_disk_mock().await;
    let dir = tempfile::TempDir::new().unwrap();
    let file = local_file(&dir, "orphan.txt", b"data");

    Mock::given(method("GET"))
        .and(path("/upload"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"method": "PUT"})),
        )
        .mount(&server)
        .await;

    let err = upload_file(&client, &file, false).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ProtocolError);
    assert!(err.to_string().contains("orphan.txt"));
}

#[tokio::test]
async fn test_upload_target_with_empty_href_is_protocol_error() {
    let (server, client) = common::setup_disk_mock().await;
    let dir = tempfile::TempDir::new().unwrap();
    let file = local_file(&dir, "blank.txt", b"data");

    Mock::given(method("GET"))
        .and(path("/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"href": ""})))
        .mount(&server)
        .await;

    let err = upload_file(&client, &file, false).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ProtocolError);
}

#[tokio::test]
async fn test_upload_missing_local_file_makes_no_requests() {
    let (server, client) = common::setup_disk_mock().await;
    let missing = std::path::PathBuf::from("/nonexistent/gone.txt");

    let err = upload_file(&client, &missing, false).await.unwrap_err();
    assert_eq!(err, StorageError::FileNotFound(missing));

    let requests = server.received_requests().await.unwrap();
    assert!(requests.is_empty(), "no network traffic expected");
}

#[tokio::test]
async fn test_upload_target_401_is_permission_denied() {
    let (server, client) = common::setup_disk_mock().await;
    let dir = tempfile::TempDir::new().unwrap();
    let file = local_file(&dir, "denied.txt", b"data");

    Mock::given(method("GET"))
        .and(path("/upload"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = upload_file(&client, &file, false).await.unwrap_err();
    assert!(matches!(err, StorageError::PermissionDenied(_)));
}

#[tokio::test]
async fn test_upload_destination_500_is_server_fault() {
    let (server, client) = common::setup_disk_mock().await;
    let dir = tempfile::TempDir::new().unwrap();
    let file = local_file(&dir, "fault.txt", b"data");

    let href = format!("{}/up/fault-slot", server.uri());
    common::mount_upload_target(&server, "fault.txt", false, &href).await;
    common::mount_upload_destination(&server, "/up/fault-slot", 500).await;

    let err = upload_file(&client, &file, false).await.unwrap_err();
    assert!(matches!(err, StorageError::ServerFault(_)));
}
