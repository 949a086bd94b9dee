//! Integration tests for remote entry deletion

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

use updrive_core::domain::errors::StorageError;
use updrive_core::ports::remote_storage::IRemoteStorage;
use updrive_disk::provider::DiskRemoteStorage;

use crate::common;

#[tokio::test]
async fn test_delete_sends_entry_path() {
    let (server, client) = common::setup_disk_mock().await;

    Mock::given(method("DELETE"))
        .and(path("/"))
        .and(query_param("path", format!("{}/old.txt", common::REMOTE_DIR)))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client.delete_file("old.txt").await.expect("delete failed");
}

#[tokio::test]
async fn test_delete_accepts_async_operation_status() {
    // Large deletions are acknowledged with 202 and completed server-side.
    let (server, client) = common::setup_disk_mock().await;

    Mock::given(method("DELETE"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(202))
        .mount(&server)
        .await;

    client.delete_file("big-dataset.bin").await.expect("delete failed");
}

#[tokio::test]
async fn test_delete_empty_name_makes_no_requests() {
    let (server, client) = common::setup_disk_mock().await;

    let err = client.delete_file("").await.unwrap_err();
    assert!(matches!(err, StorageError::InvalidArgument(_)));

    let requests = server.received_requests().await.unwrap();
    assert!(requests.is_empty(), "no network traffic expected");
}

#[tokio::test]
async fn test_delete_absent_entry_is_not_found() {
    let (server, client) = common::setup_disk_mock().await;

    Mock::given(method("DELETE"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "message": "resource does not exist",
            "error": "DiskNotFoundError"
        })))
        .mount(&server)
        .await;

    let err = client.delete_file("ghost.txt").await.unwrap_err();
    assert!(matches!(err, StorageError::NotFound(_)));
}

#[tokio::test]
async fn test_provider_delegates_delete() {
    let (server, client) = common::setup_disk_mock().await;

    Mock::given(method("DELETE"))
        .and(path("/"))
        .and(query_param("path", format!("{}/via-port.txt", common::REMOTE_DIR)))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let provider = DiskRemoteStorage::new(client);
    provider
        .delete_file("via-port.txt")
        .await
        .expect("delete via port failed");
}
