//! Shared test helpers for Disk API integration tests
//!
//! Provides wiremock-based mock server setup for the Disk resources API.
//! Each helper mounts the necessary mock endpoints; the returned client is
//! bound to the mock server and the shared test remote directory.

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use updrive_disk::client::DiskClient;

/// Remote directory every test client is bound to.
pub const REMOTE_DIR: &str = "disk:/mirror";

/// Starts a mock server and returns it with a client pointed at it.
pub async fn setup_disk_mock() -> (MockServer, DiskClient) {
    let server = MockServer::start().await;
    let client = DiskClient::with_base_url("test-access-token", REMOTE_DIR, server.uri());
    (server, client)
}

/// Mounts a directory listing returning the given items.
pub async fn mount_listing(server: &MockServer, items: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/"))
        .and(query_param("path", REMOTE_DIR))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "_embedded": { "items": items }
        })))
        .mount(server)
        .await;
}

/// Mounts a listing endpoint that fails with the given HTTP status.
pub async fn mount_listing_status(server: &MockServer, status: u16) {
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(status).set_body_json(serde_json::json!({
            "message": "simulated failure",
            "error": "SimulatedError"
        })))
        .mount(server)
        .await;
}

/// Mounts the upload-target endpoint for one entry name.
///
/// Matches the exact remote path and overwrite flag the client is expected
/// to send, and answers with a pre-signed href on this server.
pub async fn mount_upload_target(server: &MockServer, name: &str, overwrite: bool, href: &str) {
    Mock::given(method("GET"))
        .and(path("/upload"))
        .and(query_param("path", format!("{REMOTE_DIR}/{name}")))
        .and(query_param("overwrite", overwrite.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "href": href,
            "method": "PUT",
            "templated": false
        })))
        .mount(server)
        .await;
}

/// Mounts the pre-signed destination that receives the file bytes.
pub async fn mount_upload_destination(server: &MockServer, href_path: &str, status: u16) {
    Mock::given(method("PUT"))
        .and(path(href_path))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}
