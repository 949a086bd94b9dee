//! Transport failure classification
//!
//! The single mapping from low-level transport outcomes (timeouts, HTTP
//! status codes, body decode failures) to the semantic [`StorageError`]
//! taxonomy. Every client operation funnels its failures through this
//! module; no operation may invent its own mapping.

use reqwest::{Response, StatusCode};
use updrive_core::domain::errors::StorageError;

/// Longest error-body excerpt carried into an error message.
const BODY_EXCERPT_LEN: usize = 256;

/// Classifies a `reqwest` transport error into a semantic kind.
///
/// Connect failures and timeouts (connect or read phase) mean the service
/// could not be reached; body decode failures mean the service violated its
/// response contract. Anything unrecognised falls through to
/// [`StorageError::UnknownFailure`].
pub(crate) fn classify_transport(err: reqwest::Error) -> StorageError {
    if err.is_timeout() || err.is_connect() {
        StorageError::Unreachable(err.to_string())
    } else if err.is_decode() {
        StorageError::ProtocolError(format!("malformed response body: {err}"))
    } else if let Some(status) = err.status() {
        classify_status(status, &err.to_string())
    } else {
        StorageError::UnknownFailure(err.to_string())
    }
}

/// Classifies a non-success HTTP status into a semantic kind.
///
/// | status | kind |
/// |---|---|
/// | 404 | `NotFound` |
/// | 401, 403 | `PermissionDenied` |
/// | 500 | `ServerFault` |
/// | anything else | `ProtocolError` |
pub(crate) fn classify_status(status: StatusCode, detail: &str) -> StorageError {
    match status {
        StatusCode::NOT_FOUND => StorageError::NotFound(format!("HTTP 404: {detail}")),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            StorageError::PermissionDenied(format!("HTTP {}: {detail}", status.as_u16()))
        }
        StatusCode::INTERNAL_SERVER_ERROR => {
            StorageError::ServerFault(format!("HTTP 500: {detail}"))
        }
        other => StorageError::ProtocolError(format!(
            "unexpected HTTP status {}: {detail}",
            other.as_u16()
        )),
    }
}

/// Resolves a response to itself on success, or to a classified error.
///
/// On a non-success status the response body is read (best effort) and an
/// excerpt is carried as the human-readable cause.
pub(crate) async fn check_status(response: Response) -> Result<Response, StorageError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "unable to read error body".to_string());
    let excerpt = match body.char_indices().nth(BODY_EXCERPT_LEN) {
        Some((idx, _)) => &body[..idx],
        None => body.as_str(),
    };

    Err(classify_status(status, excerpt.trim()))
}
