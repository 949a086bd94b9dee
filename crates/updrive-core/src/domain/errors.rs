//! Remote storage error taxonomy
//!
//! Every failure crossing the [`IRemoteStorage`] port boundary is one of the
//! variants below. Adapters classify their transport-specific failures into
//! this closed set; nothing else may cross the seam.
//!
//! [`IRemoteStorage`]: crate::ports::remote_storage::IRemoteStorage

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by remote storage operations
///
/// Each variant carries a human-readable cause. Use [`StorageError::kind`]
/// when only the semantic kind matters (e.g. as a structured log field).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// The remote directory or entry does not exist
    #[error("not found: {0}")]
    NotFound(String),

    /// Authentication or authorization failure (invalid token, no access)
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// The remote service could not be reached (connect or read timeout)
    #[error("remote service unreachable: {0}")]
    Unreachable(String),

    /// The remote service reported an internal error
    #[error("remote server fault: {0}")]
    ServerFault(String),

    /// The remote service violated its protocol contract
    /// (unexpected status, missing or malformed response field)
    #[error("protocol error: {0}")]
    ProtocolError(String),

    /// A local file scheduled for upload does not exist
    #[error("local file not found: {0}")]
    FileNotFound(PathBuf),

    /// The caller supplied an invalid argument (e.g. an empty entry name)
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A failure that fits no other classification
    #[error("unknown failure: {0}")]
    UnknownFailure(String),
}

/// Flat error kind, decoupled from the per-variant cause text
///
/// Displays as a stable kebab-case label, suitable for log fields and
/// assertions in tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    PermissionDenied,
    Unreachable,
    ServerFault,
    ProtocolError,
    FileNotFound,
    InvalidArgument,
    UnknownFailure,
}

impl StorageError {
    /// Returns the semantic kind of this error
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::PermissionDenied(_) => ErrorKind::PermissionDenied,
            Self::Unreachable(_) => ErrorKind::Unreachable,
            Self::ServerFault(_) => ErrorKind::ServerFault,
            Self::ProtocolError(_) => ErrorKind::ProtocolError,
            Self::FileNotFound(_) => ErrorKind::FileNotFound,
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Self::UnknownFailure(_) => ErrorKind::UnknownFailure,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::NotFound => "not-found",
            Self::PermissionDenied => "permission-denied",
            Self::Unreachable => "unreachable",
            Self::ServerFault => "server-fault",
            Self::ProtocolError => "protocol-error",
            Self::FileNotFound => "file-not-found",
            Self::InvalidArgument => "invalid-argument",
            Self::UnknownFailure => "unknown-failure",
        };
        f.write_str(label)
    }
}
