//! Content fingerprinting
//!
//! Files are fingerprinted with SHA-256, read in fixed-size chunks so
//! memory use is bounded independent of file size. The digest depends only
//! on the byte content: path, name, and timestamps play no part, which is
//! what lets the engine detect changes across renames and copies.

use std::path::Path;

use sha2::{Digest, Sha256};
use tokio::io::AsyncReadExt;
use tracing::trace;

/// Default read chunk size (8 KiB)
pub const DEFAULT_CHUNK_SIZE: usize = 8 * 1024;

/// Streaming SHA-256 hasher with a configurable chunk size
#[derive(Debug, Clone)]
pub struct ContentHasher {
    /// Bytes read per iteration
    chunk_size: usize,
}

impl Default for ContentHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentHasher {
    /// Creates a hasher with the default chunk size
    #[must_use]
    pub fn new() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    /// Creates a hasher with a custom chunk size
    ///
    /// # Panics
    /// Panics if `chunk_size` is zero.
    #[must_use]
    pub fn with_chunk_size(chunk_size: usize) -> Self {
        assert!(chunk_size > 0, "chunk size must be positive");
        Self { chunk_size }
    }

    /// Computes the content fingerprint of the file at `path`
    ///
    /// Returns the lowercase 64-character hex encoding of the SHA-256
    /// digest. An empty file yields the digest of the empty byte sequence.
    pub async fn hash_file(&self, path: &Path) -> std::io::Result<String> {
        let mut file = tokio::fs::File::open(path).await?;
        let mut hasher = Sha256::new();
        let mut buffer = vec![0u8; self.chunk_size];

        loop {
            let read = file.read(&mut buffer).await?;
            if read == 0 {
                break;
            }
            hasher.update(&buffer[..read]);
        }

        let digest = format!("{:x}", hasher.finalize());
        trace!(path = %path.display(), hash = %digest, "file hashed");
        Ok(digest)
    }
}
