//! Blob storage abstraction trait.

use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

/// Logical bucket for a blob. Originals hold raw uploads; Resized holds
/// derived thumbnails under the same key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlobBucket {
    Originals,
    Resized,
}

impl fmt::Display for BlobBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlobBucket::Originals => f.write_str("originals"),
            BlobBucket::Resized => f.write_str("resized"),
        }
    }
}

/// Blob storage operation errors
#[derive(Debug, Error)]
pub enum BlobError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("Blob not found: {0}")]
    NotFound(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for blob operations
pub type BlobResult<T> = Result<T, BlobError>;

/// Blob storage abstraction.
///
/// All storage backends (S3, in-memory) must implement this trait so the
/// pipeline stages can work with any backend without coupling to
/// implementation details. Each call is a single bounded remote operation;
/// retry is owned by the caller's scheduler.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store a blob under the given key, overwriting any existing blob.
    async fn put(&self, bucket: BlobBucket, key: &str, data: Vec<u8>) -> BlobResult<()>;

    /// Fetch a blob by key.
    async fn get(&self, bucket: BlobBucket, key: &str) -> BlobResult<Vec<u8>>;

    /// Check whether a blob exists.
    async fn exists(&self, bucket: BlobBucket, key: &str) -> BlobResult<bool>;
}
