//! In-memory blob storage.
//!
//! Backs tests and local development; blobs live in a keyed map for the
//! lifetime of the process.

use crate::traits::{BlobBucket, BlobError, BlobResult, BlobStore};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// In-memory blob store keyed by (bucket, key).
#[derive(Clone, Default)]
pub struct MemoryBlobStore {
    blobs: Arc<Mutex<HashMap<(BlobBucket, String), Vec<u8>>>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a blob directly (for test setup).
    pub fn set_blob(&self, bucket: BlobBucket, key: &str, data: Vec<u8>) {
        self.blobs
            .lock()
            .unwrap()
            .insert((bucket, key.to_string()), data);
    }

    /// Read a blob without going through the trait (for test assertions).
    pub fn blob(&self, bucket: BlobBucket, key: &str) -> Option<Vec<u8>> {
        self.blobs
            .lock()
            .unwrap()
            .get(&(bucket, key.to_string()))
            .cloned()
    }

    /// Whether a blob exists (for test assertions).
    pub fn has_blob(&self, bucket: BlobBucket, key: &str) -> bool {
        self.blobs
            .lock()
            .unwrap()
            .contains_key(&(bucket, key.to_string()))
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn put(&self, bucket: BlobBucket, key: &str, data: Vec<u8>) -> BlobResult<()> {
        self.blobs
            .lock()
            .unwrap()
            .insert((bucket, key.to_string()), data);
        Ok(())
    }

    async fn get(&self, bucket: BlobBucket, key: &str) -> BlobResult<Vec<u8>> {
        self.blobs
            .lock()
            .unwrap()
            .get(&(bucket, key.to_string()))
            .cloned()
            .ok_or_else(|| BlobError::NotFound(format!("{}/{}", bucket, key)))
    }

    async fn exists(&self, bucket: BlobBucket, key: &str) -> BlobResult<bool> {
        Ok(self
            .blobs
            .lock()
            .unwrap()
            .contains_key(&(bucket, key.to_string())))
    }
}
