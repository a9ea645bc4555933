//! Pixgate Storage Library
//!
//! Blob storage abstraction for the pipeline. Two logical buckets exist:
//! originals (raw uploads) and resized (derived thumbnails), both keyed by
//! `image_id`. Backends implement the `BlobStore` trait; S3 is feature-gated
//! behind `storage-s3`, and an in-memory backend is available for tests and
//! local development.

#[cfg(feature = "storage-memory")]
pub mod memory;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
#[cfg(feature = "storage-memory")]
pub use memory::MemoryBlobStore;
#[cfg(feature = "storage-s3")]
pub use s3::S3BlobStore;
pub use traits::{BlobBucket, BlobError, BlobResult, BlobStore};
