//! Record store abstraction trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use pixgate_core::models::{ImageRecord, ImageStatus, ModerationVerdict};

/// Record store operation errors
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("Record not found: {0}")]
    NotFound(Uuid),

    #[error("Record store backend error: {0}")]
    Backend(String),
}

/// Result type for record operations
pub type RecordResult<T> = Result<T, RecordError>;

/// Durable per-image status records.
///
/// Updates are keyed by `image_id`; each pipeline run exclusively owns its
/// own record during execution, so no cross-key coordination is needed.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Create the initial record for an image.
    async fn create(&self, record: ImageRecord) -> RecordResult<()>;

    /// Fetch a record by image id.
    async fn get(&self, image_id: Uuid) -> RecordResult<Option<ImageRecord>>;

    /// Record a moderation verdict: status, verdict, and flags in one update.
    async fn set_moderation(
        &self,
        image_id: Uuid,
        status: ImageStatus,
        verdict: ModerationVerdict,
        flags: Vec<String>,
        updated_at: DateTime<Utc>,
    ) -> RecordResult<()>;

    /// Advance status without touching moderation fields.
    async fn set_status(
        &self,
        image_id: Uuid,
        status: ImageStatus,
        updated_at: DateTime<Utc>,
    ) -> RecordResult<()>;
}
