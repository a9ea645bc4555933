//! Moderation stage: classify a stored blob and record the verdict.

use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use pixgate_core::error::{PipelineError, PipelineResult};
use pixgate_core::models::{ImageStatus, ModerationVerdict};
use pixgate_moderation::Classifier;
use pixgate_records::RecordStore;
use pixgate_storage::{BlobBucket, BlobError, BlobStore};

/// Moderation result returned to the orchestrator. Authoritative from the
/// caller's perspective even when the record write did not land.
#[derive(Debug, Clone)]
pub struct ModerationOutcome {
    pub image_id: Uuid,
    pub verdict: ModerationVerdict,
    /// Violation labels in detection order; empty on pass or processing
    /// error.
    pub flags: Vec<String>,
    /// Whether the verdict landed in the record store.
    pub persisted: bool,
}

impl ModerationOutcome {
    /// Comma-joined flags, e.g. "Explicit Nudity, Violence".
    pub fn flags_display(&self) -> String {
        self.flags.join(", ")
    }
}

pub struct ModerationStage {
    blobs: Arc<dyn BlobStore>,
    records: Arc<dyn RecordStore>,
    classifier: Arc<dyn Classifier>,
}

impl ModerationStage {
    pub fn new(
        blobs: Arc<dyn BlobStore>,
        records: Arc<dyn RecordStore>,
        classifier: Arc<dyn Classifier>,
    ) -> Self {
        Self {
            blobs,
            records,
            classifier,
        }
    }

    /// Classify the stored blob for `image_id`.
    ///
    /// A classifier failure (or a transient blob-read failure) yields a
    /// `PROCESSING_ERROR` verdict and leaves the record untouched, so the
    /// operation can be retried by re-invocation. A missing blob is fatal.
    /// On pass/fail the record is updated once; a failed write is downgraded
    /// to a warning and the verdict is still returned.
    pub async fn moderate(&self, image_id: Uuid) -> PipelineResult<ModerationOutcome> {
        let key = image_id.to_string();
        tracing::info!(image_id = %image_id, "Moderation has started");

        let image = match self.blobs.get(BlobBucket::Originals, &key).await {
            Ok(data) => data,
            Err(BlobError::NotFound(detail)) => {
                return Err(PipelineError::NotFound(detail));
            }
            Err(e) => {
                tracing::warn!(
                    image_id = %image_id,
                    error = %e,
                    "Couldn't read the blob for moderation"
                );
                return Ok(ModerationOutcome {
                    image_id,
                    verdict: ModerationVerdict::ProcessingError,
                    flags: Vec::new(),
                    persisted: false,
                });
            }
        };

        let labels = match self.classifier.detect(&image).await {
            Ok(labels) => labels,
            Err(e) => {
                tracing::warn!(
                    image_id = %image_id,
                    error = %e,
                    "Classifier call failed during moderation"
                );
                return Ok(ModerationOutcome {
                    image_id,
                    verdict: ModerationVerdict::ProcessingError,
                    flags: Vec::new(),
                    persisted: false,
                });
            }
        };

        let verdict = if labels.is_empty() {
            ModerationVerdict::Pass
        } else {
            ModerationVerdict::Fail
        };
        let flags: Vec<String> = labels.into_iter().map(|l| l.name).collect();

        tracing::info!(
            image_id = %image_id,
            verdict = %verdict,
            flags = %flags.join(", "),
            "Moderation completed"
        );

        let persisted = match self
            .records
            .set_moderation(
                image_id,
                ImageStatus::Moderated,
                verdict,
                flags.clone(),
                Utc::now(),
            )
            .await
        {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(
                    image_id = %image_id,
                    error = %e,
                    "Couldn't persist the moderation verdict; returning it anyway"
                );
                false
            }
        };

        Ok(ModerationOutcome {
            image_id,
            verdict,
            flags,
            persisted,
        })
    }
}
