//! Ingest stage: store the blob, create the record, hand off to the
//! scheduler.

use std::sync::Arc;
use uuid::Uuid;

use pixgate_core::models::{ImageRecord, ImageStatus};
use pixgate_records::RecordStore;
use pixgate_storage::{BlobBucket, BlobStore};

use crate::trigger::{PipelineInput, WorkflowTrigger};

/// What the caller gets back from ingest. Always carries the assigned
/// `image_id` and the best-known status, even on failure.
#[derive(Debug, Clone)]
pub struct IngestReceipt {
    pub image_id: Uuid,
    pub status: ImageStatus,
    pub error: Option<String>,
}

pub struct IngestStage {
    blobs: Arc<dyn BlobStore>,
    records: Arc<dyn RecordStore>,
    trigger: Arc<dyn WorkflowTrigger>,
}

impl IngestStage {
    pub fn new(
        blobs: Arc<dyn BlobStore>,
        records: Arc<dyn RecordStore>,
        trigger: Arc<dyn WorkflowTrigger>,
    ) -> Self {
        Self {
            blobs,
            records,
            trigger,
        }
    }

    /// Accept raw image bytes: assign a fresh id, store the blob, create the
    /// initial record, and signal the scheduler.
    ///
    /// A failed blob write terminates the run with `UPLOAD_FAILED`; no record
    /// is created and no trigger is attempted. Record-create and trigger
    /// failures after a successful blob write are logged as warnings and do
    /// not roll anything back; the receipt still reports `UPLOADED`.
    pub async fn ingest(&self, raw_bytes: Vec<u8>) -> IngestReceipt {
        let image_id = Uuid::new_v4();
        let key = image_id.to_string();

        if let Err(e) = self.blobs.put(BlobBucket::Originals, &key, raw_bytes).await {
            tracing::error!(
                image_id = %image_id,
                error = %e,
                "Couldn't upload the image"
            );
            return IngestReceipt {
                image_id,
                status: ImageStatus::UploadFailed,
                error: Some(e.to_string()),
            };
        }

        tracing::info!(image_id = %image_id, "Image uploaded");

        if let Err(e) = self.records.create(ImageRecord::new_uploaded(image_id)).await {
            tracing::warn!(
                image_id = %image_id,
                error = %e,
                "Couldn't persist the upload status; blob is stored"
            );
        }

        if let Err(e) = self.trigger.start(PipelineInput { image_id }).await {
            tracing::warn!(
                image_id = %image_id,
                error = %e,
                "Couldn't trigger the pipeline run; image stays UPLOADED for manual replay"
            );
        }

        IngestReceipt {
            image_id,
            status: ImageStatus::Uploaded,
            error: None,
        }
    }
}
