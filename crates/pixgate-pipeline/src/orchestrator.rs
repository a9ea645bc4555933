//! Orchestrator: sequence moderation and resize for one image.
//!
//! Pure dispatch over the recorded status: given the current record, decide
//! which stage runs next and which status its outcome leads to (via the
//! state machine in `pixgate_core::state`). Stage outcomes are never
//! swallowed; the report carries the best-known state even when a stage's
//! durable write failed.

use std::sync::Arc;
use uuid::Uuid;

use pixgate_core::error::{PipelineError, PipelineResult};
use pixgate_core::models::{ImageRecord, ImageStatus, ModerationVerdict};
use pixgate_core::state::{next_status, PipelineEvent};
use pixgate_records::{RecordError, RecordStore};

use crate::stages::moderate::ModerationStage;
use crate::stages::resize::{ResizeOutcome, ResizeStage};

/// Terminal output of one pipeline run. Always includes the image id and the
/// best-known status/verdict, even under partial persistence failure.
#[derive(Debug, Clone)]
pub struct PipelineReport {
    pub image_id: Uuid,
    pub status: ImageStatus,
    pub verdict: Option<ModerationVerdict>,
    pub flags: Vec<String>,
    pub resize: Option<ResizeOutcome>,
}

pub struct Orchestrator {
    records: Arc<dyn RecordStore>,
    moderation: ModerationStage,
    resize: ResizeStage,
}

impl Orchestrator {
    pub fn new(
        records: Arc<dyn RecordStore>,
        moderation: ModerationStage,
        resize: ResizeStage,
    ) -> Self {
        Self {
            records,
            moderation,
            resize,
        }
    }

    /// Run the pipeline for `image_id` from its recorded status.
    ///
    /// Resuming an abandoned run is the same call: the record reflects the
    /// last completed stage and dispatch picks up from there. A
    /// `PROCESSING_ERROR` verdict ends the run with status unchanged;
    /// retry is owned by the scheduler re-invoking `run`.
    pub async fn run(&self, image_id: Uuid) -> PipelineResult<PipelineReport> {
        let record = self
            .records
            .get(image_id)
            .await
            .map_err(|e| match e {
                RecordError::NotFound(id) => PipelineError::NotFound(id.to_string()),
                RecordError::Backend(detail) => PipelineError::Transport(detail),
            })?
            .ok_or_else(|| PipelineError::NotFound(image_id.to_string()))?;

        match record.status {
            ImageStatus::UploadFailed | ImageStatus::ModeratedAndResized => {
                Ok(Self::report_from_record(record))
            }
            ImageStatus::Uploaded => self.moderate_then_resize(record).await,
            ImageStatus::Moderated => match record.moderation_result {
                Some(ModerationVerdict::Fail) => Ok(Self::report_from_record(record)),
                Some(ModerationVerdict::Pass) => {
                    let flags = record.moderation_flags.clone().unwrap_or_default();
                    self.resize_and_report(record, ModerationVerdict::Pass, flags)
                        .await
                }
                // A moderated record without a pass/fail verdict is
                // inconsistent; re-moderating repairs it.
                _ => self.moderate_then_resize(record).await,
            },
        }
    }

    async fn moderate_then_resize(&self, record: ImageRecord) -> PipelineResult<PipelineReport> {
        let image_id = record.image_id;
        let outcome = self.moderation.moderate(image_id).await?;
        let status = Self::advance(&record, PipelineEvent::Moderated(outcome.verdict))?;

        match outcome.verdict {
            ModerationVerdict::ProcessingError | ModerationVerdict::Fail => Ok(PipelineReport {
                image_id,
                status,
                verdict: Some(outcome.verdict),
                flags: outcome.flags,
                resize: None,
            }),
            ModerationVerdict::Pass => {
                let moderated = ImageRecord {
                    status,
                    ..record
                };
                self.resize_and_report(moderated, ModerationVerdict::Pass, outcome.flags)
                    .await
            }
        }
    }

    async fn resize_and_report(
        &self,
        record: ImageRecord,
        verdict: ModerationVerdict,
        flags: Vec<String>,
    ) -> PipelineResult<PipelineReport> {
        let image_id = record.image_id;
        let outcome = self.resize.resize(image_id, verdict).await?;

        let event = match outcome {
            ResizeOutcome::Resized { .. } => PipelineEvent::Resized,
            ResizeOutcome::SkippedNotPassed | ResizeOutcome::SkippedAlreadyFits => {
                PipelineEvent::ResizeSkipped
            }
        };
        let status = Self::advance(&record, event)?;

        Ok(PipelineReport {
            image_id,
            status,
            verdict: Some(verdict),
            flags,
            resize: Some(outcome),
        })
    }

    fn advance(record: &ImageRecord, event: PipelineEvent) -> PipelineResult<ImageStatus> {
        next_status(Some(record.status), event).map_err(|e| {
            tracing::error!(
                image_id = %record.image_id,
                error = %e,
                "Recorded status disagrees with the stage outcome"
            );
            PipelineError::Persistence(e.to_string())
        })
    }

    fn report_from_record(record: ImageRecord) -> PipelineReport {
        PipelineReport {
            image_id: record.image_id,
            status: record.status,
            verdict: record.moderation_result,
            flags: record.moderation_flags.unwrap_or_default(),
            resize: None,
        }
    }
}
