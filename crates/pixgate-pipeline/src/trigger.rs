//! Workflow trigger seam.
//!
//! Ingest hands off to the external scheduler through this trait. Trigger
//! failure is logged by the caller and never rolls back the stored blob or
//! record; the image stays recoverable by manual replay.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use thiserror::Error;
use uuid::Uuid;

/// Input handed to the scheduler when a pipeline run starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineInput {
    pub image_id: Uuid,
}

#[derive(Debug, Error)]
pub enum TriggerError {
    #[error("Workflow trigger unavailable: {0}")]
    Unavailable(String),
}

/// Hands a freshly ingested image off to the pipeline scheduler.
#[async_trait]
pub trait WorkflowTrigger: Send + Sync {
    async fn start(&self, input: PipelineInput) -> Result<(), TriggerError>;
}

/// Trigger that does nothing. Used when runs are driven manually.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTrigger;

#[async_trait]
impl WorkflowTrigger for NoopTrigger {
    async fn start(&self, _input: PipelineInput) -> Result<(), TriggerError> {
        Ok(())
    }
}

/// Trigger that records every start call; failure can be injected.
/// Used in tests to assert when ingest hands off.
#[derive(Clone, Default)]
pub struct RecordingTrigger {
    starts: Arc<Mutex<Vec<PipelineInput>>>,
    failing: Arc<Mutex<bool>>,
}

impl RecordingTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    /// All inputs passed to `start` so far.
    pub fn starts(&self) -> Vec<PipelineInput> {
        self.starts.lock().unwrap().clone()
    }

    /// Make subsequent `start` calls fail.
    pub fn set_failing(&self, failing: bool) {
        *self.failing.lock().unwrap() = failing;
    }
}

#[async_trait]
impl WorkflowTrigger for RecordingTrigger {
    async fn start(&self, input: PipelineInput) -> Result<(), TriggerError> {
        if *self.failing.lock().unwrap() {
            return Err(TriggerError::Unavailable("scheduler unreachable".into()));
        }
        self.starts.lock().unwrap().push(input);
        Ok(())
    }
}
