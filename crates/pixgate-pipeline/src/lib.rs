//! Pixgate Pipeline
//!
//! The three-stage image pipeline: ingest -> moderate -> conditional resize.
//! Each stage is a thin, idempotent wrapper over the blob store, classifier,
//! and record store contracts; the orchestrator sequences moderation and
//! resize according to the state machine in `pixgate_core::state` and always
//! reports the computed result even when the durable record lags behind.

pub mod orchestrator;
pub mod stages;
pub mod trigger;

// Re-export commonly used types
pub use orchestrator::{Orchestrator, PipelineReport};
pub use stages::ingest::{IngestReceipt, IngestStage};
pub use stages::moderate::{ModerationOutcome, ModerationStage};
pub use stages::resize::{ResizeOutcome, ResizeStage};
pub use trigger::{NoopTrigger, PipelineInput, RecordingTrigger, TriggerError, WorkflowTrigger};
