//! Error taxonomy for the pipeline.
//!
//! Every stage converts its remote-call failures into one of these kinds
//! instead of letting raw transport errors escape. The orchestrator decides
//! whether to continue, stop, or surface; logging is a side observation, not
//! the error-handling mechanism.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// Store or classifier unreachable. Retryable; nothing beyond what
    /// already committed was mutated.
    #[error("transport error: {0}")]
    Transport(String),

    /// Corrupt or unsupported image bytes. The record is left unchanged.
    #[error("decode error: {0}")]
    Decode(String),

    /// A status-record write failed after the stage computed its result.
    /// Downgraded to a warning at the stage; the computed result is still
    /// returned to the caller.
    #[error("persistence error: {0}")]
    Persistence(String),

    /// A referenced blob or record is missing. Fatal to the run.
    #[error("not found: {0}")]
    NotFound(String),
}

impl PipelineError {
    /// Whether the external scheduler may safely re-invoke the stage.
    pub fn is_retryable(&self) -> bool {
        match self {
            PipelineError::Transport(_) => true,
            PipelineError::Persistence(_) => true,
            PipelineError::Decode(_) => false,
            PipelineError::NotFound(_) => false,
        }
    }
}

pub type PipelineResult<T> = Result<T, PipelineError>;
