//! Pixgate Core Library
//!
//! This crate provides the domain models, pipeline state machine, error
//! taxonomy, and configuration shared across all Pixgate components.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod state;
pub mod telemetry;

// Re-export commonly used types
pub use config::PipelineConfig;
pub use error::{PipelineError, PipelineResult};
pub use models::{ImageRecord, ImageStatus, ModerationVerdict};
pub use state::{next_status, PipelineEvent, TransitionError};
