//! Classifier abstraction trait.

use async_trait::async_trait;
use thiserror::Error;

/// A violation label detected by the classifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModerationLabel {
    pub name: String,
}

impl ModerationLabel {
    pub fn new(name: impl Into<String>) -> Self {
        ModerationLabel { name: name.into() }
    }
}

/// Classifier invocation errors. The moderation stage treats every variant
/// as a `PROCESSING_ERROR` verdict; none of them advance pipeline status.
#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("Classifier unreachable: {0}")]
    Transport(String),

    #[error("Classifier throttled: {0}")]
    Throttled(String),

    #[error("Classifier rejected input: {0}")]
    InvalidInput(String),
}

pub type ClassifierResult<T> = Result<T, ClassifierError>;

/// Content classifier abstraction.
///
/// Implementations examine image bytes and return detected violation labels
/// in detection order. Zero labels means the image passed moderation.
#[async_trait]
pub trait Classifier: Send + Sync {
    async fn detect(&self, image: &[u8]) -> ClassifierResult<Vec<ModerationLabel>>;
}
