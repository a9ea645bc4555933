//! Pixgate Moderation Library
//!
//! Content-classifier abstraction for the pipeline. The `Classifier` trait
//! takes image bytes and returns detected violation labels in detection
//! order; AWS Rekognition backs it in production (feature `rekognition`),
//! and `ScriptedClassifier` backs it in tests.

#[cfg(feature = "rekognition")]
pub mod rekognition;
pub mod scripted;
pub mod traits;

// Re-export commonly used types
#[cfg(feature = "rekognition")]
pub use rekognition::RekognitionClassifier;
pub use scripted::ScriptedClassifier;
pub use traits::{Classifier, ClassifierError, ClassifierResult, ModerationLabel};
