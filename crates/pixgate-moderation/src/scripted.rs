//! Scripted classifier for tests and local development.

use crate::traits::{Classifier, ClassifierError, ClassifierResult, ModerationLabel};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// A classifier that replays queued responses, one per `detect` call.
/// When the queue is empty it reports zero labels (pass).
#[derive(Clone, Default)]
pub struct ScriptedClassifier {
    responses: Arc<Mutex<VecDeque<ClassifierResult<Vec<ModerationLabel>>>>>,
}

impl ScriptedClassifier {
    /// A classifier that always passes everything.
    pub fn passing() -> Self {
        Self::default()
    }

    /// Queue a detection returning the given label names, in order.
    pub fn push_labels<I, S>(&self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels = names.into_iter().map(ModerationLabel::new).collect();
        self.responses.lock().unwrap().push_back(Ok(labels));
    }

    /// Queue a classifier failure.
    pub fn push_error(&self, error: ClassifierError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }
}

#[async_trait]
impl Classifier for ScriptedClassifier {
    async fn detect(&self, _image: &[u8]) -> ClassifierResult<Vec<ModerationLabel>> {
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_queue_passes() {
        let classifier = ScriptedClassifier::passing();
        let labels = classifier.detect(&[]).await.unwrap();
        assert!(labels.is_empty());
    }

    #[tokio::test]
    async fn test_replays_in_order() {
        let classifier = ScriptedClassifier::default();
        classifier.push_labels(["Explicit Nudity", "Violence"]);
        classifier.push_error(ClassifierError::Throttled("quota".into()));

        let labels = classifier.detect(&[]).await.unwrap();
        assert_eq!(
            labels,
            vec![
                ModerationLabel::new("Explicit Nudity"),
                ModerationLabel::new("Violence"),
            ]
        );

        assert!(matches!(
            classifier.detect(&[]).await,
            Err(ClassifierError::Throttled(_))
        ));
    }
}
