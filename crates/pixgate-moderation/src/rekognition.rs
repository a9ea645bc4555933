//! AWS Rekognition classifier backend.
//!
//! Submits image bytes to `DetectModerationLabels` and maps detected label
//! names into `ModerationLabel`s, preserving detection order.

use crate::traits::{Classifier, ClassifierError, ClassifierResult, ModerationLabel};
use async_trait::async_trait;
use aws_config::meta::region::RegionProviderChain;
use aws_config::BehaviorVersion;
use aws_sdk_rekognition::error::SdkError;
use aws_sdk_rekognition::types::Image;
use aws_sdk_rekognition::Client as RekognitionClient;

/// Rekognition-backed content classifier.
#[derive(Clone)]
pub struct RekognitionClassifier {
    client: RekognitionClient,
}

impl RekognitionClassifier {
    /// Create a classifier for the given AWS region.
    pub async fn new(region: String) -> Self {
        let region_provider = RegionProviderChain::first_try(aws_config::Region::new(region));

        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(region_provider)
            .load()
            .await;

        RekognitionClassifier {
            client: RekognitionClient::new(&config),
        }
    }
}

#[async_trait]
impl Classifier for RekognitionClassifier {
    async fn detect(&self, image: &[u8]) -> ClassifierResult<Vec<ModerationLabel>> {
        let start = std::time::Instant::now();

        let rekognition_image = Image::builder()
            .bytes(aws_sdk_rekognition::primitives::Blob::new(image))
            .build();

        let response = self
            .client
            .detect_moderation_labels()
            .image(rekognition_image)
            .send()
            .await
            .map_err(|e| match &e {
                SdkError::ServiceError(service_err) => {
                    let err = service_err.err();
                    if err.is_provisioned_throughput_exceeded_exception()
                        || err.is_throttling_exception()
                    {
                        ClassifierError::Throttled(e.to_string())
                    } else if err.is_invalid_image_format_exception()
                        || err.is_image_too_large_exception()
                        || err.is_invalid_parameter_exception()
                    {
                        ClassifierError::InvalidInput(e.to_string())
                    } else {
                        ClassifierError::Transport(e.to_string())
                    }
                }
                _ => ClassifierError::Transport(e.to_string()),
            })?;

        let labels: Vec<ModerationLabel> = response
            .moderation_labels()
            .iter()
            .filter_map(|label| label.name())
            .map(ModerationLabel::new)
            .collect();

        tracing::info!(
            label_count = labels.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Rekognition moderation completed"
        );

        Ok(labels)
    }
}
