//! Domain models for the image pipeline.
//!
//! `ImageRecord` is the persisted per-image status entity; `ImageStatus` and
//! `ModerationVerdict` serialize in the record schema's SCREAMING_SNAKE_CASE
//! form.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Pipeline status of an image. Advances forward only; `UploadFailed` is the
/// terminal failure state reachable only before `Uploaded`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ImageStatus {
    Uploaded,
    UploadFailed,
    Moderated,
    ModeratedAndResized,
}

impl fmt::Display for ImageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ImageStatus::Uploaded => "UPLOADED",
            ImageStatus::UploadFailed => "UPLOAD_FAILED",
            ImageStatus::Moderated => "MODERATED",
            ImageStatus::ModeratedAndResized => "MODERATED_AND_RESIZED",
        };
        f.write_str(s)
    }
}

impl std::str::FromStr for ImageStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "UPLOADED" => Ok(ImageStatus::Uploaded),
            "UPLOAD_FAILED" => Ok(ImageStatus::UploadFailed),
            "MODERATED" => Ok(ImageStatus::Moderated),
            "MODERATED_AND_RESIZED" => Ok(ImageStatus::ModeratedAndResized),
            other => Err(format!("unknown image status: {}", other)),
        }
    }
}

/// Outcome of content moderation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ModerationVerdict {
    Pass,
    Fail,
    ProcessingError,
}

impl fmt::Display for ModerationVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ModerationVerdict::Pass => "PASS",
            ModerationVerdict::Fail => "FAIL",
            ModerationVerdict::ProcessingError => "PROCESSING_ERROR",
        };
        f.write_str(s)
    }
}

impl std::str::FromStr for ModerationVerdict {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PASS" => Ok(ModerationVerdict::Pass),
            "FAIL" => Ok(ModerationVerdict::Fail),
            "PROCESSING_ERROR" => Ok(ModerationVerdict::ProcessingError),
            other => Err(format!("unknown moderation verdict: {}", other)),
        }
    }
}

/// Persisted per-image record; the single source of truth for pipeline
/// progress. Keyed by `image_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageRecord {
    pub image_id: Uuid,
    pub status: ImageStatus,
    /// Set at most once, unless a retry supersedes a processing error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub moderation_result: Option<ModerationVerdict>,
    /// Violation labels in classifier detection order; empty on `PASS`,
    /// absent before moderation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub moderation_flags: Option<Vec<String>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ImageRecord {
    /// Create the initial record written by ingest.
    pub fn new_uploaded(image_id: Uuid) -> Self {
        let now = Utc::now();
        ImageRecord {
            image_id,
            status: ImageStatus::Uploaded,
            moderation_result: None,
            moderation_flags: None,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serializes_screaming_snake_case() {
        let json = serde_json::to_string(&ImageStatus::ModeratedAndResized).unwrap();
        assert_eq!(json, "\"MODERATED_AND_RESIZED\"");

        let back: ImageStatus = serde_json::from_str("\"UPLOAD_FAILED\"").unwrap();
        assert_eq!(back, ImageStatus::UploadFailed);
    }

    #[test]
    fn test_verdict_serializes_screaming_snake_case() {
        let json = serde_json::to_string(&ModerationVerdict::ProcessingError).unwrap();
        assert_eq!(json, "\"PROCESSING_ERROR\"");
    }

    #[test]
    fn test_status_round_trips_through_str() {
        for status in [
            ImageStatus::Uploaded,
            ImageStatus::UploadFailed,
            ImageStatus::Moderated,
            ImageStatus::ModeratedAndResized,
        ] {
            let back: ImageStatus = status.to_string().parse().unwrap();
            assert_eq!(back, status);
        }
        assert!("RESIZED".parse::<ImageStatus>().is_err());
    }

    #[test]
    fn test_new_uploaded_record() {
        let id = Uuid::new_v4();
        let record = ImageRecord::new_uploaded(id);
        assert_eq!(record.image_id, id);
        assert_eq!(record.status, ImageStatus::Uploaded);
        assert!(record.moderation_result.is_none());
        assert!(record.moderation_flags.is_none());
        assert_eq!(record.created_at, record.updated_at);
    }

    #[test]
    fn test_record_json_omits_absent_moderation_fields() {
        let record = ImageRecord::new_uploaded(Uuid::new_v4());
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("moderation_result").is_none());
        assert!(json.get("moderation_flags").is_none());
        assert_eq!(json["status"], "UPLOADED");
    }
}
