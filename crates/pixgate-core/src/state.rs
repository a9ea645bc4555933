//! Pipeline state machine.
//!
//! The transition table lives here as a pure function so it can be unit
//! tested without touching any remote collaborator. Stages perform the side
//! effects; the orchestrator asks this module which status a stage outcome
//! leads to.
//!
//! Valid transitions:
//!
//! | Current               | Event                          | Next                  |
//! |-----------------------|--------------------------------|-----------------------|
//! | (none)                | IngestSucceeded                | Uploaded              |
//! | (none)                | IngestFailed                   | UploadFailed          |
//! | Uploaded              | Moderated(Pass/Fail)           | Moderated             |
//! | Uploaded              | Moderated(ProcessingError)     | Uploaded (unchanged)  |
//! | Moderated             | Resized                        | ModeratedAndResized   |
//! | Moderated             | ResizeSkipped                  | Moderated (unchanged) |
//! | Moderated             | Moderated(_)                   | Moderated (replay)    |
//! | ModeratedAndResized   | Resized / ResizeSkipped        | ModeratedAndResized   |
//!
//! Status never regresses; `UploadFailed` is terminal.

use thiserror::Error;

use crate::models::{ImageStatus, ModerationVerdict};

/// A stage outcome fed to the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineEvent {
    IngestSucceeded,
    IngestFailed,
    Moderated(ModerationVerdict),
    Resized,
    ResizeSkipped,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("invalid transition: {event:?} from {from:?}")]
    Invalid {
        from: Option<ImageStatus>,
        event: PipelineEvent,
    },
}

/// Compute the status a stage outcome leads to. `current` is `None` before
/// ingest has created a record.
pub fn next_status(
    current: Option<ImageStatus>,
    event: PipelineEvent,
) -> Result<ImageStatus, TransitionError> {
    use ImageStatus::*;
    use PipelineEvent::{IngestFailed, IngestSucceeded, ResizeSkipped, Resized};

    match (current, event) {
        (None, IngestSucceeded) => Ok(Uploaded),
        (None, IngestFailed) => Ok(UploadFailed),

        // A processing error leaves the record where it was; retry is owned
        // by the external scheduler re-invoking the orchestrator.
        (Some(Uploaded), PipelineEvent::Moderated(ModerationVerdict::ProcessingError)) => {
            Ok(Uploaded)
        }
        (Some(Uploaded), PipelineEvent::Moderated(_)) => Ok(Moderated),

        // Replaying moderation on an already-moderated record is a no-op
        // status-wise; stages must be safe to re-invoke.
        (Some(Moderated), PipelineEvent::Moderated(_)) => Ok(Moderated),
        (Some(Moderated), Resized) => Ok(ModeratedAndResized),
        (Some(Moderated), ResizeSkipped) => Ok(Moderated),

        // Resize always re-reads the original, so re-running it after
        // completion recomputes the same derived blob.
        (Some(ModeratedAndResized), Resized) => Ok(ModeratedAndResized),
        (Some(ModeratedAndResized), ResizeSkipped) => Ok(ModeratedAndResized),

        (from, event) => Err(TransitionError::Invalid { from, event }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ImageStatus::*;
    use ModerationVerdict::*;
    use PipelineEvent::Moderated as EvModerated;
    use PipelineEvent::{IngestFailed, IngestSucceeded, ResizeSkipped, Resized};

    #[test]
    fn test_ingest_creates_uploaded() {
        assert_eq!(next_status(None, IngestSucceeded), Ok(Uploaded));
        assert_eq!(next_status(None, IngestFailed), Ok(UploadFailed));
    }

    #[test]
    fn test_moderation_advances_on_pass_and_fail() {
        assert_eq!(next_status(Some(Uploaded), EvModerated(Pass)), Ok(Moderated));
        assert_eq!(next_status(Some(Uploaded), EvModerated(Fail)), Ok(Moderated));
    }

    #[test]
    fn test_processing_error_leaves_status_unchanged() {
        assert_eq!(
            next_status(Some(Uploaded), EvModerated(ProcessingError)),
            Ok(Uploaded)
        );
    }

    #[test]
    fn test_resize_transitions() {
        assert_eq!(
            next_status(Some(Moderated), Resized),
            Ok(ModeratedAndResized)
        );
        assert_eq!(next_status(Some(Moderated), ResizeSkipped), Ok(Moderated));
    }

    #[test]
    fn test_replays_are_idempotent() {
        assert_eq!(next_status(Some(Moderated), EvModerated(Pass)), Ok(Moderated));
        assert_eq!(
            next_status(Some(ModeratedAndResized), Resized),
            Ok(ModeratedAndResized)
        );
        assert_eq!(
            next_status(Some(ModeratedAndResized), ResizeSkipped),
            Ok(ModeratedAndResized)
        );
    }

    #[test]
    fn test_upload_failed_is_terminal() {
        for event in [
            IngestSucceeded,
            EvModerated(Pass),
            EvModerated(Fail),
            EvModerated(ProcessingError),
            Resized,
            ResizeSkipped,
        ] {
            assert!(next_status(Some(UploadFailed), event).is_err());
        }
    }

    #[test]
    fn test_status_never_regresses() {
        // Resize events cannot arrive before moderation.
        assert!(next_status(Some(Uploaded), Resized).is_err());
        assert!(next_status(Some(Uploaded), ResizeSkipped).is_err());
        // Moderation cannot re-run after resize completed.
        assert!(next_status(Some(ModeratedAndResized), EvModerated(Pass)).is_err());
        // Ingest events only apply before a record exists.
        assert!(next_status(Some(Uploaded), IngestSucceeded).is_err());
        assert!(next_status(None, EvModerated(Pass)).is_err());
    }
}
