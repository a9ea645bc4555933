//! Resize stage: fit-within-box thumbnail of the original blob.
//!
//! Always reads the original, never the previously resized output, so
//! re-invocation recomputes and overwrites the same derived blob.

use chrono::Utc;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageFormat};
use std::io::Cursor;
use std::sync::Arc;
use uuid::Uuid;

use pixgate_core::error::{PipelineError, PipelineResult};
use pixgate_core::models::{ImageStatus, ModerationVerdict};
use pixgate_records::RecordStore;
use pixgate_storage::{BlobBucket, BlobError, BlobStore};

/// Resize result returned to the orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeOutcome {
    Resized { width: u32, height: u32 },
    /// Moderation verdict was not PASS; nothing was read or written.
    SkippedNotPassed,
    /// The original already fits the bound box; nothing was written.
    SkippedAlreadyFits,
}

/// Target dimensions for fitting `(width, height)` inside a `bound` square,
/// aspect ratio preserved, longer edge scaled to the bound. `None` when the
/// image already fits.
pub fn fit_within(width: u32, height: u32, bound: u32) -> Option<(u32, u32)> {
    if width <= bound && height <= bound {
        return None;
    }

    if width >= height {
        let scaled = (height as f32 * bound as f32 / width as f32).round() as u32;
        Some((bound, scaled.max(1)))
    } else {
        let scaled = (width as f32 * bound as f32 / height as f32).round() as u32;
        Some((scaled.max(1), bound))
    }
}

/// Pick a resample filter by downscale ratio: cheaper filters for heavy
/// downscales, Lanczos for mild ones.
fn select_filter(orig_width: u32, orig_height: u32, new_width: u32, new_height: u32) -> FilterType {
    let width_ratio = orig_width as f32 / new_width as f32;
    let height_ratio = orig_height as f32 / new_height as f32;
    let max_ratio = width_ratio.max(height_ratio);

    if max_ratio > 2.0 {
        FilterType::Triangle
    } else if max_ratio > 1.5 {
        FilterType::CatmullRom
    } else {
        FilterType::Lanczos3
    }
}

pub struct ResizeStage {
    blobs: Arc<dyn BlobStore>,
    records: Arc<dyn RecordStore>,
    max_image_box: u32,
}

impl ResizeStage {
    pub fn new(blobs: Arc<dyn BlobStore>, records: Arc<dyn RecordStore>, max_image_box: u32) -> Self {
        Self {
            blobs,
            records,
            max_image_box,
        }
    }

    /// Conditionally resample the original blob for `image_id`.
    ///
    /// Short-circuits without any I/O when the verdict is not PASS. Decode or
    /// resample failure leaves the record at `MODERATED`, eligible for retry.
    /// The derived blob is written before the status update, so the record
    /// never claims `MODERATED_AND_RESIZED` without a resized blob existing.
    pub async fn resize(
        &self,
        image_id: Uuid,
        verdict: ModerationVerdict,
    ) -> PipelineResult<ResizeOutcome> {
        if verdict != ModerationVerdict::Pass {
            tracing::info!(
                image_id = %image_id,
                verdict = %verdict,
                "Image moderation didn't pass; no resizing is required"
            );
            return Ok(ResizeOutcome::SkippedNotPassed);
        }

        let key = image_id.to_string();

        let original = self
            .blobs
            .get(BlobBucket::Originals, &key)
            .await
            .map_err(|e| match e {
                BlobError::NotFound(detail) => PipelineError::NotFound(detail),
                other => PipelineError::Transport(other.to_string()),
            })?;

        let img = image::load_from_memory(&original)
            .map_err(|e| PipelineError::Decode(e.to_string()))?;
        let (width, height) = img.dimensions();

        let Some((target_width, target_height)) = fit_within(width, height, self.max_image_box)
        else {
            tracing::info!(
                image_id = %image_id,
                width = width,
                height = height,
                "Resizing isn't required; image is already in the allowed size"
            );
            return Ok(ResizeOutcome::SkippedAlreadyFits);
        };

        tracing::info!(
            image_id = %image_id,
            width = width,
            height = height,
            target_width = target_width,
            target_height = target_height,
            "Resizing the image"
        );

        let filter = select_filter(width, height, target_width, target_height);
        let resized = img.resize_exact(target_width, target_height, filter);

        // JPEG output; flatten any alpha channel first.
        let mut buffer = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(resized.to_rgb8())
            .write_to(&mut buffer, ImageFormat::Jpeg)
            .map_err(|e| PipelineError::Decode(e.to_string()))?;

        self.blobs
            .put(BlobBucket::Resized, &key, buffer.into_inner())
            .await
            .map_err(|e| PipelineError::Transport(e.to_string()))?;

        if let Err(e) = self
            .records
            .set_status(image_id, ImageStatus::ModeratedAndResized, Utc::now())
            .await
        {
            tracing::warn!(
                image_id = %image_id,
                error = %e,
                "Couldn't persist the resized status; derived blob is stored"
            );
        }

        Ok(ResizeOutcome::Resized {
            width: target_width,
            height: target_height,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_within_landscape() {
        // 1920x1080 into an 800 box: longer edge becomes 800.
        assert_eq!(fit_within(1920, 1080, 800), Some((800, 450)));
    }

    #[test]
    fn test_fit_within_portrait() {
        assert_eq!(fit_within(1080, 1920, 800), Some((450, 800)));
    }

    #[test]
    fn test_fit_within_square() {
        assert_eq!(fit_within(1600, 1600, 800), Some((800, 800)));
    }

    #[test]
    fn test_fit_within_already_fits() {
        assert_eq!(fit_within(400, 300, 800), None);
        assert_eq!(fit_within(800, 800, 800), None);
    }

    #[test]
    fn test_fit_within_one_axis_over() {
        // 900x100: only the width exceeds the box.
        assert_eq!(fit_within(900, 100, 800), Some((800, 89)));
    }

    #[test]
    fn test_fit_within_extreme_aspect_clamps_to_one() {
        assert_eq!(fit_within(100_000, 10, 800), Some((800, 1)));
    }

    #[test]
    fn test_select_filter_by_ratio() {
        assert_eq!(select_filter(1920, 1080, 800, 450), FilterType::Triangle);
        assert_eq!(select_filter(1200, 900, 800, 600), FilterType::Lanczos3);
        assert_eq!(select_filter(1500, 750, 800, 400), FilterType::CatmullRom);
    }
}
