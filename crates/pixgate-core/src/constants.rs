//! Shared constants.

/// Default bucket holding original uploads.
pub const DEFAULT_ORIGINALS_BUCKET: &str = "gj-uploaded-image";

/// Default bucket holding resized derivatives.
pub const DEFAULT_RESIZED_BUCKET: &str = "gj-resized-image";

/// Default bound box: a resized image fits within this square,
/// aspect ratio preserved.
pub const DEFAULT_MAX_IMAGE_BOX: u32 = 800;
