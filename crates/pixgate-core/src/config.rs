//! Configuration module
//!
//! Env-var driven configuration for the pipeline. Defaults match the
//! production deployment (bucket names, 800x800 bound box).

use std::env;

use crate::constants;

/// Pipeline configuration.
#[derive(Clone, Debug)]
pub struct PipelineConfig {
    /// Bucket holding original uploads.
    pub originals_bucket: String,
    /// Bucket holding resized derivatives.
    pub resized_bucket: String,
    /// Bound box edge: resized images fit within this square.
    pub max_image_box: u32,
    /// AWS region for S3/Rekognition backends.
    pub aws_region: Option<String>,
    /// Postgres connection string for the record store backend.
    pub database_url: Option<String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            originals_bucket: constants::DEFAULT_ORIGINALS_BUCKET.to_string(),
            resized_bucket: constants::DEFAULT_RESIZED_BUCKET.to_string(),
            max_image_box: constants::DEFAULT_MAX_IMAGE_BOX,
            aws_region: None,
            database_url: None,
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl PipelineConfig {
    /// Load configuration from the environment (reading `.env` if present).
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        PipelineConfig {
            originals_bucket: env_or("ORIGINALS_BUCKET", constants::DEFAULT_ORIGINALS_BUCKET),
            resized_bucket: env_or("RESIZED_BUCKET", constants::DEFAULT_RESIZED_BUCKET),
            max_image_box: env_parse("MAX_IMAGE_BOX", constants::DEFAULT_MAX_IMAGE_BOX),
            aws_region: env::var("AWS_REGION").ok(),
            database_url: env::var("DATABASE_URL").ok(),
        }
    }
}
