use crate::traits::{BlobBucket, BlobError, BlobResult, BlobStore};
use async_trait::async_trait;
use aws_config::meta::region::RegionProviderChain;
use aws_config::retry::{RetryConfig, RetryMode};
use aws_config::BehaviorVersion;
use aws_sdk_s3::error::SdkError;
use aws_sdk_s3::operation::get_object::GetObjectError;
use aws_sdk_s3::operation::head_object::HeadObjectError;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use bytes::Bytes;

/// S3-backed blob store. One S3 bucket per logical bucket.
#[derive(Clone)]
pub struct S3BlobStore {
    client: Client,
    originals_bucket: String,
    resized_bucket: String,
}

impl S3BlobStore {
    /// Create a new S3BlobStore.
    ///
    /// # Arguments
    /// * `originals_bucket` - S3 bucket holding raw uploads
    /// * `resized_bucket` - S3 bucket holding derived thumbnails
    /// * `region` - AWS region
    pub async fn new(originals_bucket: String, resized_bucket: String, region: String) -> Self {
        let region_provider = RegionProviderChain::first_try(aws_config::Region::new(region));

        let retry_config = RetryConfig::standard()
            .with_max_attempts(5)
            .with_retry_mode(RetryMode::Adaptive);

        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(region_provider)
            .retry_config(retry_config)
            .load()
            .await;

        S3BlobStore {
            client: Client::new(&config),
            originals_bucket,
            resized_bucket,
        }
    }

    /// Create an S3BlobStore from pipeline configuration. Requires
    /// `aws_region` to be set.
    pub async fn from_config(config: &pixgate_core::PipelineConfig) -> BlobResult<Self> {
        let region = config
            .aws_region
            .clone()
            .ok_or_else(|| BlobError::ConfigError("AWS_REGION not configured".to_string()))?;

        Ok(Self::new(
            config.originals_bucket.clone(),
            config.resized_bucket.clone(),
            region,
        )
        .await)
    }

    fn bucket_name(&self, bucket: BlobBucket) -> &str {
        match bucket {
            BlobBucket::Originals => &self.originals_bucket,
            BlobBucket::Resized => &self.resized_bucket,
        }
    }
}

#[async_trait]
impl BlobStore for S3BlobStore {
    async fn put(&self, bucket: BlobBucket, key: &str, data: Vec<u8>) -> BlobResult<()> {
        let bucket_name = self.bucket_name(bucket);
        let size = data.len() as u64;
        let body = ByteStream::from(Bytes::from(data));
        let start = std::time::Instant::now();

        self.client
            .put_object()
            .bucket(bucket_name)
            .key(key)
            .body(body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    bucket = %bucket_name,
                    key = %key,
                    size_bytes = size,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "S3 put failed"
                );
                BlobError::UploadFailed(e.to_string())
            })?;

        tracing::info!(
            bucket = %bucket_name,
            key = %key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 put successful"
        );

        Ok(())
    }

    async fn get(&self, bucket: BlobBucket, key: &str) -> BlobResult<Vec<u8>> {
        let bucket_name = self.bucket_name(bucket);
        let start = std::time::Instant::now();

        let response = self
            .client
            .get_object()
            .bucket(bucket_name)
            .key(key)
            .send()
            .await
            .map_err(|e| match &e {
                SdkError::ServiceError(service_err) => match service_err.err() {
                    GetObjectError::NoSuchKey(_) => {
                        BlobError::NotFound(format!("{}/{}", bucket_name, key))
                    }
                    _ => {
                        tracing::error!(
                            error = %e,
                            bucket = %bucket_name,
                            key = %key,
                            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                            "S3 get failed"
                        );
                        BlobError::DownloadFailed(e.to_string())
                    }
                },
                _ => {
                    tracing::error!(
                        error = %e,
                        bucket = %bucket_name,
                        key = %key,
                        duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                        "S3 get failed"
                    );
                    BlobError::DownloadFailed(e.to_string())
                }
            })?;

        let data = response
            .body
            .collect()
            .await
            .map_err(|e| BlobError::DownloadFailed(e.to_string()))?;

        let data = data.into_bytes().to_vec();

        tracing::info!(
            bucket = %bucket_name,
            key = %key,
            size_bytes = data.len() as u64,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 get successful"
        );

        Ok(data)
    }

    async fn exists(&self, bucket: BlobBucket, key: &str) -> BlobResult<bool> {
        let bucket_name = self.bucket_name(bucket);

        match self
            .client
            .head_object()
            .bucket(bucket_name)
            .key(key)
            .send()
            .await
        {
            Ok(_) => Ok(true),
            Err(e) => match &e {
                SdkError::ServiceError(service_err) => match service_err.err() {
                    HeadObjectError::NotFound(_) => Ok(false),
                    _ => Err(BlobError::BackendError(e.to_string())),
                },
                _ => Err(BlobError::BackendError(e.to_string())),
            },
        }
    }
}
