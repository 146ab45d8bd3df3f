//! S3-based image storage operations
mod error;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::{
    error::SdkError, presigning::PresigningConfig, primitives::ByteStream, Client as S3Client,
};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use tracing::debug;

pub use error::{BucketError, BucketResult};

/// Default lifetime of a signed retrieval link
pub const DEFAULT_PRESIGNED_URL_EXPIRY_SECS: u64 = 15 * 60;

/// Presigned URL with expiration information
#[derive(Debug, Clone)]
pub struct PresignedUrl {
    /// The presigned URL for GET operations
    pub url: String,
    /// UTC timestamp when the URL expires
    pub expires_at: DateTime<Utc>,
}

/// Object store shared by every request handler
pub type SharedObjectStore = Arc<dyn ObjectStore>;

/// Flat key -> bytes object store used by the gateway
///
/// Keys are opaque and caller controlled. Implementations must be safe to share
/// across concurrent requests.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Writes `body` under `key`, replacing any existing object
    ///
    /// # Errors
    ///
    /// Returns a `BucketError` if the store rejects the write
    async fn put_object(&self, key: &str, body: Bytes, content_type: &str) -> BucketResult<()>;

    /// Signs a time-limited GET link for `key`
    ///
    /// No existence check is made, a link can be issued for a missing key.
    ///
    /// # Errors
    ///
    /// Returns a `BucketError` if the link cannot be generated
    async fn presigned_get_url(&self, key: &str) -> BucketResult<PresignedUrl>;

    /// Removes `key` from the store. Deleting a missing key succeeds.
    ///
    /// # Errors
    ///
    /// Returns a `BucketError` if the store rejects the delete
    async fn delete_object(&self, key: &str) -> BucketResult<()>;
}

/// Image storage client for S3 operations
pub struct MediaStorage {
    s3_client: Arc<S3Client>,
    bucket_name: String,
    presigned_url_expiry_secs: u64,
}

impl MediaStorage {
    /// Creates a new media storage client
    ///
    /// # Arguments
    ///
    /// * `s3_client` - Pre-configured S3 client
    /// * `bucket_name` - S3 bucket name for image storage
    /// * `presigned_url_expiry_secs` - Lifetime of signed retrieval links in seconds
    #[must_use]
    pub const fn new(
        s3_client: Arc<S3Client>,
        bucket_name: String,
        presigned_url_expiry_secs: u64,
    ) -> Self {
        Self {
            s3_client,
            bucket_name,
            presigned_url_expiry_secs,
        }
    }

    /// Name of the bucket this client writes to
    #[must_use]
    pub fn bucket_name(&self) -> &str {
        &self.bucket_name
    }
}

#[async_trait]
impl ObjectStore for MediaStorage {
    async fn put_object(&self, key: &str, body: Bytes, content_type: &str) -> BucketResult<()> {
        debug!(
            "Writing object {} ({} bytes, {})",
            key,
            body.len(),
            content_type
        );

        self.s3_client
            .put_object()
            .bucket(&self.bucket_name)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(body))
            .send()
            .await?;

        Ok(())
    }

    /// Generates a presigned URL for GET operations
    ///
    /// Signing happens locally with the client's credentials, the bucket is not
    /// contacted.
    async fn presigned_get_url(&self, key: &str) -> BucketResult<PresignedUrl> {
        let presigned_config =
            PresigningConfig::expires_in(Duration::from_secs(self.presigned_url_expiry_secs))
                .map_err(|e| {
                    BucketError::ConfigError(format!("Failed to create presigning config: {e}"))
                })?;

        let presigned_url = self
            .s3_client
            .get_object()
            .bucket(&self.bucket_name)
            .key(key)
            .presigned(presigned_config)
            .await
            .map_err(|e| BucketError::S3Error(format!("Failed to generate presigned URL: {e}")))?;

        let expires_at: DateTime<Utc> =
            Utc::now() + Duration::from_secs(self.presigned_url_expiry_secs);

        Ok(PresignedUrl {
            url: presigned_url.uri().to_string(),
            expires_at,
        })
    }

    async fn delete_object(&self, key: &str) -> BucketResult<()> {
        let result = self
            .s3_client
            .delete_object()
            .bucket(&self.bucket_name)
            .key(key)
            .send()
            .await;

        match result {
            Ok(_) => Ok(()),
            // S3 already answers 204 for missing keys, some compatible stores answer 404
            Err(SdkError::ServiceError(service_err))
                if service_err.raw().status().as_u16() == 404 =>
            {
                debug!("Object {} was already absent", key);
                Ok(())
            }
            Err(e) => Err(BucketError::from(e)),
        }
    }
}
