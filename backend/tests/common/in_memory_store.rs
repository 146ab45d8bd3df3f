use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;
use image_gateway::media_storage::{BucketError, BucketResult, ObjectStore, PresignedUrl};

const URL_PREFIX: &str = "memory://images/";
const EXPIRY_SECS: i64 = 900;

/// Object written through the gateway
#[derive(Debug, Clone)]
pub struct StoredObject {
    pub body: Bytes,
    pub content_type: String,
}

/// Object store fake keeping objects in a map
#[derive(Default)]
pub struct InMemoryObjectStore {
    objects: Mutex<HashMap<String, StoredObject>>,
}

impl InMemoryObjectStore {
    pub fn get(&self, key: &str) -> Option<StoredObject> {
        self.objects.lock().unwrap().get(key).cloned()
    }

    pub fn insert(&self, key: &str, body: &[u8], content_type: &str) {
        self.objects.lock().unwrap().insert(
            key.to_string(),
            StoredObject {
                body: Bytes::copy_from_slice(body),
                content_type: content_type.to_string(),
            },
        );
    }

    pub fn len(&self) -> usize {
        self.objects.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Follows a link produced by `presigned_get_url`
    pub fn download(&self, url: &str) -> Option<StoredObject> {
        let key = url.strip_prefix(URL_PREFIX)?.split('?').next()?;
        self.get(key)
    }
}

#[async_trait]
impl ObjectStore for InMemoryObjectStore {
    async fn put_object(&self, key: &str, body: Bytes, content_type: &str) -> BucketResult<()> {
        self.objects.lock().unwrap().insert(
            key.to_string(),
            StoredObject {
                body,
                content_type: content_type.to_string(),
            },
        );
        Ok(())
    }

    async fn presigned_get_url(&self, key: &str) -> BucketResult<PresignedUrl> {
        let expires_at = Utc::now() + chrono::Duration::seconds(EXPIRY_SECS);
        Ok(PresignedUrl {
            url: format!("{URL_PREFIX}{key}?expires={}", expires_at.timestamp()),
            expires_at,
        })
    }

    async fn delete_object(&self, key: &str) -> BucketResult<()> {
        self.objects.lock().unwrap().remove(key);
        Ok(())
    }
}

/// Object store fake failing every call
pub struct FailingObjectStore {
    upstream: bool,
}

impl FailingObjectStore {
    /// Fails like a rejected request (403, bad credentials)
    pub const fn rejecting() -> Self {
        Self { upstream: false }
    }

    /// Fails like an unavailable bucket (5xx)
    pub const fn unavailable() -> Self {
        Self { upstream: true }
    }

    fn error(&self, operation: &str) -> BucketError {
        if self.upstream {
            BucketError::UpstreamError(format!("{operation}: ServiceUnavailable"))
        } else {
            BucketError::S3Error(format!("{operation}: AccessDenied"))
        }
    }
}

#[async_trait]
impl ObjectStore for FailingObjectStore {
    async fn put_object(&self, _key: &str, _body: Bytes, _content_type: &str) -> BucketResult<()> {
        Err(self.error("PutObject"))
    }

    async fn presigned_get_url(&self, _key: &str) -> BucketResult<PresignedUrl> {
        Err(self.error("GetObject presign"))
    }

    async fn delete_object(&self, _key: &str) -> BucketResult<()> {
        Err(self.error("DeleteObject"))
    }
}
