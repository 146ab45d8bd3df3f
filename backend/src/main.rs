use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;

use image_gateway::{
    media_storage::{MediaStorage, SharedObjectStore},
    server,
    transcoder::ImageTranscoder,
    types::Environment,
};
use tracing_subscriber::{filter::LevelFilter, fmt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let environment = Environment::from_env();

    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(environment.tracing_level()).into())
        .from_env_lossy();

    // Configure logging format based on environment
    // Use JSON format for staging/production (Datadog), regular format for development
    match environment {
        Environment::Production | Environment::Staging => {
            fmt().json().with_env_filter(env_filter).init();
        }
        Environment::Development { .. } => {
            fmt().with_env_filter(env_filter).init();
        }
    }

    if let Some(endpoint_url) = environment.override_aws_endpoint_url() {
        tracing::warn!("APP_ENV is development, sending S3 requests to {endpoint_url}");
    }

    let s3_client = Arc::new(S3Client::from_conf(environment.s3_client_config().await));
    let media_storage = MediaStorage::new(
        s3_client,
        environment.s3_bucket(),
        environment.presigned_url_expiry_secs(),
    );
    tracing::info!("Storing images in bucket {}", media_storage.bucket_name());

    let media_storage: SharedObjectStore = Arc::new(media_storage);
    let transcoder = Arc::new(ImageTranscoder::default());

    server::start(environment, media_storage, transcoder).await
}
