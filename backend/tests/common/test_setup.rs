use axum::{body::Body, http::Request, response::Response, Router};
use image_gateway::{
    media_storage::{ObjectStore, SharedObjectStore},
    server,
    transcoder::ImageTranscoder,
    types::Environment,
};
use std::sync::Arc;
use tower::ServiceExt;

use super::{InMemoryObjectStore, MULTIPART_BOUNDARY};

/// Setup test environment variables with all the required configuration
pub fn setup_test_env() {
    // Load test environment variables
    dotenvy::from_path(".env.example").ok();

    // Initialize tracing for tests
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .try_init()
        .ok();
}

/// Router wired to an object store the test can inspect
pub struct TestSetup<S = InMemoryObjectStore> {
    pub router: Router,
    pub store: Arc<S>,
}

impl TestSetup {
    pub fn new() -> Self {
        Self::with_store(InMemoryObjectStore::default())
    }
}

impl<S: ObjectStore + 'static> TestSetup<S> {
    pub fn with_store(store: S) -> Self {
        Self::with_environment(
            Environment::Development {
                presign_expiry_override: None,
            },
            store,
        )
    }

    pub fn with_environment(environment: Environment, store: S) -> Self {
        setup_test_env();

        let store = Arc::new(store);
        let shared_store: SharedObjectStore = store.clone();

        let router = server::router(
            environment,
            shared_store,
            Arc::new(ImageTranscoder::default()),
        );

        Self { router, store }
    }

    pub async fn send_multipart_request(
        &self,
        route: &str,
        body: Vec<u8>,
    ) -> Result<Response, Box<dyn std::error::Error>> {
        let request = Request::builder()
            .uri(route)
            .method("POST")
            .header(
                "Content-Type",
                format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}"),
            )
            .body(Body::from(body))?;

        let response = self.router.clone().oneshot(request).await?;
        Ok(response)
    }

    pub async fn send_post_json_request(
        &self,
        route: &str,
        payload: serde_json::Value,
    ) -> Result<Response, Box<dyn std::error::Error>> {
        let request = Request::builder()
            .uri(route)
            .method("POST")
            .header("Content-Type", "application/json")
            .body(Body::from(payload.to_string()))?;

        let response = self.router.clone().oneshot(request).await?;
        Ok(response)
    }

    pub async fn send_get_request(
        &self,
        route: &str,
    ) -> Result<Response, Box<dyn std::error::Error>> {
        let request = Request::builder()
            .uri(route)
            .method("GET")
            .body(Body::empty())?;
        let response = self.router.clone().oneshot(request).await?;
        Ok(response)
    }

    /// Sends a request with arbitrary method and headers
    pub async fn send_request(
        &self,
        method: &str,
        route: &str,
        headers: &[(&str, &str)],
    ) -> Result<Response, Box<dyn std::error::Error>> {
        let mut builder = Request::builder().uri(route).method(method);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        let request = builder.body(Body::empty())?;
        let response = self.router.clone().oneshot(request).await?;
        Ok(response)
    }

    pub async fn send_delete_request(
        &self,
        route: &str,
    ) -> Result<Response, Box<dyn std::error::Error>> {
        let request = Request::builder()
            .uri(route)
            .method("DELETE")
            .body(Body::empty())?;
        let response = self.router.clone().oneshot(request).await?;
        Ok(response)
    }
}
