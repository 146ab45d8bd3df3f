use std::sync::Arc;
use std::time::Duration;

use aide::openapi::OpenApi;
use axum::{extract::DefaultBodyLimit, Extension, Router};
use datadog_tracing::axum::{shutdown_signal, OtelAxumLayer, OtelInResponseLayer};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

use crate::routes::{self, images::MAX_IMAGE_SIZE_BYTES};
use crate::{media_storage::SharedObjectStore, transcoder::ImageTranscoder, types::Environment};

/// Upper bound for a whole request, upload and resize included
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Multipart framing on top of the image itself
const FORM_OVERHEAD_BYTES: usize = 64 * 1024;

/// Builds the application router with its dependencies attached
///
/// The object store and transcoder are created once by the caller and shared by
/// every request. CORS is open to any origin so browser clients can call the
/// gateway directly.
pub fn router(
    environment: Environment,
    media_storage: SharedObjectStore,
    transcoder: Arc<ImageTranscoder>,
) -> Router {
    let mut openapi = OpenApi::default();

    routes::handler()
        .finish_api_with(&mut openapi, |api| {
            api.title("Image Gateway")
                .version(env!("CARGO_PKG_VERSION"))
        })
        .layer(Extension(openapi))
        .layer(Extension(environment))
        .layer(Extension(media_storage))
        .layer(Extension(transcoder))
        .layer(DefaultBodyLimit::max(MAX_IMAGE_SIZE_BYTES + FORM_OVERHEAD_BYTES))
        .layer(tower_http::timeout::TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(CorsLayer::permissive())
}

/// Starts the server with the given environment and dependencies
///
/// # Errors
///
/// Returns an error if the server fails to start or bind to the port
pub async fn start(
    environment: Environment,
    media_storage: SharedObjectStore,
    transcoder: Arc<ImageTranscoder>,
) -> anyhow::Result<()> {
    let port = environment.port()?;

    let router = router(environment, media_storage, transcoder)
        // Include trace context as header into the response
        .layer(OtelInResponseLayer)
        // Start OpenTelemetry trace on incoming request
        .layer(OtelAxumLayer::default());

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));

    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("🔄 Image Gateway started on http://{addr}");

    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(anyhow::Error::from)
}
