mod docs;
mod health;
pub mod images;
use aide::axum::{
    routing::{delete, get, post},
    ApiRouter,
};

/// Creates the router with all handler routes
///
/// Static paths take precedence over `/{imageName}`, so `health`, `docs` and
/// `openapi.json` cannot be signed through the GET route.
pub fn handler() -> ApiRouter {
    ApiRouter::new()
        .merge(docs::handler())
        .api_route("/health", get(health::handler))
        .api_route("/", post(images::upload_image))
        .api_route("/{imageName}", get(images::get_image_url))
        .api_route("/api/posts/{imageName}", delete(images::delete_image))
}
