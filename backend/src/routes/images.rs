use std::sync::Arc;

use aide::OperationOutput;
use axum::{
    extract::Path,
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::{
    media_storage::SharedObjectStore,
    transcoder::ImageTranscoder,
    types::{AppError, UploadForm, UploaderRole},
};

/// Maximum accepted upload size in bytes - 15 MiB
pub const MAX_IMAGE_SIZE_BYTES: usize = 15_728_640;

/// Path parameters for routes addressing a single image
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImagePath {
    /// Storage key of the image
    pub image_name: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignedUrlPayload {
    /// Storage key the link was signed for
    pub image_name: String,
    /// Time-limited GET link for the stored image
    pub url: String,
    /// RFC 3339 UTC timestamp when the link expires
    pub expires_at: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct SignedUrlResponse {
    pub payload: SignedUrlPayload,
}

/// Success response without a body
#[derive(Debug, Clone, Copy)]
pub struct EmptyResponse(StatusCode);

impl IntoResponse for EmptyResponse {
    fn into_response(self) -> Response {
        self.0.into_response()
    }
}

impl OperationOutput for EmptyResponse {
    type Inner = ();
}

/// Resizes an uploaded image and stores it under `imageName`
///
/// Expects `multipart/form-data` with an `image` file part plus `imageName` and
/// `user_role` text parts. Only the `admin` and `seller` roles may upload; any
/// other role is rejected before the image is decoded. The image is fitted into
/// a 300x462 box keeping its aspect ratio and written with the content type
/// declared on the `image` part. An existing object with the same key is
/// replaced.
///
/// # Errors
///
/// - 400 when a form field is missing or the body is not multipart
/// - 401 when `user_role` may not upload
/// - 500 when `image` is not a supported image (code `invalid_image`)
/// - 500/503 when the bucket write fails
#[instrument(
    skip(media_storage, transcoder, form),
    fields(image_name = %form.image_name, user_role = %form.user_role)
)]
pub async fn upload_image(
    Extension(media_storage): Extension<SharedObjectStore>,
    Extension(transcoder): Extension<Arc<ImageTranscoder>>,
    form: UploadForm,
) -> Result<EmptyResponse, AppError> {
    if UploaderRole::from_claimed(&form.user_role).is_none() {
        return Err(AppError::unauthorized());
    }

    let transcoded = transcoder.resize(form.image).await?;

    media_storage
        .put_object(&form.image_name, transcoded.bytes, &form.content_type)
        .await?;

    info!(
        "Stored {}x{} image under {}",
        transcoded.width, transcoded.height, form.image_name
    );

    Ok(EmptyResponse(StatusCode::OK))
}

/// Issues a time-limited download link for `imageName`
///
/// The key is not checked for existence, a link is returned for any key.
#[instrument(skip(media_storage))]
pub async fn get_image_url(
    Extension(media_storage): Extension<SharedObjectStore>,
    Path(ImagePath { image_name }): Path<ImagePath>,
) -> Result<Json<SignedUrlResponse>, AppError> {
    let presigned_url = media_storage.presigned_get_url(&image_name).await?;

    Ok(Json(SignedUrlResponse {
        payload: SignedUrlPayload {
            image_name,
            url: presigned_url.url,
            expires_at: presigned_url.expires_at.to_rfc3339(),
        },
    }))
}

/// Deletes the image stored under `imageName`
///
/// Answers 204 whether or not the key existed.
#[instrument(skip(media_storage))]
pub async fn delete_image(
    Extension(media_storage): Extension<SharedObjectStore>,
    Path(ImagePath { image_name }): Path<ImagePath>,
) -> Result<EmptyResponse, AppError> {
    media_storage.delete_object(&image_name).await?;

    info!("Deleted image {image_name}");

    Ok(EmptyResponse(StatusCode::NO_CONTENT))
}
