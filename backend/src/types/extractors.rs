//! Custom extractors for request validation

use aide::operation::OperationInput;
use axum::extract::{FromRequest, Multipart, Request};
use bytes::Bytes;

use crate::types::error::AppError;

/// Multipart field carrying the image file
pub const IMAGE_FIELD: &str = "image";
/// Multipart field carrying the storage key
pub const IMAGE_NAME_FIELD: &str = "imageName";
/// Multipart field carrying the caller's role
pub const USER_ROLE_FIELD: &str = "user_role";

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Image upload submitted as `multipart/form-data`
///
/// Unknown fields are ignored. When a field appears more than once the last
/// occurrence wins.
#[derive(Debug, Clone)]
pub struct UploadForm {
    /// Raw bytes of the `image` part
    pub image: Bytes,
    /// Content type declared on the `image` part
    pub content_type: String,
    /// Storage key the resized image is written under
    pub image_name: String,
    /// Role claimed by the caller, not verified
    pub user_role: String,
}

impl<S> FromRequest<S> for UploadForm
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mut multipart = Multipart::from_request(req, state).await.map_err(|err| {
            tracing::warn!("Multipart rejection: {err}");
            AppError::new(
                axum::http::StatusCode::BAD_REQUEST,
                "invalid_content_type",
                "Expected a multipart/form-data body",
                false,
            )
        })?;

        let mut image = None;
        let mut content_type = None;
        let mut image_name = None;
        let mut user_role = None;

        while let Some(field) = multipart.next_field().await? {
            let field_name = field.name().map(ToString::to_string).unwrap_or_default();

            match field_name.as_str() {
                IMAGE_FIELD => {
                    content_type = field.content_type().map(ToString::to_string);
                    image = Some(field.bytes().await?);
                }
                IMAGE_NAME_FIELD => image_name = Some(field.text().await?),
                USER_ROLE_FIELD => user_role = Some(field.text().await?),
                _ => {}
            }
        }

        let image = image.ok_or_else(|| {
            AppError::missing_field("missing_image", "An `image` file is required")
        })?;
        let image_name = image_name.filter(|name| !name.is_empty()).ok_or_else(|| {
            AppError::missing_field("missing_image_name", "A non-empty `imageName` is required")
        })?;
        let user_role = user_role
            .ok_or_else(|| AppError::missing_field("missing_user_role", "`user_role` is required"))?;

        Ok(Self {
            image,
            content_type: content_type.unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string()),
            image_name,
            user_role,
        })
    }
}

/// Body schema is left undocumented, multipart parts are described on the route
impl OperationInput for UploadForm {}
