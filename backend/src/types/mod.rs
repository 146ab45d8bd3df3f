mod environment;
mod error;
mod extractors;
mod role;

pub use environment::Environment;
pub use error::{ApiErrorResponse, AppError};
pub use extractors::{UploadForm, IMAGE_FIELD, IMAGE_NAME_FIELD, USER_ROLE_FIELD};
pub use role::UploaderRole;
