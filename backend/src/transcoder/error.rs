use thiserror::Error;

/// Result type for image transcoding
pub type TranscodeResult<T> = Result<T, TranscodeError>;

/// Errors that can occur while resizing an upload
#[derive(Error, Debug)]
pub enum TranscodeError {
    /// The bytes do not start with a known image signature
    #[error("unsupported image format")]
    UnsupportedFormat,

    /// The image header was recognised but the pixels could not be decoded
    #[error("failed to decode image: {0}")]
    Decode(#[source] image::ImageError),

    /// The resized image could not be encoded back to the source format
    #[error("failed to encode image: {0}")]
    Encode(#[source] image::ImageError),

    #[error("failed to read image: {0}")]
    Io(#[from] std::io::Error),

    /// The blocking resize task panicked or was cancelled
    #[error("resize task failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}
