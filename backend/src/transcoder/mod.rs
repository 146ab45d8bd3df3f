//! Image resizing for uploaded images
mod error;

use std::io::Cursor;

use bytes::Bytes;
use image::{imageops::FilterType, GenericImageView, ImageFormat, ImageReader};
use tracing::debug;

pub use error::{TranscodeError, TranscodeResult};

/// Width of the box uploads are fitted into
pub const TARGET_WIDTH: u32 = 300;
/// Height of the box uploads are fitted into
pub const TARGET_HEIGHT: u32 = 462;

/// Re-encoded image produced by [`ImageTranscoder::resize`]
#[derive(Debug, Clone)]
pub struct TranscodedImage {
    /// Encoded bytes, same format as the source
    pub bytes: Bytes,
    pub width: u32,
    pub height: u32,
    pub format: ImageFormat,
}

/// Resizes images so they fit inside a fixed box ("contain" fit)
///
/// The aspect ratio is preserved and nothing is cropped; the result touches the
/// box on at least one side but does not have to fill it.
#[derive(Debug, Clone, Copy)]
pub struct ImageTranscoder {
    max_width: u32,
    max_height: u32,
}

impl Default for ImageTranscoder {
    fn default() -> Self {
        Self::new(TARGET_WIDTH, TARGET_HEIGHT)
    }
}

impl ImageTranscoder {
    #[must_use]
    pub const fn new(max_width: u32, max_height: u32) -> Self {
        Self {
            max_width,
            max_height,
        }
    }

    /// Decodes, resizes and re-encodes `data` on the blocking thread pool
    ///
    /// # Errors
    ///
    /// Returns `TranscodeError::UnsupportedFormat` or `TranscodeError::Decode` when
    /// `data` is not a readable image, `TranscodeError::Encode` when the resized
    /// image cannot be written back.
    pub async fn resize(&self, data: Bytes) -> TranscodeResult<TranscodedImage> {
        let transcoder = *self;
        let transcoded = tokio::task::spawn_blocking(move || transcoder.resize_blocking(&data))
            .await??;

        Ok(transcoded)
    }

    /// Synchronous version of [`Self::resize`]
    ///
    /// # Errors
    ///
    /// See [`Self::resize`].
    pub fn resize_blocking(&self, data: &[u8]) -> TranscodeResult<TranscodedImage> {
        let reader = ImageReader::new(Cursor::new(data)).with_guessed_format()?;
        let format = reader.format().ok_or(TranscodeError::UnsupportedFormat)?;
        let img = reader.decode().map_err(TranscodeError::Decode)?;

        let (src_w, src_h) = img.dimensions();
        let (width, height) = contain_dimensions(src_w, src_h, self.max_width, self.max_height);
        debug!("Resizing {format:?} image from {src_w}x{src_h} to {width}x{height}");

        let resized = img.resize_exact(width, height, FilterType::Lanczos3);

        let mut buffer = Vec::new();
        resized
            .write_to(&mut Cursor::new(&mut buffer), format)
            .map_err(TranscodeError::Encode)?;

        Ok(TranscodedImage {
            bytes: Bytes::from(buffer),
            width,
            height,
            format,
        })
    }
}

/// Largest size with the source aspect ratio that fits in `box_w` x `box_h`
///
/// Small sources are enlarged. Each side is at least 1px.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_lossless
)]
pub fn contain_dimensions(src_w: u32, src_h: u32, box_w: u32, box_h: u32) -> (u32, u32) {
    if src_w == 0 || src_h == 0 {
        return (box_w.max(1), box_h.max(1));
    }

    let scale = (box_w as f64 / src_w as f64).min(box_h as f64 / src_h as f64);

    let width = (src_w as f64 * scale).round() as u32;
    let height = (src_h as f64 * scale).round() as u32;

    (width.clamp(1, box_w.max(1)), height.clamp(1, box_h.max(1)))
}
