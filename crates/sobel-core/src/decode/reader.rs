//! Content-sniffing decode through the `image` crate.

use std::io::Cursor;

use image::{ImageFormat, ImageReader};

use super::DecodeError;
use crate::buffer::PixelBuffer;

/// Guess the container format from the leading bytes.
///
/// Returns `None` if the signature is not recognized.
pub fn detect_format(bytes: &[u8]) -> Option<ImageFormat> {
    image::guess_format(bytes).ok()
}

/// Decode an image from bytes into a non-premultiplied RGBA8 buffer.
///
/// The format is determined from the contents, not from a file name.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the format cannot be recognized,
/// `DecodeError::CorruptedFile` if decoding fails, and
/// `DecodeError::EmptyImage` if the image has no pixels.
pub fn decode_image(bytes: &[u8]) -> Result<PixelBuffer, DecodeError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let format = reader.format().ok_or(DecodeError::InvalidFormat)?;
    log::debug!("decoding {} bytes as {:?}", bytes.len(), format);

    let img = reader.decode().map_err(|e| match e {
        image::ImageError::Unsupported(_) => DecodeError::InvalidFormat,
        other => DecodeError::CorruptedFile(other.to_string()),
    })?;

    let (width, height) = (img.width(), img.height());
    if width == 0 || height == 0 {
        return Err(DecodeError::EmptyImage { width, height });
    }

    Ok(PixelBuffer::from_rgba_image(img.into_rgba8())?)
}
