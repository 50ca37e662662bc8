//! Core types for image decoding.

use thiserror::Error;

use crate::buffer::BufferError;

/// Error types for image decoding operations.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The contents do not match any enabled image format.
    #[error("Invalid or unsupported image format")]
    InvalidFormat,

    /// The image file is corrupted or incomplete.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(String),

    /// The image decoded to zero width or height.
    #[error("Image has no pixels ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },

    /// The decoded pixels could not be laid out as an RGBA buffer.
    #[error(transparent)]
    Buffer(#[from] BufferError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_error_display() {
        let err = DecodeError::InvalidFormat;
        assert_eq!(err.to_string(), "Invalid or unsupported image format");

        let err = DecodeError::EmptyImage {
            width: 0,
            height: 4,
        };
        assert_eq!(err.to_string(), "Image has no pixels (0x4)");

        let err = DecodeError::from(BufferError::ZeroWidth);
        assert_eq!(err.to_string(), "Invalid width: width must be non-zero");
    }
}
