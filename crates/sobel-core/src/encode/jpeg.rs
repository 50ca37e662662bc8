//! JPEG encoding of RGBA pixel buffers.
//!
//! JPEG carries no alpha channel, so the buffer is narrowed to RGB through
//! the adapter view before it reaches the `image` crate's encoder.

use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;
use std::io::Cursor;
use thiserror::Error;

use crate::adapter::wrap;
use crate::buffer::PixelBuffer;

/// Quality used when the caller does not pick one (the libjpeg default).
pub const DEFAULT_JPEG_QUALITY: u8 = 75;

/// Errors that can occur during JPEG encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// JPEG encoding failed
    #[error("JPEG encoding failed: {0}")]
    EncodingFailed(String),
}

/// Encode an RGBA pixel buffer to JPEG bytes.
///
/// # Arguments
///
/// * `buffer` - RGBA pixels; alpha is discarded
/// * `quality` - JPEG quality, clamped to 1-100
///
/// # Returns
///
/// JPEG-encoded bytes on success, or an error if encoding fails.
pub fn encode_jpeg(buffer: &PixelBuffer, quality: u8) -> Result<Vec<u8>, EncodeError> {
    let (width, height) = buffer.dimensions();
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let quality = quality.clamp(1, 100);
    let rgb = wrap(buffer).to_rgb_image();

    let mut out = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut out, quality)
        .write_image(rgb.as_raw(), width, height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    log::debug!(
        "encoded {}x{} JPEG at quality {} ({} bytes)",
        width,
        height,
        quality,
        out.get_ref().len()
    );
    Ok(out.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray(width: u32, height: u32, v: u8) -> PixelBuffer {
        let pixels = vec![v; (width * height * 4) as usize];
        PixelBuffer::new(pixels, width).unwrap()
    }

    #[test]
    fn test_encode_jpeg_basic() {
        let jpeg_bytes = encode_jpeg(&gray(100, 100, 128), 90).unwrap();

        // Check JPEG magic bytes (SOI marker)
        assert_eq!(&jpeg_bytes[0..2], &[0xFF, 0xD8]);

        // Check JPEG ends with EOI marker
        let len = jpeg_bytes.len();
        assert_eq!(&jpeg_bytes[len - 2..], &[0xFF, 0xD9]);
    }

    #[test]
    fn test_encode_jpeg_quality_clamping() {
        let buf = gray(10, 10, 128);

        // Quality 0 should be clamped to 1
        assert!(encode_jpeg(&buf, 0).is_ok());

        // Quality 255 should be clamped to 100
        assert!(encode_jpeg(&buf, 255).is_ok());
    }

    #[test]
    fn test_encode_jpeg_empty_buffer() {
        let buf = PixelBuffer::new(Vec::new(), 4).unwrap();
        let result = encode_jpeg(&buf, DEFAULT_JPEG_QUALITY);
        assert!(matches!(
            result,
            Err(EncodeError::InvalidDimensions {
                width: 4,
                height: 0
            })
        ));
    }

    #[test]
    fn test_encode_jpeg_ignores_alpha() {
        let mut opaque = vec![0u8; 8 * 8 * 4];
        let mut clear = vec![0u8; 8 * 8 * 4];
        for (i, (a, b)) in opaque
            .chunks_exact_mut(4)
            .zip(clear.chunks_exact_mut(4))
            .enumerate()
        {
            let v = (i * 4) as u8;
            a.copy_from_slice(&[v, v, v, 255]);
            b.copy_from_slice(&[v, v, v, 0]);
        }
        let opaque = PixelBuffer::new(opaque, 8).unwrap();
        let clear = PixelBuffer::new(clear, 8).unwrap();

        assert_eq!(
            encode_jpeg(&opaque, 80).unwrap(),
            encode_jpeg(&clear, 80).unwrap()
        );
    }

    #[test]
    fn test_encode_jpeg_decodes_back() {
        let jpeg = encode_jpeg(&gray(16, 8, 200), 95).unwrap();
        let decoded = image::load_from_memory(&jpeg).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (16, 8));
    }

    #[test]
    fn test_encode_error_display() {
        let err = EncodeError::InvalidDimensions {
            width: 0,
            height: 3,
        };
        assert_eq!(
            err.to_string(),
            "Invalid dimensions: width (0) and height (3) must be non-zero"
        );
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Strategy for generating image dimensions (keep small for speed).
    fn dimensions_strategy() -> impl Strategy<Value = (u32, u32)> {
        (1u32..=40, 1u32..=40)
    }

    proptest! {
        /// Property: Encoding always produces valid JPEG when given valid input.
        #[test]
        fn prop_valid_input_produces_valid_jpeg(
            (width, height) in dimensions_strategy(),
            quality in 1u8..=100,
        ) {
            let buf = PixelBuffer::new(vec![100u8; (width * height * 4) as usize], width).unwrap();
            let jpeg_bytes = encode_jpeg(&buf, quality).unwrap();

            prop_assert_eq!(&jpeg_bytes[0..2], &[0xFF, 0xD8], "Should have SOI marker");
            let len = jpeg_bytes.len();
            prop_assert_eq!(&jpeg_bytes[len - 2..], &[0xFF, 0xD9], "Should have EOI marker");
        }

        /// Property: Same input always produces same output (deterministic).
        #[test]
        fn prop_deterministic_output(
            (width, height) in (1u32..=20, 1u32..=20),
            seed in any::<u8>(),
        ) {
            let pixels: Vec<u8> = (0..width * height * 4)
                .map(|i| (i as u8).wrapping_mul(seed))
                .collect();
            let buf = PixelBuffer::new(pixels, width).unwrap();

            let first = encode_jpeg(&buf, DEFAULT_JPEG_QUALITY).unwrap();
            let second = encode_jpeg(&buf, DEFAULT_JPEG_QUALITY).unwrap();
            prop_assert_eq!(first, second);
        }
    }
}
