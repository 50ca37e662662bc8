//! Decode → grayscale → edges → JPEG.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::buffer::PixelBuffer;
use crate::decode::{decode_image, DecodeError};
use crate::edges::MagnitudePolicy;
use crate::encode::{encode_jpeg, EncodeError, DEFAULT_JPEG_QUALITY};

/// Settings for one pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineOptions {
    /// How gradient magnitudes above 255 are narrowed
    pub magnitude: MagnitudePolicy,
    /// JPEG quality (1 to 100)
    pub quality: u8,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            magnitude: MagnitudePolicy::Wrap,
            quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

/// Errors from [`process_image`].
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// Run both pixel stages, consuming the input buffer.
pub fn run(input: PixelBuffer, options: &PipelineOptions) -> PixelBuffer {
    let (width, height) = input.dimensions();
    log::debug!("grayscale: {}x{}", width, height);
    let gray = input.to_grayscale();
    drop(input);

    log::debug!("edges: {}x{} ({:?})", width, height, options.magnitude);
    gray.detect_edges(options.magnitude)
}

/// Decode `bytes`, detect edges and encode the result as JPEG.
pub fn process_image(bytes: &[u8], options: &PipelineOptions) -> Result<Vec<u8>, PipelineError> {
    let decoded = decode_image(bytes)?;
    let edges = run(decoded, options);
    Ok(encode_jpeg(&edges, options.quality)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edges::EDGE_ALPHA;

    #[test]
    fn test_options_default() {
        let opts = PipelineOptions::default();
        assert_eq!(opts.magnitude, MagnitudePolicy::Wrap);
        assert_eq!(opts.quality, 75);
    }

    #[test]
    fn test_run_uniform_gray() {
        let input = PixelBuffer::new([128, 128, 128, 255].repeat(25), 5).unwrap();
        let gray = input.to_grayscale();
        assert_eq!(gray, input);

        let edges = run(input, &PipelineOptions::default());
        assert_eq!(edges.dimensions(), (5, 5));
        for y in 0..5 {
            for x in 0..5 {
                let expected = if (1..4).contains(&x) && (1..4).contains(&y) {
                    [0, 0, 0, EDGE_ALPHA]
                } else {
                    [0, 0, 0, 0]
                };
                assert_eq!(edges.pixel(x, y), Some(expected), "pixel ({}, {})", x, y);
            }
        }
    }

    #[test]
    fn test_run_applies_policy() {
        // white column on black: |gx| = 3 * 255 at x=1
        let mut pixels = [0, 0, 0, 255].repeat(25);
        for y in 0..5 {
            let i = (y * 5 + 2) * 4;
            pixels[i..i + 4].copy_from_slice(&[255, 255, 255, 255]);
        }
        let input = PixelBuffer::new(pixels, 5).unwrap();

        let wrapped = run(input.clone(), &PipelineOptions::default());
        assert_eq!(wrapped.pixel(1, 2), Some([253, 253, 253, EDGE_ALPHA]));

        let opts = PipelineOptions {
            magnitude: MagnitudePolicy::Saturate,
            ..Default::default()
        };
        let saturated = run(input, &opts);
        assert_eq!(saturated.pixel(1, 2), Some([255, 255, 255, EDGE_ALPHA]));
    }

    #[test]
    fn test_process_image_rejects_garbage() {
        let result = process_image(b"nope", &PipelineOptions::default());
        assert!(matches!(
            result,
            Err(PipelineError::Decode(DecodeError::InvalidFormat))
        ));
    }
}
