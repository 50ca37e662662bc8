//! Grayscale conversion using ITU-R BT.601 luma weights.
//!
//! Weights are held as per-mille integers so the weighted sum is exact and
//! truncation to `u8` never loses a unit to floating-point error. A gray
//! input therefore maps to itself, which keeps the stage idempotent.

use crate::buffer::{derive_height, BufferError, PixelBuffer, CHANNELS};

/// BT.601 weight for the red channel, in thousandths (0.299).
pub const LUMA_R: u32 = 299;

/// BT.601 weight for the green channel, in thousandths (0.587).
pub const LUMA_G: u32 = 587;

/// BT.601 weight for the blue channel, in thousandths (0.114).
pub const LUMA_B: u32 = 114;

const LUMA_SCALE: u32 = 1000;

/// Alpha written by the grayscale stage.
pub const GRAY_ALPHA: u8 = 255;

/// Luma of an RGB triple, `0.299R + 0.587G + 0.114B`, truncated.
#[inline]
pub fn luma_u8(r: u8, g: u8, b: u8) -> u8 {
    let sum = LUMA_R * r as u32 + LUMA_G * g as u32 + LUMA_B * b as u32;
    // max is 255 * 1000 / 1000
    (sum / LUMA_SCALE) as u8
}

fn gray_pixels(src: &[u8]) -> Vec<u8> {
    let mut out = vec![0u8; src.len()];
    for (dst, px) in out
        .chunks_exact_mut(CHANNELS)
        .zip(src.chunks_exact(CHANNELS))
    {
        let gray = luma_u8(px[0], px[1], px[2]);
        dst[0] = gray;
        dst[1] = gray;
        dst[2] = gray;
        dst[3] = GRAY_ALPHA;
    }
    out
}

/// Convert raw RGBA bytes of the given width to grayscale.
///
/// Returns a fresh buffer of the same length with R=G=B=luma and opaque
/// alpha.
///
/// # Errors
///
/// Returns a [`BufferError`] if `pixels` is not a whole number of rows of
/// `width` RGBA pixels.
pub fn to_grayscale(pixels: &[u8], width: u32) -> Result<Vec<u8>, BufferError> {
    derive_height(pixels.len(), width)?;
    Ok(gray_pixels(pixels))
}

impl PixelBuffer {
    /// Grayscale copy of this buffer with the same dimensions.
    pub fn to_grayscale(&self) -> PixelBuffer {
        PixelBuffer::from_raw_unchecked(gray_pixels(self.as_bytes()), self.width())
    }
}
