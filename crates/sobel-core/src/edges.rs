//! Sobel gradient-magnitude edge detection over grayscale RGBA buffers.
//!
//! - Convolves the R channel with a fixed 3×3 kernel pair.
//! - Writes `mag = sqrt(gx^2 + gy^2)` into R, G and B with alpha [`EDGE_ALPHA`].
//! - Only interior pixels are written. The output starts zeroed, so the
//!   one-pixel border stays `(0, 0, 0, 0)`.
//!
//! Complexity: O(W·H), one output allocation.

use serde::{Deserialize, Serialize};

use crate::buffer::{check_dimensions, BufferError, PixelBuffer, CHANNELS};

/// A 3×3 integer convolution kernel, indexed `[row][column]`.
pub type Kernel3 = [[i32; 3]; 3];

/// Horizontal derivative; responds to vertical edges.
pub const HORIZONTAL_KERNEL: Kernel3 = [[-1, 0, 1], [-1, 0, 1], [-1, 0, 1]];

/// Vertical derivative; responds to horizontal edges.
pub const VERTICAL_KERNEL: Kernel3 = [[-1, -1, -1], [0, 0, 0], [1, 1, 1]];

/// Alpha written to every interior pixel of the edge map.
pub const EDGE_ALPHA: u8 = 100;

/// How a gradient magnitude above 255 is narrowed to a byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MagnitudePolicy {
    /// Truncate to an integer and keep the low 8 bits, so 256 becomes 0.
    #[default]
    Wrap,
    /// Clamp to 255.
    Saturate,
}

impl MagnitudePolicy {
    /// Narrow a non-negative magnitude to `u8`.
    #[inline]
    pub fn narrow(self, magnitude: f64) -> u8 {
        match self {
            // Largest magnitude is sqrt(2) * 3 * 255, well within u32.
            MagnitudePolicy::Wrap => (magnitude as u32) as u8,
            MagnitudePolicy::Saturate => magnitude.min(255.0) as u8,
        }
    }
}

/// Weighted sum of the 3×3 neighbourhood centred on `(x, y)`.
///
/// Reads the first channel of each pixel. Caller guarantees `(x, y)` is an
/// interior pixel of a `width`-wide image.
#[inline]
fn convolve_at(src: &[u8], width: usize, x: usize, y: usize, kernel: &Kernel3) -> i32 {
    let mut sum = 0;
    for (ky, row) in kernel.iter().enumerate() {
        let base = ((y + ky - 1) * width + x - 1) * CHANNELS;
        for (kx, &k) in row.iter().enumerate() {
            sum += k * src[base + kx * CHANNELS] as i32;
        }
    }
    sum
}

/// Gradient magnitude of the absolute kernel responses.
#[inline]
fn gradient_magnitude(gx: i32, gy: i32) -> f64 {
    let gx = gx.abs() as f64;
    let gy = gy.abs() as f64;
    (gx * gx + gy * gy).sqrt()
}

/// Write edge magnitudes for every interior pixel of `src` into `out`.
///
/// `out` must be zeroed and the same length as `src`; border pixels are
/// left untouched.
fn fill_edges(src: &[u8], out: &mut [u8], width: u32, height: u32, policy: MagnitudePolicy) {
    let (w, h) = (width as usize, height as usize);
    if w < 3 || h < 3 {
        return;
    }

    for y in 1..h - 1 {
        for x in 1..w - 1 {
            let gx = convolve_at(src, w, x, y, &HORIZONTAL_KERNEL);
            let gy = convolve_at(src, w, x, y, &VERTICAL_KERNEL);
            let mag = policy.narrow(gradient_magnitude(gx, gy));

            let i = (y * w + x) * CHANNELS;
            out[i] = mag;
            out[i + 1] = mag;
            out[i + 2] = mag;
            out[i + 3] = EDGE_ALPHA;
        }
    }
}

/// Detect edges in raw grayscale RGBA bytes, wrapping large magnitudes.
///
/// # Errors
///
/// Returns a [`BufferError`] if `pixels` is not exactly `width * height * 4`
/// bytes. Zero-area shapes are valid with an empty slice.
pub fn detect_edges(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>, BufferError> {
    detect_edges_with(pixels, width, height, MagnitudePolicy::Wrap)
}

/// [`detect_edges`] with an explicit [`MagnitudePolicy`].
pub fn detect_edges_with(
    pixels: &[u8],
    width: u32,
    height: u32,
    policy: MagnitudePolicy,
) -> Result<Vec<u8>, BufferError> {
    check_dimensions(pixels.len(), width, height)?;
    if width == 0 {
        return Ok(Vec::new());
    }
    let mut out = PixelBuffer::zeroed(width, height)?;
    fill_edges(pixels, out.as_bytes_mut(), width, height, policy);
    Ok(out.into_raw())
}

impl PixelBuffer {
    /// Edge map of this (grayscale) buffer with the same dimensions.
    pub fn detect_edges(&self, policy: MagnitudePolicy) -> PixelBuffer {
        let (width, height) = self.dimensions();
        let mut out = self.zeroed_like();
        fill_edges(self.as_bytes(), out.as_bytes_mut(), width, height, policy);
        out
    }
}
