//! Bridge between [`PixelBuffer`] and the `image` crate's containers.
//!
//! [`wrap`] exposes a buffer as a read-only [`RasterSource`] view, and
//! [`unwrap`] drains any [`RasterSource`] back into a flat buffer. Neither
//! direction converts colors.

use image::{ColorType, Rgb, RgbImage, Rgba, RgbaImage};

use crate::buffer::{BufferError, PixelBuffer, CHANNELS};

/// Width and height of a raster, origin at `(0, 0)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bounds {
    pub width: u32,
    pub height: u32,
}

impl Bounds {
    /// Check whether `(x, y)` lies inside.
    #[inline]
    pub fn contains(self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height
    }

    /// Check if either side is zero.
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Read-only access to an RGBA raster.
pub trait RasterSource {
    /// Color model of the samples returned by [`RasterSource::pixel_at`].
    fn color_type(&self) -> ColorType;

    /// Raster extent.
    fn bounds(&self) -> Bounds;

    /// Pixel at `(x, y)`. Coordinates outside [`RasterSource::bounds`]
    /// yield transparent black.
    fn pixel_at(&self, x: u32, y: u32) -> Rgba<u8>;
}

/// Borrowed view of a [`PixelBuffer`] as a [`RasterSource`].
#[derive(Debug, Clone, Copy)]
pub struct BufferView<'a> {
    buffer: &'a PixelBuffer,
}

/// Expose `buffer` as an image-like view.
pub fn wrap(buffer: &PixelBuffer) -> BufferView<'_> {
    BufferView { buffer }
}

impl BufferView<'_> {
    /// Copy into an `image::RgbImage`, discarding alpha.
    pub fn to_rgb_image(&self) -> RgbImage {
        let (width, height) = self.buffer.dimensions();
        RgbImage::from_fn(width, height, |x, y| {
            let Rgba([r, g, b, _]) = self.pixel_at(x, y);
            Rgb([r, g, b])
        })
    }
}

impl RasterSource for BufferView<'_> {
    fn color_type(&self) -> ColorType {
        ColorType::Rgba8
    }

    fn bounds(&self) -> Bounds {
        let (width, height) = self.buffer.dimensions();
        Bounds { width, height }
    }

    fn pixel_at(&self, x: u32, y: u32) -> Rgba<u8> {
        Rgba(self.buffer.pixel(x, y).unwrap_or([0; 4]))
    }
}

impl RasterSource for RgbaImage {
    fn color_type(&self) -> ColorType {
        ColorType::Rgba8
    }

    fn bounds(&self) -> Bounds {
        let (width, height) = self.dimensions();
        Bounds { width, height }
    }

    fn pixel_at(&self, x: u32, y: u32) -> Rgba<u8> {
        if !RasterSource::bounds(self).contains(x, y) {
            return Rgba([0; 4]);
        }
        *self.get_pixel(x, y)
    }
}

/// Drain `source` row by row into a fresh [`PixelBuffer`].
///
/// # Errors
///
/// Returns [`BufferError::ZeroWidth`] if the source has zero width.
pub fn unwrap<S: RasterSource + ?Sized>(source: &S) -> Result<PixelBuffer, BufferError> {
    let bounds = source.bounds();
    let mut out = PixelBuffer::zeroed(bounds.width, bounds.height)?;
    if bounds.is_empty() {
        return Ok(out);
    }
    let width = bounds.width as usize;
    for (i, px) in out.as_bytes_mut().chunks_exact_mut(CHANNELS).enumerate() {
        let x = (i % width) as u32;
        let y = (i / width) as u32;
        px.copy_from_slice(&source.pixel_at(x, y).0);
    }
    Ok(out)
}
