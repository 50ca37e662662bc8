//! The flat RGBA pixel buffer shared by every pipeline stage.

use thiserror::Error;

/// Number of bytes per pixel (R, G, B, A).
pub const CHANNELS: usize = 4;

/// Errors raised when a byte slice does not describe a valid RGBA image.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BufferError {
    /// The byte count cannot be split into whole RGBA pixels.
    #[error("Invalid pixel data: length {len} is not a multiple of 4")]
    LengthNotMultipleOfFour { len: usize },

    /// Width was zero for a non-empty buffer.
    #[error("Invalid width: width must be non-zero")]
    ZeroWidth,

    /// The pixel count is not a whole number of rows.
    #[error("Invalid width: {pixels} pixels cannot be split into rows of {width}")]
    WidthMismatch { width: u32, pixels: usize },

    /// The byte count disagrees with the declared dimensions.
    #[error(
        "Invalid pixel data: expected {expected} bytes ({width}x{height}x4), got {actual}"
    )]
    DimensionMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}

/// Check that `len` bytes form whole rows of `width` RGBA pixels and return
/// the derived height.
pub(crate) fn derive_height(len: usize, width: u32) -> Result<u32, BufferError> {
    if len % CHANNELS != 0 {
        return Err(BufferError::LengthNotMultipleOfFour { len });
    }
    if width == 0 {
        return Err(BufferError::ZeroWidth);
    }
    let pixels = len / CHANNELS;
    if pixels % width as usize != 0 {
        return Err(BufferError::WidthMismatch { width, pixels });
    }
    Ok((pixels / width as usize) as u32)
}

/// Check that `len` bytes match an explicit `width` x `height` RGBA layout.
///
/// Zero-area shapes are accepted as long as the slice is empty.
pub(crate) fn check_dimensions(len: usize, width: u32, height: u32) -> Result<(), BufferError> {
    if len % CHANNELS != 0 {
        return Err(BufferError::LengthNotMultipleOfFour { len });
    }
    let expected = width as usize * height as usize * CHANNELS;
    if len != expected {
        return Err(BufferError::DimensionMismatch {
            width,
            height,
            expected,
            actual: len,
        });
    }
    Ok(())
}

/// Row-major interleaved RGBA8 samples with a declared width.
///
/// The height is derived from the byte count. A `PixelBuffer` always
/// satisfies its layout invariants: the length is a multiple of 4, the
/// width is non-zero and evenly divides the pixel count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    pixels: Vec<u8>,
}

impl PixelBuffer {
    /// Wrap raw RGBA bytes, validating the layout.
    pub fn new(pixels: Vec<u8>, width: u32) -> Result<Self, BufferError> {
        derive_height(pixels.len(), width)?;
        Ok(Self { width, pixels })
    }

    /// Wrap raw RGBA bytes with an explicit height.
    pub fn from_dimensions(pixels: Vec<u8>, width: u32, height: u32) -> Result<Self, BufferError> {
        check_dimensions(pixels.len(), width, height)?;
        if width == 0 {
            return Err(BufferError::ZeroWidth);
        }
        Ok(Self { width, pixels })
    }

    /// Allocate an all-zero buffer of the given size.
    ///
    /// A zero `height` yields an empty buffer; `width` must still be non-zero.
    pub fn zeroed(width: u32, height: u32) -> Result<Self, BufferError> {
        if width == 0 {
            return Err(BufferError::ZeroWidth);
        }
        let len = width as usize * height as usize * CHANNELS;
        Ok(Self {
            width,
            pixels: vec![0; len],
        })
    }

    /// Build from an `image::RgbaImage`, taking over its storage.
    pub fn from_rgba_image(img: image::RgbaImage) -> Result<Self, BufferError> {
        let (width, height) = img.dimensions();
        Self::from_dimensions(img.into_raw(), width, height)
    }

    /// All-zero buffer with the same dimensions as `self`.
    pub(crate) fn zeroed_like(&self) -> Self {
        Self::from_raw_unchecked(vec![0; self.byte_size()], self.width)
    }

    /// Construct without validation; callers guarantee the invariants.
    pub(crate) fn from_raw_unchecked(pixels: Vec<u8>, width: u32) -> Self {
        debug_assert!(width > 0 && derive_height(pixels.len(), width).is_ok());
        Self { width, pixels }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels, `len / 4 / width`.
    pub fn height(&self) -> u32 {
        (self.pixels.len() / CHANNELS / self.width as usize) as u32
    }

    /// `(width, height)`.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height())
    }

    /// Get the total number of pixels.
    pub fn pixel_count(&self) -> usize {
        self.pixels.len() / CHANNELS
    }

    /// Get the size of the pixel buffer in bytes.
    pub fn byte_size(&self) -> usize {
        self.pixels.len()
    }

    /// Check if the buffer holds no pixels.
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Raw RGBA bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    pub(crate) fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    /// Consume the buffer and return its bytes.
    pub fn into_raw(self) -> Vec<u8> {
        self.pixels
    }

    /// Offset of the first byte of pixel `(x, y)`.
    ///
    /// Coordinates are not bounds-checked.
    #[inline]
    pub fn byte_offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * CHANNELS
    }

    /// RGBA samples at `(x, y)`, or `None` outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height() {
            return None;
        }
        let i = self.byte_offset(x, y);
        Some([
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ])
    }
}
