//! Image encoding for the edge pipeline.
//!
//! This module provides functionality for:
//! - Encoding a [`PixelBuffer`] to JPEG with configurable quality
//!
//! # Examples
//!
//! ```ignore
//! use sobel_core::encode::{encode_jpeg, DEFAULT_JPEG_QUALITY};
//! use sobel_core::PixelBuffer;
//!
//! let buffer = PixelBuffer::new(vec![128u8; 100 * 100 * 4], 100).unwrap();
//! let jpeg_bytes = encode_jpeg(&buffer, DEFAULT_JPEG_QUALITY).unwrap();
//! println!("Encoded {} bytes", jpeg_bytes.len());
//! ```
//!
//! [`PixelBuffer`]: crate::PixelBuffer

mod jpeg;

pub use jpeg::{encode_jpeg, EncodeError, DEFAULT_JPEG_QUALITY};
