//! Image decoding for the edge pipeline.
//!
//! This module provides functionality for:
//! - Sniffing the container format from the file contents
//! - Decoding JPEG and PNG images into a flat RGBA [`PixelBuffer`]
//!
//! # Examples
//!
//! ```ignore
//! use sobel_core::decode::decode_image;
//!
//! let bytes = std::fs::read("photo.png").unwrap();
//! let buffer = decode_image(&bytes).unwrap();
//! println!("Decoded {}x{} image", buffer.width(), buffer.height());
//! ```
//!
//! [`PixelBuffer`]: crate::PixelBuffer

mod reader;
mod types;

pub use reader::{decode_image, detect_format};
pub use types::DecodeError;
