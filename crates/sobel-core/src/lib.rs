//! Sobel Core - grayscale and edge-detection pipeline
//!
//! This crate turns a decoded image into a Sobel edge map:
//!
//! 1. [`to_grayscale`] replaces R, G and B with BT.601 luma and forces
//!    alpha to 255.
//! 2. [`detect_edges`] convolves the gray image with a horizontal and a
//!    vertical 3×3 kernel and writes the gradient magnitude.
//!
//! Both stages work on a flat row-major RGBA byte buffer ([`PixelBuffer`]).
//! The [`adapter`] module is the only place that touches `image` container
//! types; [`decode`] and [`encode`] sit on top of it.

pub mod adapter;
pub mod buffer;
pub mod decode;
pub mod edges;
pub mod encode;
pub mod grayscale;
pub mod pipeline;

pub use adapter::{unwrap, wrap, Bounds, BufferView, RasterSource};
pub use buffer::{BufferError, PixelBuffer};
pub use edges::{
    detect_edges, detect_edges_with, MagnitudePolicy, EDGE_ALPHA, HORIZONTAL_KERNEL,
    VERTICAL_KERNEL,
};
pub use grayscale::{luma_u8, to_grayscale};
pub use pipeline::{process_image, run, PipelineError, PipelineOptions};
