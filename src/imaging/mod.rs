//! Image resizing in pure Rust, no system libraries.
//!
//! | Stage | Crate / function |
//! |---|---|
//! | **Decode** | `image::ImageReader` with sniffed format |
//! | **Fit** | [`calculate_cover_dimensions`] |
//! | **Partition** | [`partition_rows`] + [`plan_strips`] |
//! | **Resample** | `image::imageops::resize` (Lanczos3) on rayon workers |
//! | **Composite** | `image::imageops::replace` onto a transparent canvas |
//! | **Encode** | `JpegEncoder` / `PngEncoder`, same format as the input |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension and strip math (unit testable)
//! - **Parameters**: Validated request types (box, quality)
//! - **Backend**: [`Resampler`] trait + [`ImageopsBackend`]
//! - **Codec / Resample / Composite**: the pipeline stages
//! - **Operations**: High-level functions chaining the stages

pub mod backend;
mod calculations;
pub mod codec;
pub mod composite;
pub mod imageops_backend;
pub mod operations;
mod params;
pub mod resample;

pub use backend::{ResizeError, Resampler};
pub use calculations::{
    StripPlan, calculate_cover_dimensions, effective_strip_count, partition_rows, plan_strips,
    strip_output_height,
};
pub use codec::FormatTag;
pub use imageops_backend::ImageopsBackend;
pub use operations::{
    ResizeOptions, ResizeOutcome, resize_image, resize_message, resize_to_box, resize_with_backend,
};
pub use params::{Axis, BoundingBox, Quality};
