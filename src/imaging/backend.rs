//! Resampling backend trait and the resize error type.
//!
//! The [`Resampler`] trait is the one operation the strip pipeline delegates:
//! scale a single strip to an exact size. The production implementation is
//! [`ImageopsBackend`](super::imageops_backend::ImageopsBackend), which wraps
//! `image::imageops::resize`. Tests swap in a mock to observe how strips are
//! dispatched and reassembled.

use super::params::Axis;
use image::RgbaImage;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResizeError {
    #[error("Invalid {axis} '{value}': {reason}")]
    InvalidDimension {
        axis: Axis,
        value: String,
        reason: String,
    },
    #[error("Failed to decode image: {0}")]
    Decode(String),
    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),
    #[error("Failed to encode resized image: {0}")]
    Encode(String),
    #[error("Output {width}x{height} exceeds the limit of {limit} pixels")]
    OutputTooLarge { width: u32, height: u32, limit: u64 },
    #[error("Strip {index} failed: {reason}")]
    Strip { index: usize, reason: String },
}

/// Trait for strip resampling backends.
///
/// Implementations are called from rayon workers, hence `Sync`. A returned
/// error aborts the whole resize.
pub trait Resampler: Sync {
    /// Scale `strip` to exactly `width` x `height`.
    fn resample(&self, strip: &RgbaImage, width: u32, height: u32)
    -> Result<RgbaImage, ResizeError>;
}
