//! High-level resize operations.
//!
//! These functions chain the pipeline stages: parse the box, decode, fit,
//! partition, resample in parallel, composite, encode. Every stage returns
//! early on error, so a failed call never produces image bytes.

use super::backend::{ResizeError, Resampler};
use super::calculations::{
    calculate_cover_dimensions, effective_strip_count, partition_rows, plan_strips,
};
use super::codec::{self, FormatTag};
use super::composite::assemble;
use super::imageops_backend::ImageopsBackend;
use super::params::{BoundingBox, Quality};
use super::resample::resample_strips;
use crate::config::{self, Config};
use log::{debug, info};
use serde::Serialize;

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, ResizeError>;

/// 16384 x 16384.
pub const DEFAULT_MAX_OUTPUT_PIXELS: u64 = 268_435_456;

/// Knobs for a resize call.
#[derive(Debug, Clone)]
pub struct ResizeOptions {
    /// Requested strip count. Clamped to the source height at call time.
    pub strips: usize,
    /// JPEG quality; ignored for PNG.
    pub quality: Quality,
    /// Largest output (width x height) the call will allocate.
    pub max_output_pixels: u64,
}

impl ResizeOptions {
    /// Build options from loaded config values.
    pub fn from_config(config: &Config) -> Self {
        Self {
            strips: config::effective_threads(&config.processing),
            quality: Quality::new(u32::from(config.encoding.jpeg_quality)),
            max_output_pixels: config.limits.max_output_pixels,
        }
    }

    pub fn with_strips(mut self, strips: usize) -> Self {
        self.strips = strips;
        self
    }
}

impl Default for ResizeOptions {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// What a successful resize produced.
#[derive(Debug, Clone, Serialize)]
pub struct ResizeOutcome {
    /// Encoded output, same format as the input.
    #[serde(skip)]
    pub bytes: Vec<u8>,
    pub format: FormatTag,
    pub source: (u32, u32),
    pub target: BoundingBox,
    pub output: (u32, u32),
    /// Output height of each strip, top to bottom.
    pub strip_heights: Vec<u32>,
}

/// Resize an encoded image so it covers a `width` x `height` box.
///
/// The dimensions are validated before the bytes are looked at.
pub fn resize_image(
    bytes: &[u8],
    width: &str,
    height: &str,
    options: &ResizeOptions,
) -> Result<ResizeOutcome> {
    let target = BoundingBox::parse(width, height)?;
    resize_to_box(bytes, target, options)
}

/// Resize with an already-validated box using the Lanczos3 backend.
pub fn resize_to_box(
    bytes: &[u8],
    target: BoundingBox,
    options: &ResizeOptions,
) -> Result<ResizeOutcome> {
    resize_with_backend(&ImageopsBackend::new(), bytes, target, options)
}

/// Resize using a specific backend (allows testing with mock).
pub fn resize_with_backend(
    backend: &impl Resampler,
    bytes: &[u8],
    target: BoundingBox,
    options: &ResizeOptions,
) -> Result<ResizeOutcome> {
    let decoded = codec::decode(bytes)?;
    let format = FormatTag::try_from(decoded.format)?;
    let source = decoded.raster.dimensions();
    let (src_w, src_h) = source;

    let (out_w, out_h) = calculate_cover_dimensions(source, target.as_tuple());
    let pixels = u64::from(out_w) * u64::from(out_h);
    if pixels > options.max_output_pixels {
        return Err(ResizeError::OutputTooLarge {
            width: out_w,
            height: out_h,
            limit: options.max_output_pixels,
        });
    }

    let strips = effective_strip_count(src_h, out_h, options.strips);
    let plans = plan_strips(&partition_rows(src_h, strips), src_h, out_h);
    debug!(
        "{format} {src_w}x{src_h} -> {out_w}x{out_h} in {strips} strips (box {}x{})",
        target.width, target.height
    );

    let resized = resample_strips(backend, &decoded.raster, &plans, out_w)?;
    let strip_heights = resized.iter().map(|s| s.image.height()).collect();
    let raster = assemble(resized, out_w, out_h);
    let bytes = codec::encode(&raster, format, options.quality)?;

    info!(
        "resized {format} {src_w}x{src_h} -> {out_w}x{out_h} ({} bytes)",
        bytes.len()
    );
    Ok(ResizeOutcome {
        bytes,
        format,
        source,
        target,
        output: (out_w, out_h),
        strip_heights,
    })
}

/// Resize and flatten the outcome into payload-or-message.
///
/// For callers that only deal in bytes and strings: the error side is the
/// human-readable description of whatever went wrong.
pub fn resize_message(
    bytes: &[u8],
    width: &str,
    height: &str,
    options: &ResizeOptions,
) -> std::result::Result<Vec<u8>, String> {
    resize_image(bytes, width, height, options)
        .map(|outcome| outcome.bytes)
        .map_err(|e| e.to_string())
}
