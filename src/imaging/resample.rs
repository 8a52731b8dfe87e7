//! Parallel strip resampling.
//!
//! Each [`StripPlan`] is cropped out of the shared source raster and handed
//! to the [`Resampler`] on a rayon worker. Workers only read their own rows of
//! the source and own their output buffer, so nothing is locked. Results are
//! collected by plan position, so the returned vector is in top-to-bottom
//! order whatever order the workers finish in.

use super::backend::{ResizeError, Resampler};
use super::calculations::StripPlan;
use image::RgbaImage;
use image::imageops;
use log::debug;
use rayon::prelude::*;

/// A resampled strip tagged with its position in the source.
#[derive(Debug, Clone)]
pub struct ResizedStrip {
    pub index: usize,
    pub image: RgbaImage,
}

/// Resample every strip concurrently and wait for all of them.
///
/// The first failing strip aborts the call; no partial result is returned.
pub fn resample_strips<R: Resampler + ?Sized>(
    backend: &R,
    source: &RgbaImage,
    plans: &[StripPlan],
    out_width: u32,
) -> Result<Vec<ResizedStrip>, ResizeError> {
    plans
        .par_iter()
        .map(|plan| resample_strip(backend, source, plan, out_width))
        .collect()
}

fn resample_strip<R: Resampler + ?Sized>(
    backend: &R,
    source: &RgbaImage,
    plan: &StripPlan,
    out_width: u32,
) -> Result<ResizedStrip, ResizeError> {
    let (src_width, src_height) = source.dimensions();
    if plan.rows.start > plan.rows.end || plan.rows.end > src_height {
        return Err(ResizeError::Strip {
            index: plan.index,
            reason: format!(
                "rows {}..{} outside source height {}",
                plan.rows.start, plan.rows.end, src_height
            ),
        });
    }

    let rows = plan.rows.end - plan.rows.start;
    let image = if rows == 0 || plan.out_height == 0 || out_width == 0 {
        RgbaImage::new(out_width, plan.out_height)
    } else {
        let strip = imageops::crop_imm(source, 0, plan.rows.start, src_width, rows).to_image();
        backend.resample(&strip, out_width, plan.out_height)?
    };

    if image.dimensions() != (out_width, plan.out_height) {
        return Err(ResizeError::Strip {
            index: plan.index,
            reason: format!(
                "backend returned {}x{}, expected {}x{}",
                image.width(),
                image.height(),
                out_width,
                plan.out_height
            ),
        });
    }

    debug!(
        "strip {}: rows {}..{} -> {}x{}",
        plan.index, plan.rows.start, plan.rows.end, out_width, plan.out_height
    );
    Ok(ResizedStrip {
        index: plan.index,
        image,
    })
}
