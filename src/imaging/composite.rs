//! Reassemble resampled strips into one raster.

use super::resample::ResizedStrip;
use image::RgbaImage;
use image::imageops;
use log::warn;

/// Paste strips top to bottom onto a transparent `width` x `height` canvas.
///
/// Strips are placed by `index`, not by their position in `strips`, each at
/// the running total of the heights pasted before it. Rows past the canvas
/// are clipped; rows the strips do not reach keep the transparent fill.
pub fn assemble(mut strips: Vec<ResizedStrip>, width: u32, height: u32) -> RgbaImage {
    strips.sort_by_key(|strip| strip.index);

    let mut canvas = RgbaImage::new(width, height);
    let mut offset: u64 = 0;
    for strip in &strips {
        imageops::replace(&mut canvas, &strip.image, 0, offset as i64);
        offset += u64::from(strip.image.height());
    }

    if offset != u64::from(height) {
        warn!(
            "strips cover {} rows of a {}-row canvas, {}",
            offset,
            height,
            if offset > u64::from(height) {
                "clipping overflow"
            } else {
                "leaving the rest transparent"
            }
        );
    }

    canvas
}
