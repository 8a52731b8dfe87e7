//! Pure Rust resampling backend built on `image::imageops`.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Resample | `image::imageops::resize` with `Lanczos3` (default) |

use super::backend::{ResizeError, Resampler};
use image::RgbaImage;
use image::imageops::{self, FilterType};

/// Resampler backed by `image::imageops::resize`.
///
/// Defaults to Lanczos3, a 3-lobe windowed sinc; other filters are available
/// through [`ImageopsBackend::with_filter`].
#[derive(Debug, Clone, Copy)]
pub struct ImageopsBackend {
    filter: FilterType,
}

impl ImageopsBackend {
    pub fn new() -> Self {
        Self::with_filter(FilterType::Lanczos3)
    }

    pub fn with_filter(filter: FilterType) -> Self {
        Self { filter }
    }

    pub fn filter(&self) -> FilterType {
        self.filter
    }
}

impl Default for ImageopsBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Resampler for ImageopsBackend {
    fn resample(
        &self,
        strip: &RgbaImage,
        width: u32,
        height: u32,
    ) -> Result<RgbaImage, ResizeError> {
        Ok(imageops::resize(strip, width, height, self.filter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::gradient_rgba;

    #[test]
    fn default_filter_is_lanczos3() {
        assert_eq!(ImageopsBackend::default().filter(), FilterType::Lanczos3);
    }

    #[test]
    fn resample_hits_exact_dimensions() {
        let backend = ImageopsBackend::new();
        let strip = gradient_rgba(40, 10);

        let down = backend.resample(&strip, 13, 3).unwrap();
        assert_eq!(down.dimensions(), (13, 3));

        let up = backend.resample(&strip, 97, 31).unwrap();
        assert_eq!(up.dimensions(), (97, 31));
    }

    #[test]
    fn resample_solid_color_stays_solid() {
        let backend = ImageopsBackend::new();
        let strip = RgbaImage::from_pixel(30, 30, image::Rgba([200, 100, 50, 255]));

        let out = backend.resample(&strip, 11, 7).unwrap();
        for pixel in out.pixels() {
            assert_eq!(pixel.0, [200, 100, 50, 255]);
        }
    }

    #[test]
    fn with_filter_is_used() {
        let backend = ImageopsBackend::with_filter(FilterType::Nearest);
        assert_eq!(backend.filter(), FilterType::Nearest);

        // 2x nearest-neighbour upscale duplicates pixels exactly
        let strip = gradient_rgba(4, 2);
        let out = backend.resample(&strip, 8, 4).unwrap();
        assert_eq!(out.get_pixel(0, 0), strip.get_pixel(0, 0));
        assert_eq!(out.get_pixel(7, 3), strip.get_pixel(3, 1));
    }
}
