//! Shared test utilities for the stripfit test suite.
//!
//! Raster builders for the imaging pipeline and in-memory archive builders
//! for the archive and document extractors.
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::test_helpers::*;
//!
//! let source = tagged_strips(8, &[2, 2, 4]);
//! let png = encode_test_image(&gradient_rgba(16, 8), ImageFormat::Png);
//! let docx = write_zip(tmp.path(), "a.docx", &[("word/document.xml", xml.as_bytes())]);
//! ```

use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use zip::write::SimpleFileOptions;

// =========================================================================
// Rasters
// =========================================================================

/// Opaque gradient: red follows x, green follows y.
pub fn gradient_rgba(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        let r = (x * 255 / width.max(1)) as u8;
        let g = (y * 255 / height.max(1)) as u8;
        Rgba([r, g, 128, 255])
    })
}

/// Stack of solid bands; band `i` has red channel `i` and the given height.
///
/// Used with `MockResampler`, which reads the red value of a strip's first
/// pixel as its tag.
pub fn tagged_strips(width: u32, heights: &[u32]) -> RgbaImage {
    let total: u32 = heights.iter().sum();
    let mut image = RgbaImage::new(width, total);
    let mut y = 0;
    for (i, &h) in heights.iter().enumerate() {
        for row in y..y + h {
            for x in 0..width {
                image.put_pixel(x, row, Rgba([i as u8, 0, 0, 255]));
            }
        }
        y += h;
    }
    image
}

/// Encode a raster into an in-memory file of the given format.
///
/// JPEG has no alpha, so the raster is flattened to RGB first.
pub fn encode_test_image(image: &RgbaImage, format: ImageFormat) -> Vec<u8> {
    let dynamic = match format {
        ImageFormat::Jpeg => {
            DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(image.clone()).to_rgb8())
        }
        _ => DynamicImage::ImageRgba8(image.clone()),
    };
    let mut cursor = Cursor::new(Vec::new());
    dynamic.write_to(&mut cursor, format).unwrap();
    cursor.into_inner()
}

// =========================================================================
// Archives
// =========================================================================

/// Build a zip archive in memory from `(name, bytes)` pairs.
pub fn zip_bytes(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();
    for (name, bytes) in entries {
        writer.start_file(*name, options).unwrap();
        writer.write_all(bytes).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

/// Write a zip archive built by [`zip_bytes`] to `dir/name`.
pub fn write_zip(dir: &Path, name: &str, entries: &[(&str, &[u8])]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, zip_bytes(entries)).unwrap();
    path
}

/// Wrap paragraph markup in a minimal WordprocessingML document.
pub fn docx_document_xml(body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}</w:body></w:document>"#
    )
}
