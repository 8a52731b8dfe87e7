//! Decode and re-encode image byte streams.
//!
//! The format is sniffed from the stream's magic bytes, never from a file
//! name. Decoding works for every format the `image` crate was built with,
//! but only JPEG and PNG can be written back: [`FormatTag`] is the closed set
//! of formats the resizer round-trips, and resolving any other format into a
//! tag fails with [`ResizeError::UnsupportedFormat`].

use super::backend::ResizeError;
use super::params::Quality;
use image::buffer::ConvertBuffer;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, ImageFormat, ImageReader, RgbImage, RgbaImage};
use serde::Serialize;
use std::fmt;
use std::io::Cursor;

/// Output formats the resizer can write. Always the input's own format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatTag {
    Jpeg,
    Png,
}

impl FormatTag {
    pub fn as_str(self) -> &'static str {
        match self {
            FormatTag::Jpeg => "jpeg",
            FormatTag::Png => "png",
        }
    }
}

impl fmt::Display for FormatTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<ImageFormat> for FormatTag {
    type Error = ResizeError;

    fn try_from(format: ImageFormat) -> Result<Self, Self::Error> {
        match format {
            ImageFormat::Jpeg => Ok(FormatTag::Jpeg),
            ImageFormat::Png => Ok(FormatTag::Png),
            other => Err(ResizeError::UnsupportedFormat(format_name(other))),
        }
    }
}

/// A decoded raster together with the format it was stored in.
#[derive(Debug, Clone)]
pub struct Decoded {
    pub raster: RgbaImage,
    pub format: ImageFormat,
}

/// Lowercase format name, e.g. `"jpeg"`, `"webp"`.
fn format_name(format: ImageFormat) -> String {
    format!("{format:?}").to_lowercase()
}

/// Decode an encoded image held in memory.
///
/// Unrecognisable or corrupt streams fail with [`ResizeError::Decode`]. A
/// stream in a recognised format whose decoder is not compiled in fails with
/// [`ResizeError::UnsupportedFormat`].
pub fn decode(bytes: &[u8]) -> Result<Decoded, ResizeError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| ResizeError::Decode(e.to_string()))?;

    let format = reader
        .format()
        .ok_or_else(|| ResizeError::Decode("unknown image format".to_string()))?;
    if !format.reading_enabled() {
        return Err(ResizeError::UnsupportedFormat(format_name(format)));
    }

    let image = reader
        .decode()
        .map_err(|e| ResizeError::Decode(e.to_string()))?;
    if image.width() == 0 || image.height() == 0 {
        return Err(ResizeError::Decode("image has no pixels".to_string()));
    }

    Ok(Decoded {
        raster: image.to_rgba8(),
        format,
    })
}

/// Encode a raster in the given format.
///
/// JPEG has no alpha channel, so it is dropped before encoding; fully
/// transparent pixels come out black. PNG keeps RGBA and is lossless.
pub fn encode(
    raster: &RgbaImage,
    format: FormatTag,
    quality: Quality,
) -> Result<Vec<u8>, ResizeError> {
    let (width, height) = raster.dimensions();
    let mut buffer = Vec::new();

    let result = match format {
        FormatTag::Jpeg => {
            let rgb: RgbImage = raster.convert();
            JpegEncoder::new_with_quality(&mut buffer, quality.value()).write_image(
                rgb.as_raw(),
                width,
                height,
                ExtendedColorType::Rgb8,
            )
        }
        FormatTag::Png => PngEncoder::new(&mut buffer).write_image(
            raster.as_raw(),
            width,
            height,
            ExtendedColorType::Rgba8,
        ),
    };

    result.map_err(|e| ResizeError::Encode(e.to_string()))?;
    Ok(buffer)
}
