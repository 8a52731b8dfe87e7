//! Parameter types for the resize pipeline.
//!
//! These describe *what* the caller asked for. They are validated on
//! construction so the pipeline never sees a zero-sized target box or an
//! out-of-range encoder quality.
//!
//! ## Types
//!
//! - [`Quality`]: JPEG encoding quality (1–100, default 75). Clamped on construction.
//! - [`BoundingBox`]: The requested box the output must cover. Parsed from strings.
//! - [`Axis`]: Which side of the box a validation error refers to.

use super::backend::ResizeError;
use serde::Serialize;
use std::fmt;

/// Quality setting for lossy (JPEG) encoding, 1-100.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(u8);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(75)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Width,
    Height,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Width => f.write_str("width"),
            Axis::Height => f.write_str("height"),
        }
    }
}

/// Requested bounding box. Both sides are positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BoundingBox {
    pub width: u32,
    pub height: u32,
}

impl BoundingBox {
    /// Build a box from already-typed sides, rejecting zero.
    pub fn new(width: u32, height: u32) -> Result<Self, ResizeError> {
        Ok(Self {
            width: check_positive(Axis::Width, i64::from(width), &width.to_string())?,
            height: check_positive(Axis::Height, i64::from(height), &height.to_string())?,
        })
    }

    /// Parse a box from user-supplied strings.
    ///
    /// Fails with [`ResizeError::InvalidDimension`] when either side is not
    /// an integer, is zero or negative, or does not fit in `u32`.
    pub fn parse(width: &str, height: &str) -> Result<Self, ResizeError> {
        Ok(Self {
            width: parse_side(Axis::Width, width)?,
            height: parse_side(Axis::Height, height)?,
        })
    }

    pub fn as_tuple(self) -> (u32, u32) {
        (self.width, self.height)
    }
}

fn parse_side(axis: Axis, raw: &str) -> Result<u32, ResizeError> {
    let parsed: i64 = raw.parse().map_err(|e| ResizeError::InvalidDimension {
        axis,
        value: raw.to_string(),
        reason: format!("not an integer ({e})"),
    })?;
    check_positive(axis, parsed, raw)
}

fn check_positive(axis: Axis, value: i64, raw: &str) -> Result<u32, ResizeError> {
    let invalid = |reason: &str| ResizeError::InvalidDimension {
        axis,
        value: raw.to_string(),
        reason: reason.to_string(),
    };
    if value <= 0 {
        return Err(invalid("must be a positive integer"));
    }
    u32::try_from(value).map_err(|_| invalid("too large"))
}
