//! # stripfit
//!
//! Cover-fit image resizing with parallel strip resampling, plus a few
//! document and host utilities that ship in the same binary.
//!
//! # Architecture: Strip Pipeline
//!
//! A resize runs as a fixed sequence of stages. Only the resample stage is
//! parallel; everything before it is validation and planning, everything
//! after it is a single join:
//!
//! ```text
//! 1. Validate  "300" x "300"  →  BoundingBox      (before any byte is decoded)
//! 2. Decode    bytes          →  RGBA raster + format (jpeg | png only)
//! 3. Fit       source, box    →  cover dimensions (smallest size covering the box)
//! 4. Plan      source height  →  N row ranges + N output heights (sum = output height)
//! 5. Resample  N strips       →  N resized strips (rayon, unordered)
//! 6. Assemble  strips         →  one raster (placed by index, not arrival)
//! 7. Encode    raster         →  bytes in the input's format
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`imaging`] | The resize pipeline: codec, fit math, strip planning, parallel resample, compositing |
//! | [`config`] | `stripfit.toml` loading, validation, merging over stock defaults |
//! | [`archive`] | Single-entry extraction from zip containers (docx, xlsx, epub, zip) |
//! | [`document`] | Plain text from PDF (lopdf) and DOCX (quick-xml) |
//! | [`netdiag`] | Host and user name, MAC address, local/public IP, reverse DNS, download throughput |
//! | [`output`] | CLI output formatting: pure `format_*` functions and `print_*` wrappers |
//!
//! # Design Decisions
//!
//! ## Strip Heights Are Planned, Not Rounded Independently
//!
//! Scaling each strip's height on its own and rounding can leave the stacked
//! strips a row short of (or past) the output height. The planner instead
//! maps every strip boundary to an output row and takes the difference, so
//! the heights sum to the output height for any strip count and the bottom
//! source rows always reach the bottom output rows. The strip count is also
//! capped at the output height. The compositor still clips or pads if a
//! backend ever returns a strip of the wrong size, and logs a warning when
//! it does.
//!
//! ## Same Format Out As In
//!
//! The output format is decided by the input, not the output file name. Any
//! decodable input that is not JPEG or PNG is rejected right after decoding,
//! before any resampling work starts.
//!
//! ## One Pool, Sized Once
//!
//! The binary sizes rayon's global pool from `processing.max_threads` at
//! startup. The strip count follows the same setting, so one strip maps to
//! one worker. The library never builds pools of its own.

pub mod archive;
pub mod config;
pub mod document;
pub mod imaging;
pub mod netdiag;
pub mod output;

#[cfg(test)]
pub(crate) mod test_helpers;
