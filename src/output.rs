//! CLI output formatting for every subcommand.
//!
//! # Output Format
//!
//! ## Resize
//!
//! ```text
//! photo.jpg → thumb.jpg
//!     Format: jpeg
//!     Source: 1000x500
//!     Target: 300x300
//!     Output: 600x300 (41210 bytes)
//!     Strips: 4 (75, 75, 75, 75)
//! ```
//!
//! ## Fit
//!
//! ```text
//! 1000x500 into 300x300 → 600x300
//! ```
//!
//! ## Extract
//!
//! ```text
//! report.docx:word/media/image1.png → image1.png (18233 bytes)
//! ```
//!
//! When the entry is missing, the archive contents are listed instead:
//!
//! ```text
//! Entries in report.docx
//!     [Content_Types].xml
//!     word/document.xml
//! ```
//!
//! ## Speed test
//!
//! ```text
//! Downloaded 104857600 bytes in 8.39s
//!     Throughput: 99.98 Mbps
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O, no side effects.

use crate::imaging::ResizeOutcome;
use crate::netdiag::Throughput;
use std::path::Path;

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn dims((width, height): (u32, u32)) -> String {
    format!("{}x{}", width, height)
}

fn print_lines(lines: Vec<String>) {
    for line in lines {
        println!("{}", line);
    }
}

// ============================================================================
// Resize
// ============================================================================

pub fn format_resize_report(input: &Path, output: &Path, outcome: &ResizeOutcome) -> Vec<String> {
    let heights: Vec<String> = outcome
        .strip_heights
        .iter()
        .map(|h| h.to_string())
        .collect();
    vec![
        format!("{} → {}", input.display(), output.display()),
        format!("{}Format: {}", indent(1), outcome.format),
        format!("{}Source: {}", indent(1), dims(outcome.source)),
        format!("{}Target: {}", indent(1), dims(outcome.target.as_tuple())),
        format!(
            "{}Output: {} ({} bytes)",
            indent(1),
            dims(outcome.output),
            outcome.bytes.len()
        ),
        format!(
            "{}Strips: {} ({})",
            indent(1),
            outcome.strip_heights.len(),
            heights.join(", ")
        ),
    ]
}

pub fn print_resize_report(input: &Path, output: &Path, outcome: &ResizeOutcome) {
    print_lines(format_resize_report(input, output, outcome));
}

// ============================================================================
// Fit
// ============================================================================

pub fn format_fit(source: (u32, u32), target: (u32, u32), cover: (u32, u32)) -> String {
    format!("{} into {} → {}", dims(source), dims(target), dims(cover))
}

// ============================================================================
// Extract
// ============================================================================

/// Report for an entry written to a file. Entries piped to stdout get no
/// report so the bytes stay clean.
pub fn format_extracted(archive: &Path, entry: &str, destination: &Path, size: usize) -> String {
    format!(
        "{}:{} → {} ({} bytes)",
        archive.display(),
        entry,
        destination.display(),
        size
    )
}

pub fn format_entry_list(archive: &Path, entries: &[String]) -> Vec<String> {
    let mut lines = vec![format!("Entries in {}", archive.display())];
    if entries.is_empty() {
        lines.push(format!("{}(empty archive)", indent(1)));
    }
    lines.extend(entries.iter().map(|e| format!("{}{}", indent(1), e)));
    lines
}

pub fn print_entry_list(archive: &Path, entries: &[String]) {
    print_lines(format_entry_list(archive, entries));
}

// ============================================================================
// Network diagnostics
// ============================================================================

pub fn format_throughput(result: &Throughput) -> Vec<String> {
    vec![
        format!(
            "Downloaded {} bytes in {:.2}s",
            result.bytes,
            result.elapsed.as_secs_f64()
        ),
        format!("{}Throughput: {:.2} Mbps", indent(1), result.mbps),
    ]
}

pub fn print_throughput(result: &Throughput) {
    print_lines(format_throughput(result));
}
