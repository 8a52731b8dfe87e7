//! Configuration module.
//!
//! Handles loading, validating, and merging `stripfit.toml`. Stock defaults
//! are the base layer; a user file only needs the keys it wants to change.
//!
//! ## Config File Location
//!
//! The CLI reads, in order of preference:
//!
//! 1. the file passed with `--config PATH`
//! 2. `stripfit.toml` in the current directory, if present
//! 3. nothing (stock defaults)
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [processing]
//! max_threads = 4           # Strips / worker threads (omit for auto = CPU cores)
//!
//! [encoding]
//! jpeg_quality = 75         # JPEG quality (1-100); PNG is always lossless
//!
//! [limits]
//! max_output_pixels = 268435456   # Refuse outputs larger than this (w * h)
//!
//! [diagnostics]
//! speedtest_url = "https://ash-speed.hetzner.com/100MB.bin"
//! external_ip_url = "https://api.ipify.org?format=text"
//! timeout_secs = 60
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::imaging::operations::DEFAULT_MAX_OUTPUT_PIXELS;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// File name looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "stripfit.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Configuration loaded from `stripfit.toml`.
///
/// All fields have sensible defaults. Unknown keys are rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Parallelism settings.
    pub processing: ProcessingConfig,
    /// Encoder settings.
    pub encoding: EncodingConfig,
    /// Safety limits on output size.
    pub limits: LimitsConfig,
    /// Endpoints and timeout for the `net` diagnostics.
    pub diagnostics: DiagnosticsConfig,
}

impl Config {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.processing.max_threads == Some(0) {
            return Err(ConfigError::Validation(
                "processing.max_threads must be at least 1".into(),
            ));
        }
        if !(1..=100).contains(&self.encoding.jpeg_quality) {
            return Err(ConfigError::Validation(
                "encoding.jpeg_quality must be 1-100".into(),
            ));
        }
        if self.limits.max_output_pixels == 0 {
            return Err(ConfigError::Validation(
                "limits.max_output_pixels must be non-zero".into(),
            ));
        }
        if self.diagnostics.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "diagnostics.timeout_secs must be non-zero".into(),
            ));
        }
        if self.diagnostics.speedtest_url.trim().is_empty()
            || self.diagnostics.external_ip_url.trim().is_empty()
        {
            return Err(ConfigError::Validation(
                "diagnostics URLs must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Number of strips an image is split into, which is also the size of
    /// the worker pool. When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_threads: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config.max_threads.map(|n| n.min(cores)).unwrap_or(cores)
}

/// Encoder settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EncodingConfig {
    /// JPEG quality (1 = worst, 100 = best).
    pub jpeg_quality: u8,
}

impl Default for EncodingConfig {
    fn default() -> Self {
        Self { jpeg_quality: 75 }
    }
}

/// Output size limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LimitsConfig {
    /// Largest `width * height` a resize may produce.
    pub max_output_pixels: u64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_output_pixels: DEFAULT_MAX_OUTPUT_PIXELS,
        }
    }
}

/// Network diagnostics settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiagnosticsConfig {
    /// Large file downloaded by `net speedtest`.
    pub speedtest_url: String,
    /// Endpoint returning the caller's public IP as plain text.
    pub external_ip_url: String,
    /// Whole-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            speedtest_url: "https://ash-speed.hetzner.com/100MB.bin".to_string(),
            external_ip_url: "https://api.ipify.org?format=text".to_string(),
            timeout_secs: 60,
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(Config::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Merge an optional overlay onto the stock defaults, then deserialize and validate.
pub fn resolve_config(overlay: Option<toml::Value>) -> Result<Config, ConfigError> {
    let base = stock_defaults_value();
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: Config = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from an explicit file. The file must exist.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    resolve_config(Some(value))
}

/// Load `stripfit.toml` from `dir` if it exists, stock defaults otherwise.
pub fn load_config_or_default(dir: &Path) -> Result<Config, ConfigError> {
    let path = dir.join(DEFAULT_CONFIG_FILE);
    if !path.exists() {
        return resolve_config(None);
    }
    load_config(&path)
}

/// Returns a fully-commented stock `stripfit.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# stripfit configuration
# ======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Number of horizontal strips each image is split into, resampled in
# parallel. Also sizes the worker pool.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_threads = 4

# ---------------------------------------------------------------------------
# Encoding
# ---------------------------------------------------------------------------
[encoding]
# JPEG quality (1 = worst, 100 = best). PNG output is always lossless.
jpeg_quality = 75

# ---------------------------------------------------------------------------
# Limits
# ---------------------------------------------------------------------------
[limits]
# Refuse to produce an image with more pixels than this (width * height).
# Cover fits can grow one axis a lot for extreme aspect ratios.
max_output_pixels = 268435456

# ---------------------------------------------------------------------------
# Network diagnostics (`stripfit net ...`)
# ---------------------------------------------------------------------------
[diagnostics]
# Large file downloaded to measure throughput.
speedtest_url = "https://ash-speed.hetzner.com/100MB.bin"

# Endpoint answering with the caller's public IP as plain text.
external_ip_url = "https://api.ipify.org?format=text"

# Whole-request timeout in seconds.
timeout_secs = 60
"##
}
