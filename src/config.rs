//! Resolver configuration module.
//!
//! Handles loading, validating, and merging `sources.toml`. Every constant the
//! resolver relies on (known origins, the CDN rewrite prefix, the layout
//! breakpoint) lives here instead of being baked into the code, so tests and
//! alternative CDN profiles can supply their own.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [cdn]
//! origins = [
//!     "https://assets.zyrosite.space",
//!     "https://assets.zyrosite.com",
//!     "https://assets2.zyrosite.com",
//! ]
//! prefix = "cdn-cgi/image"  # URL-rewrite prefix: <origin>/<prefix>/<options>/<path>
//!
//! [stock]
//! origin = "https://images.unsplash.com"
//!
//! [layout]
//! breakpoint = 920          # Viewport width (px) of the `(min-width: …)` sources
//! dpi_levels = [1, 2, 3]    # Device pixel ratios offered by density srcsets
//! max_width = 1920          # Largest width a density candidate may request
//! max_height = 1080         # Largest height a density candidate may request
//! default_sizes = "calc(100vw - var(--m-block-padding) - var(--m-block-padding))"
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse — override just the values you want:
//!
//! ```toml
//! [layout]
//! breakpoint = 1024
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Resolver configuration loaded from `sources.toml`.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SourcesConfig {
    /// Image CDN origins and rewrite prefix.
    pub cdn: CdnConfig,
    /// Stock-photo origin.
    pub stock: StockConfig,
    /// Breakpoint, pixel-ratio, and `sizes` settings.
    pub layout: LayoutConfig,
}

impl SourcesConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for origin in &self.cdn.origins {
            validate_origin("cdn.origins", origin)?;
        }
        validate_origin("stock.origin", &self.stock.origin)?;

        let prefix = &self.cdn.prefix;
        if prefix.is_empty() {
            return Err(ConfigError::Validation("cdn.prefix must not be empty".into()));
        }
        if prefix.starts_with('/') || prefix.ends_with('/') {
            return Err(ConfigError::Validation(format!(
                "cdn.prefix must not start or end with '/', got {prefix:?}"
            )));
        }

        let layout = &self.layout;
        if layout.breakpoint == 0 {
            return Err(ConfigError::Validation(
                "layout.breakpoint must be non-zero".into(),
            ));
        }
        if layout.dpi_levels.is_empty() {
            return Err(ConfigError::Validation(
                "layout.dpi_levels must not be empty".into(),
            ));
        }
        if layout.dpi_levels.contains(&0) {
            return Err(ConfigError::Validation(
                "layout.dpi_levels values must be non-zero".into(),
            ));
        }
        if layout.max_width == 0 || layout.max_height == 0 {
            return Err(ConfigError::Validation(
                "layout.max_width and layout.max_height must be non-zero".into(),
            ));
        }
        if layout.default_sizes.trim().is_empty() {
            return Err(ConfigError::Validation(
                "layout.default_sizes must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// An origin is a bare `http(s)://host[:port]` with no path, query or trailing slash.
fn validate_origin(key: &str, origin: &str) -> Result<(), ConfigError> {
    let parsed = url::Url::parse(origin)
        .map_err(|e| ConfigError::Validation(format!("{key}: invalid origin {origin:?}: {e}")))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::Validation(format!(
            "{key}: origin must use http or https, got {origin:?}"
        )));
    }
    if parsed.host_str().is_none()
        || parsed.path() != "/"
        || parsed.query().is_some()
        || parsed.fragment().is_some()
        || origin.ends_with('/')
    {
        return Err(ConfigError::Validation(format!(
            "{key}: origin must be scheme and host only, got {origin:?}"
        )));
    }
    Ok(())
}

/// Image CDN settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CdnConfig {
    /// Origins served through the CDN, in match priority order.
    pub origins: Vec<String>,
    /// Rewrite prefix inserted after the origin.
    pub prefix: String,
}

impl Default for CdnConfig {
    fn default() -> Self {
        Self {
            origins: vec![
                "https://assets.zyrosite.space".to_string(),
                "https://assets.zyrosite.com".to_string(),
                "https://assets2.zyrosite.com".to_string(),
            ],
            prefix: "cdn-cgi/image".to_string(),
        }
    }
}

/// Stock-photo provider settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StockConfig {
    pub origin: String,
}

impl Default for StockConfig {
    fn default() -> Self {
        Self {
            origin: "https://images.unsplash.com".to_string(),
        }
    }
}

/// Responsive layout settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    /// Viewport width (px) above which the breakpoint sources apply.
    pub breakpoint: u32,
    /// Device pixel ratios offered by density srcsets.
    pub dpi_levels: Vec<u32>,
    /// Largest width (px) a density candidate may request.
    pub max_width: u32,
    /// Largest height (px) a density candidate may request.
    pub max_height: u32,
    /// CSS `sizes` value for the catch-all sources.
    pub default_sizes: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            breakpoint: 920,
            dpi_levels: vec![1, 2, 3],
            max_width: 1920,
            max_height: 1080,
            default_sizes: "calc(100vw - var(--m-block-padding) - var(--m-block-padding))"
                .to_string(),
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
    toml::Value::try_from(SourcesConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely, so an
///   overridden `cdn.origins` list replaces the stock list.
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

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SourcesConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SourcesConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from the given file.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result. A missing file yields the stock defaults.
pub fn load_config(path: &Path) -> Result<SourcesConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(path)?;
    let config = resolve_config(base, overlay)?;
    tracing::debug!(path = %path.display(), origins = config.cdn.origins.len(), "loaded config");
    Ok(config)
}

/// Returns a fully-commented stock `sources.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Picture Sources Configuration
# =============================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Each file only needs the keys it wants to override.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Image CDN
# ---------------------------------------------------------------------------
[cdn]
# Origins whose images are served through the CDN's image-resizing endpoint.
# The first origin contained in a source URL wins, so list more specific
# origins first if any overlap.
origins = [
    "https://assets.zyrosite.space",
    "https://assets.zyrosite.com",
    "https://assets2.zyrosite.com",
]

# URL-rewrite prefix: <origin>/<prefix>/<options>/<path>
prefix = "cdn-cgi/image"

# ---------------------------------------------------------------------------
# Stock photos
# ---------------------------------------------------------------------------
[stock]
# Recognized but not transformed; such URLs are returned unchanged.
origin = "https://images.unsplash.com"

# ---------------------------------------------------------------------------
# Layout
# ---------------------------------------------------------------------------
[layout]
# Viewport width (px) for the `(min-width: ...)` sources.
breakpoint = 920

# Device pixel ratios offered by density srcsets.
dpi_levels = [1, 2, 3]

# Density candidates larger than this are skipped (the 1x candidate is kept).
max_width = 1920
max_height = 1080

# CSS `sizes` value for the catch-all sources.
default_sizes = "calc(100vw - var(--m-block-padding) - var(--m-block-padding))"
"##
}
