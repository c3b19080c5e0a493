//! Plugin configuration.
//!
//! Handles loading and validating `gallery.toml`. Any key the site's file
//! leaves out keeps its stock default; shortcode attributes in turn
//! override the `[gallery]` defaults for a single invocation.
//!
//! ## Config File Location
//!
//! ```text
//! content/
//! ├── gallery.toml          # Site-wide gallery settings (optional)
//! └── assets/images/...
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [gallery]
//! row_height = 200          # Target row height in pixels
//! margins = 10              # Gap between images in pixels
//! last_row = "nojustify"    # nojustify | justify | left | center | right | hide
//! limit = 20                # Images rendered before "Load More" (0 = all)
//!
//! [assets]
//! vendor_dir = "vendor"                 # Bundled library files, relative to the config file
//! url_prefix = "/assets/vendor/gallery" # Public URL the libraries are served from
//! target_dir = "assets/vendor/gallery"  # Copy destination inside the output directory
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name looked up in the source directory.
pub const CONFIG_FILE: &str = "gallery.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Plugin configuration loaded from `gallery.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PluginConfig {
    /// Default display options for every gallery.
    pub gallery: GalleryDefaults,
    /// Vendor library location and publishing.
    pub assets: AssetsConfig,
}

/// `lastRow` values understood by the justified layout library.
pub const LAST_ROW_MODES: &[&str] = &["nojustify", "justify", "left", "center", "right", "hide"];

/// Display defaults applied when a shortcode omits an attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GalleryDefaults {
    pub row_height: i64,
    pub margins: i64,
    pub last_row: String,
    /// Initial page size; `0` renders every image at once.
    pub limit: i64,
}

impl Default for GalleryDefaults {
    fn default() -> Self {
        Self {
            row_height: 200,
            margins: 10,
            last_row: "nojustify".to_string(),
            limit: 20,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AssetsConfig {
    /// Directory holding the bundled jQuery, justifiedGallery and
    /// magnific-popup files. Relative paths are resolved against the
    /// directory containing the config file.
    pub vendor_dir: PathBuf,
    /// Public URL prefix used when declaring styles and scripts.
    pub url_prefix: String,
    /// Where the vendor tree is copied inside the output directory.
    pub target_dir: PathBuf,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            vendor_dir: PathBuf::from("vendor"),
            url_prefix: "/assets/vendor/gallery".to_string(),
            target_dir: PathBuf::from("assets/vendor/gallery"),
        }
    }
}

impl PluginConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.gallery.row_height <= 0 {
            return Err(ConfigError::Validation(
                "gallery.row_height must be positive".into(),
            ));
        }
        if self.gallery.margins < 0 {
            return Err(ConfigError::Validation(
                "gallery.margins must not be negative".into(),
            ));
        }
        if self.gallery.limit < 0 {
            return Err(ConfigError::Validation(
                "gallery.limit must not be negative".into(),
            ));
        }
        if !LAST_ROW_MODES.contains(&self.gallery.last_row.as_str()) {
            return Err(ConfigError::Validation(format!(
                "gallery.last_row must be one of {}",
                LAST_ROW_MODES.join(", ")
            )));
        }
        if !self.assets.url_prefix.starts_with('/') {
            return Err(ConfigError::Validation(
                "assets.url_prefix must start with '/'".into(),
            ));
        }
        if self.assets.target_dir.is_absolute() {
            return Err(ConfigError::Validation(
                "assets.target_dir must be relative to the output directory".into(),
            ));
        }
        Ok(())
    }

    /// Resolve a relative `vendor_dir` against `base`.
    pub fn vendor_dir_from(&self, base: &Path) -> PathBuf {
        if self.assets.vendor_dir.is_absolute() {
            self.assets.vendor_dir.clone()
        } else {
            base.join(&self.assets.vendor_dir)
        }
    }
}

// =============================================================================
// Config loading and validation
// =============================================================================

/// Parse `gallery.toml` content and validate it.
///
/// Every section and key is optional; anything omitted keeps its default.
pub fn parse_config(content: &str) -> Result<PluginConfig, ConfigError> {
    let config: PluginConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

/// Load `gallery.toml` from the given directory.
pub fn load_config(dir: &Path) -> Result<PluginConfig, ConfigError> {
    load_config_file(&dir.join(CONFIG_FILE))
}

/// Load a config file at an explicit path, falling back to stock defaults
/// when it does not exist.
pub fn load_config_file(path: &Path) -> Result<PluginConfig, ConfigError> {
    if !path.exists() {
        return Ok(PluginConfig::default());
    }
    parse_config(&fs::read_to_string(path)?)
}

/// Returns a fully-commented stock `gallery.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Photo Gallery Configuration
# ===========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys cause an error.

# ---------------------------------------------------------------------------
# Gallery display defaults
# ---------------------------------------------------------------------------
# Each value can be overridden per gallery with a shortcode attribute:
#   [gallery path="trip" rowHeight="150" margins="4" lastRow="justify" limit="40"]
[gallery]
# Target height of each justified row, in pixels.
row_height = 200

# Gap between images, in pixels.
margins = 10

# How the last, incomplete row is laid out.
# One of: nojustify, justify, left, center, right, hide.
last_row = "nojustify"

# Images rendered up front; the rest load in batches of this size behind a
# "Load More" button. 0 renders every image at once.
limit = 20

# ---------------------------------------------------------------------------
# Vendor assets (jQuery, justifiedGallery, magnific-popup)
# ---------------------------------------------------------------------------
[assets]
# Directory holding the bundled library files, relative to this file.
vendor_dir = "vendor"

# Public URL prefix the libraries are served from.
url_prefix = "/assets/vendor/gallery"

# Copy destination inside the output directory.
target_dir = "assets/vendor/gallery"
"##
}
