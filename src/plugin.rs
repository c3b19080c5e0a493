//! Host integration: registration and build lifecycle hooks.
//!
//! The plugin does two things for a host:
//!
//! 1. On [`GalleryPlugin::register`] it adds the `gallery` shortcode to the
//!    host's [`ShortcodeManager`].
//! 2. On [`LifecycleEvent::PostLoop`] (after every page has been rendered) it
//!    copies the bundled vendor libraries into the output directory so the
//!    URLs declared by the shortcode resolve.
//!
//! ```text
//! vendor/                              dist/assets/vendor/gallery/
//! ├── jquery/jquery.min.js       ──►   ├── jquery/jquery.min.js
//! ├── justifiedGallery/...             ├── justifiedGallery/...
//! └── magnific-popup/...               └── magnific-popup/...
//! ```
//!
//! Nothing here can fail a host build: missing collaborators and copy errors
//! are logged and skipped.

use crate::config::PluginConfig;
use crate::shortcode::{GalleryShortcode, HostContext, ShortcodeManager};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{error, info, warn};
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum CopyError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Path outside copy source: {0}")]
    StripPrefix(PathBuf),
}

/// Host build events the plugin listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleEvent {
    /// Fired once after the host has processed every content file.
    PostLoop,
}

impl LifecycleEvent {
    pub fn name(self) -> &'static str {
        match self {
            LifecycleEvent::PostLoop => "POST_LOOP",
        }
    }
}

/// A subscription: event plus priority (higher runs earlier).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventListener {
    pub event: LifecycleEvent,
    pub priority: i32,
}

/// Files and directories written by an asset copy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CopyReport {
    pub target: PathBuf,
    pub files: usize,
    pub directories: usize,
}

impl fmt::Display for CopyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} files, {} directories → {}",
            self.files,
            self.directories,
            self.target.display()
        )
    }
}

pub struct GalleryPlugin {
    config: PluginConfig,
    vendor_dir: PathBuf,
}

impl GalleryPlugin {
    pub const NAME: &'static str = "PhotoGallery";

    const LISTENERS: &'static [EventListener] = &[EventListener {
        event: LifecycleEvent::PostLoop,
        priority: 100,
    }];

    /// `vendor_dir` is the resolved location of the bundled libraries.
    pub fn new(config: PluginConfig, vendor_dir: impl Into<PathBuf>) -> Self {
        Self {
            config,
            vendor_dir: vendor_dir.into(),
        }
    }

    pub fn event_listeners(&self) -> &'static [EventListener] {
        Self::LISTENERS
    }

    /// Register the gallery shortcode. A host without shortcode support
    /// passes `None`; the plugin then only contributes its asset copy.
    pub fn register(&self, shortcodes: Option<&mut ShortcodeManager>) {
        match shortcodes {
            Some(manager) => {
                manager.register(Box::new(GalleryShortcode::new(self.config.clone())));
                info!("{}: gallery shortcode registered", Self::NAME);
            }
            None => {
                warn!("{}: no shortcode manager, gallery shortcode not registered", Self::NAME);
            }
        }
    }

    /// Handle a lifecycle event. Errors are logged, never returned.
    pub fn on_event(&self, event: LifecycleEvent, host: &HostContext<'_>) {
        match event {
            LifecycleEvent::PostLoop => {
                if let Err(e) = self.copy_assets(host.output_dir.as_deref()) {
                    error!("Failed to copy gallery assets: {e}");
                }
            }
        }
    }

    /// Copy the vendor tree into `output_dir`.
    ///
    /// Returns `Ok(None)` when there is nothing to do: no output directory
    /// configured, or no vendor directory bundled.
    pub fn copy_assets(&self, output_dir: Option<&Path>) -> Result<Option<CopyReport>, CopyError> {
        let Some(output_dir) = output_dir else {
            return Ok(None);
        };
        if !self.vendor_dir.is_dir() {
            warn!("Gallery vendor directory not found: {}", self.vendor_dir.display());
            return Ok(None);
        }

        let target = output_dir.join(&self.config.assets.target_dir);
        info!("Copying gallery assets to {}", target.display());
        copy_dir_recursive(&self.vendor_dir, &target).map(Some)
    }
}

/// Mirror `src` into `dst`, creating directories and overwriting files.
pub fn copy_dir_recursive(src: &Path, dst: &Path) -> Result<CopyReport, CopyError> {
    let mut report = CopyReport {
        target: dst.to_path_buf(),
        ..CopyReport::default()
    };
    fs::create_dir_all(dst)?;

    for entry in WalkDir::new(src).min_depth(1) {
        let entry = entry?;
        let relative = entry
            .path()
            .strip_prefix(src)
            .map_err(|_| CopyError::StripPrefix(entry.path().to_path_buf()))?;
        let target = dst.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
            report.directories += 1;
        } else {
            fs::copy(entry.path(), &target)?;
            report.files += 1;
        }
    }

    Ok(report)
}
