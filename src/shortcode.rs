//! The `gallery` shortcode.
//!
//! A host expands `[gallery path="trip" limit="12"]` by calling
//! [`Shortcode::handle`] with the attributes it parsed. The gallery shortcode
//! never fails: every problem comes back as a visible notice in the page.
//!
//! ```text
//! attributes ──► path set? ──► source dir set? ──► resolve ──► scan ──► any images?
//!                   │                │                                     │
//!                 danger           danger                               warning
//!                                                                          │
//!                                          declare assets ◄────────────────┘
//!                                                │
//!                                             render
//! ```

use crate::assets::{AssetRegistry, declare_gallery_assets};
use crate::config::PluginConfig;
use crate::render::{
    GalleryOptions, IdGenerator, NoticeLevel, UniqueIds, notice, render,
};
use crate::resolve::{DirProbe, FsProbe, resolve_gallery_path};
use crate::scan::{ImageSource, Scanner};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Shortcode attributes, keyed by name exactly as written (`rowHeight`).
pub type Attributes = BTreeMap<String, String>;

/// Everything a shortcode may need from the host for one expansion.
#[derive(Default)]
pub struct HostContext<'a> {
    /// Root that gallery paths are relative to (`SOURCE_DIR`).
    pub source_dir: Option<PathBuf>,
    /// Build output root (`OUTPUT_DIR`).
    pub output_dir: Option<PathBuf>,
    /// The page's asset registry, when the host provides one.
    pub assets: Option<&'a mut dyn AssetRegistry>,
}

impl<'a> HostContext<'a> {
    pub fn new(source_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: Some(source_dir.into()),
            ..Self::default()
        }
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(output_dir.into());
        self
    }

    pub fn with_assets(mut self, assets: &'a mut dyn AssetRegistry) -> Self {
        self.assets = Some(assets);
        self
    }
}

/// An inline tag the host expands into HTML.
pub trait Shortcode {
    fn name(&self) -> &str;
    fn handle(&self, attrs: &Attributes, content: &str, host: &mut HostContext<'_>) -> String;
}

/// Renders a justified image grid for a directory.
pub struct GalleryShortcode {
    config: PluginConfig,
    source: Box<dyn ImageSource>,
    probe: Box<dyn DirProbe>,
    ids: Box<dyn IdGenerator>,
}

impl GalleryShortcode {
    pub const NAME: &'static str = "gallery";

    pub fn new(config: PluginConfig) -> Self {
        Self {
            config,
            source: Box::new(Scanner),
            probe: Box::new(FsProbe),
            ids: Box::new(UniqueIds),
        }
    }

    pub fn with_source(mut self, source: impl ImageSource + 'static) -> Self {
        self.source = Box::new(source);
        self
    }

    pub fn with_probe(mut self, probe: impl DirProbe + 'static) -> Self {
        self.probe = Box::new(probe);
        self
    }

    pub fn with_ids(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    fn expand(&self, attrs: &Attributes, source_dir: &Path, host: &mut HostContext<'_>) -> String {
        let path = attrs.get("path").map(String::as_str).unwrap_or_default();
        let gallery_path = resolve_gallery_path(source_dir, path, self.probe.as_ref());
        let images = self.source.images(source_dir, &gallery_path);

        if images.is_empty() {
            return notice(
                NoticeLevel::Warning,
                &format!("No images found in gallery: {gallery_path}"),
            );
        }

        let options = GalleryOptions::from_attributes(attrs, &self.config.gallery);

        match host.assets.as_deref_mut() {
            Some(assets) => declare_gallery_assets(assets, &self.config.assets.url_prefix),
            None => warn!("Asset manager not available; gallery assets not registered"),
        }

        debug!(
            "Rendering gallery {} with {} images (limit {})",
            gallery_path,
            images.len(),
            options.limit
        );
        render(&images, &options, self.ids.as_ref())
    }
}

impl Shortcode for GalleryShortcode {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn handle(&self, attrs: &Attributes, _content: &str, host: &mut HostContext<'_>) -> String {
        let has_path = attrs.get("path").is_some_and(|p| !p.trim().is_empty());
        if !has_path {
            return notice(NoticeLevel::Danger, "Gallery path not specified");
        }

        let Some(source_dir) = host.source_dir.clone() else {
            return notice(NoticeLevel::Danger, "Source directory not configured");
        };

        self.expand(attrs, &source_dir, host)
    }
}

// ============================================================================
// Shortcode manager
// ============================================================================

/// Name → shortcode table.
#[derive(Default)]
pub struct ShortcodeManager {
    shortcodes: BTreeMap<String, Box<dyn Shortcode>>,
}

impl ShortcodeManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a shortcode under its own name, replacing any previous one.
    pub fn register(&mut self, shortcode: Box<dyn Shortcode>) {
        let name = shortcode.name().to_string();
        if self.shortcodes.insert(name.clone(), shortcode).is_some() {
            info!("Shortcode '{name}' replaced");
        }
    }

    pub fn get(&self, name: &str) -> Option<&dyn Shortcode> {
        self.shortcodes.get(name).map(|s| s.as_ref())
    }

    pub fn names(&self) -> Vec<&str> {
        self.shortcodes.keys().map(String::as_str).collect()
    }

    /// Expand `name`, or `None` when no such shortcode is registered.
    pub fn dispatch(
        &self,
        name: &str,
        attrs: &Attributes,
        content: &str,
        host: &mut HostContext<'_>,
    ) -> Option<String> {
        self.get(name).map(|s| s.handle(attrs, content, host))
    }
}

/// Parse a shortcode attribute string.
///
/// Accepts `key="value"`, `key='value'` and `key=value` separated by
/// whitespace. A bare `key` gets an empty value.
///
/// - `path="my trip" limit=12` → `{"limit": "12", "path": "my trip"}`
pub fn parse_attributes(input: &str) -> Attributes {
    let mut attrs = Attributes::new();
    let mut chars = input.chars().peekable();

    loop {
        while chars.next_if(|c| c.is_whitespace()).is_some() {}
        if chars.peek().is_none() {
            break;
        }

        let mut key = String::new();
        while let Some(c) = chars.next_if(|c| !c.is_whitespace() && *c != '=') {
            key.push(c);
        }

        let mut value = String::new();
        if chars.next_if_eq(&'=').is_some() {
            match chars.next_if(|c| *c == '"' || *c == '\'') {
                Some(quote) => {
                    for c in chars.by_ref() {
                        if c == quote {
                            break;
                        }
                        value.push(c);
                    }
                }
                None => {
                    while let Some(c) = chars.next_if(|c| !c.is_whitespace()) {
                        value.push(c);
                    }
                }
            }
        }

        if !key.is_empty() {
            attrs.insert(key, value);
        }
    }

    attrs
}
