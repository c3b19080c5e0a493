//! Stylesheet and script declarations.
//!
//! The gallery markup depends on three browser libraries: jQuery,
//! justifiedGallery (row layout) and magnific-popup (lightbox). A render only
//! *declares* them through an [`AssetRegistry`]; emitting the tags once per
//! page, in dependency order, is the registry's job.
//!
//! [`AssetManager`] is a small in-memory registry for driving the plugin
//! outside a host (CLI, tests).

use maud::{Markup, html};
use std::collections::HashSet;

/// Host service collecting the assets a page needs.
pub trait AssetRegistry {
    fn add_style(&mut self, handle: &str, url: &str);
    /// Declare a script. `deps` are handles that must load first;
    /// `in_footer` moves the tag to the end of the body.
    fn add_script(&mut self, handle: &str, url: &str, deps: &[&str], in_footer: bool);
}

pub const JQUERY: &str = "jquery";
pub const JUSTIFIED_GALLERY: &str = "justifiedGallery";
pub const MAGNIFIC_POPUP: &str = "magnificPopup";

/// Declare everything a gallery needs, served from `url_prefix`.
///
/// Scripts go in the header: the inline initialization script runs as soon
/// as the fragment is parsed.
pub fn declare_gallery_assets(registry: &mut dyn AssetRegistry, url_prefix: &str) {
    let prefix = url_prefix.trim_end_matches('/');

    registry.add_style(
        JUSTIFIED_GALLERY,
        &format!("{prefix}/justifiedGallery/css/justifiedGallery.min.css"),
    );
    registry.add_style(
        MAGNIFIC_POPUP,
        &format!("{prefix}/magnific-popup/magnific-popup.css"),
    );

    registry.add_script(JQUERY, &format!("{prefix}/jquery/jquery.min.js"), &[], false);
    registry.add_script(
        JUSTIFIED_GALLERY,
        &format!("{prefix}/justifiedGallery/js/jquery.justifiedGallery.min.js"),
        &[JQUERY],
        false,
    );
    registry.add_script(
        MAGNIFIC_POPUP,
        &format!("{prefix}/magnific-popup/jquery.magnific-popup.min.js"),
        &[JQUERY],
        false,
    );
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Style {
    pub handle: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script {
    pub handle: String,
    pub url: String,
    pub deps: Vec<String>,
    pub in_footer: bool,
}

/// In-memory [`AssetRegistry`].
///
/// A handle is recorded once; later declarations with the same handle are
/// ignored, so any number of galleries on a page produce one set of tags.
#[derive(Debug, Default)]
pub struct AssetManager {
    styles: Vec<Style>,
    scripts: Vec<Script>,
}

impl AssetManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn styles(&self) -> &[Style] {
        &self.styles
    }

    pub fn scripts(&self) -> &[Script] {
        &self.scripts
    }

    /// Scripts for one placement, each after the scripts it depends on.
    ///
    /// Dependencies that were never declared are skipped; a cycle is broken
    /// at the first script revisited.
    pub fn ordered_scripts(&self, in_footer: bool) -> Vec<&Script> {
        let mut visited = HashSet::new();
        let mut ordered = Vec::new();
        for script in &self.scripts {
            self.visit(script, &mut visited, &mut ordered);
        }
        ordered.retain(|s| s.in_footer == in_footer);
        ordered
    }

    fn visit<'a>(
        &'a self,
        script: &'a Script,
        visited: &mut HashSet<&'a str>,
        ordered: &mut Vec<&'a Script>,
    ) {
        if !visited.insert(script.handle.as_str()) {
            return;
        }
        for dep in &script.deps {
            if let Some(dep_script) = self.scripts.iter().find(|s| &s.handle == dep) {
                self.visit(dep_script, visited, ordered);
            }
        }
        ordered.push(script);
    }

    /// `<link>` and header `<script>` tags.
    pub fn render_head(&self) -> Markup {
        html! {
            @for style in &self.styles {
                link rel="stylesheet" href=(style.url);
            }
            @for script in self.ordered_scripts(false) {
                script src=(script.url) {}
            }
        }
    }

    /// Footer `<script>` tags.
    pub fn render_footer(&self) -> Markup {
        html! {
            @for script in self.ordered_scripts(true) {
                script src=(script.url) {}
            }
        }
    }
}

impl AssetRegistry for AssetManager {
    fn add_style(&mut self, handle: &str, url: &str) {
        if self.styles.iter().any(|s| s.handle == handle) {
            return;
        }
        self.styles.push(Style {
            handle: handle.to_string(),
            url: url.to_string(),
        });
    }

    fn add_script(&mut self, handle: &str, url: &str, deps: &[&str], in_footer: bool) {
        if self.scripts.iter().any(|s| s.handle == handle) {
            return;
        }
        self.scripts.push(Script {
            handle: handle.to_string(),
            url: url.to_string(),
            deps: deps.iter().map(|d| d.to_string()).collect(),
            in_footer,
        });
    }
}
