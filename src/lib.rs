//! # Photo Gallery
//!
//! A `gallery` shortcode for static site generators. Point it at a directory
//! and it emits a justified image grid with a lightbox:
//!
//! ```text
//! [gallery path="assets/images/trip" rowHeight="180" limit="24"]
//! ```
//!
//! # Architecture: Resolve, Scan, Render
//!
//! ```text
//! 1. Resolve   "trip"          →  "assets/images/trip"   (direct path, then legacy prefix)
//! 2. Scan      gallery dir     →  Vec<ImageRecord>       (filter, title, encode, sort)
//! 3. Render    records+options →  HTML fragment          (container, Load More, init script)
//! ```
//!
//! Each step is independently testable: the resolver takes an injected
//! [`resolve::DirProbe`], the shortcode takes an injected
//! [`scan::ImageSource`], and the renderer is a pure function whose container
//! ids come from a [`render::IdGenerator`].
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Recursive directory walk producing sorted [`scan::ImageRecord`]s |
//! | [`naming`] | Filename → display title, RFC 3986 segment encoding |
//! | [`resolve`] | Gallery path resolution with the `assets/images/` fallback |
//! | [`render`] | Gallery markup, pagination, notices, container ids |
//! | [`assets`] | Stylesheet/script declarations and an in-memory asset manager |
//! | [`shortcode`] | The `gallery` shortcode, host context, shortcode manager |
//! | [`plugin`] | Registration and the post-build vendor asset copy |
//! | [`config`] | `gallery.toml` loading, merging and validation |
//! | [`output`] | CLI output formatting |
//! | [`logging`] | `tracing` subscriber setup for the CLI |
//!
//! # Design Decisions
//!
//! ## Best-Effort Rendering
//!
//! A broken gallery must never break a site build. Missing attributes and
//! unconfigured hosts render as alert boxes in the page; missing directories
//! and I/O failures during the scan are logged and render as "no images".
//!
//! ## Original Files Only
//!
//! Images are linked as they are, URL-encoded. There is no resizing or
//! thumbnailing; `thumb` is the same URL as `src`.
//!
//! ## Local Vendor Assets
//!
//! jQuery, justifiedGallery and magnific-popup are served from the site
//! itself. The plugin declares them under `assets.url_prefix` and copies the
//! bundled files into the output directory once the build loop is done.

pub mod assets;
pub mod config;
pub mod logging;
pub mod naming;
pub mod output;
pub mod plugin;
pub mod render;
pub mod resolve;
pub mod scan;
pub mod shortcode;

#[cfg(test)]
pub(crate) mod test_helpers;
