//! Gallery directory scanning.
//!
//! Walks a gallery directory and turns every image file into an
//! [`ImageRecord`] the renderer can drop straight into markup.
//!
//! ## Layout
//!
//! ```text
//! content/                         # Source root (host `SOURCE_DIR`)
//! └── assets/images/trip/          # gallery path = "assets/images/trip"
//!     ├── beach-day.jpg            # → /assets/images/trip/beach-day.jpg, "Beach Day"
//!     ├── hotel lobby.PNG          # → /assets/images/trip/hotel%20lobby.PNG
//!     ├── notes.txt                # ignored
//!     └── day-2/
//!         └── market_stall.webp    # → /assets/images/trip/day-2/market_stall.webp
//! ```
//!
//! ## Rules
//!
//! - Recognised extensions: `jpg`, `jpeg`, `png`, `gif`, `webp` (any case).
//! - Records are sorted by `src` using plain byte comparison, so
//!   `image10.jpg` sorts before `image2.jpg`.
//! - Symlinked directories are not descended into; symlinks to files count.
//! - URLs encode the raw bytes of each name, so non-UTF-8 names still link.
//! - Gallery paths containing `..` are refused.
//!
//! Scanning is best-effort: a missing directory or an I/O failure mid-walk is
//! logged and yields an empty list.

use crate::naming::{encode_segment, format_title};
use serde::{Deserialize, Serialize};
use std::path::{Component, Path};
use thiserror::Error;
use tracing::{debug, error, warn};
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

/// One displayable image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRecord {
    /// Public, URL-encoded path, e.g. `/gallery/photo%20one.jpg`
    pub src: String,
    /// Same as `src`; no separate thumbnails are generated
    pub thumb: String,
    pub alt: String,
    pub title: String,
}

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

/// Anything that can list the images of a gallery.
///
/// [`Scanner`] reads the file system; tests substitute their own source.
pub trait ImageSource {
    fn images(&self, base_dir: &Path, gallery_path: &str) -> Vec<ImageRecord>;
}

/// File system backed [`ImageSource`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Scanner;

impl ImageSource for Scanner {
    fn images(&self, base_dir: &Path, gallery_path: &str) -> Vec<ImageRecord> {
        scan(base_dir, gallery_path)
    }
}

/// Scan `base_dir/gallery_path` for images.
pub fn scan(base_dir: &Path, gallery_path: &str) -> Vec<ImageRecord> {
    let clean_path = gallery_path.trim_matches('/');
    if Path::new(clean_path)
        .components()
        .any(|c| c == Component::ParentDir)
    {
        warn!("Gallery path may not contain '..': {gallery_path}");
        return Vec::new();
    }
    let full_path = base_dir.join(clean_path);

    if !full_path.is_dir() {
        warn!("Gallery path not found: {}", full_path.display());
        return Vec::new();
    }

    match collect_images(&full_path, clean_path) {
        Ok(images) => {
            debug!("Found {} images in {}", images.len(), full_path.display());
            images
        }
        Err(e) => {
            error!("Error scanning gallery directory: {e}");
            Vec::new()
        }
    }
}

fn collect_images(dir: &Path, clean_path: &str) -> Result<Vec<ImageRecord>, ScanError> {
    let mut images = Vec::new();

    for entry in WalkDir::new(dir).follow_links(false).min_depth(1) {
        let entry = entry?;
        let path = entry.path();
        // `file_type()` reports symlinks as-is; `is_file()` follows them.
        if entry.file_type().is_dir() || !path.is_file() || !is_image(path) {
            continue;
        }
        let Ok(relative) = path.strip_prefix(dir) else {
            continue;
        };
        images.push(build_record(clean_path, relative));
    }

    images.sort_by(|a, b| a.src.cmp(&b.src));
    Ok(images)
}

/// The extension is the text after the last `.` of the file name, so unlike
/// [`Path::extension`] a dotfile such as `.jpg` counts as `jpg`.
fn is_image(path: &Path) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy())
        .and_then(|name| {
            name.rsplit_once('.')
                .map(|(_, ext)| ext.to_ascii_lowercase())
        })
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

/// Build the record for a file at `relative` below the gallery directory.
fn build_record(clean_path: &str, relative: &Path) -> ImageRecord {
    let encoded: Vec<String> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(encode_segment(part.as_encoded_bytes())),
            _ => None,
        })
        .collect();

    let src = if clean_path.is_empty() {
        format!("/{}", encoded.join("/"))
    } else {
        format!("/{}/{}", clean_path, encoded.join("/"))
    };

    let stem = relative
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let title = format_title(&stem);

    ImageRecord {
        thumb: src.clone(),
        src,
        alt: title.clone(),
        title,
    }
}
