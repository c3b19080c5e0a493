//! Shared test utilities for the photo-gallery test suite.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = gallery_fixture("trip", &["a.jpg", "day 2/b.png"]);
//! let images = scan(tmp.path(), "trip");
//! assert_eq!(srcs(&images), vec!["/trip/a.jpg", "/trip/day%202/b.png"]);
//! ```

use std::fs;
use tempfile::TempDir;

use crate::naming::format_title;
use crate::scan::ImageRecord;

// =========================================================================
// Fixture setup
// =========================================================================

/// Create `dir` inside a fresh temp directory and fill it with placeholder
/// files. Entries may contain `/` to create nested subdirectories.
pub fn gallery_fixture(dir: &str, files: &[&str]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    let gallery = tmp.path().join(dir);
    fs::create_dir_all(&gallery).unwrap();
    for file in files {
        let path = gallery.join(file);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, "fake image").unwrap();
    }
    tmp
}

/// In-memory records `/g/{stem}.jpg`, titled from the stem.
pub fn records(stems: &[&str]) -> Vec<ImageRecord> {
    stems
        .iter()
        .map(|stem| {
            let src = format!("/g/{stem}.jpg");
            let title = format_title(stem);
            ImageRecord {
                thumb: src.clone(),
                src,
                alt: title.clone(),
                title,
            }
        })
        .collect()
}

// =========================================================================
// Bulk extractors
// =========================================================================

pub fn srcs(images: &[ImageRecord]) -> Vec<&str> {
    images.iter().map(|i| i.src.as_str()).collect()
}

pub fn titles(images: &[ImageRecord]) -> Vec<&str> {
    images.iter().map(|i| i.title.as_str()).collect()
}

// =========================================================================
// Markup inspection
// =========================================================================

/// Number of image anchors rendered in the gallery container.
pub fn anchor_count(html: &str) -> usize {
    html.matches("<a href=").count()
}

/// Parse the deferred "Load More" payload for a container whose id has
/// been turned into the JS suffix `suffix` (`gallery-1` → `gallery_1`).
/// Panics with the markup if the payload is missing.
pub fn remainder_payload(html: &str, suffix: &str) -> Vec<ImageRecord> {
    let marker = format!("var galleryImages_{suffix} = ");
    let start = html
        .find(&marker)
        .map(|i| i + marker.len())
        .unwrap_or_else(|| panic!("no payload for '{suffix}' in:\n{html}"));
    let end = start
        + html[start..]
            .find(";\n")
            .unwrap_or_else(|| panic!("unterminated payload in:\n{html}"));
    serde_json::from_str(&html[start..end]).unwrap()
}
