//! Gallery path resolution.
//!
//! Shortcodes name a directory relative to the source root. Older sites kept
//! galleries under `assets/images/` and referenced them by the short name, so
//! when the direct path is not a directory the legacy location is tried.

use std::path::Path;

/// Prefix tried when the requested gallery path does not exist directly.
pub const LEGACY_PREFIX: &str = "assets/images";

/// Directory existence check, injectable for tests.
pub trait DirProbe {
    fn is_dir(&self, path: &Path) -> bool;
}

/// [`DirProbe`] backed by the file system.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsProbe;

impl DirProbe for FsProbe {
    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }
}

/// Resolve the gallery path to hand to the scanner.
///
/// Returns the trimmed `path` when `source_dir/path` is a directory, the
/// `assets/images/`-prefixed path when only that exists, and the trimmed
/// `path` otherwise.
pub fn resolve_gallery_path(source_dir: &Path, path: &str, probe: &dyn DirProbe) -> String {
    let clean = path.trim_matches('/');
    if probe.is_dir(&source_dir.join(clean)) {
        return clean.to_string();
    }

    let legacy = format!("{LEGACY_PREFIX}/{clean}");
    if probe.is_dir(&source_dir.join(&legacy)) {
        return legacy;
    }

    clean.to_string()
}
