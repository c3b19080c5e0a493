//! CLI output formatting.
//!
//! # Information-First Display
//!
//! Every image is shown by its positional index and display title, with the
//! public URL as an indented `Source:` line. The output reads as an inventory
//! of what a gallery will show, while still pointing at the exact files.
//!
//! # Output Format
//!
//! ## Scan
//!
//! ```text
//! Gallery assets/images/trip (3 photos)
//! 001 Beach Day
//!     Source: /assets/images/trip/beach-day.jpg
//! 002 Hotel Lobby
//!     Source: /assets/images/trip/hotel%20lobby.png
//! ```
//!
//! ## Copy assets
//!
//! ```text
//! Copied 4 files, 3 directories → dist/assets/vendor/gallery
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout.

use crate::plugin::CopyReport;
use crate::scan::ImageRecord;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn photo_count(n: usize) -> String {
    match n {
        1 => "1 photo".to_string(),
        n => format!("{n} photos"),
    }
}

// ============================================================================
// Scan
// ============================================================================

/// Format the images found for a gallery path.
pub fn format_scan_output(gallery_path: &str, images: &[ImageRecord]) -> Vec<String> {
    if images.is_empty() {
        return vec![format!("Gallery {gallery_path}: no images found")];
    }

    let mut lines = vec![format!(
        "Gallery {} ({})",
        gallery_path,
        photo_count(images.len())
    )];
    for (i, image) in images.iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), image.title));
        lines.push(format!("    Source: {}", image.src));
    }
    lines
}

/// Print scan output to stdout.
pub fn print_scan_output(gallery_path: &str, images: &[ImageRecord]) {
    for line in format_scan_output(gallery_path, images) {
        println!("{}", line);
    }
}

// ============================================================================
// Copy assets
// ============================================================================

/// Format the result of a vendor asset copy.
pub fn format_copy_output(report: Option<&CopyReport>) -> Vec<String> {
    match report {
        Some(report) => vec![format!("Copied {report}")],
        None => vec!["No vendor assets to copy".to_string()],
    }
}

/// Print copy output to stdout.
pub fn print_copy_output(report: Option<&CopyReport>) {
    for line in format_copy_output(report) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::records;
    use std::path::PathBuf;

    #[test]
    fn scan_output_lists_titles_and_sources() {
        let images = records(&["beach-day", "hotel_lobby"]);
        let lines = format_scan_output("trip", &images);

        assert_eq!(
            lines,
            vec![
                "Gallery trip (2 photos)",
                "001 Beach Day",
                "    Source: /g/beach-day.jpg",
                "002 Hotel Lobby",
                "    Source: /g/hotel_lobby.jpg",
            ]
        );
    }

    #[test]
    fn scan_output_singular_count() {
        let lines = format_scan_output("trip", &records(&["a"]));
        assert_eq!(lines[0], "Gallery trip (1 photo)");
    }

    #[test]
    fn scan_output_empty_gallery() {
        assert_eq!(
            format_scan_output("trip", &[]),
            vec!["Gallery trip: no images found"]
        );
    }

    #[test]
    fn copy_output_with_report() {
        let report = CopyReport {
            target: PathBuf::from("dist/assets/vendor/gallery"),
            files: 4,
            directories: 3,
        };
        assert_eq!(
            format_copy_output(Some(&report)),
            vec!["Copied 4 files, 3 directories \u{2192} dist/assets/vendor/gallery"]
        );
    }

    #[test]
    fn copy_output_without_report() {
        assert_eq!(format_copy_output(None), vec!["No vendor assets to copy"]);
    }
}
