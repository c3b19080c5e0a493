//! Filename conventions shared by the scanner and the renderer.
//!
//! ## Display Titles
//!
//! Every image gets a human-readable title from its filename stem. Dashes and
//! underscores become spaces and each word is capitalized:
//! - `my-cool_file.jpg` → "My Cool File"
//! - `IMG_0042.JPG` → "IMG 0042"
//! - `sunset.over.sea.png` → "Sunset.over.sea" (only the last extension is dropped)
//!
//! ## Public URLs
//!
//! Filenames end up in `href`/`src` attributes, so each path segment is
//! percent-encoded following RFC 3986: only the unreserved set
//! (`A-Z a-z 0-9 - _ . ~`) passes through untouched.
//! - `photo one.jpg` → `photo%20one.jpg`

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_encode};

/// Everything outside the RFC 3986 unreserved set.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Word separators recognised when capitalizing titles.
fn is_word_break(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n' | '\x0B' | '\x0C')
}

/// Turn a filename stem into a display title.
///
/// Handles these patterns:
/// - `"my-cool_file"` → `"My Cool File"`
/// - `"image1"` → `"Image1"`
/// - `"already Title"` → `"Already Title"`
/// - `"éclair"` → `"éclair"` (casing is ASCII-only)
pub fn format_title(stem: &str) -> String {
    let mut title = String::with_capacity(stem.len());
    let mut at_word_start = true;
    for c in stem.chars() {
        let c = if c == '-' || c == '_' { ' ' } else { c };
        if at_word_start {
            title.push(c.to_ascii_uppercase());
        } else {
            title.push(c);
        }
        at_word_start = is_word_break(c);
    }
    title
}

/// Percent-encode the raw bytes of a single URL path segment.
///
/// File names are not guaranteed to be UTF-8; `b"caf\xE9.jpg"` must become
/// `caf%E9.jpg`, not the encoding of a replacement character.
pub fn encode_segment(segment: &[u8]) -> String {
    percent_encode(segment, PATH_SEGMENT).to_string()
}
