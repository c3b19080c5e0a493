//! Gallery markup.
//!
//! Turns a list of [`ImageRecord`]s into the HTML fragment consumed by
//! justifiedGallery and magnific-popup in the browser:
//!
//! ```html
//! <div class="justified-gallery" id="gallery-1">
//!   <a href="/trip/a.jpg" title="A"><img src="/trip/a.jpg" alt="A"></a>
//!   ...
//! </div>
//! <div style="..."><button id="gallery-1-more" ...>Load More</button></div>  <!-- paginated only -->
//! <script>var galleryImages_gallery_1 = [...]; var galleryLimit_gallery_1 = 20;</script>
//! <script>jQuery(document).ready(function($) { ... });</script>
//! ```
//!
//! ## Pagination
//!
//! With `limit > 0` and more images than `limit`, only the first `limit` are
//! rendered. The rest ride along as JSON and are appended `limit` at a time
//! each time "Load More" is clicked; the button hides once nothing is left.
//! `limit <= 0` renders everything in one pass.
//!
//! Rendering is pure: the container id comes from an injected
//! [`IdGenerator`], so output is fully deterministic under test.

use crate::config::GalleryDefaults;
use crate::scan::ImageRecord;
use crate::shortcode::Attributes;
use maud::{PreEscaped, html};
use std::cell::Cell;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Display options for one gallery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryOptions {
    pub row_height: i64,
    pub margins: i64,
    pub last_row: String,
    pub limit: i64,
}

impl Default for GalleryOptions {
    fn default() -> Self {
        Self::from_attributes(&Attributes::new(), &GalleryDefaults::default())
    }
}

impl GalleryOptions {
    /// Read `rowHeight`, `margins`, `lastRow` and `limit`, falling back to
    /// `defaults` for anything absent.
    pub fn from_attributes(attrs: &Attributes, defaults: &GalleryDefaults) -> Self {
        let int = |key: &str, default: i64| attrs.get(key).map_or(default, |v| parse_int(v));
        Self {
            row_height: int("rowHeight", defaults.row_height),
            margins: int("margins", defaults.margins),
            last_row: attrs
                .get("lastRow")
                .cloned()
                .unwrap_or_else(|| defaults.last_row.clone()),
            limit: int("limit", defaults.limit),
        }
    }

    /// Split into the images rendered up front and the ones loaded later.
    pub fn paginate<'a>(&self, images: &'a [ImageRecord]) -> (&'a [ImageRecord], &'a [ImageRecord]) {
        match usize::try_from(self.limit) {
            Ok(limit) if limit > 0 && images.len() > limit => images.split_at(limit),
            _ => (images, &[]),
        }
    }
}

/// Lenient integer parsing for shortcode attributes.
///
/// Leading whitespace and a sign are accepted, then the longest run of
/// digits is read: `"150px"` → 150, `" -4"` → -4. Anything else is 0.
pub fn parse_int(value: &str) -> i64 {
    let s = value.trim_start();
    let (sign, rest) = match s.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, s.strip_prefix('+').unwrap_or(s)),
    };
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    rest[..end].parse::<i64>().map(|n| sign * n).unwrap_or(0)
}

// ============================================================================
// Container ids
// ============================================================================

/// Source of DOM ids for gallery containers.
pub trait IdGenerator {
    /// A fresh id, unique among those handed out for the current page.
    fn next_id(&self) -> String;
}

static UNIQUE_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Ids built from the current time plus a process-wide counter, e.g.
/// `gallery-61f0c3a2b9e10-00003`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniqueIds;

impl IdGenerator for UniqueIds {
    fn next_id(&self) -> String {
        let micros = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_micros())
            .unwrap_or_default();
        let n = UNIQUE_COUNTER.fetch_add(1, Ordering::Relaxed);
        format!("gallery-{micros:x}-{n:05x}")
    }
}

/// `gallery-1`, `gallery-2`, ...
#[derive(Debug, Default)]
pub struct SequentialIds {
    next: Cell<u64>,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&self) -> String {
        let n = self.next.get() + 1;
        self.next.set(n);
        format!("gallery-{n}")
    }
}

// ============================================================================
// Notices
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Danger,
    Warning,
}

impl NoticeLevel {
    fn class_name(self) -> &'static str {
        match self {
            NoticeLevel::Danger => "alert alert-danger",
            NoticeLevel::Warning => "alert alert-warning",
        }
    }
}

/// A user-visible alert box. `message` is escaped.
pub fn notice(level: NoticeLevel, message: &str) -> String {
    let markup = html! {
        div class=(level.class_name()) { (message) }
    };
    markup.into_string()
}

// ============================================================================
// Gallery
// ============================================================================

/// Render the gallery container and its scripts.
pub fn render(images: &[ImageRecord], options: &GalleryOptions, ids: &dyn IdGenerator) -> String {
    let id = ids.next_id();
    let (initial, remaining) = options.paginate(images);
    let more_id = format!("{id}-more");
    let vars = ScriptVars::new(&id);

    let markup = html! {
        div.justified-gallery id=(id) {
            @for image in initial {
                a href=(image.src) title=(image.title) {
                    img src=(image.thumb) alt=(image.alt);
                }
            }
        }
        @if !remaining.is_empty() {
            div style="text-align: center; margin-top: 20px; margin-bottom: 20px;" {
                button id=(more_id) class="btn btn-primary" style="padding: 10px 20px; cursor: pointer;" {
                    "Load More"
                }
            }
            "\n"
            script { (PreEscaped(payload_script(&vars, remaining, options.limit))) }
        }
        "\n"
        script { (PreEscaped(init_script(&id, &more_id, &vars, options, !remaining.is_empty()))) }
        "\n"
    };
    markup.into_string()
}

/// Global JS variable names derived from a container id.
struct ScriptVars {
    images: String,
    limit: String,
}

impl ScriptVars {
    fn new(id: &str) -> Self {
        let suffix: String = id
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect();
        Self {
            images: format!("galleryImages_{suffix}"),
            limit: format!("galleryLimit_{suffix}"),
        }
    }
}

/// Serialize a value for embedding inside `<script>`.
fn script_json<T: serde::Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value)
        .unwrap_or_else(|_| "null".to_string())
        .replace("</", "<\\/")
}

fn payload_script(vars: &ScriptVars, remaining: &[ImageRecord], limit: i64) -> String {
    format!(
        "\nvar {images} = {data};\nvar {limit_var} = {limit};\n",
        images = vars.images,
        data = script_json(remaining),
        limit_var = vars.limit,
    )
}

fn init_script(
    id: &str,
    more_id: &str,
    vars: &ScriptVars,
    options: &GalleryOptions,
    paginated: bool,
) -> String {
    let mut js = format!(
        r#"
jQuery(document).ready(function($) {{
    var $gallery = $({selector});
    $gallery.justifiedGallery({{
        rowHeight: {row_height},
        margins: {margins},
        lastRow: {last_row}
    }}).on("jg.complete", function () {{
        $(this).magnificPopup({{
            delegate: "a",
            type: "image",
            gallery: {{
                enabled: true
            }}
        }});
    }});
"#,
        selector = script_json(&format!("#{id}")),
        row_height = options.row_height,
        margins = options.margins,
        last_row = script_json(&options.last_row),
    );

    if paginated {
        js.push_str(&format!(
            r#"    $({button}).on("click", function() {{
        var images = {images};
        var limit = {limit};
        var nextBatch = images.splice(0, limit);
        $.each(nextBatch, function(index, image) {{
            var $img = $("<img>").attr({{ src: image.thumb, alt: image.alt }});
            $gallery.append($("<a>").attr({{ href: image.src, title: image.title }}).append($img));
        }});
        $gallery.justifiedGallery("norewind");
        if (images.length === 0) {{
            $(this).hide();
        }}
    }});
"#,
            button = script_json(&format!("#{more_id}")),
            images = vars.images,
            limit = vars.limit,
        ));
    }

    js.push_str("});\n");
    js
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;

    fn attrs(pairs: &[(&str, &str)]) -> Attributes {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn options_default_values() {
        let options = GalleryOptions::default();
        assert_eq!(options.row_height, 200);
        assert_eq!(options.margins, 10);
        assert_eq!(options.last_row, "nojustify");
        assert_eq!(options.limit, 20);
    }

    #[test]
    fn options_read_from_attributes() {
        let options = GalleryOptions::from_attributes(
            &attrs(&[
                ("rowHeight", "150"),
                ("margins", "4"),
                ("lastRow", "justify"),
                ("limit", "8"),
            ]),
            &GalleryDefaults::default(),
        );
        assert_eq!(options.row_height, 150);
        assert_eq!(options.margins, 4);
        assert_eq!(options.last_row, "justify");
        assert_eq!(options.limit, 8);
    }

    #[test]
    fn options_fall_back_to_configured_defaults() {
        let defaults = GalleryDefaults {
            row_height: 320,
            margins: 2,
            last_row: "center".to_string(),
            limit: 0,
        };
        let options = GalleryOptions::from_attributes(&attrs(&[("margins", "6")]), &defaults);
        assert_eq!(options.row_height, 320);
        assert_eq!(options.margins, 6);
        assert_eq!(options.last_row, "center");
        assert_eq!(options.limit, 0);
    }

    #[test]
    fn lenient_integer_parsing() {
        assert_eq!(parse_int("150"), 150);
        assert_eq!(parse_int("150px"), 150);
        assert_eq!(parse_int("  -4"), -4);
        assert_eq!(parse_int("+7"), 7);
        assert_eq!(parse_int("tall"), 0);
        assert_eq!(parse_int(""), 0);
        assert_eq!(parse_int("-"), 0);
    }

    #[test]
    fn sequential_ids_increment() {
        let ids = SequentialIds::new();
        assert_eq!(ids.next_id(), "gallery-1");
        assert_eq!(ids.next_id(), "gallery-2");
    }

    #[test]
    fn unique_ids_differ() {
        let a = UniqueIds.next_id();
        let b = UniqueIds.next_id();
        assert!(a.starts_with("gallery-"));
        assert_ne!(a, b);
    }

    #[test]
    fn notice_escapes_message() {
        let html = notice(NoticeLevel::Warning, "No images found in gallery: <b>x</b>");
        assert_eq!(
            html,
            r#"<div class="alert alert-warning">No images found in gallery: &lt;b&gt;x&lt;/b&gt;</div>"#
        );
    }

    #[test]
    fn danger_notice_class() {
        let html = notice(NoticeLevel::Danger, "Gallery path not specified");
        assert_eq!(
            html,
            r#"<div class="alert alert-danger">Gallery path not specified</div>"#
        );
    }

    #[test]
    fn renders_one_anchor_per_image() {
        let images = records(&["a", "b", "c"]);
        let html = render(&images, &GalleryOptions::default(), &SequentialIds::new());

        assert!(html.starts_with(r#"<div class="justified-gallery" id="gallery-1">"#));
        assert_eq!(anchor_count(&html), 3);
        assert!(html.contains(r#"<a href="/g/a.jpg" title="A"><img src="/g/a.jpg" alt="A"></a>"#));
        assert!(!html.contains("Load More"));
        assert!(!html.contains("galleryImages_"));
    }

    #[test]
    fn init_script_applies_options() {
        let images = records(&["a"]);
        let options = GalleryOptions {
            row_height: 150,
            margins: 3,
            last_row: "justify".to_string(),
            limit: 20,
        };
        let html = render(&images, &options, &SequentialIds::new());

        assert!(html.contains(r##"var $gallery = $("#gallery-1");"##));
        assert!(html.contains("rowHeight: 150,"));
        assert!(html.contains("margins: 3,"));
        assert!(html.contains(r#"lastRow: "justify""#));
        assert!(html.contains(r#"on("jg.complete""#));
        assert!(html.contains("magnificPopup"));
    }

    #[test]
    fn paginates_beyond_limit() {
        let images = records(&["a", "b", "c", "d", "e"]);
        let options = GalleryOptions {
            limit: 2,
            ..GalleryOptions::default()
        };
        let html = render(&images, &options, &SequentialIds::new());

        assert_eq!(anchor_count(&html), 2);
        assert!(html.contains(r#"<button id="gallery-1-more""#));
        assert!(html.contains("Load More"));
        assert!(html.contains("var galleryLimit_gallery_1 = 2;"));
        assert_eq!(remainder_payload(&html, "gallery_1").len(), 3);
        assert!(html.contains(r##"$("#gallery-1-more").on("click""##));
        assert!(html.contains(r#"justifiedGallery("norewind")"#));
    }

    #[test]
    fn remainder_payload_holds_full_records() {
        let images = records(&["a", "b", "c"]);
        let options = GalleryOptions {
            limit: 1,
            ..GalleryOptions::default()
        };
        let html = render(&images, &options, &SequentialIds::new());

        assert_eq!(remainder_payload(&html, "gallery_1"), images[1..].to_vec());
    }

    #[test]
    fn exactly_limit_images_not_paginated() {
        let images = records(&["a", "b"]);
        let options = GalleryOptions {
            limit: 2,
            ..GalleryOptions::default()
        };
        let html = render(&images, &options, &SequentialIds::new());
        assert_eq!(anchor_count(&html), 2);
        assert!(!html.contains("Load More"));
    }

    #[test]
    fn zero_or_negative_limit_renders_everything() {
        let images = records(&["a", "b", "c"]);
        for limit in [0, -1] {
            let options = GalleryOptions {
                limit,
                ..GalleryOptions::default()
            };
            let html = render(&images, &options, &SequentialIds::new());
            assert_eq!(anchor_count(&html), 3);
            assert!(!html.contains("Load More"));
        }
    }

    #[test]
    fn image_fields_escaped() {
        let images = vec![ImageRecord {
            src: "/g/a.jpg".to_string(),
            thumb: "/g/a.jpg".to_string(),
            alt: r#"Say "hi" <now>"#.to_string(),
            title: "Tom & Jerry".to_string(),
        }];
        let html = render(&images, &GalleryOptions::default(), &SequentialIds::new());

        assert!(html.contains(r#"title="Tom &amp; Jerry""#));
        assert!(html.contains(r#"alt="Say &quot;hi&quot; &lt;now&gt;""#));
    }

    #[test]
    fn last_row_cannot_break_out_of_script() {
        let options = GalleryOptions {
            last_row: r#"x"</script><script>alert(1)</script>"#.to_string(),
            ..GalleryOptions::default()
        };
        let html = render(&records(&["a"]), &options, &SequentialIds::new());

        assert!(!html.contains("</script><script>alert"));
        assert!(html.contains(r#"lastRow: "x\"<\/script><script>alert(1)<\/script>""#));
    }

    #[test]
    fn payload_cannot_break_out_of_script() {
        let mut images = records(&["a", "b"]);
        images[1].title = "</script><script>alert(1)".to_string();
        let options = GalleryOptions {
            limit: 1,
            ..GalleryOptions::default()
        };
        let html = render(&images, &options, &SequentialIds::new());

        assert!(!html.contains("</script><script>alert"));
        assert_eq!(remainder_payload(&html, "gallery_1")[0].title, images[1].title);
    }

    #[test]
    fn ids_differ_between_renders() {
        let ids = SequentialIds::new();
        let images = records(&["a"]);
        let first = render(&images, &GalleryOptions::default(), &ids);
        let second = render(&images, &GalleryOptions::default(), &ids);

        assert!(first.contains(r#"id="gallery-1""#));
        assert!(second.contains(r#"id="gallery-2""#));
    }
}
