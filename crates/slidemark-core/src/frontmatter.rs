//! Frontmatter extraction
//!
//! A presentation may open with a settings block:
//!
//! ```text
//! ---
//! title: Quarterly Review
//! theme: aurora
//! contentMode: visible-by-default
//! ---
//! # First slide
//! ```
//!
//! Keys are matched case-insensitively after converting camelCase and
//! snake_case spellings to kebab-case, so `aspectRatio`, `aspect_ratio` and
//! `aspect-ratio` all land in the same field. Unknown keys are dropped.

use slidemark_ast::{ContentMode, PresentationFrontmatter};
use tracing::trace;

/// Canonical (kebab-case) names of every recognised frontmatter key
pub const KNOWN_KEYS: &[&str] = &[
    "title",
    "author",
    "date",
    "description",
    "lang",
    "theme",
    "mode",
    "aspect-ratio",
    "transition",
    "code-theme",
    "content-mode",
    "heading-font",
    "body-font",
    "code-font",
    "font-size",
    "heading-weight",
    "line-height",
    "paragraph-spacing",
    "heading-uppercase",
    "accent-color",
    "light-background",
    "dark-background",
    "light-text-color",
    "dark-text-color",
    "light-title-color",
    "dark-title-color",
    "light-link-color",
    "dark-link-color",
    "light-code-background",
    "dark-code-background",
    "background",
    "slide-numbers",
    "progress-bar",
    "header",
    "footer",
    "logo",
    "logo-position",
    "text-align",
    "incremental-lists",
    "auto-columns",
];

/// Keys whose field is a boolean
pub const BOOLEAN_KEYS: &[&str] = &[
    "heading-uppercase",
    "slide-numbers",
    "progress-bar",
    "incremental-lists",
    "auto-columns",
];

/// A decoded frontmatter value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FrontmatterValue<'a> {
    Flag(bool),
    Text(&'a str),
}

impl FrontmatterValue<'_> {
    fn decode(raw: &str) -> FrontmatterValue<'_> {
        let value = strip_quotes(raw.trim());
        if value.eq_ignore_ascii_case("true") {
            FrontmatterValue::Flag(true)
        } else if value.eq_ignore_ascii_case("false") {
            FrontmatterValue::Flag(false)
        } else {
            FrontmatterValue::Text(value)
        }
    }

    fn text(self) -> String {
        match self {
            FrontmatterValue::Flag(flag) => flag.to_string(),
            FrontmatterValue::Text(text) => text.to_string(),
        }
    }

    fn flag(self) -> Option<bool> {
        match self {
            FrontmatterValue::Flag(flag) => Some(flag),
            FrontmatterValue::Text(_) => None,
        }
    }
}

/// Split a leading `---` block from the document.
///
/// Returns the decoded settings and the body that follows the closing
/// delimiter. Without a complete block the settings are empty and the text
/// is returned unchanged.
pub fn extract_frontmatter(text: &str) -> (PresentationFrontmatter, &str) {
    let content = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut lines = content.split_inclusive('\n');
    let opening = match lines.next() {
        Some(line) if is_delimiter(line) => line,
        _ => return (PresentationFrontmatter::default(), text),
    };

    let block_start = opening.len();
    let mut offset = block_start;
    for line in lines {
        if is_delimiter(line) {
            let block = &content[block_start..offset];
            let body = &content[offset + line.len()..];
            return (decode_frontmatter(block), body);
        }
        offset += line.len();
    }

    (PresentationFrontmatter::default(), text)
}

/// Decode `key: value` lines into settings
pub fn decode_frontmatter(block: &str) -> PresentationFrontmatter {
    let mut frontmatter = PresentationFrontmatter::default();

    for line in block.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = canonical_key(key);
        let value = value.trim();
        if key.is_empty() || value.is_empty() {
            continue;
        }

        apply_key(&mut frontmatter, &key, FrontmatterValue::decode(value));
    }

    frontmatter
}

/// Convert a key spelling to its kebab-case form
pub fn canonical_key(key: &str) -> String {
    let key = key.trim();
    let mut out = String::with_capacity(key.len() + 4);

    for ch in key.chars() {
        if ch.is_ascii_uppercase() {
            if !out.is_empty() && !out.ends_with('-') {
                out.push('-');
            }
            out.push(ch.to_ascii_lowercase());
        } else if ch == '_' || ch == ' ' {
            out.push('-');
        } else {
            out.push(ch);
        }
    }

    out
}

fn apply_key(fm: &mut PresentationFrontmatter, key: &str, value: FrontmatterValue<'_>) {
    let text = || Some(value.text());

    match key {
        "title" => fm.title = text(),
        "author" => fm.author = text(),
        "date" => fm.date = text(),
        "description" => fm.description = text(),
        "lang" | "language" => fm.lang = text(),
        "theme" => fm.theme = text(),
        "mode" | "color-mode" => fm.mode = text(),
        "aspect-ratio" => fm.aspect_ratio = text(),
        "transition" => fm.transition = text(),
        "code-theme" => fm.code_theme = text(),
        "content-mode" => {
            if let Some(mode) = ContentMode::parse(&value.text()) {
                fm.content_mode = Some(mode);
            }
        }
        "heading-font" | "title-font" => fm.heading_font = text(),
        "body-font" | "font" => fm.body_font = text(),
        "code-font" => fm.code_font = text(),
        "font-size" => fm.font_size = text(),
        "heading-weight" => fm.heading_weight = text(),
        "line-height" => fm.line_height = text(),
        "paragraph-spacing" => fm.paragraph_spacing = text(),
        "heading-uppercase" => set_flag(&mut fm.heading_uppercase, value),
        "accent-color" | "accent" => fm.accent_color = text(),
        "light-background" => fm.light_background = text(),
        "dark-background" => fm.dark_background = text(),
        "light-text-color" => fm.light_text_color = text(),
        "dark-text-color" => fm.dark_text_color = text(),
        "light-title-color" => fm.light_title_color = text(),
        "dark-title-color" => fm.dark_title_color = text(),
        "light-link-color" => fm.light_link_color = text(),
        "dark-link-color" => fm.dark_link_color = text(),
        "light-code-background" => fm.light_code_background = text(),
        "dark-code-background" => fm.dark_code_background = text(),
        "background" => fm.background = text(),
        "slide-numbers" | "show-slide-numbers" => set_flag(&mut fm.slide_numbers, value),
        "progress-bar" | "progress" | "show-progress" => set_flag(&mut fm.progress_bar, value),
        "header" => fm.header = text(),
        "footer" => fm.footer = text(),
        "logo" => fm.logo = text(),
        "logo-position" => fm.logo_position = text(),
        "text-align" => fm.text_align = text(),
        "incremental-lists" => set_flag(&mut fm.incremental_lists, value),
        "auto-columns" | "autocolumn" | "auto-column" => set_flag(&mut fm.auto_columns, value),
        _ => trace!(key, "ignoring unknown frontmatter key"),
    }
}

fn set_flag(field: &mut Option<bool>, value: FrontmatterValue<'_>) {
    if let Some(flag) = value.flag() {
        *field = Some(flag);
    }
}

fn is_delimiter(line: &str) -> bool {
    line.trim_end() == "---"
}

fn strip_quotes(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}
