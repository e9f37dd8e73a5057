//! Per-slide metadata extraction
//!
//! A slide segment may start with a small block of overrides:
//!
//! ```text
//! layout: half-image (hidden)
//! background: ![[cover.jpg]]
//! opacity: 40%
//! mode: dark
//!
//! # Slide content starts here
//! ```
//!
//! Only a fixed vocabulary is recognised; the first blank line or the first
//! line outside the vocabulary ends the block.

use regex::Regex;
use std::sync::OnceLock;

use slidemark_ast::{SlideLayout, SlideMetadata, SlideMode};

/// Modifier token that turns off column auto-detection
pub const NO_AUTOCOLUMN: &str = "no-autocolumn";

/// Suffix marking a slide as excluded from normal flow
pub const HIDDEN_MARKER: &str = "(hidden)";

/// Split a slide segment into its metadata and the remaining content
pub fn extract_slide_metadata(segment: &str) -> (SlideMetadata, &str) {
    static META_RE: OnceLock<Regex> = OnceLock::new();
    let re = META_RE.get_or_init(|| {
        Regex::new(r"(?i)^(layout|background|opacity|mode|class|filter)\s*:\s*(.*)$").unwrap()
    });

    let mut metadata = SlideMetadata::default();
    let mut offset = 0;

    for line in segment.split_inclusive('\n') {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            break;
        }
        let Some(caps) = re.captures(trimmed) else {
            break;
        };

        let key = caps[1].to_ascii_lowercase();
        apply_key(&mut metadata, &key, strip_quotes(caps[2].trim()));
        offset += line.len();
    }

    (metadata, &segment[offset..])
}

fn apply_key(metadata: &mut SlideMetadata, key: &str, value: &str) {
    match key {
        "layout" => apply_layout(metadata, value),
        "background" => metadata.background = non_empty(value),
        "opacity" => metadata.background_opacity = parse_opacity(value),
        "mode" => metadata.mode = SlideMode::parse(value),
        "class" => {
            if value.split_whitespace().any(|t| t == NO_AUTOCOLUMN) {
                metadata.no_autocolumn = true;
            }
            metadata.class = non_empty(value);
        }
        "filter" => metadata.background_filter = non_empty(value),
        _ => {}
    }
}

/// Decode `layout: <name> [modifiers] [(hidden)]`
fn apply_layout(metadata: &mut SlideMetadata, value: &str) {
    let mut value = value.trim();
    if let Some(stripped) = value.strip_suffix(HIDDEN_MARKER) {
        metadata.hidden = true;
        value = stripped.trim_end();
    }

    let mut name = None;
    for token in value.split_whitespace() {
        if token == NO_AUTOCOLUMN {
            metadata.no_autocolumn = true;
        } else if token.eq_ignore_ascii_case(HIDDEN_MARKER) {
            metadata.hidden = true;
        } else if name.is_none() {
            name = Some(token);
        }
    }

    metadata.layout = name.map(SlideLayout::parse);
}

/// Parse `NN%`, a 0..=1 fraction, or a bare percentage above 1
pub fn parse_opacity(value: &str) -> Option<f32> {
    let value = value.trim();
    let opacity = match value.strip_suffix('%') {
        Some(percent) => percent.trim().parse::<f32>().ok()? / 100.0,
        None => {
            let number = value.parse::<f32>().ok()?;
            if number > 1.0 {
                number / 100.0
            } else {
                number
            }
        }
    };

    if opacity.is_finite() {
        Some(opacity.clamp(0.0, 1.0))
    } else {
        None
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn strip_quotes(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}
