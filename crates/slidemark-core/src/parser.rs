//! Presentation parser
//!
//! This module assembles a [`Presentation`] from document text:
//!
//! 1. split off the frontmatter block
//! 2. cut the body into slide segments on `---` lines
//! 3. per segment: read slide metadata, parse elements and notes under the
//!    document's content mode, then resolve layout and columns
//! 4. drop slides with neither elements nor notes
//!
//! Parsing never fails: malformed input degrades to a best-effort model.
//!
//! # Example
//!
//! ```
//! use slidemark_core::parser;
//!
//! let text = "---\ntitle: Demo\n---\n# Hello\n\tWelcome!\n---\n## Next\nSay goodbye";
//!
//! let presentation = parser::parse(text);
//! assert_eq!(presentation.frontmatter.title.as_deref(), Some("Demo"));
//! assert_eq!(presentation.slide_count(), 2);
//! assert_eq!(presentation.slides[1].notes, vec!["Say goodbye"]);
//! ```

use slidemark_ast::{ContentMode, Presentation, Slide};
use tracing::{debug, trace};

use crate::elements::parse_content;
use crate::frontmatter::extract_frontmatter;
use crate::layout::resolve_layout;
use crate::metadata::extract_slide_metadata;
use crate::splitter::split_slides;

/// Options supplied by the host
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Content mode used when the frontmatter does not set `content-mode`
    pub default_content_mode: ContentMode,
}

impl ParseOptions {
    /// Options with the given default content mode
    pub fn with_content_mode(default_content_mode: ContentMode) -> Self {
        Self {
            default_content_mode,
        }
    }
}

/// Parse document text with default options
pub fn parse(text: &str) -> Presentation {
    parse_presentation(text, &ParseOptions::default())
}

/// Parse document text into a presentation
pub fn parse_presentation(text: &str, options: &ParseOptions) -> Presentation {
    let (frontmatter, body) = extract_frontmatter(text);
    let mode = frontmatter
        .content_mode
        .unwrap_or(options.default_content_mode);
    let auto_columns = frontmatter.auto_columns_enabled();

    let segments = split_slides(body);
    let segment_count = segments.len();

    let slides: Vec<Slide> = segments
        .into_iter()
        .enumerate()
        .map(|(index, segment)| parse_slide(index, segment, mode, auto_columns))
        .filter(Slide::has_content)
        .collect();

    debug!(
        mode = mode.as_str(),
        segments = segment_count,
        slides = slides.len(),
        "parsed presentation"
    );

    Presentation {
        frontmatter,
        slides,
        source: text.to_string(),
    }
}

/// Parse one slide segment.
///
/// `index` is the segment's position in the document and is kept even when
/// earlier segments are later dropped as empty.
pub fn parse_slide(
    index: usize,
    segment: String,
    mode: ContentMode,
    auto_columns: bool,
) -> Slide {
    let (mut metadata, content) = extract_slide_metadata(&segment);
    let mut parsed = parse_content(content, mode, metadata.layout.as_ref());
    resolve_layout(&mut metadata, &mut parsed, auto_columns);

    trace!(
        index,
        layout = metadata.layout.as_ref().map(|l| l.as_str()),
        elements = parsed.elements.len(),
        notes = parsed.notes.len(),
        "parsed slide"
    );

    Slide {
        index,
        metadata,
        elements: parsed.elements,
        notes: parsed.notes,
        raw_content: segment,
    }
}
