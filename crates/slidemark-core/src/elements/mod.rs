//! Slide content parsing
//!
//! Turns the content of one slide (metadata already removed) into visible
//! elements and speaker notes. Two content modes decide which lines are
//! which:
//!
//! - **notes-by-default**: headings, images, fenced code, tables, math,
//!   kickers and *indented* blocks are visible; every other line is a note.
//! - **visible-by-default**: everything is visible until a `note:` /
//!   `notes:` line; whatever follows it is notes.
//!
//! Both modes share the block sub-parsers in [`blocks`].

pub mod blocks;
mod notes_mode;
mod visible_mode;

pub use notes_mode::parse_notes_by_default;
pub use visible_mode::{find_notes_marker, parse_visible_by_default};

use slidemark_ast::{ContentMode, SlideElement, SlideLayout};

/// Result of parsing the content of one slide
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedContent {
    /// Visible elements in source order
    pub elements: Vec<SlideElement>,
    /// Speaker notes, one entry per note line
    pub notes: Vec<String>,
    /// Indented visible source lines, with `""` marking a blank separator.
    /// Column detection groups these into blocks.
    pub flow_lines: Vec<String>,
}

impl ParsedContent {
    /// Check if the slide produced neither elements nor notes
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty() && self.notes.is_empty()
    }
}

/// Parse slide content under the given mode.
///
/// `layout` is the explicit layout from the slide metadata, if any. Column
/// layouts in visible-by-default mode place elements by `###` headings.
pub fn parse_content(
    content: &str,
    mode: ContentMode,
    layout: Option<&SlideLayout>,
) -> ParsedContent {
    match mode {
        ContentMode::NotesByDefault => parse_notes_by_default(content),
        ContentMode::VisibleByDefault => parse_visible_by_default(content, layout),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slidemark_ast::ElementType;

    const SAMPLE: &str = "# Title\nSay hello to everyone\n\tVisible point";

    #[test]
    fn test_modes_differ() {
        let notes_first = parse_content(SAMPLE, ContentMode::NotesByDefault, None);
        assert_eq!(notes_first.elements.len(), 2);
        assert_eq!(notes_first.notes, vec!["Say hello to everyone"]);

        let visible_first = parse_content(SAMPLE, ContentMode::VisibleByDefault, None);
        assert!(visible_first.notes.is_empty());
        assert_eq!(visible_first.elements[1].element_type, ElementType::Paragraph);
        assert_eq!(
            visible_first.elements[1].content,
            "Say hello to everyone\nVisible point"
        );
    }

    #[test]
    fn test_empty_content() {
        assert!(parse_content("", ContentMode::NotesByDefault, None).is_empty());
        assert!(parse_content("  \n", ContentMode::VisibleByDefault, None).is_empty());
    }
}
