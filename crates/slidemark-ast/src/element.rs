//! Slide content elements
//!
//! This module defines the visible content units of a slide, such as
//! headings, paragraphs, lists, code blocks and images.

use serde::{Deserialize, Serialize};

/// Highest column index a slide element may carry (three columns).
pub const MAX_COLUMN_INDEX: u8 = 2;

/// Kind of a slide element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    /// `#` to `######` heading
    Heading,
    /// Plain text lines
    Paragraph,
    /// Ordered or unordered list (all item lines)
    List,
    /// `>` quoted lines
    Blockquote,
    /// Markdown or wiki-link image
    Image,
    /// Fenced code block
    Code,
    /// Pipe-delimited table
    Table,
    /// `$$` math block
    Math,
    /// `^text` emphasis line shown above a heading
    Kicker,
}

impl ElementType {
    /// Get the wire name of this element type
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Heading => "heading",
            Self::Paragraph => "paragraph",
            Self::List => "list",
            Self::Blockquote => "blockquote",
            Self::Image => "image",
            Self::Code => "code",
            Self::Table => "table",
            Self::Math => "math",
            Self::Kicker => "kicker",
        }
    }

    /// Text-flow elements that column detection can map source blocks onto
    pub fn is_text_flow(&self) -> bool {
        matches!(self, Self::Paragraph | Self::List | Self::Blockquote)
    }
}

/// One visible content unit on a slide
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideElement {
    /// Element kind
    #[serde(rename = "type")]
    pub element_type: ElementType,
    /// Processed text (heading text, code body, list lines, ...)
    pub content: String,
    /// Whether the element is rendered on the slide surface
    pub visible: bool,
    /// Source lines the element was built from
    pub raw: String,
    /// Heading depth (1-6), only set for headings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u8>,
    /// Column bucket (0-2) when the slide is split into columns
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_index: Option<u8>,
    /// Image reference, only set for images
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_data: Option<ImageData>,
    /// Language tag of a fenced code block
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl SlideElement {
    /// Create a visible element of the given type
    pub fn new(
        element_type: ElementType,
        content: impl Into<String>,
        raw: impl Into<String>,
    ) -> Self {
        Self {
            element_type,
            content: content.into(),
            visible: true,
            raw: raw.into(),
            level: None,
            column_index: None,
            image_data: None,
            language: None,
        }
    }

    /// Create a heading element
    pub fn heading(level: u8, text: impl Into<String>, raw: impl Into<String>) -> Self {
        Self {
            level: Some(level),
            ..Self::new(ElementType::Heading, text, raw)
        }
    }

    /// Create a paragraph element
    pub fn paragraph(text: impl Into<String>, raw: impl Into<String>) -> Self {
        Self::new(ElementType::Paragraph, text, raw)
    }

    /// Create an image element
    pub fn image(data: ImageData, raw: impl Into<String>) -> Self {
        let content = data.src.clone();
        Self {
            image_data: Some(data),
            ..Self::new(ElementType::Image, content, raw)
        }
    }

    /// Create a code element
    pub fn code(
        language: Option<String>,
        body: impl Into<String>,
        raw: impl Into<String>,
    ) -> Self {
        Self {
            language,
            ..Self::new(ElementType::Code, body, raw)
        }
    }

    /// Place the element in a column, clamping to the last column
    pub fn with_column(mut self, column: usize) -> Self {
        self.set_column(Some(column));
        self
    }

    /// Set or clear the column, clamping to the last column
    pub fn set_column(&mut self, column: Option<usize>) {
        self.column_index = column.map(|c| c.min(MAX_COLUMN_INDEX as usize) as u8);
    }

    /// Check if this is a heading of exactly `level`
    pub fn is_heading_level(&self, level: u8) -> bool {
        self.element_type == ElementType::Heading && self.level == Some(level)
    }

    /// Check if this is an image
    pub fn is_image(&self) -> bool {
        self.element_type == ElementType::Image
    }

    /// First line of the trimmed content
    pub fn first_line(&self) -> &str {
        self.content.trim().lines().next().unwrap_or("").trim()
    }
}

/// Image reference parsed from a markdown or wiki-link image line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageData {
    /// Image path or URL
    pub src: String,
    /// Alt text / caption
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    /// Sizing policy
    #[serde(default)]
    pub size: ImageSize,
    /// `![[path]]` syntax rather than `![alt](path)`
    pub is_wiki_link: bool,
}

/// Sizing policy of an image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "lowercase")]
pub enum ImageSize {
    /// Renderer decides
    #[default]
    Auto,
    /// Fixed width, height follows aspect ratio (`|300`)
    Width { width: u32 },
    /// Fixed width and height (`|300x200`)
    Exact { width: u32, height: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_element() {
        let el = SlideElement::heading(2, "Overview", "## Overview");
        assert_eq!(el.element_type, ElementType::Heading);
        assert_eq!(el.level, Some(2));
        assert!(el.visible);
        assert!(el.is_heading_level(2));
        assert!(!el.is_heading_level(3));
    }

    #[test]
    fn test_column_clamp() {
        let el = SlideElement::paragraph("text", "text").with_column(4);
        assert_eq!(el.column_index, Some(2));

        let mut el = el;
        el.set_column(None);
        assert_eq!(el.column_index, None);
    }

    #[test]
    fn test_first_line() {
        let el = SlideElement::new(ElementType::List, "  - one\n- two", "- one\n- two");
        assert_eq!(el.first_line(), "- one");
    }

    #[test]
    fn test_element_serializes_camel_case() {
        let el = SlideElement::paragraph("Hello", "Hello").with_column(1);
        let json = serde_json::to_value(&el).unwrap();

        assert_eq!(json["type"], "paragraph");
        assert_eq!(json["columnIndex"], 1);
        assert!(json.get("level").is_none());
        assert!(json.get("imageData").is_none());
    }

    #[test]
    fn test_image_data_serialization() {
        let data = ImageData {
            src: "img.png".to_string(),
            alt: None,
            size: ImageSize::Exact {
                width: 100,
                height: 200,
            },
            is_wiki_link: true,
        };
        let json = serde_json::to_value(&data).unwrap();

        assert_eq!(json["isWikiLink"], true);
        assert_eq!(json["size"]["policy"], "exact");
        assert_eq!(json["size"]["height"], 200);
    }

    #[test]
    fn test_text_flow_types() {
        assert!(ElementType::Paragraph.is_text_flow());
        assert!(ElementType::Blockquote.is_text_flow());
        assert!(!ElementType::Heading.is_text_flow());
        assert!(!ElementType::Image.is_text_flow());
    }
}
