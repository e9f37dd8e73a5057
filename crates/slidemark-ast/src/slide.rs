//! Slide and per-slide metadata definitions
//!
//! A slide is one segment of the presentation source: its metadata block,
//! the visible elements parsed from it, and its speaker notes.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::element::SlideElement;

/// A single slide of a presentation
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slide {
    /// Position of the segment in the source, before empty slides are dropped
    pub index: usize,
    /// Per-slide overrides (layout is resolved after parsing)
    pub metadata: SlideMetadata,
    /// Visible content in document order
    pub elements: Vec<SlideElement>,
    /// Speaker-note lines
    pub notes: Vec<String>,
    /// Raw segment text, metadata included
    pub raw_content: String,
}

impl Slide {
    /// Create an empty slide at a source position
    pub fn new(index: usize) -> Self {
        Self {
            index,
            ..Default::default()
        }
    }

    /// Check if the slide produced anything to show or say
    pub fn has_content(&self) -> bool {
        !self.elements.is_empty() || !self.notes.is_empty()
    }

    /// Check if any element carries a column index
    pub fn has_columns(&self) -> bool {
        self.elements.iter().any(|e| e.column_index.is_some())
    }

    /// Number of distinct columns used by the slide's elements
    pub fn column_count(&self) -> usize {
        self.elements
            .iter()
            .filter_map(|e| e.column_index)
            .collect::<BTreeSet<_>>()
            .len()
    }

    /// Text of the first heading, if any
    pub fn title(&self) -> Option<&str> {
        self.elements
            .iter()
            .find(|e| e.level.is_some())
            .map(|e| e.content.as_str())
    }

    /// Resolved layout, `default` when unset
    pub fn layout(&self) -> SlideLayout {
        self.metadata.layout.clone().unwrap_or_default()
    }

    /// Check if the slide is excluded from normal flow
    pub fn is_hidden(&self) -> bool {
        self.metadata.hidden
    }
}

/// Per-slide overrides from the leading `key: value` block
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideMetadata {
    /// Layout tag (explicit, or detected when absent in the source)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<SlideLayout>,
    /// Background image or colour
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    /// Background opacity in 0..=1
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_opacity: Option<f32>,
    /// Colour mode override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<SlideMode>,
    /// Extra CSS class
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    /// Background filter (e.g. `blur`, `grayscale`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_filter: Option<String>,
    /// `(hidden)` marker: slide is skipped when presenting and counting
    #[serde(default, skip_serializing_if = "is_false")]
    pub hidden: bool,
    /// `no-autocolumn` modifier: never split the slide into columns
    #[serde(default, skip_serializing_if = "is_false")]
    pub no_autocolumn: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Colour mode of a slide
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlideMode {
    Light,
    Dark,
}

impl SlideMode {
    /// Parse a mode name, case-insensitively
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }
}

/// Layout tag of a slide
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SlideLayout {
    /// Single flow, columns auto-detected
    #[default]
    Default,
    /// Large centred heading
    Title,
    /// Section divider
    Section,
    /// Image fills the slide
    FullImage,
    /// Image on one half, text on the other
    HalfImage,
    /// Two explicit columns
    TwoColumn,
    /// Three explicit columns
    ThreeColumn,
    /// Explicit columns, count from content
    Columns,
    /// Any other name, passed through to the renderer
    Other(String),
}

impl SlideLayout {
    /// Parse a layout name
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "default" => Self::Default,
            "title" => Self::Title,
            "section" => Self::Section,
            "full-image" => Self::FullImage,
            "half-image" => Self::HalfImage,
            "two-column" | "two-columns" => Self::TwoColumn,
            "three-column" | "three-columns" => Self::ThreeColumn,
            "columns" => Self::Columns,
            other => Self::Other(other.to_string()),
        }
    }

    /// Get the layout name
    pub fn as_str(&self) -> &str {
        match self {
            Self::Default => "default",
            Self::Title => "title",
            Self::Section => "section",
            Self::FullImage => "full-image",
            Self::HalfImage => "half-image",
            Self::TwoColumn => "two-column",
            Self::ThreeColumn => "three-column",
            Self::Columns => "columns",
            Self::Other(name) => name,
        }
    }

    /// Layouts that declare their columns explicitly
    pub fn is_column_layout(&self) -> bool {
        matches!(self, Self::TwoColumn | Self::ThreeColumn | Self::Columns)
    }
}

impl fmt::Display for SlideLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for SlideLayout {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<SlideLayout> for String {
    fn from(value: SlideLayout) -> Self {
        value.as_str().to_string()
    }
}
