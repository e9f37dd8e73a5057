//! Presentation root and frontmatter definitions
//!
//! This module defines the top-level presentation structure and the
//! document-level settings decoded from the leading frontmatter block.

use serde::{Deserialize, Serialize};

use crate::slide::Slide;

/// A complete parsed presentation
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Presentation {
    /// Document-level settings
    pub frontmatter: PresentationFrontmatter,
    /// Non-empty slides in document order
    pub slides: Vec<Slide>,
    /// Source text the presentation was parsed from
    pub source: String,
}

impl Presentation {
    /// Create an empty presentation
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of slides
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// Check if the presentation has no slides
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// Slides that take part in normal flow (not marked hidden)
    pub fn visible_slides(&self) -> impl Iterator<Item = &Slide> {
        self.slides.iter().filter(|s| !s.is_hidden())
    }

    /// Position in `slides` of the slide showing source segment `segment`.
    ///
    /// Segments dropped as empty map to the closest preceding slide, so a
    /// cursor in a blank segment still selects something sensible.
    pub fn slide_for_segment(&self, segment: usize) -> Option<usize> {
        match self.slides.binary_search_by_key(&segment, |s| s.index) {
            Ok(pos) => Some(pos),
            Err(0) => None,
            Err(pos) => Some(pos - 1),
        }
    }

    /// Content mode declared by the document, if any
    pub fn content_mode(&self) -> Option<ContentMode> {
        self.frontmatter.content_mode
    }
}

/// Strategy deciding which lines are slide content and which are notes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContentMode {
    /// Only headings, indented lines and block syntax are visible
    #[default]
    NotesByDefault,
    /// Everything is visible until a `notes:` line
    VisibleByDefault,
}

impl ContentMode {
    /// Parse a mode name (`notes-by-default`, `visible-by-default`, or short forms)
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "notes-by-default" | "notes" => Some(Self::NotesByDefault),
            "visible-by-default" | "visible" => Some(Self::VisibleByDefault),
            _ => None,
        }
    }

    /// Get the mode name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotesByDefault => "notes-by-default",
            Self::VisibleByDefault => "visible-by-default",
        }
    }
}

/// Document-level settings from the frontmatter block
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PresentationFrontmatter {
    // Document
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,

    // Theme
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    /// `light`, `dark` or `system`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    /// e.g. `16:9`, `4:3`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code_theme: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_mode: Option<ContentMode>,

    // Typography
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading_font: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_font: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code_font: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading_weight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_height: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paragraph_spacing: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading_uppercase: Option<bool>,

    // Colours
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accent_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub light_background: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dark_background: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub light_text_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dark_text_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub light_title_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dark_title_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub light_link_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dark_link_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub light_code_background: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dark_code_background: Option<String>,
    /// Default background for every slide
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,

    // Chrome
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slide_numbers: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress_bar: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_align: Option<String>,

    // Behaviour
    #[serde(skip_serializing_if = "Option::is_none")]
    pub incremental_lists: Option<bool>,
    /// `false` turns off column auto-detection for the whole document
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_columns: Option<bool>,
}

impl PresentationFrontmatter {
    /// Check if no field is set
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Column auto-detection is on unless explicitly disabled
    pub fn auto_columns_enabled(&self) -> bool {
        self.auto_columns.unwrap_or(true)
    }
}
