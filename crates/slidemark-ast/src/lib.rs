//! slidemark-ast - Presentation model definitions
//!
//! This crate provides the types produced by the slidemark parser: a
//! [`Presentation`] of ordered [`Slide`]s, each holding typed
//! [`SlideElement`]s, per-slide [`SlideMetadata`] and speaker notes.
//!
//! All types serialize with camelCase field names so JavaScript hosts can
//! consume them directly.

pub mod document;
pub mod element;
pub mod slide;

pub use document::{ContentMode, Presentation, PresentationFrontmatter};
pub use element::{ElementType, ImageData, ImageSize, SlideElement, MAX_COLUMN_INDEX};
pub use slide::{Slide, SlideLayout, SlideMetadata, SlideMode};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
