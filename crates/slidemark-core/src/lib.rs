//! slidemark-core - Markdown slides, parsed and diffed
//!
//! Core library for slidemark: turns a Markdown presentation into a
//! [`Presentation`](slidemark_ast::Presentation) model and classifies edits
//! between two parses so a live preview can update only what changed.
//!
//! # Example
//!
//! ```
//! use slidemark_core::{parse, PresentationCache, diff_presentations, DiffOptions};
//!
//! let before = parse("# Intro\n---\n# Details\n\tFirst point");
//! let after = parse("# Intro\n---\n# Details\n\tFirst point, revised");
//!
//! let cache = PresentationCache::build(&before);
//! let outcome = diff_presentations(&cache, &after, &DiffOptions::default());
//!
//! let diff = outcome.slide_diff().expect("incremental");
//! assert_eq!(diff.modified_indices, vec![1]);
//! ```

pub mod config;
pub mod diff;
pub mod elements;
pub mod error;
pub mod frontmatter;
pub mod layout;
pub mod metadata;
pub mod parser;
pub mod splitter;

// Re-export main types and functions
pub use config::{parse_content_mode, Settings};
pub use diff::{
    diff_presentations, DiffKind, DiffOptions, DiffOutcome, DiffTracker, Fingerprint,
    FullRenderReason, PresentationCache, SlideDiff,
};
pub use error::{Result, SlidemarkError};
pub use parser::{parse, parse_presentation, ParseOptions};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
