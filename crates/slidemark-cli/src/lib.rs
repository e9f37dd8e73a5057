//! slidemark CLI - Command-line interface library
//!
//! This library provides the CLI functionality for slidemark:
//! - Parse: print the presentation model as a summary or JSON
//! - Outline: one line per slide with layout and columns
//! - Notes: speaker notes grouped by slide
//! - Diff: classify the changes between two versions of a file
//!
//! # Library Usage
//!
//! ```ignore
//! use slidemark_cli::{load_presentation, load_settings, outline_text};
//!
//! let settings = load_settings(None)?;
//! let presentation = load_presentation(&input, None, &settings)?;
//! print!("{}", outline_text(&presentation));
//! ```
//!
//! # Binary Usage
//!
//! ```bash
//! # Print the parsed model as JSON
//! slidemark parse talk.md --format json
//!
//! # Treat plain lines as visible content
//! slidemark outline talk.md --mode visible
//!
//! # Compare two drafts
//! slidemark diff draft-1.md draft-2.md
//! ```

pub mod app;

// Re-export main entry point and types
pub use app::{
    diff_command, diff_files, diff_text, load_presentation, load_settings, notes_command,
    notes_text, outline_command, outline_text, parse_command, summary_text,
};
pub use app::{run_cli, ModeArg, OutputFormat};
