//! Configuration Settings
//!
//! Host-level defaults loaded from `slidemark.toml`:
//!
//! ```toml
//! [parser]
//! default_content_mode = "notes-by-default"
//!
//! [diff]
//! max_structural_changes = 3
//! ```
//!
//! Every section is optional. A document's own `content-mode` frontmatter
//! key always wins over the configured default.

use serde::{Deserialize, Serialize};
use slidemark_ast::ContentMode;

use crate::diff::{DiffOptions, DEFAULT_MAX_STRUCTURAL_CHANGES};
use crate::error::{Result, SlidemarkError};
use crate::parser::ParseOptions;

/// Default file name looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "slidemark.toml";

/// Top-level settings structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    /// Parser settings
    pub parser: ParserSettings,
    /// Diff engine settings
    pub diff: DiffSettings,
}

impl Settings {
    /// Parse and validate settings from a TOML string
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        let settings: Self = toml::from_str(toml_str)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check values that TOML typing alone cannot
    pub fn validate(&self) -> Result<()> {
        self.parser.content_mode()?;
        DiffOptions::with_max_structural_changes(self.diff.max_structural_changes)?;
        Ok(())
    }

    /// Parser options derived from these settings
    pub fn parse_options(&self) -> Result<ParseOptions> {
        Ok(ParseOptions::with_content_mode(self.parser.content_mode()?))
    }

    /// Diff options derived from these settings
    pub fn diff_options(&self) -> DiffOptions {
        DiffOptions {
            max_structural_changes: self.diff.max_structural_changes,
        }
    }
}

/// Parser configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserSettings {
    /// `notes-by-default` or `visible-by-default` (short forms accepted)
    pub default_content_mode: String,
}

impl ParserSettings {
    /// Decode the configured content mode
    pub fn content_mode(&self) -> Result<ContentMode> {
        parse_content_mode(&self.default_content_mode)
    }
}

impl Default for ParserSettings {
    fn default() -> Self {
        Self {
            default_content_mode: ContentMode::default().as_str().to_string(),
        }
    }
}

/// Diff engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffSettings {
    /// Largest number of inserted plus removed slides handled incrementally
    pub max_structural_changes: usize,
}

impl Default for DiffSettings {
    fn default() -> Self {
        Self {
            max_structural_changes: DEFAULT_MAX_STRUCTURAL_CHANGES,
        }
    }
}

/// Decode a content mode name, as given in settings or on a command line
pub fn parse_content_mode(value: &str) -> Result<ContentMode> {
    ContentMode::parse(value).ok_or_else(|| SlidemarkError::invalid_content_mode(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.parser.default_content_mode, "notes-by-default");
        assert_eq!(settings.diff.max_structural_changes, 3);
        assert_eq!(
            settings.parse_options().unwrap().default_content_mode,
            ContentMode::NotesByDefault
        );
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let settings = Settings::from_toml_str("").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_full_toml() {
        let toml = r#"
[parser]
default_content_mode = "visible"

[diff]
max_structural_changes = 5
"#;
        let settings = Settings::from_toml_str(toml).unwrap();

        assert_eq!(
            settings.parse_options().unwrap().default_content_mode,
            ContentMode::VisibleByDefault
        );
        assert_eq!(settings.diff_options().max_structural_changes, 5);
    }

    #[test]
    fn test_partial_section() {
        let settings = Settings::from_toml_str("[diff]\nmax_structural_changes = 1\n").unwrap();
        assert_eq!(settings.parser, ParserSettings::default());
        assert_eq!(settings.diff.max_structural_changes, 1);
    }

    #[test]
    fn test_unknown_content_mode_rejected() {
        let err = Settings::from_toml_str("[parser]\ndefault_content_mode = \"slides\"\n")
            .unwrap_err();
        assert_eq!(err.code(), "SM002");
    }

    #[test]
    fn test_zero_threshold_rejected() {
        let err = Settings::from_toml_str("[diff]\nmax_structural_changes = 0\n").unwrap_err();
        assert_eq!(err.code(), "SM001");
    }

    #[test]
    fn test_malformed_toml() {
        let err = Settings::from_toml_str("[parser\n").unwrap_err();
        assert_eq!(err.code(), "SM003");
    }

    #[test]
    fn test_parse_content_mode() {
        assert_eq!(
            parse_content_mode("visible-by-default").unwrap(),
            ContentMode::VisibleByDefault
        );
        assert_eq!(parse_content_mode("notes").unwrap(), ContentMode::NotesByDefault);
        assert!(parse_content_mode("both").is_err());
    }
}
