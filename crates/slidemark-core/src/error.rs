//! Error types for slidemark settings.
//!
//! Parsing and diffing never fail; only loading configuration can.

use thiserror::Error;

/// Result type for slidemark operations
pub type Result<T> = std::result::Result<T, SlidemarkError>;

/// Errors that can occur while loading slidemark settings
#[derive(Error, Debug)]
pub enum SlidemarkError {
    /// Settings are syntactically valid but semantically wrong
    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    /// Unknown content mode name
    #[error("Unknown content mode '{value}': expected notes-by-default or visible-by-default")]
    InvalidContentMode { value: String },

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl SlidemarkError {
    /// Create an invalid configuration error
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }

    /// Create an invalid content mode error
    pub fn invalid_content_mode(value: impl Into<String>) -> Self {
        Self::InvalidContentMode {
            value: value.into(),
        }
    }

    /// Get the error code for diagnostics
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidConfig { .. } => "SM001",
            Self::InvalidContentMode { .. } => "SM002",
            Self::Toml(_) => "SM003",
        }
    }
}
