//! Error types for Pathweaver
//!
//! The extraction, mapping and journey stages never fail: they degrade to
//! well-formed empty records. These errors cover the fallible edges around
//! them (artifact storage, configuration, loading external annotations).

use thiserror::Error;

/// Result type alias using Pathweaver's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Pathweaver error types with helpful messages and suggestions
#[derive(Error, Debug)]
pub enum Error {
    // Lookup errors (E001-E099)
    #[error("Document '{0}' not found. Run `pathweaver documents` to see all documents.")]
    DocumentNotFound(String),

    #[error("Knowledge map for document '{0}' not found. Run `pathweaver map {0}` to build it.")]
    MapNotFound(String),

    #[error("Journey '{0}' not found.")]
    JourneyNotFound(String),

    #[error("Preferences for user '{0}' not found.")]
    PreferencesNotFound(String),

    // Annotation errors (E100-E199)
    #[error("Text annotation failed: {0}")]
    AnnotationFailed(String),

    // Config errors (E600-E699)
    #[error("Configuration error: {0}")]
    ConfigError(String),

    // Input errors (E800-E899)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // Serialization errors (E900-E999)
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    // Generic errors
    #[error("{0}")]
    Other(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Get error code for this error type
    pub fn code(&self) -> &'static str {
        match self {
            Self::DocumentNotFound(_) => "E001",
            Self::MapNotFound(_) => "E002",
            Self::JourneyNotFound(_) => "E003",
            Self::PreferencesNotFound(_) => "E004",
            Self::AnnotationFailed(_) => "E100",
            Self::ConfigError(_) => "E600",
            Self::InvalidInput(_) => "E800",
            Self::Serialization(_) => "E900",
            Self::Toml(_) => "E901",
            Self::Other(_) | Self::Io(_) => "E9999",
        }
    }

    /// Get suggestion for how to fix this error
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::DocumentNotFound(_) => Some("pathweaver documents".to_string()),
            Self::MapNotFound(id) => Some(format!("pathweaver map {}", id)),
            Self::PreferencesNotFound(user) => {
                Some(format!("pathweaver prefs set {} <key> <value>", user))
            }
            Self::ConfigError(_) => Some("pathweaver config list".to_string()),
            _ => None,
        }
    }
}
