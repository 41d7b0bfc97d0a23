//! Error types for psyche-core
//!
//! This module provides error types and user-friendly error formatting.

use thiserror::Error;

/// Core error type
#[derive(Debug, Error)]
pub enum Error {
    /// Storage backend failed while reading
    #[error("store error: {0}")]
    Store(#[from] psyche_store::Error),

    /// Calculator input rejected (strict answer mode)
    #[error("calculation error: {0}")]
    Calc(#[from] psyche_calc::Error),

    /// Profession catalog could not be loaded or is invalid
    #[error("catalog error: {0}")]
    Catalog(String),

    /// Invalid configuration
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Serialization failure while fingerprinting
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Message shown when a report cannot be produced for reasons the user
/// cannot fix.
pub const REPORT_UNAVAILABLE: &str = "This report is temporarily unavailable. Please try again later.";

/// Trait for user-friendly error messages
///
/// Report pages never show raw errors; they show one of these instead.
pub trait UserFriendlyError {
    /// Get a user-friendly error message
    fn user_message(&self) -> String;

    /// Get a suggestion for how to fix the error
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for Error {
    fn user_message(&self) -> String {
        match self {
            Error::Calc(psyche_calc::Error::MalformedAnswer { layer, .. }) => {
                format!("Some answers in your {layer} questionnaire could not be read.")
            }
            _ => REPORT_UNAVAILABLE.to_string(),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            Error::Calc(psyche_calc::Error::MalformedAnswer { layer, .. }) => {
                Some(format!("Please retake the {layer} questionnaire."))
            }
            Error::Catalog(_) | Error::Configuration(_) => {
                Some("Check the catalog and engine settings in config/default.toml.".to_string())
            }
            _ => None,
        }
    }
}

/// Format an error for display in the CLI
pub fn format_error_for_cli(error: &impl UserFriendlyError) -> String {
    let mut output = error.user_message();
    if let Some(suggestion) = error.suggestion() {
        output.push_str("\n\n");
        output.push_str(&suggestion);
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use psyche_calc::PersonaLayer;

    #[test]
    fn test_store_failures_hide_details() {
        let err = Error::Store(psyche_store::Error::Internal("disk on fire".into()));
        assert_eq!(err.user_message(), REPORT_UNAVAILABLE);
        assert!(!format_error_for_cli(&err).contains("disk"));
    }

    #[test]
    fn test_malformed_answer_names_layer() {
        let err = Error::Calc(psyche_calc::Error::MalformedAnswer {
            layer: PersonaLayer::Imposed,
            question: 3,
            value: "\"x\"".into(),
        });
        assert!(err.user_message().contains("imposed"));
        assert!(err.suggestion().unwrap().contains("imposed"));
    }
}
