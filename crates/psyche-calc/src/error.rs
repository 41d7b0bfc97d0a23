//! Error types for the persona calculators.
//!
//! The calculators themselves are total; these errors only come from the
//! opt-in strict answer validation and from parsing names.

use crate::layer::PersonaLayer;

/// Errors that can occur while validating or parsing calculator inputs.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A questionnaire answer is missing, non-numeric or outside 1–5 (strict mode only)
    #[error("malformed answer in {layer} questionnaire at q{question}: {value}")]
    MalformedAnswer {
        /// Layer the row belongs to
        layer: PersonaLayer,
        /// 1-based question index
        question: u16,
        /// Raw value as it appeared in the row
        value: String,
    },

    /// Unrecognised persona layer tag
    #[error("unknown persona layer: {0}")]
    UnknownLayer(String),

    /// Unrecognised drive name
    #[error("unknown drive: {0}")]
    UnknownDrive(String),
}

/// Convenience Result type.
pub type Result<T> = std::result::Result<T, Error>;
