//! Error types for questionnaire and derivation storage.

/// Errors that can occur in storage operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// SQLite database error
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Serialization / deserialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A stored derivation record could not be decoded
    #[error("corrupt derivation record for {user_id}: {message}")]
    CorruptRecord {
        /// Owner of the record
        user_id: String,
        /// Decoder message
        message: String,
    },

    /// Unrecognised persona layer tag in a stored row
    #[error("invalid layer in store: {0}")]
    InvalidLayer(#[from] psyche_calc::Error),

    /// General internal error
    #[error("{0}")]
    Internal(String),
}

/// Convenience Result type.
pub type Result<T> = std::result::Result<T, Error>;
