//! Psyche Store - questionnaire rows and cached derivations
//!
//! The questionnaire side is append-only: every submission is a new row
//! and the latest row per `(user, layer)` is the current one. The
//! derivation side holds one [`DerivationRecord`] per user, replaced
//! wholesale on every write.
//!
//! Backends:
//! - [`SqliteStore`]: SQLite via sqlx
//! - [`MemoryStore`]: process-local maps for development and tests

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod memory;
pub mod store;
pub mod traits;
pub mod types;

pub use error::{Error, Result};
pub use memory::MemoryStore;
pub use store::{default_data_dir, default_db_path, SqliteStore};
pub use traits::{DerivationStore, QuestionnaireStore};
pub use types::{DerivationRecord, QuestionnaireSubmission};
