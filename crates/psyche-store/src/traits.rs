//! Storage traits consumed by the derivation manager.
//!
//! Both SQLite and in-memory backends implement them, and tests substitute
//! mocks to inject failures.

use crate::error::Result;
use crate::types::{DerivationRecord, QuestionnaireSubmission};
use psyche_calc::{PersonaLayer, RawPersonaAnswers};

/// Source of submitted questionnaire rows.
#[async_trait::async_trait]
pub trait QuestionnaireStore: Send + Sync {
    /// Latest row for `(user_id, layer)`, or `None` if the user never
    /// submitted that questionnaire.
    async fn get_raw_answers(
        &self,
        user_id: &str,
        layer: PersonaLayer,
    ) -> Result<Option<RawPersonaAnswers>>;

    /// Record a submission. Earlier rows for the same layer are superseded.
    async fn submit(&self, submission: &QuestionnaireSubmission) -> Result<()>;

    /// Layers the user has submitted at least once, in canonical order.
    async fn submitted_layers(&self, user_id: &str) -> Result<Vec<PersonaLayer>>;

    /// Backend name (for logging)
    fn name(&self) -> &str;
}

/// Persistence for cached derivations, one per user.
#[async_trait::async_trait]
pub trait DerivationStore: Send + Sync {
    /// The user's cached record, if any.
    async fn get_derivation_record(&self, user_id: &str) -> Result<Option<DerivationRecord>>;

    /// Insert or wholesale replace the user's record (last write wins).
    async fn put_derivation_record(&self, record: &DerivationRecord) -> Result<()>;

    /// Drop the user's record. Returns whether one existed.
    async fn delete_derivation_record(&self, user_id: &str) -> Result<bool>;

    /// Backend name (for logging)
    fn name(&self) -> &str;
}
