//! Stored entities.

use chrono::{DateTime, Utc};
use psyche_calc::{AxisResult, FlowModel, PersonaLayer, PersonaVectors, RawPersonaAnswers};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One submitted questionnaire row.
///
/// Rows are never edited; a resubmission is a new row and the latest one per
/// `(user_id, layer)` wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionnaireSubmission {
    /// Row id
    pub id: Uuid,
    /// Owner
    pub user_id: String,
    /// Questionnaire the row answers
    pub layer: PersonaLayer,
    /// Answers exactly as submitted
    pub answers: RawPersonaAnswers,
    /// Submission time
    pub submitted_at: DateTime<Utc>,
}

impl QuestionnaireSubmission {
    /// New submission stamped now.
    #[must_use]
    pub fn new(user_id: impl Into<String>, layer: PersonaLayer, answers: RawPersonaAnswers) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.into(),
            layer,
            answers,
            submitted_at: Utc::now(),
        }
    }
}

/// The cached derivation of one user.
///
/// Valid only while `fingerprint` equals the fingerprint of the user's
/// current three questionnaire rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivationRecord {
    /// Owner
    pub user_id: String,
    /// Innate, surface and imposed drive vectors
    pub vectors: PersonaVectors,
    /// Cross-drive flow model
    pub flow: FlowModel,
    /// Innate vs. surface axis classification, in axis order
    pub axes: Vec<AxisResult>,
    /// Content hash of the raw rows this was derived from
    pub fingerprint: String,
    /// When the derivation ran
    pub computed_at: DateTime<Utc>,
}
