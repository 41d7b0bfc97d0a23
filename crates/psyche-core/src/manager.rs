//! Derivation Cache Manager: compute once, reuse until stale.
//!
//! Per user: `Missing → Fresh → Stale → Fresh (recomputed)`. Freshness is
//! decided only by comparing the stored fingerprint with the fingerprint of
//! the user's current questionnaire rows.
//!
//! Concurrent calls for the same user are not coordinated: both may
//! recompute and the later write wins. Writes are idempotent for equal
//! inputs.

use crate::config::EngineConfig;
use crate::error::{Result, UserFriendlyError};
use crate::fingerprint::fingerprint;
use chrono::Utc;
use psyche_calc::{
    classify_axes, compute_flow, compute_persona_vectors, PersonaLayer, RawPersonaAnswers,
};
use psyche_store::{DerivationRecord, DerivationStore, QuestionnaireStore};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Result of [`DerivationManager::ensure_derived`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DeriveOutcome {
    /// At least one questionnaire was never submitted; nothing computed
    MissingTests {
        /// Missing layers in canonical order
        missing: Vec<PersonaLayer>,
    },
    /// Stored record matched the current inputs
    Cached {
        /// The reused record
        record: DerivationRecord,
    },
    /// Inputs changed (or no record existed); recomputed and stored
    Recomputed {
        /// The fresh record
        record: DerivationRecord,
    },
    /// Recomputed, but the store rejected the write
    UpsertFailed {
        /// The fresh, unpersisted record
        record: DerivationRecord,
        /// Storage error message
        message: String,
    },
}

impl DeriveOutcome {
    /// Outcome tag as reported to callers.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingTests { .. } => "missing_tests",
            Self::Cached { .. } => "cached",
            Self::Recomputed { .. } => "recomputed",
            Self::UpsertFailed { .. } => "upsert_failed",
        }
    }

    /// The usable record, if the outcome carries one.
    #[must_use]
    pub fn record(&self) -> Option<&DerivationRecord> {
        match self {
            Self::MissingTests { .. } => None,
            Self::Cached { record }
            | Self::Recomputed { record }
            | Self::UpsertFailed { record, .. } => Some(record),
        }
    }

    /// Consume into the record, if any.
    #[must_use]
    pub fn into_record(self) -> Option<DerivationRecord> {
        match self {
            Self::MissingTests { .. } => None,
            Self::Cached { record }
            | Self::Recomputed { record }
            | Self::UpsertFailed { record, .. } => Some(record),
        }
    }

    /// Whether a computation ran in this call.
    #[must_use]
    pub fn recomputed(&self) -> bool {
        matches!(self, Self::Recomputed { .. } | Self::UpsertFailed { .. })
    }
}

impl UserFriendlyError for DeriveOutcome {
    fn user_message(&self) -> String {
        match self {
            Self::MissingTests { missing } => {
                let names: Vec<_> = missing.iter().map(|l| l.as_str()).collect();
                format!("Please complete these tests first: {}.", names.join(", "))
            }
            _ => "Your profile is up to date.".to_string(),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            Self::MissingTests { .. } => {
                Some("Reports unlock once all three questionnaires are submitted.".to_string())
            }
            _ => None,
        }
    }
}

/// Derive a record from three rows. Pure apart from the timestamp.
#[must_use]
pub fn derive_record(
    user_id: &str,
    innate: &RawPersonaAnswers,
    surface: &RawPersonaAnswers,
    imposed: &RawPersonaAnswers,
    fingerprint: String,
) -> DerivationRecord {
    let vectors = compute_persona_vectors(innate, surface, imposed);
    DerivationRecord {
        user_id: user_id.to_string(),
        flow: compute_flow(&vectors),
        axes: classify_axes(innate, surface),
        vectors,
        fingerprint,
        computed_at: Utc::now(),
    }
}

/// Orchestrates loading, fingerprinting, derivation and persistence.
#[derive(Clone)]
pub struct DerivationManager {
    questionnaires: Arc<dyn QuestionnaireStore>,
    derivations: Arc<dyn DerivationStore>,
    config: EngineConfig,
}

impl DerivationManager {
    /// Create a manager over the two stores.
    pub fn new(
        questionnaires: Arc<dyn QuestionnaireStore>,
        derivations: Arc<dyn DerivationStore>,
        config: EngineConfig,
    ) -> Self {
        Self {
            questionnaires,
            derivations,
            config,
        }
    }

    /// Engine settings in use.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Make sure the user's derivation is fresh.
    ///
    /// Store reads that fail are returned as errors. A failed write is not an
    /// error: the fresh record comes back as [`DeriveOutcome::UpsertFailed`].
    #[instrument(skip_all, fields(user_id = %user_id))]
    pub async fn ensure_derived(&self, user_id: &str) -> Result<DeriveOutcome> {
        let mut rows = Vec::with_capacity(PersonaLayer::ALL.len());
        let mut missing = Vec::new();
        for layer in PersonaLayer::ALL {
            match self.questionnaires.get_raw_answers(user_id, layer).await? {
                Some(row) => rows.push(row),
                None => missing.push(layer),
            }
        }

        let [innate, surface, imposed] = match <[RawPersonaAnswers; 3]>::try_from(rows) {
            Ok(rows) if missing.is_empty() => rows,
            _ => {
                info!(outcome = "missing_tests", ?missing, "Questionnaires incomplete");
                return Ok(DeriveOutcome::MissingTests { missing });
            }
        };

        if self.config.strict_answers {
            innate.validate_strict(PersonaLayer::Innate)?;
            surface.validate_strict(PersonaLayer::Surface)?;
            imposed.validate_strict(PersonaLayer::Imposed)?;
        }

        let current = fingerprint(&innate, &surface, &imposed)?;

        let stored = match self.derivations.get_derivation_record(user_id).await {
            Ok(stored) => stored,
            Err(psyche_store::Error::CorruptRecord { message, .. }) => {
                warn!(%message, "Stored derivation is unreadable; recomputing");
                None
            }
            Err(e) => return Err(e.into()),
        };

        if let Some(record) = stored {
            if record.fingerprint == current {
                debug!(outcome = "cached", fingerprint = %current, "Derivation is fresh");
                return Ok(DeriveOutcome::Cached { record });
            }
            debug!(
                stale = %record.fingerprint,
                fingerprint = %current,
                "Derivation is stale"
            );
        }

        let record = derive_record(user_id, &innate, &surface, &imposed, current);

        match self.derivations.put_derivation_record(&record).await {
            Ok(()) => {
                info!(outcome = "recomputed", fingerprint = %record.fingerprint, "Derivation stored");
                Ok(DeriveOutcome::Recomputed { record })
            }
            Err(e) => {
                warn!(outcome = "upsert_failed", error = %e, "Failed to store derivation");
                Ok(DeriveOutcome::UpsertFailed {
                    record,
                    message: e.to_string(),
                })
            }
        }
    }

    /// Drop the user's cached record so the next call recomputes.
    pub async fn invalidate(&self, user_id: &str) -> Result<bool> {
        Ok(self.derivations.delete_derivation_record(user_id).await?)
    }
}
