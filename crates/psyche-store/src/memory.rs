//! In-memory storage backend (development and tests).

use crate::error::Result;
use crate::traits::{DerivationStore, QuestionnaireStore};
use crate::types::{DerivationRecord, QuestionnaireSubmission};
use async_trait::async_trait;
use psyche_calc::{PersonaLayer, RawPersonaAnswers};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// In-memory store implementing both storage traits.
///
/// Data is lost when the process exits.
#[derive(Clone, Default)]
pub struct MemoryStore {
    rows: Arc<RwLock<HashMap<(String, PersonaLayer), Vec<QuestionnaireSubmission>>>>,
    records: Arc<RwLock<HashMap<String, DerivationRecord>>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached derivations.
    pub async fn derivation_count(&self) -> usize {
        self.records.read().await.len()
    }
}

#[async_trait]
impl QuestionnaireStore for MemoryStore {
    async fn get_raw_answers(
        &self,
        user_id: &str,
        layer: PersonaLayer,
    ) -> Result<Option<RawPersonaAnswers>> {
        let rows = self.rows.read().await;
        // max_by_key returns the last maximum, so equal timestamps favour the later insert
        Ok(rows
            .get(&(user_id.to_string(), layer))
            .and_then(|history| history.iter().max_by_key(|s| s.submitted_at))
            .map(|s| s.answers.clone()))
    }

    async fn submit(&self, submission: &QuestionnaireSubmission) -> Result<()> {
        let mut rows = self.rows.write().await;
        rows.entry((submission.user_id.clone(), submission.layer))
            .or_default()
            .push(submission.clone());
        debug!(user_id = %submission.user_id, layer = %submission.layer, "Questionnaire row stored in memory");
        Ok(())
    }

    async fn submitted_layers(&self, user_id: &str) -> Result<Vec<PersonaLayer>> {
        let rows = self.rows.read().await;
        Ok(PersonaLayer::ALL
            .into_iter()
            .filter(|layer| rows.contains_key(&(user_id.to_string(), *layer)))
            .collect())
    }

    fn name(&self) -> &str {
        "memory"
    }
}

#[async_trait]
impl DerivationStore for MemoryStore {
    async fn get_derivation_record(&self, user_id: &str) -> Result<Option<DerivationRecord>> {
        Ok(self.records.read().await.get(user_id).cloned())
    }

    async fn put_derivation_record(&self, record: &DerivationRecord) -> Result<()> {
        self.records
            .write()
            .await
            .insert(record.user_id.clone(), record.clone());
        Ok(())
    }

    async fn delete_derivation_record(&self, user_id: &str) -> Result<bool> {
        Ok(self.records.write().await.remove(user_id).is_some())
    }

    fn name(&self) -> &str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    #[tokio::test]
    async fn test_latest_submission_wins() {
        let store = MemoryStore::new();
        let mut first = QuestionnaireSubmission::new(
            "u1",
            PersonaLayer::Innate,
            RawPersonaAnswers::uniform(42, 2),
        );
        first.submitted_at = Utc::now() - Duration::minutes(5);
        let second = QuestionnaireSubmission::new(
            "u1",
            PersonaLayer::Innate,
            RawPersonaAnswers::uniform(42, 4),
        );
        // insert out of order
        store.submit(&second).await.unwrap();
        store.submit(&first).await.unwrap();

        let got = store
            .get_raw_answers("u1", PersonaLayer::Innate)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(got, second.answers);
    }

    #[tokio::test]
    async fn test_missing_layer_is_none() {
        let store = MemoryStore::new();
        store
            .submit(&QuestionnaireSubmission::new(
                "u1",
                PersonaLayer::Surface,
                RawPersonaAnswers::uniform(42, 3),
            ))
            .await
            .unwrap();

        assert!(store
            .get_raw_answers("u1", PersonaLayer::Imposed)
            .await
            .unwrap()
            .is_none());
        assert_eq!(
            store.submitted_layers("u1").await.unwrap(),
            vec![PersonaLayer::Surface]
        );
        assert!(store.submitted_layers("u2").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_record_overwrite_and_delete() {
        let store = MemoryStore::new();
        let mut record = DerivationRecord {
            user_id: "u1".into(),
            vectors: Default::default(),
            flow: Default::default(),
            axes: Vec::new(),
            fingerprint: "a".into(),
            computed_at: Utc::now(),
        };
        store.put_derivation_record(&record).await.unwrap();
        record.fingerprint = "b".into();
        store.put_derivation_record(&record).await.unwrap();

        assert_eq!(store.derivation_count().await, 1);
        let got = store.get_derivation_record("u1").await.unwrap().unwrap();
        assert_eq!(got.fingerprint, "b");

        assert!(store.delete_derivation_record("u1").await.unwrap());
        assert!(!store.delete_derivation_record("u1").await.unwrap());
        assert!(store.get_derivation_record("u1").await.unwrap().is_none());
    }
}
