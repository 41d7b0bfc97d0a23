use super::SqliteStore;
use crate::error::{Error, Result};
use crate::traits::{DerivationStore, QuestionnaireStore};
use crate::types::{DerivationRecord, QuestionnaireSubmission};
use chrono::{DateTime, SecondsFormat, Utc};
use psyche_calc::{PersonaLayer, RawPersonaAnswers};
use sqlx::Row;
use tracing::debug;

fn timestamp(at: &DateTime<Utc>) -> String {
    // Fixed precision keeps the text column sortable
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(s: &str) -> std::result::Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(s).map(|dt| dt.with_timezone(&Utc))
}

impl SqliteStore {
    // ── Questionnaire rows ──────────────────────────────────────

    /// Every submission for a user and layer, newest first.
    pub async fn submission_history(
        &self,
        user_id: &str,
        layer: PersonaLayer,
    ) -> Result<Vec<QuestionnaireSubmission>> {
        let rows = sqlx::query(
            "SELECT id, user_id, layer, answers, submitted_at
             FROM questionnaire_rows WHERE user_id = ?1 AND layer = ?2
             ORDER BY submitted_at DESC, rowid DESC",
        )
        .bind(user_id)
        .bind(layer.as_str())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::row_to_submission).collect()
    }

    pub(crate) fn row_to_submission(row: &sqlx::sqlite::SqliteRow) -> Result<QuestionnaireSubmission> {
        let id_str: String = row.try_get("id")?;
        let layer_str: String = row.try_get("layer")?;
        let answers_str: String = row.try_get("answers")?;
        let submitted_str: String = row.try_get("submitted_at")?;
        Ok(QuestionnaireSubmission {
            id: id_str
                .parse()
                .map_err(|e| Error::Internal(format!("invalid row id {id_str}: {e}")))?,
            user_id: row.try_get("user_id")?,
            layer: layer_str.parse()?,
            answers: serde_json::from_str(&answers_str)?,
            submitted_at: parse_timestamp(&submitted_str).map_err(|e| {
                Error::Internal(format!("invalid submitted_at {submitted_str:?} on row {id_str}: {e}"))
            })?,
        })
    }

    // ── Derivation records ──────────────────────────────────────

    pub(crate) fn row_to_record(row: &sqlx::sqlite::SqliteRow) -> Result<DerivationRecord> {
        let user_id: String = row.try_get("user_id")?;
        let vectors: String = row.try_get("vectors")?;
        let flow: String = row.try_get("flow")?;
        let axes: String = row.try_get("axes")?;
        let computed_str: String = row.try_get("computed_at")?;

        let corrupt = |e: &dyn std::fmt::Display| Error::CorruptRecord {
            user_id: user_id.clone(),
            message: e.to_string(),
        };

        Ok(DerivationRecord {
            vectors: serde_json::from_str(&vectors).map_err(|e| corrupt(&e))?,
            flow: serde_json::from_str(&flow).map_err(|e| corrupt(&e))?,
            axes: serde_json::from_str(&axes).map_err(|e| corrupt(&e))?,
            fingerprint: row.try_get("fingerprint")?,
            computed_at: parse_timestamp(&computed_str).map_err(|e| corrupt(&e))?,
            user_id: user_id.clone(),
        })
    }

    /// Number of users with a cached derivation.
    pub async fn derivation_count(&self) -> Result<usize> {
        let row = sqlx::query("SELECT COUNT(*) as cnt FROM derivation_records")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.try_get::<i64, _>("cnt")? as usize)
    }
}

#[async_trait::async_trait]
impl QuestionnaireStore for SqliteStore {
    async fn get_raw_answers(
        &self,
        user_id: &str,
        layer: PersonaLayer,
    ) -> Result<Option<RawPersonaAnswers>> {
        let row = sqlx::query(
            "SELECT answers FROM questionnaire_rows
             WHERE user_id = ?1 AND layer = ?2
             ORDER BY submitted_at DESC, rowid DESC
             LIMIT 1",
        )
        .bind(user_id)
        .bind(layer.as_str())
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => {
                let answers: String = row.try_get("answers")?;
                Ok(Some(serde_json::from_str(&answers)?))
            }
            None => Ok(None),
        }
    }

    async fn submit(&self, submission: &QuestionnaireSubmission) -> Result<()> {
        let answers = serde_json::to_string(&submission.answers)?;
        sqlx::query(
            "INSERT INTO questionnaire_rows (id, user_id, layer, answers, submitted_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(submission.id.to_string())
        .bind(&submission.user_id)
        .bind(submission.layer.as_str())
        .bind(answers)
        .bind(timestamp(&submission.submitted_at))
        .execute(&self.pool)
        .await?;

        debug!(
            user_id = %submission.user_id,
            layer = %submission.layer,
            answers = submission.answers.len(),
            "Questionnaire row stored"
        );
        Ok(())
    }

    async fn submitted_layers(&self, user_id: &str) -> Result<Vec<PersonaLayer>> {
        let rows = sqlx::query("SELECT DISTINCT layer FROM questionnaire_rows WHERE user_id = ?1")
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        let mut layers = rows
            .iter()
            .map(|r| -> Result<PersonaLayer> {
                let tag: String = r.try_get("layer")?;
                Ok(tag.parse::<PersonaLayer>()?)
            })
            .collect::<Result<Vec<_>>>()?;
        layers.sort();
        Ok(layers)
    }

    fn name(&self) -> &str {
        "sqlite"
    }
}

#[async_trait::async_trait]
impl DerivationStore for SqliteStore {
    async fn get_derivation_record(&self, user_id: &str) -> Result<Option<DerivationRecord>> {
        let row = sqlx::query(
            "SELECT user_id, fingerprint, vectors, flow, axes, computed_at
             FROM derivation_records WHERE user_id = ?1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(Self::row_to_record).transpose()
    }

    async fn put_derivation_record(&self, record: &DerivationRecord) -> Result<()> {
        sqlx::query(
            "INSERT INTO derivation_records
             (user_id, fingerprint, vectors, flow, axes, computed_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             ON CONFLICT(user_id) DO UPDATE SET
                fingerprint = excluded.fingerprint,
                vectors = excluded.vectors,
                flow = excluded.flow,
                axes = excluded.axes,
                computed_at = excluded.computed_at",
        )
        .bind(&record.user_id)
        .bind(&record.fingerprint)
        .bind(serde_json::to_string(&record.vectors)?)
        .bind(serde_json::to_string(&record.flow)?)
        .bind(serde_json::to_string(&record.axes)?)
        .bind(timestamp(&record.computed_at))
        .execute(&self.pool)
        .await?;

        debug!(user_id = %record.user_id, fingerprint = %record.fingerprint, "Derivation record stored");
        Ok(())
    }

    async fn delete_derivation_record(&self, user_id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM derivation_records WHERE user_id = ?1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    fn name(&self) -> &str {
        "sqlite"
    }
}
