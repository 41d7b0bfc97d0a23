use super::SqliteStore;
use crate::error::Result;

impl SqliteStore {
    // ── Migrations ──────────────────────────────────────────────

    pub(crate) async fn run_migrations(&self) -> Result<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS questionnaire_rows (
                id           TEXT PRIMARY KEY,
                user_id      TEXT NOT NULL,
                layer        TEXT NOT NULL,
                answers      TEXT NOT NULL,
                submitted_at TEXT NOT NULL
            )",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_rows_user_layer
             ON questionnaire_rows(user_id, layer, submitted_at)",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS derivation_records (
                user_id     TEXT PRIMARY KEY,
                fingerprint TEXT NOT NULL,
                vectors     TEXT NOT NULL,
                flow        TEXT NOT NULL,
                axes        TEXT NOT NULL,
                computed_at TEXT NOT NULL
            )",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
