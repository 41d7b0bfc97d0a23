//! SqliteStore: SQLite persistence for questionnaire rows and derivations.
//!
//! Tables: `questionnaire_rows` (append-only, newest row per layer wins) and
//! `derivation_records` (one row per user, replaced on recompute).

use crate::error::{Error, Result};

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

mod crud;
mod migrations;

#[cfg(test)]
mod tests;

/// SQLite-backed store implementing both storage traits.
#[derive(Clone)]
pub struct SqliteStore {
    pub(crate) pool: SqlitePool,
}

impl SqliteStore {
    /// Open the psyche database file, creating it and its directory if needed.
    pub async fn from_path(db_path: &Path) -> Result<Self> {
        if let Some(dir) = db_path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(|e| {
                Error::Internal(format!("cannot create data directory {}: {e}", dir.display()))
            })?;
        }

        let options = SqliteConnectOptions::new()
            .filename(db_path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        let store = Self::migrated(pool).await?;
        info!(
            path = %db_path.display(),
            derivations = store.derivation_count().await?,
            "Questionnaire store opened"
        );
        Ok(store)
    }

    /// Private in-memory database; everything is lost on drop.
    pub async fn in_memory() -> Result<Self> {
        // one connection, or each would see its own empty database
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;
        let store = Self::migrated(pool).await?;
        debug!("Questionnaire store opened in memory");
        Ok(store)
    }

    async fn migrated(pool: SqlitePool) -> Result<Self> {
        let store = Self { pool };
        store.run_migrations().await?;
        Ok(store)
    }
}

/// Default data directory (`~/.psyche`).
#[must_use]
pub fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .map(|p| p.join(".psyche"))
        .unwrap_or_else(|| PathBuf::from(".psyche"))
}

/// Default database path.
#[must_use]
pub fn default_db_path() -> PathBuf {
    default_data_dir().join("psyche.db")
}
