//! Application wiring: configuration, stores, manager and catalog.

pub mod config;
pub mod loader;

use anyhow::{Context, Result};
use psyche_core::{DerivationManager, ProfessionCatalog};
use psyche_store::SqliteStore;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Everything a command needs.
pub struct AppContext {
    pub store: Arc<SqliteStore>,
    pub manager: DerivationManager,
    pub catalog: ProfessionCatalog,
}

impl AppContext {
    /// Load configuration and open the store.
    pub async fn init() -> Result<Self> {
        let config = loader::load_config()?;

        let db_path = config.database.resolved_path();
        info!(path = %db_path.display(), "Opening database");
        let store = Arc::new(
            SqliteStore::from_path(&db_path)
                .await
                .context("Failed to initialize SQLite store")?,
        );

        let catalog = match config.catalog.path.as_deref() {
            Some(path) => ProfessionCatalog::load(Path::new(path))
                .with_context(|| format!("Failed to load profession catalog from {path}"))?,
            None => ProfessionCatalog::builtin().context("Built-in profession catalog is invalid")?,
        };
        info!(professions = catalog.len(), "Profession catalog ready");

        let manager = DerivationManager::new(store.clone(), store.clone(), config.engine);

        Ok(Self {
            store,
            manager,
            catalog,
        })
    }
}
