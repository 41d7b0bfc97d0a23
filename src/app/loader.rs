//! Configuration loading
//!
//! Sources, lowest priority first: the embedded `config/default.toml`, the
//! optional files `config/default`, `config/{PSYCHE_ENV}` and `config/local`,
//! then `PSYCHE_<SECTION>__<KEY>` environment variables
//! (e.g. `PSYCHE_ENGINE__STRICT_ANSWERS=true`, `PSYCHE_DATABASE__PATH=/tmp/p.db`).

use super::config::AppConfig;
use anyhow::{Context, Result};
use config::{Config, ConfigBuilder, Environment, File, FileFormat};
use tracing::debug;

/// Embedded default configuration (compiled into binary)
pub const DEFAULT_CONFIG: &str = include_str!("../../config/default.toml");

fn environment_name() -> String {
    std::env::var("PSYCHE_ENV").unwrap_or_else(|_| "development".to_string())
}

fn with_defaults() -> ConfigBuilder<config::builder::DefaultState> {
    Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
}

/// Load configuration from files and environment
pub fn load_config() -> Result<AppConfig> {
    let env = environment_name();
    let mut builder = with_defaults();
    for name in ["config/default".to_string(), format!("config/{env}"), "config/local".to_string()] {
        builder = builder.add_source(File::with_name(&name).required(false));
    }
    let config = builder
        .add_source(
            Environment::with_prefix("PSYCHE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .context("Failed to read psyche configuration")?;

    let app = into_app_config(config)?;
    debug!(
        env = %env,
        strict_answers = app.engine.strict_answers,
        drain_threshold = app.engine.drain_threshold,
        transfer_threshold = app.engine.transfer_threshold,
        "Configuration loaded"
    );
    Ok(app)
}

/// Deserialize and reject engine settings the calculators cannot use.
fn into_app_config(config: Config) -> Result<AppConfig> {
    let app: AppConfig = config
        .try_deserialize()
        .context("Configuration does not match the [database]/[engine]/[catalog] layout")?;
    app.engine
        .validate()
        .context("Invalid [engine] settings")?;
    Ok(app)
}
