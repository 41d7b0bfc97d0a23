//! History command: every submission of one questionnaire, newest first.

use super::print_json;
use crate::app::AppContext;
use anyhow::{Context, Result};
use psyche_calc::PersonaLayer;

pub async fn run(ctx: &AppContext, user: &str, layer: PersonaLayer) -> Result<()> {
    let history = ctx
        .store
        .submission_history(user, layer)
        .await
        .context("Failed to read submission history")?;
    if history.is_empty() {
        eprintln!("No {layer} questionnaire on file for {user}.");
        return Ok(());
    }
    // the first entry is the one derivations use
    print_json(&history)
}
