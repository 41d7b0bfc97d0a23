//! Derive command: refresh a user's derivation and print the outcome.

use super::{derive_or_explain, print_json};
use crate::app::AppContext;
use anyhow::Result;

pub async fn run(ctx: &AppContext, user: &str) -> Result<()> {
    if let Some(outcome) = derive_or_explain(ctx, user).await {
        print_json(&outcome)?;
    }
    Ok(())
}
