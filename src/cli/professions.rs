//! Professions command: dump the active catalog.

use super::print_json;
use crate::app::AppContext;
use anyhow::Result;

pub fn run(ctx: &AppContext) -> Result<()> {
    print_json(&ctx.catalog.professions())
}
