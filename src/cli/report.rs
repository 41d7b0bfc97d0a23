//! Report command: build one report model from the fresh derivation.

use super::{derive_or_explain, print_json};
use crate::app::AppContext;
use anyhow::Result;
use psyche_core::{build_report, ReportKind};

pub async fn run(ctx: &AppContext, user: &str, kind: ReportKind) -> Result<()> {
    let Some(outcome) = derive_or_explain(ctx, user).await else {
        return Ok(());
    };
    let Some(record) = outcome.record() else {
        return Ok(());
    };

    let thresholds = ctx.manager.config().thresholds();
    let report = build_report(kind, record, &thresholds, &ctx.catalog);
    print_json(&report)
}
