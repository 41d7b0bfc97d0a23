//! CLI module for Psyche
//!
//! Provides commands:
//! - `import`: store a questionnaire row
//! - `history`: list a questionnaire's submissions
//! - `derive`: make sure a user's derivation is fresh
//! - `report`: print a report model as JSON
//! - `simulate-job`: score a custom job demand
//! - `professions`: list the profession catalog

use crate::app::AppContext;
use anyhow::Result;
use clap::{Parser, Subcommand};
use psyche_calc::PersonaLayer;
use psyche_core::{format_error_for_cli, DeriveOutcome, ReportKind};
use std::path::PathBuf;
use tracing::{debug, warn};

pub mod derive;
pub mod history;
pub mod import;
pub mod professions;
pub mod report;
pub mod simulate;

/// Psyche persona engine CLI
#[derive(Parser, Debug)]
#[command(name = "psyche")]
#[command(about = "Persona derivation and report engine")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Store a questionnaire row (supersedes earlier submissions)
    Import {
        /// User id
        user: String,
        /// innate, surface (private) or imposed (public)
        layer: PersonaLayer,
        /// JSON object of answers, e.g. {"q1": 4, "q2": 5}
        file: PathBuf,
    },
    /// List every submission of one questionnaire, newest first
    History {
        /// User id
        user: String,
        /// innate, surface (private) or imposed (public)
        layer: PersonaLayer,
    },
    /// Derive (or reuse) a user's drive profile
    Derive {
        /// User id
        user: String,
    },
    /// Print a report model as JSON
    Report {
        /// User id
        user: String,
        /// drain, jung, fit or partner
        kind: ReportKind,
    },
    /// Score a custom job against a user's profile
    SimulateJob {
        /// User id
        user: String,
        /// Seven comma-separated demands in drive order:
        /// exploration,achievement,dominance,pleasure,care,affiliation,value
        #[arg(long)]
        demand: String,
    },
    /// List the profession catalog
    Professions,
}

/// Run the CLI command
pub async fn run(cli: Cli) -> Result<()> {
    let Some(command) = cli.command else {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        cmd.print_help()?;
        println!();
        return Ok(());
    };

    let ctx = AppContext::init().await?;
    match command {
        Commands::Import { user, layer, file } => import::run(&ctx, &user, layer, &file).await,
        Commands::History { user, layer } => history::run(&ctx, &user, layer).await,
        Commands::Derive { user } => derive::run(&ctx, &user).await,
        Commands::Report { user, kind } => report::run(&ctx, &user, kind).await,
        Commands::SimulateJob { user, demand } => simulate::run(&ctx, &user, &demand).await,
        Commands::Professions => professions::run(&ctx),
    }
}

/// What a command should do with a derivation attempt.
#[derive(Debug)]
pub(crate) enum Derived {
    /// A record is available
    Ready(DeriveOutcome),
    /// Questionnaires are incomplete; the message names the missing ones
    Missing(String),
    /// Something failed that the user cannot fix
    Unavailable(String),
}

/// Map a derivation result to user-facing text. Raw errors only reach the log.
pub(crate) fn classify(user: &str, result: psyche_core::Result<DeriveOutcome>) -> Derived {
    match result {
        Ok(outcome) if outcome.record().is_some() => {
            if let DeriveOutcome::UpsertFailed { message, .. } = &outcome {
                warn!(user_id = %user, %message, "Serving an unsaved derivation");
            }
            Derived::Ready(outcome)
        }
        Ok(outcome) => Derived::Missing(format_error_for_cli(&outcome)),
        Err(e) => {
            debug!(user_id = %user, error = ?e, "Derivation failed");
            Derived::Unavailable(format_error_for_cli(&e))
        }
    }
}

/// Ensure the derivation and explain to the user when it is not available.
///
/// Returns `None` after printing the "complete these tests" prompt. Exits
/// with status 1 after printing the unavailable message.
pub(crate) async fn derive_or_explain(ctx: &AppContext, user: &str) -> Option<DeriveOutcome> {
    match classify(user, ctx.manager.ensure_derived(user).await) {
        Derived::Ready(outcome) => Some(outcome),
        Derived::Missing(message) => {
            eprintln!("{message}");
            None
        }
        Derived::Unavailable(message) => {
            eprintln!("{message}");
            std::process::exit(1);
        }
    }
}

/// Print a value as pretty JSON on stdout.
pub(crate) fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
