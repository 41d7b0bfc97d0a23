//! Psyche Core - derivation cache manager and report models
//!
//! This crate ties the pure calculators to storage:
//! - Manager: load rows, fingerprint, reuse or recompute, persist
//! - Fingerprint: content hash that decides freshness
//! - Reports: drain/transfer cards, Jung panels, profession fit, partner profile
//! - Catalog: profession demand vectors
//!
//! # Architecture
//!
//! ```text
//! QuestionnaireStore ──► DerivationManager ──► DerivationStore
//!                              │
//!                     DerivationRecord (vectors, flow, axes)
//!                              │
//!                  reports::build_report ◄── ProfessionCatalog
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod catalog;
pub mod config;
pub mod error;
pub mod fingerprint;
pub mod manager;
pub mod reports;

pub use catalog::{Profession, ProfessionCatalog, ProfessionScore};
pub use config::EngineConfig;
pub use error::{format_error_for_cli, Error, Result, UserFriendlyError, REPORT_UNAVAILABLE};
pub use fingerprint::{fingerprint, sha256_hex, DERIVATION_SCHEMA_VERSION};
pub use manager::{derive_record, DerivationManager, DeriveOutcome};
pub use reports::{
    build_report, drain_report, jung_report, partner_profile, profession_fit_report,
    simulate_custom_job, CustomJobFit, DrainCard, DrainReport, JungReport, PartnerProfile,
    PathShare, ProfessionFitReport, Report, ReportKind,
};
