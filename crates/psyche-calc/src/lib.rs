//! Psyche Calc - persona derivation calculators
//!
//! Pure, synchronous functions that turn raw questionnaire rows into the
//! canonical drive profile and everything the report layer scores from it.
//!
//! # Architecture
//!
//! ```text
//! RawPersonaAnswers (innate, surface, imposed)
//!        │                         │
//!  compute_drive_vector       classify_axes
//!        │                         │
//!  PersonaVectors             AxisResult ×4
//!        │
//!  compute_flow ──► FlowModel (drain / transfer per drive)
//!        │
//!  score_fit · cap_partner_demand
//! ```
//!
//! Weighting tables, axis match-ups and partner basis tables live in
//! [`tables`] as plain data so they can be checked on their own.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod answers;
pub mod axis;
pub mod drive;
pub mod error;
pub mod fit;
pub mod flow;
pub mod layer;
pub mod partner;
pub mod tables;
pub mod vector;

pub use answers::{Polarity, RawPersonaAnswers};
pub use axis::{
    classify_axes, classify_axis, jung_type, Axis, AxisClassification, AxisResult, GroupScore,
    Pole,
};
pub use drive::{Drive, DriveVector, PersonaVectors};
pub use error::{Error, Result};
pub use fit::{
    aspired_match_vector, effective_vector, fit_breakdown, job_match_vector, score_fit,
    FitBreakdown, FitMode,
};
pub use flow::{
    compute_flow, DriveFlowSummary, FlowModel, FlowPath, PathKind, SignificanceThresholds,
    SourceOutflow,
};
pub use layer::PersonaLayer;
pub use partner::{
    cap_partner_demand, partner_raw_demand, CapComponent, CapMeta, DriveCap, PartnerCapping,
};
pub use vector::{compute_drive_vector, compute_drive_vector_strict, compute_persona_vectors};
