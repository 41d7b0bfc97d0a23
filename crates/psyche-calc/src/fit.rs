//! Profession fit: mismatch between an effective drive vector and a job's
//! demand vector, weighted by how much the job cares about each drive.

use crate::drive::{Drive, DriveVector, PersonaVectors};
use crate::flow::FlowModel;
use serde::{Deserialize, Serialize};

/// Best possible fit score.
pub const MAX_FIT: f64 = 5.0;

/// Which adjusted surface vector is scored against a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitMode {
    /// Surface vector minus energy already lost to drain
    JobMatch,
    /// Surface vector raised to innate potential
    AspiredMatch,
}

impl FitMode {
    /// Both modes, report order.
    pub const ALL: [FitMode; 2] = [FitMode::JobMatch, FitMode::AspiredMatch];
}

/// Per-drive contribution to a fit deficit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DriveGap {
    /// Drive
    pub drive: Drive,
    /// User's effective value
    pub effective: f64,
    /// Job's demand
    pub demand: f64,
    /// Normalised importance of the drive to the job
    pub weight: f64,
    /// `|effective − demand| · weight`
    pub weighted_gap: f64,
}

/// A fit score with its per-drive breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitBreakdown {
    /// `clamp(5 − deficit, 0, 5)`
    pub score: f64,
    /// Sum of weighted gaps
    pub deficit: f64,
    /// Gaps in canonical drive order
    pub gaps: Vec<DriveGap>,
}

/// Weights proportional to demand, or uniform when the job demands nothing.
#[must_use]
pub fn demand_weights(demand: &DriveVector) -> [f64; Drive::COUNT] {
    let total = demand.total();
    if total > 0.0 {
        demand.to_array().map(|d| d / total)
    } else {
        [1.0 / Drive::COUNT as f64; Drive::COUNT]
    }
}

/// Score with breakdown.
#[must_use]
pub fn fit_breakdown(effective: &DriveVector, demand: &DriveVector) -> FitBreakdown {
    let weights = demand_weights(demand);
    let gaps: Vec<DriveGap> = Drive::ALL
        .into_iter()
        .map(|drive| {
            let e = effective.get(drive);
            let d = demand.get(drive);
            let weight = weights[drive.index()];
            DriveGap {
                drive,
                effective: e,
                demand: d,
                weight,
                weighted_gap: (e - d).abs() * weight,
            }
        })
        .collect();
    let deficit: f64 = gaps.iter().map(|g| g.weighted_gap).sum();
    let score = (MAX_FIT - deficit).clamp(0.0, MAX_FIT);
    FitBreakdown {
        score: if score.is_finite() { score } else { 0.0 },
        deficit,
        gaps,
    }
}

/// Fit score in `[0, 5]`; higher is better.
#[must_use]
pub fn score_fit(effective: &DriveVector, demand: &DriveVector) -> f64 {
    fit_breakdown(effective, demand).score
}

/// Surface vector with drained energy removed.
#[must_use]
pub fn job_match_vector(vectors: &PersonaVectors, flow: &FlowModel) -> DriveVector {
    DriveVector::from_fn(|d| vectors.surface.get(d) - flow.drain_total(d))
}

/// Surface vector lifted to innate strength wherever innate is higher.
#[must_use]
pub fn aspired_match_vector(vectors: &PersonaVectors) -> DriveVector {
    DriveVector::from_fn(|d| vectors.surface.get(d).max(vectors.innate.get(d)))
}

/// Effective vector for a fit mode.
#[must_use]
pub fn effective_vector(mode: FitMode, vectors: &PersonaVectors, flow: &FlowModel) -> DriveVector {
    match mode {
        FitMode::JobMatch => job_match_vector(vectors, flow),
        FitMode::AspiredMatch => aspired_match_vector(vectors),
    }
}
