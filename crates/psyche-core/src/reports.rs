//! Report models built from a derivation record.
//!
//! These are the structures report pages render; no layout or copy lives
//! here. Every builder is pure and works from a [`DerivationRecord`] (or
//! from raw vectors for what-if simulations).

use crate::catalog::{ProfessionCatalog, ProfessionScore};
use psyche_calc::{
    cap_partner_demand, effective_vector, fit_breakdown, jung_type, partner_raw_demand,
    AxisResult, CapMeta, Drive, DriveVector, FitBreakdown, FitMode, FlowModel, PersonaVectors,
    SignificanceThresholds, SourceOutflow,
};
use psyche_store::DerivationRecord;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Report families served from a derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    /// Energy drain / adaptation cards
    Drain,
    /// Jung-style typing panels
    Jung,
    /// Profession fit ranking
    Fit,
    /// Ideal-partner profile
    Partner,
}

impl ReportKind {
    /// Return string representation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Drain => "drain",
            Self::Jung => "jung",
            Self::Fit => "fit",
            Self::Partner => "partner",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ReportKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "drain" => Ok(Self::Drain),
            "jung" => Ok(Self::Jung),
            "fit" => Ok(Self::Fit),
            "partner" => Ok(Self::Partner),
            other => Err(format!("unknown report: {other}")),
        }
    }
}

// ── Drain / transfer ────────────────────────────────────────────

/// Energy moving along one path, seen from the target drive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathShare {
    /// Innate source drive
    pub source: Drive,
    /// Energy drained or transferred along the path
    pub amount: f64,
}

/// One card of the drain report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrainCard {
    /// Target drive
    pub drive: Drive,
    /// 1-based rank by surface energy
    pub rank: usize,
    /// Surface strength
    pub surface_energy: f64,
    /// Total lost to drain paths
    pub drain_total: f64,
    /// Total redirected loss-free
    pub transfer_total: f64,
    /// Drain total exceeds the configured threshold
    pub significantly_drained: bool,
    /// Transfer total exceeds the configured threshold
    pub significantly_transferred: bool,
    /// Drain paths, largest first
    pub drained_from: Vec<PathShare>,
    /// Transfer paths, largest first
    pub transferred_from: Vec<PathShare>,
    /// Energy this drive's innate surplus feeds to other drives
    pub outflow: SourceOutflow,
}

/// Drain / transfer report: one card per drive in rank order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrainReport {
    /// Cards ordered by rank
    pub cards: Vec<DrainCard>,
    /// Significantly drained drives in rank order
    pub drained: Vec<Drive>,
    /// Significantly transferred drives in rank order
    pub transferred: Vec<Drive>,
}

fn largest_first(mut shares: Vec<PathShare>) -> Vec<PathShare> {
    // stable: equal amounts keep canonical source order
    shares.sort_by(|a, b| b.amount.total_cmp(&a.amount));
    shares
}

/// Build the drain report from a flow model.
#[must_use]
pub fn drain_report(flow: &FlowModel, thresholds: &SignificanceThresholds) -> DrainReport {
    let cards = flow
        .ranked()
        .into_iter()
        .map(|s| DrainCard {
            drive: s.drive,
            rank: s.rank,
            surface_energy: s.surface_energy,
            drain_total: s.surface_drain_total,
            transfer_total: s.surface_transfer_total,
            significantly_drained: s.is_significantly_drained(thresholds),
            significantly_transferred: s.is_significantly_transferred(thresholds),
            drained_from: largest_first(
                s.drain_paths()
                    .map(|p| PathShare {
                        source: p.source,
                        amount: p.drained,
                    })
                    .collect(),
            ),
            transferred_from: largest_first(
                s.transfer_paths()
                    .map(|p| PathShare {
                        source: p.source,
                        amount: p.transferred,
                    })
                    .collect(),
            ),
            outflow: flow.source_outflow(s.drive),
        })
        .collect();

    DrainReport {
        cards,
        drained: flow.drained_drives(thresholds),
        transferred: flow.transferred_drives(thresholds),
    }
}

// ── Jung panels ─────────────────────────────────────────────────

/// Jung-style typing report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JungReport {
    /// Innate type code (`X` marks an ambivalent axis)
    pub innate_type: String,
    /// Surface type code
    pub surface_type: String,
    /// Number of axes where innate and surface agree
    pub aligned_axes: usize,
    /// Per-axis panels in axis order
    pub axes: Vec<AxisResult>,
}

/// Build the Jung report from cached axis results.
#[must_use]
pub fn jung_report(axes: &[AxisResult]) -> JungReport {
    JungReport {
        innate_type: jung_type(axes.iter().map(|a| &a.innate)),
        surface_type: jung_type(axes.iter().map(|a| &a.surface)),
        aligned_axes: axes.iter().filter(|a| a.aligned).count(),
        axes: axes.to_vec(),
    }
}

// ── Profession fit ──────────────────────────────────────────────

/// Profession ranking under both effective vectors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfessionFitReport {
    /// Surface minus drain
    pub job_match_vector: DriveVector,
    /// Surface raised to innate
    pub aspired_match_vector: DriveVector,
    /// Ranking against the job-match vector
    pub job_match: Vec<ProfessionScore>,
    /// Ranking against the aspired-match vector
    pub aspired_match: Vec<ProfessionScore>,
}

/// Rank the catalog for a user.
#[must_use]
pub fn profession_fit_report(
    vectors: &PersonaVectors,
    flow: &FlowModel,
    catalog: &ProfessionCatalog,
) -> ProfessionFitReport {
    let job = effective_vector(FitMode::JobMatch, vectors, flow);
    let aspired = effective_vector(FitMode::AspiredMatch, vectors, flow);
    ProfessionFitReport {
        job_match: catalog.rank(&job),
        aspired_match: catalog.rank(&aspired),
        job_match_vector: job,
        aspired_match_vector: aspired,
    }
}

/// What-if score of a caller-supplied job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomJobFit {
    /// The simulated job's demand
    pub demand: DriveVector,
    /// Fit against the job-match vector
    pub job_match: FitBreakdown,
    /// Fit against the aspired-match vector
    pub aspired_match: FitBreakdown,
}

/// Score a custom job without touching any store.
#[must_use]
pub fn simulate_custom_job(
    vectors: &PersonaVectors,
    flow: &FlowModel,
    demand: &DriveVector,
) -> CustomJobFit {
    CustomJobFit {
        demand: *demand,
        job_match: fit_breakdown(&effective_vector(FitMode::JobMatch, vectors, flow), demand),
        aspired_match: fit_breakdown(
            &effective_vector(FitMode::AspiredMatch, vectors, flow),
            demand,
        ),
    }
}

// ── Ideal partner ───────────────────────────────────────────────

/// Ideal-partner profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartnerProfile {
    /// Demand before capping
    pub raw_demand: DriveVector,
    /// Demand after capping
    pub capped_demand: DriveVector,
    /// Why each drive was or was not capped
    pub cap_meta: CapMeta,
}

/// Build the partner profile from a user's vectors.
#[must_use]
pub fn partner_profile(vectors: &PersonaVectors) -> PartnerProfile {
    let raw_demand = partner_raw_demand(vectors);
    let capping = cap_partner_demand(&raw_demand, vectors);
    PartnerProfile {
        raw_demand,
        capped_demand: capping.capped_demand,
        cap_meta: capping.cap_meta,
    }
}

// ── Dispatch ────────────────────────────────────────────────────

/// Any report model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "report", rename_all = "lowercase")]
pub enum Report {
    /// Drain / transfer cards
    Drain(DrainReport),
    /// Jung panels
    Jung(JungReport),
    /// Profession fit
    Fit(ProfessionFitReport),
    /// Ideal partner
    Partner(PartnerProfile),
}

/// Build one report from a record.
#[must_use]
pub fn build_report(
    kind: ReportKind,
    record: &DerivationRecord,
    thresholds: &SignificanceThresholds,
    catalog: &ProfessionCatalog,
) -> Report {
    match kind {
        ReportKind::Drain => Report::Drain(drain_report(&record.flow, thresholds)),
        ReportKind::Jung => Report::Jung(jung_report(&record.axes)),
        ReportKind::Fit => Report::Fit(profession_fit_report(
            &record.vectors,
            &record.flow,
            catalog,
        )),
        ReportKind::Partner => Report::Partner(partner_profile(&record.vectors)),
    }
}

#[cfg(test)]
mod tests;
