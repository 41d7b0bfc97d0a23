//! Cross-Drive Flow Model: drain vs. adaptive transfer between drives.
//!
//! For every ordered pair (target `td` in the surface layer, source `sd` in
//! the innate layer):
//!
//! - surface expression of `td` not backed by innate `td` is *diverted*,
//!   drawn from the innate surplus of the other drives in proportion to
//!   their surplus (`dr`);
//! - if the imposed layer leaves `td` under-satisfied the diversion leaks
//!   (`lr > 0`, a drain path), otherwise it is a clean transfer (`lr == 0`).
//!
//! Drained and transferred energy per path are `S[td]·dr·lr` and
//! `S[td]·dr·(1 − lr)`. Since `Σ_sd dr ≤ 1`, the two totals never exceed
//! the drive's surface energy.

use crate::drive::{Drive, DriveVector, PersonaVectors};
use crate::tables::flow::{
    DEFAULT_DRAIN_THRESHOLD, DEFAULT_TRANSFER_THRESHOLD, SATISFACTION_FLOOR,
};
use serde::{Deserialize, Serialize};

/// Classification of a flow path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathKind {
    /// Lossy compensation (`lr > 0`)
    Drain,
    /// Loss-free redirection (`lr == 0`)
    Transfer,
}

/// A directed relation from a surface target drive to an innate source drive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlowPath {
    /// Target drive (surface layer)
    pub target: Drive,
    /// Source drive (innate layer)
    pub source: Drive,
    /// Diversion rate in `[0, 1]`
    pub dr: f64,
    /// Leakage rate in `[0, 1]`
    pub lr: f64,
    /// `surface_energy · dr · lr`
    pub drained: f64,
    /// `surface_energy · dr · (1 − lr)`
    pub transferred: f64,
}

impl FlowPath {
    /// Drain or transfer.
    #[must_use]
    pub fn kind(&self) -> PathKind {
        if self.lr > 0.0 {
            PathKind::Drain
        } else {
            PathKind::Transfer
        }
    }

    /// Whether this is a lossy path.
    #[must_use]
    pub fn is_drain(&self) -> bool {
        self.kind() == PathKind::Drain
    }
}

/// Per-drive significance cut-offs. Pure configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignificanceThresholds {
    /// Drain total above which a drive counts as significantly drained
    pub drain: f64,
    /// Transfer total above which a drive counts as significantly transferred
    pub transfer: f64,
}

impl Default for SignificanceThresholds {
    fn default() -> Self {
        Self {
            drain: DEFAULT_DRAIN_THRESHOLD,
            transfer: DEFAULT_TRANSFER_THRESHOLD,
        }
    }
}

/// Flow totals for one target drive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriveFlowSummary {
    /// Target drive
    pub drive: Drive,
    /// The drive's own surface-layer strength
    pub surface_energy: f64,
    /// Sum of drained contributions over all incoming paths
    pub surface_drain_total: f64,
    /// Sum of transferred contributions over all incoming paths
    pub surface_transfer_total: f64,
    /// 1-based position by surface energy (descending, canonical tie-break)
    pub rank: usize,
    /// Contributing paths with `dr > 0`, in canonical source order
    pub paths: Vec<FlowPath>,
}

impl DriveFlowSummary {
    /// Drain total exceeds the configured threshold.
    #[must_use]
    pub fn is_significantly_drained(&self, thresholds: &SignificanceThresholds) -> bool {
        self.surface_drain_total > thresholds.drain
    }

    /// Transfer total exceeds the configured threshold.
    #[must_use]
    pub fn is_significantly_transferred(&self, thresholds: &SignificanceThresholds) -> bool {
        self.surface_transfer_total > thresholds.transfer
    }

    /// Drain paths only.
    pub fn drain_paths(&self) -> impl Iterator<Item = &FlowPath> {
        self.paths.iter().filter(|p| p.is_drain())
    }

    /// Transfer paths only.
    pub fn transfer_paths(&self) -> impl Iterator<Item = &FlowPath> {
        self.paths.iter().filter(|p| !p.is_drain())
    }
}

/// Energy leaving one innate source drive across all targets.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SourceOutflow {
    /// Drained energy routed out of the source
    pub drained: f64,
    /// Transferred energy routed out of the source
    pub transferred: f64,
}

/// The full flow model: one summary per drive, in canonical drive order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlowModel {
    summaries: Vec<DriveFlowSummary>,
}

impl FlowModel {
    /// Summaries in canonical drive order.
    #[must_use]
    pub fn summaries(&self) -> &[DriveFlowSummary] {
        &self.summaries
    }

    /// Consume into the summary list.
    #[must_use]
    pub fn into_summaries(self) -> Vec<DriveFlowSummary> {
        self.summaries
    }

    /// Summary for one drive. Absent only for a model deserialized from an
    /// incomplete document.
    #[must_use]
    pub fn summary(&self, drive: Drive) -> Option<&DriveFlowSummary> {
        self.summaries.iter().find(|s| s.drive == drive)
    }

    /// Drain total of one drive (0 when absent).
    #[must_use]
    pub fn drain_total(&self, drive: Drive) -> f64 {
        self.summary(drive).map_or(0.0, |s| s.surface_drain_total)
    }

    /// Transfer total of one drive (0 when absent).
    #[must_use]
    pub fn transfer_total(&self, drive: Drive) -> f64 {
        self.summary(drive).map_or(0.0, |s| s.surface_transfer_total)
    }

    /// Summaries ordered by rank.
    #[must_use]
    pub fn ranked(&self) -> Vec<&DriveFlowSummary> {
        let mut ranked: Vec<_> = self.summaries.iter().collect();
        ranked.sort_by_key(|s| s.rank);
        ranked
    }

    /// Drives whose drain total is significant, in rank order.
    #[must_use]
    pub fn drained_drives(&self, thresholds: &SignificanceThresholds) -> Vec<Drive> {
        self.ranked()
            .into_iter()
            .filter(|s| s.is_significantly_drained(thresholds))
            .map(|s| s.drive)
            .collect()
    }

    /// Drives whose transfer total is significant, in rank order.
    #[must_use]
    pub fn transferred_drives(&self, thresholds: &SignificanceThresholds) -> Vec<Drive> {
        self.ranked()
            .into_iter()
            .filter(|s| s.is_significantly_transferred(thresholds))
            .map(|s| s.drive)
            .collect()
    }

    /// Energy routed out of one innate source drive.
    #[must_use]
    pub fn source_outflow(&self, source: Drive) -> SourceOutflow {
        self.summaries
            .iter()
            .flat_map(|s| s.paths.iter())
            .filter(|p| p.source == source)
            .fold(SourceOutflow::default(), |acc, p| SourceOutflow {
                drained: acc.drained + p.drained,
                transferred: acc.transferred + p.transferred,
            })
    }
}

fn excess(vectors: &PersonaVectors, drive: Drive) -> f64 {
    (vectors.surface.get(drive) - vectors.innate.get(drive)).max(0.0)
}

fn surplus(vectors: &PersonaVectors, drive: Drive) -> f64 {
    (vectors.innate.get(drive) - vectors.surface.get(drive)).max(0.0)
}

/// Diversion rate of the path `target ← source`.
#[must_use]
pub fn diversion_rate(vectors: &PersonaVectors, target: Drive, source: Drive) -> f64 {
    if target == source {
        return 0.0;
    }
    let energy = vectors.surface.get(target);
    if energy <= 0.0 {
        return 0.0;
    }
    let pool: f64 = Drive::ALL
        .into_iter()
        .filter(|d| *d != target)
        .map(|d| surplus(vectors, d))
        .sum();
    if pool <= 0.0 {
        return 0.0;
    }
    let diverted_fraction = excess(vectors, target) / energy;
    (diverted_fraction * surplus(vectors, source) / pool).clamp(0.0, 1.0)
}

/// Leakage rate of paths into `target`, driven by the imposed layer's
/// satisfaction of that drive.
#[must_use]
pub fn leakage_rate(imposed: &DriveVector, target: Drive) -> f64 {
    let satisfaction = imposed.get(target);
    if satisfaction >= SATISFACTION_FLOOR {
        0.0
    } else {
        ((SATISFACTION_FLOOR - satisfaction) / SATISFACTION_FLOOR).clamp(0.0, 1.0)
    }
}

/// Compute the flow model from the three persona vectors.
///
/// Never fails; absent components were already read as 0.
#[must_use]
pub fn compute_flow(vectors: &PersonaVectors) -> FlowModel {
    let ranking = vectors.surface.ranked();

    let summaries = Drive::ALL
        .into_iter()
        .map(|target| {
            let energy = vectors.surface.get(target);
            let lr = leakage_rate(&vectors.imposed, target);

            let paths: Vec<FlowPath> = Drive::ALL
                .into_iter()
                .filter(|source| *source != target)
                .filter_map(|source| {
                    let dr = diversion_rate(vectors, target, source);
                    (dr > 0.0).then(|| FlowPath {
                        target,
                        source,
                        dr,
                        lr,
                        drained: energy * dr * lr,
                        transferred: energy * dr * (1.0 - lr),
                    })
                })
                .collect();

            DriveFlowSummary {
                drive: target,
                surface_energy: energy,
                surface_drain_total: paths.iter().map(|p| p.drained).sum(),
                surface_transfer_total: paths.iter().map(|p| p.transferred).sum(),
                rank: ranking
                    .iter()
                    .position(|d| *d == target)
                    .map_or(Drive::COUNT, |p| p + 1),
                paths,
            }
        })
        .collect();

    FlowModel { summaries }
}
