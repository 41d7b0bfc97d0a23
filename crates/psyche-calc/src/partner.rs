//! Ideal-partner capping.
//!
//! Every partner-facing drive is bounded by how strongly the user holds the
//! corresponding self drives: the stronger and higher-ranked the self drive,
//! the more headroom the user has to ask of a partner.

use crate::drive::{clamp_drive, Drive, DriveVector, PersonaVectors};
use crate::layer::PersonaLayer;
use crate::tables::partner::{cap_basis, rank_allowance, BINDING_TOLERANCE};
use serde::{Deserialize, Serialize};

/// One capping component of a partner drive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CapComponent {
    /// Self drive the ceiling is read from
    pub self_drive: Drive,
    /// Layer the self drive is read from
    pub basis: PersonaLayer,
    /// 1-based rank of the self drive in the basis vector
    pub rank: usize,
    /// Self drive's value in the basis vector
    pub strength: f64,
    /// `clamp(strength + allowance(rank), 0, 5)`
    pub ceiling: f64,
    /// This component sets the final cap
    pub binding: bool,
}

/// Capping outcome for one partner drive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriveCap {
    /// Partner drive
    pub drive: Drive,
    /// Demand before capping
    pub raw_demand: f64,
    /// Minimum component ceiling
    pub cap: f64,
    /// `min(raw_demand, cap)`
    pub capped_demand: f64,
    /// Raw demand exceeded the cap
    pub is_capped: bool,
    /// Components in basis-table order
    pub components: Vec<CapComponent>,
}

/// Explanation of every cap, in canonical drive order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CapMeta {
    /// Per-drive capping details
    pub drives: Vec<DriveCap>,
}

impl CapMeta {
    /// Details for one drive.
    #[must_use]
    pub fn get(&self, drive: Drive) -> Option<&DriveCap> {
        self.drives.iter().find(|c| c.drive == drive)
    }

    /// Drives whose demand was reduced.
    pub fn capped_drives(&self) -> impl Iterator<Item = Drive> + '_ {
        self.drives.iter().filter(|c| c.is_capped).map(|c| c.drive)
    }
}

/// Capped partner demand and why.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartnerCapping {
    /// Demand after capping
    pub capped_demand: DriveVector,
    /// Per-drive explanation
    pub cap_meta: CapMeta,
}

/// Raw ideal-partner demand: the innate baseline plus whatever the
/// environment leaves unmet.
#[must_use]
pub fn partner_raw_demand(vectors: &PersonaVectors) -> DriveVector {
    DriveVector::from_fn(|d| {
        let innate = vectors.innate.get(d);
        innate + (innate - vectors.imposed.get(d)).max(0.0)
    })
}

fn component(vectors: &PersonaVectors, self_drive: Drive, basis: PersonaLayer) -> CapComponent {
    let vector = vectors.get(basis);
    let strength = vector.get(self_drive);
    let rank = vector.rank_of(self_drive);
    CapComponent {
        self_drive,
        basis,
        rank,
        strength,
        ceiling: clamp_drive(strength + rank_allowance(rank)),
        binding: false,
    }
}

/// Bound each partner drive by the user's own standing on its basis drives.
#[must_use]
pub fn cap_partner_demand(raw: &DriveVector, vectors: &PersonaVectors) -> PartnerCapping {
    let mut capped_demand = DriveVector::zero();

    let drives = Drive::ALL
        .into_iter()
        .map(|drive| {
            let mut components: Vec<CapComponent> = cap_basis(drive)
                .iter()
                .map(|(self_drive, basis)| component(vectors, *self_drive, *basis))
                .collect();

            let cap = components
                .iter()
                .map(|c| c.ceiling)
                .fold(f64::INFINITY, f64::min);
            // basis rows are never empty; keep the function total anyway
            let cap = if cap.is_finite() { cap } else { clamp_drive(cap) };

            for c in &mut components {
                c.binding = (c.ceiling - cap).abs() <= BINDING_TOLERANCE;
            }

            let raw_demand = raw.get(drive);
            let value = raw_demand.min(cap);
            capped_demand.set(drive, value);

            DriveCap {
                drive,
                raw_demand,
                cap,
                capped_demand: value,
                is_capped: raw_demand > cap,
                components,
            }
        })
        .collect();

    PartnerCapping {
        capped_demand,
        cap_meta: CapMeta { drives },
    }
}
