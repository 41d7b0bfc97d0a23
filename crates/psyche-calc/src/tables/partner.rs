//! Ideal-partner capping tables.
//!
//! A partner-facing drive is capped by the user's own standing on one or
//! more self drives, read from either the innate or the surface vector.

use crate::drive::Drive;
use crate::layer::PersonaLayer;

/// Headroom added to a self drive's strength, by 1-based rank (index `rank - 1`).
pub const RANK_ALLOWANCE: [f64; Drive::COUNT] = [1.0, 0.75, 0.5, 0.5, 0.25, 0.25, 0.0];

/// Two ceilings closer than this are considered equal when marking binding components.
pub const BINDING_TOLERANCE: f64 = 1e-9;

/// Capping components for each partner drive, in canonical drive order.
pub const CAP_BASIS: [&[(Drive, PersonaLayer)]; Drive::COUNT] = [
    // Exploration
    &[(Drive::Exploration, PersonaLayer::Innate)],
    // Achievement
    &[
        (Drive::Achievement, PersonaLayer::Surface),
        (Drive::Dominance, PersonaLayer::Surface),
    ],
    // Dominance
    &[
        (Drive::Dominance, PersonaLayer::Innate),
        (Drive::Achievement, PersonaLayer::Surface),
    ],
    // Pleasure
    &[(Drive::Pleasure, PersonaLayer::Innate)],
    // Care
    &[
        (Drive::Care, PersonaLayer::Surface),
        (Drive::Affiliation, PersonaLayer::Innate),
    ],
    // Affiliation
    &[(Drive::Affiliation, PersonaLayer::Surface)],
    // Value
    &[
        (Drive::Value, PersonaLayer::Innate),
        (Drive::Care, PersonaLayer::Innate),
    ],
];

/// Headroom for a 1-based rank; ranks past the table get none.
#[must_use]
pub fn rank_allowance(rank: usize) -> f64 {
    rank.checked_sub(1)
        .and_then(|i| RANK_ALLOWANCE.get(i))
        .copied()
        .unwrap_or(0.0)
}

/// Capping components for one partner drive.
#[must_use]
pub fn cap_basis(drive: Drive) -> &'static [(Drive, PersonaLayer)] {
    CAP_BASIS[drive.index()]
}
