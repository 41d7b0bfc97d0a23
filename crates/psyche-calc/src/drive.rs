//! Drives and drive vectors: the canonical coordinate system shared by
//! every persona layer.

use crate::error::Error;
use crate::layer::PersonaLayer;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lower bound of every drive value.
pub const DRIVE_MIN: f64 = 0.0;

/// Upper bound of every drive value.
pub const DRIVE_MAX: f64 = 5.0;

/// One of the seven fixed psychological motivators.
///
/// Declaration order is the canonical order used to break every tie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Drive {
    /// Curiosity, novelty seeking
    Exploration,
    /// Mastery, accomplishment
    Achievement,
    /// Control, influence over others
    Dominance,
    /// Enjoyment, sensory reward
    Pleasure,
    /// Nurturing, protecting
    Care,
    /// Belonging, connection
    Affiliation,
    /// Meaning, principle
    Value,
}

impl Drive {
    /// All drives in canonical order.
    pub const ALL: [Drive; 7] = [
        Drive::Exploration,
        Drive::Achievement,
        Drive::Dominance,
        Drive::Pleasure,
        Drive::Care,
        Drive::Affiliation,
        Drive::Value,
    ];

    /// Number of drives.
    pub const COUNT: usize = 7;

    /// Position in canonical order (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Exploration => 0,
            Self::Achievement => 1,
            Self::Dominance => 2,
            Self::Pleasure => 3,
            Self::Care => 4,
            Self::Affiliation => 5,
            Self::Value => 6,
        }
    }

    /// Return string representation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Exploration => "exploration",
            Self::Achievement => "achievement",
            Self::Dominance => "dominance",
            Self::Pleasure => "pleasure",
            Self::Care => "care",
            Self::Affiliation => "affiliation",
            Self::Value => "value",
        }
    }
}

impl fmt::Display for Drive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Drive {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Drive::ALL
            .into_iter()
            .find(|d| d.as_str() == lower)
            .ok_or_else(|| Error::UnknownDrive(s.to_string()))
    }
}

/// Clamp a drive value into `[0, 5]`. NaN maps to 0; infinities saturate.
#[must_use]
pub fn clamp_drive(value: f64) -> f64 {
    if value.is_nan() {
        DRIVE_MIN
    } else {
        value.clamp(DRIVE_MIN, DRIVE_MAX)
    }
}

/// A value for each of the seven drives, clamped to `[0, 5]`.
///
/// Serialized as a map keyed by drive name. Components absent from a stored
/// document deserialize as 0.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DriveVector {
    exploration: f64,
    achievement: f64,
    dominance: f64,
    pleasure: f64,
    care: f64,
    affiliation: f64,
    value: f64,
}

impl DriveVector {
    /// A vector with every drive at 0.
    #[must_use]
    pub fn zero() -> Self {
        Self::default()
    }

    /// Build a vector by evaluating `f` for each drive. Results are clamped.
    pub fn from_fn(mut f: impl FnMut(Drive) -> f64) -> Self {
        let mut v = Self::zero();
        for drive in Drive::ALL {
            v.set(drive, f(drive));
        }
        v
    }

    /// Build a vector from values in canonical drive order.
    #[must_use]
    pub fn from_array(values: [f64; Drive::COUNT]) -> Self {
        Self::from_fn(|d| values[d.index()])
    }

    /// Value of one drive.
    #[must_use]
    pub fn get(&self, drive: Drive) -> f64 {
        match drive {
            Drive::Exploration => self.exploration,
            Drive::Achievement => self.achievement,
            Drive::Dominance => self.dominance,
            Drive::Pleasure => self.pleasure,
            Drive::Care => self.care,
            Drive::Affiliation => self.affiliation,
            Drive::Value => self.value,
        }
    }

    /// Set one drive (clamped to `[0, 5]`).
    pub fn set(&mut self, drive: Drive, value: f64) {
        let value = clamp_drive(value);
        let slot = match drive {
            Drive::Exploration => &mut self.exploration,
            Drive::Achievement => &mut self.achievement,
            Drive::Dominance => &mut self.dominance,
            Drive::Pleasure => &mut self.pleasure,
            Drive::Care => &mut self.care,
            Drive::Affiliation => &mut self.affiliation,
            Drive::Value => &mut self.value,
        };
        *slot = value;
    }

    /// Builder-style [`set`](Self::set).
    #[must_use]
    pub fn with(mut self, drive: Drive, value: f64) -> Self {
        self.set(drive, value);
        self
    }

    /// Values in canonical drive order.
    #[must_use]
    pub fn to_array(&self) -> [f64; Drive::COUNT] {
        Drive::ALL.map(|d| self.get(d))
    }

    /// `(drive, value)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Drive, f64)> + '_ {
        Drive::ALL.into_iter().map(move |d| (d, self.get(d)))
    }

    /// Sum of all components.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.iter().map(|(_, v)| v).sum()
    }

    /// Drives ordered by value descending; ties keep canonical order.
    #[must_use]
    pub fn ranked(&self) -> Vec<Drive> {
        let mut drives = Drive::ALL.to_vec();
        // sort_by is stable, so equal values stay in canonical order
        drives.sort_by(|a, b| self.get(*b).total_cmp(&self.get(*a)));
        drives
    }

    /// 1-based rank of `drive` within this vector.
    #[must_use]
    pub fn rank_of(&self, drive: Drive) -> usize {
        self.ranked()
            .iter()
            .position(|d| *d == drive)
            .map_or(Drive::COUNT, |p| p + 1)
    }
}

/// The three derived vectors of one user.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PersonaVectors {
    /// Biological baseline
    pub innate: DriveVector,
    /// Conscious daily strategy (a.k.a. private)
    pub surface: DriveVector,
    /// Environmental demand and satisfaction (a.k.a. public)
    pub imposed: DriveVector,
}

impl PersonaVectors {
    /// Vector for one layer.
    #[must_use]
    pub fn get(&self, layer: PersonaLayer) -> &DriveVector {
        match layer {
            PersonaLayer::Innate => &self.innate,
            PersonaLayer::Surface => &self.surface,
            PersonaLayer::Imposed => &self.imposed,
        }
    }
}
