//! Profession catalog: job demand vectors loaded from TOML.
//!
//! ```toml
//! [[profession]]
//! id = "nurse"
//! name = "Nurse"
//! demand = { care = 5.0, value = 4.0 }
//! ```

use crate::error::{Error, Result};
use psyche_calc::{fit_breakdown, DriveVector, FitBreakdown};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

const BUILTIN_CATALOG: &str = include_str!("../data/professions.toml");

/// One job and what it demands of each drive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profession {
    /// Stable identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Demand per drive (0–5); omitted drives demand nothing
    #[serde(default)]
    pub demand: DriveVector,
}

/// A profession scored against one effective vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfessionScore {
    /// Profession id
    pub id: String,
    /// Display name
    pub name: String,
    /// Fit score in `[0, 5]`
    pub score: f64,
    /// Per-drive gaps behind the score
    pub breakdown: FitBreakdown,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default, rename = "profession")]
    professions: Vec<Profession>,
}

/// Validated list of professions.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProfessionCatalog {
    professions: Vec<Profession>,
}

impl ProfessionCatalog {
    /// Catalog shipped with the crate.
    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(BUILTIN_CATALOG)
    }

    /// Load a catalog file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::Catalog(format!("failed to read {}: {e}", path.display())))?;
        let catalog = Self::from_toml_str(&text)?;
        debug!(path = %path.display(), professions = catalog.len(), "Profession catalog loaded");
        Ok(catalog)
    }

    /// Parse and validate catalog TOML.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let file: CatalogFile =
            toml::from_str(text).map_err(|e| Error::Catalog(format!("invalid catalog: {e}")))?;
        Self::new(file.professions)
    }

    /// Build from professions. Ids must be unique and non-empty.
    pub fn new(professions: Vec<Profession>) -> Result<Self> {
        let mut seen = HashSet::new();
        let mut validated = Vec::with_capacity(professions.len());
        for mut profession in professions {
            if profession.id.trim().is_empty() {
                return Err(Error::Catalog(format!(
                    "profession '{}' has an empty id",
                    profession.name
                )));
            }
            if !seen.insert(profession.id.clone()) {
                return Err(Error::Catalog(format!(
                    "duplicate profession id: {}",
                    profession.id
                )));
            }
            // re-clamp values that bypassed the setter during deserialization
            profession.demand = DriveVector::from_array(profession.demand.to_array());
            validated.push(profession);
        }
        Ok(Self {
            professions: validated,
        })
    }

    /// All professions in file order.
    #[must_use]
    pub fn professions(&self) -> &[Profession] {
        &self.professions
    }

    /// Look up by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Profession> {
        self.professions.iter().find(|p| p.id == id)
    }

    /// Number of professions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.professions.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.professions.is_empty()
    }

    /// Score every profession against `effective`, best first; ties by id.
    #[must_use]
    pub fn rank(&self, effective: &DriveVector) -> Vec<ProfessionScore> {
        let mut scores: Vec<ProfessionScore> = self
            .professions
            .iter()
            .map(|p| {
                let breakdown = fit_breakdown(effective, &p.demand);
                ProfessionScore {
                    id: p.id.clone(),
                    name: p.name.clone(),
                    score: breakdown.score,
                    breakdown,
                }
            })
            .collect();
        scores.sort_by(|a, b| b.score.total_cmp(&a.score).then_with(|| a.id.cmp(&b.id)));
        scores
    }
}
