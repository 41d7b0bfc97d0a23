//! Persona layers: the three questionnaire perspectives on one user.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Questionnaire perspective a row or vector belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PersonaLayer {
    /// Biological baseline
    Innate,
    /// Conscious daily strategy
    #[serde(alias = "private")]
    Surface,
    /// Environmental demand and satisfaction
    #[serde(alias = "public")]
    Imposed,
}

impl PersonaLayer {
    /// All layers in load order.
    pub const ALL: [PersonaLayer; 3] = [
        PersonaLayer::Innate,
        PersonaLayer::Surface,
        PersonaLayer::Imposed,
    ];

    /// Storage tag
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Innate => "innate",
            Self::Surface => "surface",
            Self::Imposed => "imposed",
        }
    }

    /// Number of questions in this layer's questionnaire.
    #[must_use]
    pub const fn question_count(self) -> u16 {
        match self {
            Self::Innate | Self::Surface => crate::tables::items::SELF_REPORT_QUESTIONS,
            Self::Imposed => crate::tables::items::IMPOSED_QUESTIONS,
        }
    }
}

impl fmt::Display for PersonaLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PersonaLayer {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "innate" => Ok(Self::Innate),
            "surface" | "private" => Ok(Self::Surface),
            "imposed" | "public" => Ok(Self::Imposed),
            _ => Err(Error::UnknownLayer(s.to_string())),
        }
    }
}
