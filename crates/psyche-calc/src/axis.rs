//! Axis Classifier: Jung-style typing from weighted question match-ups.
//!
//! Evaluated per axis and per layer, directly on the raw rows; axes share
//! no state and do not depend on the drive vectors.

use crate::answers::RawPersonaAnswers;
use crate::tables::axes::{AxisSpec, AXES, DECISIVE_THRESHOLD};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four bipolar axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// Introvert / Extrovert
    Energy,
    /// Sensing / Intuitive
    Perception,
    /// Thinking / Feeling
    Judgment,
    /// Judging / Perspective
    Orientation,
}

impl Axis {
    /// Return string representation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Energy => "energy",
            Self::Perception => "perception",
            Self::Judgment => "judgment",
            Self::Orientation => "orientation",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A named pole of some axis, or no clear pole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pole {
    /// Energy: inward
    Introvert,
    /// Energy: outward
    Extrovert,
    /// Perception: concrete
    Sensing,
    /// Perception: abstract
    Intuitive,
    /// Judgment: logic
    Thinking,
    /// Judgment: values
    Feeling,
    /// Orientation: planned
    Judging,
    /// Orientation: open-ended
    Perspective,
    /// Neither or both poles decisive
    Ambivalent,
}

impl Pole {
    /// Type-code letter; `X` for ambivalent.
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Self::Introvert => 'I',
            Self::Extrovert => 'E',
            Self::Sensing => 'S',
            Self::Intuitive => 'N',
            Self::Thinking => 'T',
            Self::Feeling => 'F',
            Self::Judging => 'J',
            Self::Perspective => 'P',
            Self::Ambivalent => 'X',
        }
    }
}

/// Mean of one match-up group for one layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupScore {
    /// Archetype the group stands for
    pub archetype: String,
    /// Pole the group votes for
    pub pole: Pole,
    /// Mean of the polarity-corrected answers
    pub mean: f64,
    /// `mean > DECISIVE_THRESHOLD`
    pub decisive: bool,
}

/// Classification of one layer on one axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisClassification {
    /// Winning pole or `Ambivalent`
    pub pole: Pole,
    /// Strongest decisive group of the winning pole; `None` when ambivalent
    pub archetype: Option<String>,
    /// Every group's score, in table order
    pub scores: Vec<GroupScore>,
}

/// Innate vs. surface classification on one axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisResult {
    /// Which axis
    pub axis: Axis,
    /// Innate layer classification
    pub innate: AxisClassification,
    /// Surface layer classification
    pub surface: AxisClassification,
    /// Both layers land on the same pole (Ambivalent included)
    pub aligned: bool,
}

/// Classify one layer's row on one axis.
///
/// A pole wins when at least one of its groups is decisive and no group of
/// the other pole is. Within the winning pole the highest mean names the
/// archetype; equal means keep table priority.
#[must_use]
pub fn classify_axis(raw: &RawPersonaAnswers, spec: &AxisSpec) -> AxisClassification {
    let scores: Vec<GroupScore> = spec
        .groups
        .iter()
        .map(|group| {
            let sum: f64 = group
                .items
                .iter()
                .map(|(q, polarity)| polarity.contribution(raw.answer(*q)))
                .sum();
            let mean = if group.items.is_empty() {
                0.0
            } else {
                sum / group.items.len() as f64
            };
            GroupScore {
                archetype: group.archetype.to_string(),
                pole: group.pole,
                mean,
                decisive: mean > DECISIVE_THRESHOLD,
            }
        })
        .collect();

    let decisive_poles: Vec<_> = spec
        .poles
        .into_iter()
        .filter(|pole| scores.iter().any(|s| s.decisive && s.pole == *pole))
        .collect();

    let (pole, archetype) = match decisive_poles.as_slice() {
        [winner] => {
            let mut best: Option<&GroupScore> = None;
            for s in scores.iter().filter(|s| s.decisive && s.pole == *winner) {
                if best.map_or(true, |b| s.mean > b.mean) {
                    best = Some(s);
                }
            }
            (*winner, best.map(|s| s.archetype.clone()))
        }
        _ => (Pole::Ambivalent, None),
    };

    AxisClassification {
        pole,
        archetype,
        scores,
    }
}

/// Classify innate and surface rows on all four axes.
#[must_use]
pub fn classify_axes(innate: &RawPersonaAnswers, surface: &RawPersonaAnswers) -> Vec<AxisResult> {
    AXES.iter()
        .map(|spec| {
            let innate = classify_axis(innate, spec);
            let surface = classify_axis(surface, spec);
            AxisResult {
                axis: spec.axis,
                aligned: innate.pole == surface.pole,
                innate,
                surface,
            }
        })
        .collect()
}

/// Four-letter type code from per-axis classifications in axis order.
pub fn jung_type<'a>(classifications: impl IntoIterator<Item = &'a AxisClassification>) -> String {
    classifications.into_iter().map(|c| c.pole.letter()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::PersonaLayer;
    use crate::tables::axes::{ENERGY, JUDGMENT};
    use crate::vector::test_support::row_for;

    #[test]
    fn test_neutral_answers_are_ambivalent_everywhere() {
        let neutral = RawPersonaAnswers::uniform(42, 3);
        for result in classify_axes(&neutral, &neutral) {
            assert_eq!(result.innate.pole, Pole::Ambivalent);
            assert!(result.innate.archetype.is_none());
            assert!(result.aligned);
        }
    }

    #[test]
    fn test_extrovert_surface_over_introvert_innate() {
        // surface: Dominance=5, Affiliation=5, others 1
        let surface = row_for(PersonaLayer::Surface, [1, 1, 5, 1, 1, 5, 1]);
        // innate: Exploration=5, Care=5, others 1
        let innate = row_for(PersonaLayer::Innate, [5, 1, 1, 1, 5, 1, 1]);

        let results = classify_axes(&innate, &surface);
        let energy = &results[0];
        assert_eq!(energy.axis, Axis::Energy);
        assert_eq!(energy.surface.pole, Pole::Extrovert);
        assert_eq!(energy.innate.pole, Pole::Introvert);
        assert!(!energy.aligned);
        // equal means resolve by table priority
        assert_eq!(energy.surface.archetype.as_deref(), Some("commanding"));
        assert_eq!(energy.innate.archetype.as_deref(), Some("contemplative"));
    }

    #[test]
    fn test_highest_decisive_group_names_archetype() {
        let surface = row_for(PersonaLayer::Surface, [1, 1, 4, 1, 1, 5, 1]);
        let c = classify_axis(&surface, &ENERGY);
        assert_eq!(c.pole, Pole::Extrovert);
        assert_eq!(c.archetype.as_deref(), Some("gregarious"));
    }

    #[test]
    fn test_both_poles_decisive_is_ambivalent() {
        let row = RawPersonaAnswers::uniform(42, 5);
        let c = classify_axis(&row, &ENERGY);
        assert!(c.scores.iter().any(|s| s.decisive && s.pole == Pole::Introvert));
        assert!(c.scores.iter().any(|s| s.decisive && s.pole == Pole::Extrovert));
        assert_eq!(c.pole, Pole::Ambivalent);
        assert!(c.archetype.is_none());
    }

    #[test]
    fn test_threshold_is_strict() {
        // Every group of the axis averages exactly 3
        let row = RawPersonaAnswers::uniform(42, 3);
        let c = classify_axis(&row, &JUDGMENT);
        assert!(c.scores.iter().all(|s| (s.mean - 3.0).abs() < 1e-12 && !s.decisive));
    }

    #[test]
    fn test_empty_row_is_ambivalent() {
        let c = classify_axis(&RawPersonaAnswers::new(), &ENERGY);
        assert_eq!(c.pole, Pole::Ambivalent);
        assert!(c.scores.iter().all(|s| s.mean == 0.0));
    }

    #[test]
    fn test_alignment_matches_pole_equality() {
        let a = row_for(PersonaLayer::Surface, [1, 1, 5, 1, 1, 5, 1]);
        let b = row_for(PersonaLayer::Innate, [5, 1, 1, 1, 5, 1, 1]);
        let neutral = RawPersonaAnswers::uniform(42, 3);
        for (innate, surface) in [(&a, &b), (&a, &a), (&b, &neutral), (&neutral, &neutral)] {
            for r in classify_axes(innate, surface) {
                assert_eq!(r.aligned, r.innate.pole == r.surface.pole);
            }
        }
    }

    #[test]
    fn test_jung_type_letters() {
        let neutral = RawPersonaAnswers::uniform(42, 3);
        let results = classify_axes(&neutral, &neutral);
        assert_eq!(jung_type(results.iter().map(|r| &r.innate)), "XXXX");

        let surface = row_for(PersonaLayer::Surface, [1, 1, 5, 1, 1, 5, 1]);
        let results = classify_axes(&neutral, &surface);
        let code = jung_type(results.iter().map(|r| &r.surface));
        assert_eq!(code.len(), 4);
        assert!(code.starts_with('E'));
    }
}
