//! Drive Vector Calculator: one questionnaire row to one drive vector.

use crate::answers::RawPersonaAnswers;
use crate::drive::{clamp_drive, DriveVector, PersonaVectors};
use crate::error::Result;
use crate::layer::PersonaLayer;
use crate::tables::items::{drive_items, DriveItem};

/// Compute the drive vector of one persona layer.
///
/// Each drive is the weighted mean of its polarity-corrected items.
/// Unanswered or unusable answers contribute 0, so a partial row still
/// yields a (weaker) vector. Output components are clamped to `[0, 5]`.
#[must_use]
pub fn compute_drive_vector(raw: &RawPersonaAnswers, layer: PersonaLayer) -> DriveVector {
    DriveVector::from_fn(|drive| weighted_mean(raw, drive_items(layer, drive)))
}

/// Like [`compute_drive_vector`], but rejects rows with malformed answers.
pub fn compute_drive_vector_strict(
    raw: &RawPersonaAnswers,
    layer: PersonaLayer,
) -> Result<DriveVector> {
    raw.validate_strict(layer)?;
    Ok(compute_drive_vector(raw, layer))
}

/// Compute all three layer vectors.
#[must_use]
pub fn compute_persona_vectors(
    innate: &RawPersonaAnswers,
    surface: &RawPersonaAnswers,
    imposed: &RawPersonaAnswers,
) -> PersonaVectors {
    PersonaVectors {
        innate: compute_drive_vector(innate, PersonaLayer::Innate),
        surface: compute_drive_vector(surface, PersonaLayer::Surface),
        imposed: compute_drive_vector(imposed, PersonaLayer::Imposed),
    }
}

fn weighted_mean(raw: &RawPersonaAnswers, items: &[DriveItem]) -> f64 {
    let total_weight: f64 = items.iter().map(|i| i.weight).sum();
    if total_weight <= 0.0 {
        return 0.0;
    }
    let sum: f64 = items
        .iter()
        .map(|i| i.weight * i.polarity.contribution(raw.answer(i.question)))
        .sum();
    clamp_drive(sum / total_weight)
}
