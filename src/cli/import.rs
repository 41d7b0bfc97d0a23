//! Import command: store one questionnaire row.

use crate::app::AppContext;
use anyhow::{Context, Result};
use psyche_calc::{PersonaLayer, RawPersonaAnswers};
use psyche_store::{QuestionnaireStore, QuestionnaireSubmission};
use std::path::Path;
use tracing::info;

pub async fn run(ctx: &AppContext, user: &str, layer: PersonaLayer, file: &Path) -> Result<()> {
    let text = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let answers = RawPersonaAnswers::from_json(&text)
        .with_context(|| format!("{} is not a JSON object of answers", file.display()))?;

    if answers.len() < usize::from(layer.question_count()) {
        eprintln!(
            "Note: {} of {} {} questions answered; unanswered items score as missing.",
            answers.len(),
            layer.question_count(),
            layer
        );
    }

    let submission = QuestionnaireSubmission::new(user, layer, answers);
    ctx.store
        .submit(&submission)
        .await
        .context("Failed to store questionnaire")?;
    info!(user_id = %user, %layer, id = %submission.id, "Questionnaire imported");
    println!("Imported {} questionnaire for {} ({})", layer, user, submission.id);

    let submitted = ctx
        .store
        .submitted_layers(user)
        .await
        .context("Failed to list submitted questionnaires")?;
    println!("{}", remaining_note(&submitted));
    Ok(())
}

/// Tell the user which questionnaires still block their reports.
fn remaining_note(submitted: &[PersonaLayer]) -> String {
    let missing: Vec<&str> = PersonaLayer::ALL
        .iter()
        .filter(|l| !submitted.contains(*l))
        .map(|l| l.as_str())
        .collect();
    if missing.is_empty() {
        "All questionnaires submitted; reports are available.".to_string()
    } else {
        format!("Still needed before reports: {}", missing.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remaining_note() {
        assert_eq!(
            remaining_note(&[PersonaLayer::Surface]),
            "Still needed before reports: innate, imposed"
        );
        assert!(remaining_note(&PersonaLayer::ALL).starts_with("All questionnaires"));
    }
}
