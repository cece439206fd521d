use crate::questionnaire::{Questionnaire, Trait};

/// Validate a questionnaire at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_questionnaire(questionnaire: &Questionnaire) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if questionnaire.is_empty() {
        errors.push("questionnaire: must contain at least one question".to_string());
    }

    for (i, question) in questionnaire.questions.iter().enumerate() {
        if question.code == 0 {
            errors.push(format!("questions[{}].code: must be nonzero", i));
        } else if question.measured_trait().is_none() {
            errors.push(format!(
                "questions[{}].code: magnitude {} is outside 1-5",
                i,
                question.code.abs()
            ));
        }

        if question.text.trim().is_empty() {
            errors.push(format!("questions[{}].text: must not be empty", i));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Names of traits the questionnaire never measures. Such traits score 0
/// by definition; callers may want to warn about them.
pub fn unmeasured_traits(questionnaire: &Questionnaire) -> Vec<Trait> {
    Trait::ALL
        .iter()
        .filter(|t| questionnaire.items_for(**t) == 0)
        .copied()
        .collect()
}
