use crate::questionnaire::{Question, Trait};
use std::fmt;

/// Highest Likert response; also the per-item maximum after polarity
/// adjustment.
const MAX_ANSWER: f64 = 5.0;

/// Caller contract violations. The transform itself cannot fail on
/// well-formed input; these are fatal to the call and never retried.
#[derive(Debug, Clone, PartialEq)]
pub enum ScoringError {
    LengthMismatch { expected: usize, actual: usize },
    AnswerOutOfRange { index: usize, value: u8 },
    UnknownTraitCode { index: usize, code: i8 },
}

impl fmt::Display for ScoringError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoringError::LengthMismatch { expected, actual } => write!(
                f,
                "Answer count mismatch: questionnaire has {} items, got {} answers",
                expected, actual
            ),
            ScoringError::AnswerOutOfRange { index, value } => write!(
                f,
                "Answer {} for question {} is outside 1-5",
                value,
                index + 1
            ),
            ScoringError::UnknownTraitCode { index, code } => write!(
                f,
                "Question {} has unknown trait code {}",
                index + 1,
                code
            ),
        }
    }
}

impl std::error::Error for ScoringError {}

/// Trait scores on the centered [-50, 50] scale, in the fixed trait order
/// Extraversion, Agreeableness, Conscientiousness, Neuroticism, Openness.
#[derive(Debug, Clone, PartialEq)]
pub struct TraitScores([f64; 5]);

impl TraitScores {
    pub fn get(&self, t: Trait) -> f64 {
        self.0[t.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Trait, f64)> + '_ {
        Trait::ALL.iter().map(move |t| (*t, self.0[t.index()]))
    }

    pub fn as_array(&self) -> [f64; 5] {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TraitContribution {
    pub measured: Trait,
    pub items: usize, // questions measuring this trait
    pub sum: u32,     // adjusted answers summed
    pub score: f64,   // normalized result
}

/// Everything a submission produces: trait scores, composites, and the
/// per-trait breakdown for verbose output.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreReport {
    pub trait_scores: TraitScores,
    pub personality_score: f64,
    pub fitment_score: Option<f64>,
    pub breakdown: Vec<TraitContribution>,
}

/// Map polarity-adjusted answers onto the five trait scores.
///
/// Per trait: sum the answers of its items and project the fraction of the
/// maximum possible sum onto [-50, +50], rounded to nearest. A trait with
/// no items scores exactly 0.
///
/// `answers` must be index-aligned with `questions` and already
/// polarity-adjusted (see `questionnaire::adjusted_answer`).
pub fn compute_trait_scores(
    questions: &[Question],
    answers: &[u8],
) -> Result<TraitScores, ScoringError> {
    if questions.len() != answers.len() {
        return Err(ScoringError::LengthMismatch {
            expected: questions.len(),
            actual: answers.len(),
        });
    }

    for (index, answer) in answers.iter().enumerate() {
        if !(1..=5).contains(answer) {
            return Err(ScoringError::AnswerOutOfRange {
                index,
                value: *answer,
            });
        }
    }

    let mut sums = [0u32; 5];
    let mut counts = [0usize; 5];

    for (index, (question, answer)) in questions.iter().zip(answers).enumerate() {
        let measured = question
            .measured_trait()
            .ok_or(ScoringError::UnknownTraitCode {
                index,
                code: question.code,
            })?;
        sums[measured.index()] += u32::from(*answer);
        counts[measured.index()] += 1;
    }

    let mut scores = [0.0f64; 5];
    for t in Trait::ALL {
        let i = t.index();
        if counts[i] == 0 {
            // No items for this trait: defined as 0, not a division by zero.
            scores[i] = 0.0;
        } else {
            let max_sum = counts[i] as f64 * MAX_ANSWER;
            scores[i] = ((sums[i] as f64 / max_sum) * 100.0 - 50.0).round();
        }
    }

    Ok(TraitScores(scores))
}

/// Composite personality score.
///
/// The five weights already sum to 1.0; the outer 0.3 is a deliberate
/// damping factor, applied before flooring.
pub fn personality_score(scores: &TraitScores) -> f64 {
    let weighted = scores.get(Trait::Openness) * 0.2
        + scores.get(Trait::Conscientiousness) * 0.2
        + scores.get(Trait::Extraversion) * 0.2
        + scores.get(Trait::Agreeableness) * 0.2
        + scores.get(Trait::Neuroticism) * 0.2;
    (weighted * 0.3).floor()
}

/// Combined fitment score, defined only when a profile score exists for
/// the candidate.
pub fn fitment_score(personality: f64, profile: Option<f64>) -> Option<f64> {
    profile.map(|p| (p + personality).floor())
}

/// End-to-end transform: answers in, full report out.
pub fn score_responses(
    questions: &[Question],
    answers: &[u8],
    profile: Option<f64>,
) -> Result<ScoreReport, ScoringError> {
    let trait_scores = compute_trait_scores(questions, answers)?;

    let breakdown = Trait::ALL
        .iter()
        .map(|t| {
            let paired: Vec<u32> = questions
                .iter()
                .zip(answers)
                .filter(|(q, _)| q.measured_trait() == Some(*t))
                .map(|(_, a)| u32::from(*a))
                .collect();
            TraitContribution {
                measured: *t,
                items: paired.len(),
                sum: paired.iter().sum(),
                score: trait_scores.get(*t),
            }
        })
        .collect();

    let personality = personality_score(&trait_scores);
    let fitment = fitment_score(personality, profile);

    Ok(ScoreReport {
        trait_scores,
        personality_score: personality,
        fitment_score: fitment,
        breakdown,
    })
}
