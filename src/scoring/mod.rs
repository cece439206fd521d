pub mod engine;
pub mod validation;

pub use engine::{
    compute_trait_scores, fitment_score, personality_score, score_responses, ScoreReport,
    ScoringError, TraitContribution, TraitScores,
};
pub use validation::{unmeasured_traits, validate_questionnaire};
