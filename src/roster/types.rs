use crate::questionnaire::Trait;
use crate::scoring::ScoreReport;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The candidate table, keyed by normalized email. This is the one
/// persistence collaborator: assessment results are written back here and
/// the profile score consumed by the fitment composite is read from here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Roster {
    pub version: u32,
    #[serde(default)]
    pub candidates: HashMap<String, CandidateRecord>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CandidateRecord {
    /// Screening score supplied out of band; fitment is undefined without it.
    #[serde(default)]
    pub profile_score: Option<f64>,

    #[serde(default)]
    pub extraversion: Option<f64>,
    #[serde(default)]
    pub agreeableness: Option<f64>,
    #[serde(default)]
    pub conscientiousness: Option<f64>,
    #[serde(default)]
    pub neuroticism: Option<f64>,
    #[serde(default)]
    pub openness: Option<f64>,

    #[serde(default)]
    pub personality_score: Option<f64>,
    #[serde(default)]
    pub fitment_score: Option<f64>,

    #[serde(default)]
    pub assessment_completed: bool,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

impl CandidateRecord {
    /// Stored trait score for a given dimension.
    pub fn trait_score(&self, t: Trait) -> Option<f64> {
        match t {
            Trait::Extraversion => self.extraversion,
            Trait::Agreeableness => self.agreeableness,
            Trait::Conscientiousness => self.conscientiousness,
            Trait::Neuroticism => self.neuroticism,
            Trait::Openness => self.openness,
        }
    }
}

/// Emails are compared case-insensitively and ignoring surrounding
/// whitespace.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

impl Default for Roster {
    fn default() -> Self {
        Self::new()
    }
}

impl Roster {
    /// Create a new empty roster with version 1
    pub fn new() -> Self {
        Self {
            version: 1,
            candidates: HashMap::new(),
        }
    }

    pub fn contains(&self, email: &str) -> bool {
        self.candidates.contains_key(&normalize_email(email))
    }

    pub fn get(&self, email: &str) -> Option<&CandidateRecord> {
        self.candidates.get(&normalize_email(email))
    }

    pub fn profile_score(&self, email: &str) -> Option<f64> {
        self.get(email).and_then(|record| record.profile_score)
    }

    /// Add a candidate. Returns false if the email was already registered
    /// (the existing record is left untouched).
    pub fn register(&mut self, email: &str, profile_score: Option<f64>) -> bool {
        let key = normalize_email(email);
        if self.candidates.contains_key(&key) {
            return false;
        }
        self.candidates.insert(
            key,
            CandidateRecord {
                profile_score,
                ..CandidateRecord::default()
            },
        );
        true
    }

    /// Write a completed assessment onto the candidate's record. Scores
    /// recomputed for a new submission overwrite the previous ones.
    /// Returns false if the email is not registered.
    pub fn record_report(
        &mut self,
        email: &str,
        report: &ScoreReport,
        completed_at: DateTime<Utc>,
    ) -> bool {
        let key = normalize_email(email);
        let record = match self.candidates.get_mut(&key) {
            Some(record) => record,
            None => return false,
        };

        record.extraversion = Some(report.trait_scores.get(Trait::Extraversion));
        record.agreeableness = Some(report.trait_scores.get(Trait::Agreeableness));
        record.conscientiousness = Some(report.trait_scores.get(Trait::Conscientiousness));
        record.neuroticism = Some(report.trait_scores.get(Trait::Neuroticism));
        record.openness = Some(report.trait_scores.get(Trait::Openness));
        record.personality_score = Some(report.personality_score);
        record.fitment_score = report.fitment_score;
        record.assessment_completed = true;
        record.completed_at = Some(completed_at);

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::questionnaire::Question;
    use crate::scoring::score_responses;

    fn sample_report(profile: Option<f64>) -> ScoreReport {
        let questions: Vec<Question> = (1..=5)
            .map(|code| Question {
                code,
                text: format!("Item {}", code),
            })
            .collect();
        score_responses(&questions, &[5, 5, 5, 5, 5], profile).unwrap()
    }

    #[test]
    fn test_new_roster_empty() {
        let roster = Roster::new();
        assert_eq!(roster.version, 1);
        assert!(roster.candidates.is_empty());
    }

    #[test]
    fn test_register_and_lookup() {
        let mut roster = Roster::new();
        assert!(roster.register("ada@example.com", Some(40.0)));
        assert!(roster.contains("ada@example.com"));
        assert_eq!(roster.profile_score("ada@example.com"), Some(40.0));
        assert!(!roster.contains("unknown@example.com"));
    }

    #[test]
    fn test_register_normalizes_email() {
        let mut roster = Roster::new();
        roster.register("  Ada@Example.COM ", None);
        assert!(roster.contains("ada@example.com"));
        assert!(roster.contains("ADA@example.com"));
    }

    #[test]
    fn test_register_existing_is_noop() {
        let mut roster = Roster::new();
        assert!(roster.register("ada@example.com", Some(40.0)));
        assert!(!roster.register("ada@example.com", Some(99.0)));
        // Original profile score kept
        assert_eq!(roster.profile_score("ada@example.com"), Some(40.0));
    }

    #[test]
    fn test_record_report_fills_columns() {
        let mut roster = Roster::new();
        roster.register("ada@example.com", Some(40.0));

        let report = sample_report(Some(40.0));
        let now = Utc::now();
        assert!(roster.record_report("ada@example.com", &report, now));

        let record = roster.get("ada@example.com").unwrap();
        assert_eq!(record.extraversion, Some(50.0));
        assert_eq!(record.openness, Some(50.0));
        assert_eq!(record.personality_score, Some(15.0));
        assert_eq!(record.fitment_score, Some(55.0));
        assert!(record.assessment_completed);
        assert_eq!(record.completed_at, Some(now));
    }

    #[test]
    fn test_record_report_unknown_email() {
        let mut roster = Roster::new();
        let report = sample_report(None);
        assert!(!roster.record_report("ghost@example.com", &report, Utc::now()));
    }

    #[test]
    fn test_resubmission_overwrites_scores() {
        let mut roster = Roster::new();
        roster.register("ada@example.com", None);

        let first = sample_report(None);
        roster.record_report("ada@example.com", &first, Utc::now());

        let questions: Vec<Question> = (1..=5)
            .map(|code| Question {
                code,
                text: format!("Item {}", code),
            })
            .collect();
        let second = score_responses(&questions, &[1, 1, 1, 1, 1], None).unwrap();
        roster.record_report("ada@example.com", &second, Utc::now());

        let record = roster.get("ada@example.com").unwrap();
        assert_eq!(record.extraversion, Some(-30.0));
        assert_eq!(record.personality_score, Some(-9.0));
        assert_eq!(record.fitment_score, None); // no profile score
    }

    #[test]
    fn test_trait_score_accessor() {
        let mut roster = Roster::new();
        roster.register("ada@example.com", None);
        roster.record_report("ada@example.com", &sample_report(None), Utc::now());

        let record = roster.get("ada@example.com").unwrap();
        for t in Trait::ALL {
            assert_eq!(record.trait_score(t), Some(50.0));
        }
    }
}
