use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// The five trait dimensions, in fixed scoring order.
///
/// Question codes map onto this order by magnitude: 1 = Extraversion,
/// 2 = Agreeableness, 3 = Conscientiousness, 4 = Neuroticism, 5 = Openness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trait {
    Extraversion,
    Agreeableness,
    Conscientiousness,
    Neuroticism,
    Openness,
}

impl Trait {
    pub const ALL: [Trait; 5] = [
        Trait::Extraversion,
        Trait::Agreeableness,
        Trait::Conscientiousness,
        Trait::Neuroticism,
        Trait::Openness,
    ];

    /// Position in the fixed trait ordering (0-based).
    pub fn index(&self) -> usize {
        match self {
            Trait::Extraversion => 0,
            Trait::Agreeableness => 1,
            Trait::Conscientiousness => 2,
            Trait::Neuroticism => 3,
            Trait::Openness => 4,
        }
    }

    /// The 1-based question code magnitude for this trait.
    pub fn code(&self) -> i8 {
        self.index() as i8 + 1
    }

    /// Resolve a signed question code to its trait. Sign is ignored (it
    /// carries polarity, not identity). Returns None for magnitudes
    /// outside 1..=5.
    pub fn from_code(code: i8) -> Option<Trait> {
        match code.abs() {
            1 => Some(Trait::Extraversion),
            2 => Some(Trait::Agreeableness),
            3 => Some(Trait::Conscientiousness),
            4 => Some(Trait::Neuroticism),
            5 => Some(Trait::Openness),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Trait::Extraversion => "Extraversion",
            Trait::Agreeableness => "Agreeableness",
            Trait::Conscientiousness => "Conscientiousness",
            Trait::Neuroticism => "Neuroticism",
            Trait::Openness => "Openness",
        }
    }

    /// Short blurb shown on the results card.
    pub fn description(&self) -> &'static str {
        match self {
            Trait::Extraversion => {
                "Energy, positive emotions, assertiveness, sociability and the \
                 tendency to seek stimulation in the company of others."
            }
            Trait::Agreeableness => {
                "A tendency to be compassionate and cooperative rather than \
                 suspicious and antagonistic towards others."
            }
            Trait::Conscientiousness => {
                "A tendency to be organized and dependable, show self-discipline, \
                 act dutifully, and prefer planned rather than spontaneous behavior."
            }
            Trait::Neuroticism => {
                "The tendency to experience unpleasant emotions easily, such as \
                 anger, anxiety, depression, and vulnerability."
            }
            Trait::Openness => {
                "Appreciation for art, emotion, adventure, unusual ideas, \
                 curiosity, and variety of experience."
            }
        }
    }
}

impl fmt::Display for Trait {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A single Likert item.
///
/// `code` is a signed trait code: the magnitude (1..=5) selects the trait,
/// the sign selects scoring polarity. Negative codes are reverse-scored at
/// collection time (see [`adjusted_answer`]).
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Question {
    pub code: i8,
    pub text: String,
}

impl Question {
    pub fn measured_trait(&self) -> Option<Trait> {
        Trait::from_code(self.code)
    }

    /// True for negatively keyed items (reverse-scored).
    pub fn reversed(&self) -> bool {
        self.code < 0
    }
}

/// Polarity rule: for a negatively keyed item the stored answer is
/// `6 - raw`; positive items store the raw value unchanged. Applied once,
/// at collection time — the scoring engine receives adjusted values.
pub fn adjusted_answer(code: i8, raw: u8) -> u8 {
    if code < 0 {
        6 - raw
    } else {
        raw
    }
}

/// An ordered, fixed question sequence.
///
/// Index-aligned 1:1 with the answer sequence a collector produces.
/// Loadable from YAML:
/// ```yaml
/// questions:
///   - { code: 1, text: "I am the life of the party." }
///   - { code: -1, text: "I don't talk a lot." }
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Questionnaire {
    pub questions: Vec<Question>,
}

impl Questionnaire {
    /// The built-in Mini-IPIP style questionnaire: 20 items, 4 per trait,
    /// mixed polarity.
    pub fn builtin() -> Self {
        let items: [(i8, &str); 20] = [
            (1, "I am the life of the party."),
            (-2, "I am not interested in other people's problems."),
            (3, "I get chores done right away."),
            (4, "I have frequent mood swings."),
            (5, "I have a vivid imagination."),
            (-1, "I don't talk a lot."),
            (2, "I sympathize with others' feelings."),
            (-3, "I often forget to put things back in their proper place."),
            (-4, "I am relaxed most of the time."),
            (-5, "I am not interested in abstract ideas."),
            (1, "I talk to a lot of different people at parties."),
            (-2, "I am not really interested in others."),
            (3, "I like order."),
            (4, "I get upset easily."),
            (-5, "I have difficulty understanding abstract ideas."),
            (-1, "I keep in the background."),
            (2, "I feel others' emotions."),
            (-3, "I make a mess of things."),
            (-4, "I seldom feel blue."),
            (-5, "I do not have a good imagination."),
        ];

        Questionnaire {
            questions: items
                .iter()
                .map(|(code, text)| Question {
                    code: *code,
                    text: (*text).to_string(),
                })
                .collect(),
        }
    }

    /// Load a questionnaire from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed. Semantic
    /// problems (bad codes, empty text) are reported separately by
    /// `scoring::validate_questionnaire`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read questionnaire at {}", path.display()))?;

        let questionnaire: Questionnaire = serde_saphyr::from_str(&content).with_context(|| {
            format!(
                "Failed to parse questionnaire: invalid YAML in {}",
                path.display()
            )
        })?;

        Ok(questionnaire)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Number of items measuring the given trait.
    pub fn items_for(&self, t: Trait) -> usize {
        self.questions
            .iter()
            .filter(|q| q.measured_trait() == Some(t))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trait_code_roundtrip() {
        for t in Trait::ALL {
            assert_eq!(Trait::from_code(t.code()), Some(t));
            assert_eq!(Trait::from_code(-t.code()), Some(t));
        }
    }

    #[test]
    fn test_trait_from_code_out_of_range() {
        assert_eq!(Trait::from_code(0), None);
        assert_eq!(Trait::from_code(6), None);
        assert_eq!(Trait::from_code(-6), None);
    }

    #[test]
    fn test_polarity_reverses_negative_codes() {
        // code=-3, raw=5 -> stored=1
        assert_eq!(adjusted_answer(-3, 5), 1);
        assert_eq!(adjusted_answer(-3, 1), 5);
        assert_eq!(adjusted_answer(-3, 3), 3);
    }

    #[test]
    fn test_polarity_keeps_positive_codes() {
        assert_eq!(adjusted_answer(3, 5), 5);
        assert_eq!(adjusted_answer(1, 1), 1);
    }

    #[test]
    fn test_builtin_has_four_items_per_trait() {
        let q = Questionnaire::builtin();
        assert_eq!(q.len(), 20);
        for t in Trait::ALL {
            assert_eq!(q.items_for(t), 4, "trait {} under-covered", t);
        }
    }

    #[test]
    fn test_builtin_mixes_polarity() {
        let q = Questionnaire::builtin();
        assert!(q.questions.iter().any(|item| item.reversed()));
        assert!(q.questions.iter().any(|item| !item.reversed()));
    }

    #[test]
    fn test_questionnaire_yaml_parse() {
        let yaml = r#"
questions:
  - { code: 1, text: "I am the life of the party." }
  - code: -4
    text: "I am relaxed most of the time."
"#;
        let q: Questionnaire = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(q.len(), 2);
        assert_eq!(q.questions[0].code, 1);
        assert!(q.questions[1].reversed());
        assert_eq!(q.questions[1].measured_trait(), Some(Trait::Neuroticism));
    }

    #[test]
    fn test_questionnaire_serde_roundtrip() {
        let q = Questionnaire::builtin();
        let yaml = serde_saphyr::to_string(&q).unwrap();
        let parsed: Questionnaire = serde_saphyr::from_str(&yaml).unwrap();
        assert_eq!(q, parsed);
    }
}
