use crate::questionnaire::{adjusted_answer, Question, Questionnaire};
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum SessionError {
    AnswerOutOfRange(u8),
    AlreadyComplete,
    Incomplete { missing: usize },
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::AnswerOutOfRange(value) => {
                write!(f, "Answer {} is outside 1-5", value)
            }
            SessionError::AlreadyComplete => {
                write!(f, "Session is complete; answers are immutable")
            }
            SessionError::Incomplete { missing } => {
                write!(f, "{} question(s) still unanswered", missing)
            }
        }
    }
}

impl std::error::Error for SessionError {}

/// In-progress quiz state: one explicit object instead of ambient UI
/// globals. Holds the questionnaire, the answers collected so far
/// (stored already polarity-adjusted), and the cursor position.
///
/// Once `complete()` succeeds the answer set is frozen: further
/// `record_answer` calls are rejected.
#[derive(Debug, Clone)]
pub struct QuizSession {
    questionnaire: Questionnaire,
    answers: Vec<Option<u8>>,
    current: usize,
    completed: bool,
}

impl QuizSession {
    pub fn new(questionnaire: Questionnaire) -> Self {
        let answers = vec![None; questionnaire.len()];
        Self {
            questionnaire,
            answers,
            current: 0,
            completed: false,
        }
    }

    pub fn questionnaire(&self) -> &Questionnaire {
        &self.questionnaire
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_question(&self) -> &Question {
        &self.questionnaire.questions[self.current]
    }

    /// Record a raw Likert response for the current question. The polarity
    /// adjustment happens here, so the stored value is what the scoring
    /// engine expects.
    pub fn record_answer(&mut self, raw: u8) -> Result<(), SessionError> {
        if self.completed {
            return Err(SessionError::AlreadyComplete);
        }
        if !(1..=5).contains(&raw) {
            return Err(SessionError::AnswerOutOfRange(raw));
        }

        let code = self.current_question().code;
        self.answers[self.current] = Some(adjusted_answer(code, raw));
        Ok(())
    }

    /// The raw (pre-adjustment) value selected for question `index`, for
    /// display highlighting. Reverse-maps the stored value through the
    /// polarity rule, which is its own inverse.
    pub fn selected_raw(&self, index: usize) -> Option<u8> {
        let stored = self.answers.get(index).copied().flatten()?;
        Some(adjusted_answer(self.questionnaire.questions[index].code, stored))
    }

    /// Move to the next question. Returns false when already on the last.
    pub fn advance(&mut self) -> bool {
        if self.current + 1 < self.questionnaire.len() {
            self.current += 1;
            true
        } else {
            false
        }
    }

    /// Move to the previous question. Returns false when already on the first.
    pub fn retreat(&mut self) -> bool {
        if self.current > 0 {
            self.current -= 1;
            true
        } else {
            false
        }
    }

    pub fn is_first(&self) -> bool {
        self.current == 0
    }

    pub fn is_last(&self) -> bool {
        self.current + 1 == self.questionnaire.len()
    }

    pub fn answered_count(&self) -> usize {
        self.answers.iter().filter(|a| a.is_some()).count()
    }

    pub fn all_answered(&self) -> bool {
        self.answered_count() == self.questionnaire.len()
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// 1-based position and total, for the "n / N" progress display.
    pub fn progress(&self) -> (usize, usize) {
        (self.current + 1, self.questionnaire.len())
    }

    /// Mark the session complete and return the adjusted answer sequence.
    ///
    /// Every question must be answered: completing with gaps would feed
    /// out-of-range zeros into the scoring transform.
    pub fn complete(&mut self) -> Result<Vec<u8>, SessionError> {
        let missing = self.questionnaire.len() - self.answered_count();
        if missing > 0 {
            return Err(SessionError::Incomplete { missing });
        }

        self.completed = true;
        Ok(self.answers.iter().copied().flatten().collect())
    }
}
