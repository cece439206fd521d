use crate::config::Config;
use crate::roster::Roster;
use crate::scoring::{score_responses, ScoreReport};
use crate::session::QuizSession;
use chrono::Utc;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Splash,
    Question,
    Results,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Help,
}

pub struct App {
    pub session: QuizSession,
    pub screen: Screen,
    pub input_mode: InputMode,
    pub email: String,
    pub roster: Roster,
    pub roster_path: PathBuf,
    pub report: Option<ScoreReport>,
    pub flash_message: Option<(String, Instant)>,
    pub should_quit: bool,
    pub config: Config,
}

impl App {
    pub fn new(
        session: QuizSession,
        email: String,
        roster: Roster,
        roster_path: PathBuf,
        config: Config,
    ) -> Self {
        Self {
            session,
            screen: Screen::Splash,
            input_mode: InputMode::Normal,
            email,
            roster,
            roster_path,
            report: None,
            flash_message: None,
            should_quit: false,
            config,
        }
    }

    /// Leave the splash screen and show the first question.
    pub fn start(&mut self) {
        self.screen = Screen::Question;
    }

    /// Record a raw Likert response for the current question and advance,
    /// mirroring the tap-to-answer flow: selecting a value moves on unless
    /// this is the last question.
    pub fn select_answer(&mut self, raw: u8) {
        match self.session.record_answer(raw) {
            Ok(()) => {
                if !self.session.is_last() {
                    self.session.advance();
                }
            }
            Err(e) => self.show_flash(format!("Cannot record answer: {}", e)),
        }
    }

    pub fn next_question(&mut self) {
        self.session.advance();
    }

    pub fn prev_question(&mut self) {
        self.session.retreat();
    }

    /// Finish the quiz: freeze the answers, run the scoring transform, and
    /// persist fire-and-forget — a failed save is flashed, never retried,
    /// and the results still render.
    pub fn complete(&mut self) {
        let answers = match self.session.complete() {
            Ok(answers) => answers,
            Err(e) => {
                self.show_flash(format!("Cannot complete: {}", e));
                return;
            }
        };

        let profile = self.roster.profile_score(&self.email);
        let report = match score_responses(
            &self.session.questionnaire().questions,
            &answers,
            profile,
        ) {
            Ok(report) => report,
            Err(e) => {
                self.show_flash(format!("Scoring failed: {}", e));
                return;
            }
        };

        self.roster.record_report(&self.email, &report, Utc::now());
        match crate::roster::save_roster(&self.roster_path, &self.roster) {
            Ok(()) => self.show_flash("Results saved".to_string()),
            Err(e) => self.show_flash(format!("Failed to save results: {}", e)),
        }

        self.report = Some(report);
        self.screen = Screen::Results;
    }

    pub fn update_flash(&mut self) {
        if let Some((_, timestamp)) = self.flash_message {
            if timestamp.elapsed().as_secs() >= 3 {
                self.flash_message = None;
            }
        }
    }

    pub fn show_flash(&mut self, msg: String) {
        self.flash_message = Some((msg, Instant::now()));
    }

    pub fn show_help(&mut self) {
        self.input_mode = InputMode::Help;
    }

    pub fn dismiss_help(&mut self) {
        self.input_mode = InputMode::Normal;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::questionnaire::Questionnaire;

    fn test_app() -> App {
        let mut roster = Roster::new();
        roster.register("ada@example.com", Some(40.0));
        App::new(
            QuizSession::new(Questionnaire::builtin()),
            "ada@example.com".to_string(),
            roster,
            std::env::temp_dir().join("persona_fit_test_app_roster.json"),
            Config::default(),
        )
    }

    #[test]
    fn test_starts_on_splash() {
        let app = test_app();
        assert_eq!(app.screen, Screen::Splash);
        assert_eq!(app.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_start_shows_first_question() {
        let mut app = test_app();
        app.start();
        assert_eq!(app.screen, Screen::Question);
        assert_eq!(app.session.current_index(), 0);
    }

    #[test]
    fn test_select_answer_auto_advances() {
        let mut app = test_app();
        app.start();
        app.select_answer(4);
        assert_eq!(app.session.current_index(), 1);
        assert_eq!(app.session.selected_raw(0), Some(4));
    }

    #[test]
    fn test_select_answer_stays_on_last_question() {
        let mut app = test_app();
        app.start();
        for _ in 0..19 {
            app.select_answer(3);
        }
        assert!(app.session.is_last());
        app.select_answer(3);
        assert!(app.session.is_last()); // no advance past the end
    }

    #[test]
    fn test_complete_with_gaps_flashes() {
        let mut app = test_app();
        app.start();
        app.select_answer(3);
        app.complete();
        assert_eq!(app.screen, Screen::Question);
        assert!(app.report.is_none());
        assert!(app.flash_message.is_some());
    }

    #[test]
    fn test_complete_scores_and_shows_results() {
        let temp = std::env::temp_dir().join("persona_fit_test_complete_roster.json");
        let _ = std::fs::remove_file(&temp);

        let mut app = test_app();
        app.roster_path = temp.clone();
        app.start();
        for _ in 0..20 {
            app.select_answer(5);
        }
        app.complete();

        assert_eq!(app.screen, Screen::Results);
        let report = app.report.as_ref().unwrap();
        // Fitment defined because the roster has a profile score
        assert!(report.fitment_score.is_some());

        // Roster was persisted with the completed assessment
        let saved = crate::roster::load_roster(&temp).unwrap();
        assert!(saved.get("ada@example.com").unwrap().assessment_completed);

        let _ = std::fs::remove_file(&temp);
    }
}
