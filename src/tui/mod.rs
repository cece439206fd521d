pub mod app;
pub mod event;
pub mod theme;
pub mod ui;

pub use app::App;
pub use theme::{resolve_theme, Theme, ThemeColors};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use event::{Event, EventHandler};

pub async fn run_tui(mut app: App) -> anyhow::Result<()> {
    // Resolve the palette before entering the alternate screen: luma
    // detection talks to the terminal and must not race the TUI.
    let colors = ThemeColors::for_theme(resolve_theme());

    // Init terminal (sets up panic hooks automatically)
    let mut terminal = ratatui::init();

    let mut events = EventHandler::new(250); // 250ms tick for flash expiry

    loop {
        terminal.draw(|frame| ui::draw(frame, &app, &colors))?;

        match events.next().await {
            Event::Key(key) => handle_key_event(&mut app, key),
            Event::Tick => app.update_flash(),
        }

        if app.should_quit {
            break;
        }
    }

    // Restore terminal
    ratatui::restore();

    Ok(())
}

fn handle_key_event(app: &mut App, key: KeyEvent) {
    // Ctrl-c quits from anywhere
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    if app.input_mode == app::InputMode::Help {
        // Any key exits help
        app.dismiss_help();
        return;
    }

    match app.screen {
        app::Screen::Splash => match key.code {
            KeyCode::Enter | KeyCode::Char('s') => app.start(),
            KeyCode::Char('q') => app.should_quit = true,
            _ => {}
        },
        app::Screen::Question => match key.code {
            // Likert responses
            KeyCode::Char(c @ '1'..='5') => {
                app.select_answer(c as u8 - b'0');
            }

            // Navigation
            KeyCode::Char('h') | KeyCode::Left => app.prev_question(),
            KeyCode::Char('l') | KeyCode::Right => app.next_question(),

            // Complete from the last question
            KeyCode::Enter => {
                if app.session.is_last() {
                    app.complete();
                }
            }

            // Help
            KeyCode::Char('?') => app.show_help(),

            KeyCode::Char('q') => app.should_quit = true,
            _ => {}
        },
        app::Screen::Results => match key.code {
            KeyCode::Char('q') | KeyCode::Enter | KeyCode::Esc => app.should_quit = true,
            _ => {}
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::questionnaire::Questionnaire;
    use crate::roster::Roster;
    use crate::session::QuizSession;
    use crossterm::event::KeyEvent;

    fn test_app() -> App {
        let mut roster = Roster::new();
        roster.register("ada@example.com", None);
        App::new(
            QuizSession::new(Questionnaire::builtin()),
            "ada@example.com".to_string(),
            roster,
            std::env::temp_dir().join("persona_fit_test_tui_roster.json"),
            Config::default(),
        )
    }

    #[test]
    fn test_enter_starts_quiz_from_splash() {
        let mut app = test_app();
        handle_key_event(&mut app, KeyEvent::from(KeyCode::Enter));
        assert_eq!(app.screen, app::Screen::Question);
    }

    #[test]
    fn test_digit_keys_answer_and_advance() {
        let mut app = test_app();
        app.start();
        handle_key_event(&mut app, KeyEvent::from(KeyCode::Char('4')));
        assert_eq!(app.session.selected_raw(0), Some(4));
        assert_eq!(app.session.current_index(), 1);
    }

    #[test]
    fn test_navigation_keys() {
        let mut app = test_app();
        app.start();
        handle_key_event(&mut app, KeyEvent::from(KeyCode::Char('l')));
        assert_eq!(app.session.current_index(), 1);
        handle_key_event(&mut app, KeyEvent::from(KeyCode::Char('h')));
        assert_eq!(app.session.current_index(), 0);
    }

    #[test]
    fn test_enter_completes_only_on_last_question() {
        let mut app = test_app();
        app.start();
        handle_key_event(&mut app, KeyEvent::from(KeyCode::Enter));
        // Not on the last question: nothing happens
        assert_eq!(app.screen, app::Screen::Question);
        assert!(app.report.is_none());
    }

    #[test]
    fn test_q_quits() {
        let mut app = test_app();
        handle_key_event(&mut app, KeyEvent::from(KeyCode::Char('q')));
        assert!(app.should_quit);
    }

    #[test]
    fn test_help_dismissed_by_any_key() {
        let mut app = test_app();
        app.start();
        handle_key_event(&mut app, KeyEvent::from(KeyCode::Char('?')));
        assert_eq!(app.input_mode, app::InputMode::Help);
        handle_key_event(&mut app, KeyEvent::from(KeyCode::Char('x')));
        assert_eq!(app.input_mode, app::InputMode::Normal);
    }
}
