//! Centralized theme module for TUI color constants and styles

use ratatui::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

/// Detect the terminal background and pick a palette. Falls back to dark
/// when luma detection fails (pipes, unsupported terminals).
pub fn resolve_theme() -> Theme {
    match terminal_light::luma() {
        Ok(luma) if luma > 0.6 => Theme::Light,
        _ => Theme::Dark,
    }
}

/// Complete color palette for the TUI
#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Score-based colors (low / mid / high bands)
    pub score_low: Color,
    pub score_mid: Color,
    pub score_high: Color,
    pub bar_empty: Color,

    // General colors
    pub muted: Color,
    pub title_color: Color,

    // Likert selector
    pub likert_selected: Style,
    pub likert_unselected: Style,

    // Progress gauge
    pub gauge_filled: Color,

    // Status bar colors
    pub status_bar_bg: Color,
    pub status_key_color: Color,
    pub flash_success: Color,
    pub flash_error: Color,

    // Popup overlay colors
    pub popup_border: Color,
}

impl ThemeColors {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self::dark(),
            Theme::Light => Self::light(),
        }
    }

    pub fn dark() -> Self {
        Self {
            score_low: Color::Red,
            score_mid: Color::Yellow,
            score_high: Color::Green,
            bar_empty: Color::DarkGray,
            muted: Color::Gray,
            title_color: Color::Cyan,
            likert_selected: Style::new().fg(Color::Black).bg(Color::Cyan).bold(),
            likert_unselected: Style::new().fg(Color::Gray),
            gauge_filled: Color::Cyan,
            status_bar_bg: Color::Indexed(236),
            status_key_color: Color::Cyan,
            flash_success: Color::Green,
            flash_error: Color::Red,
            popup_border: Color::Cyan,
        }
    }

    pub fn light() -> Self {
        Self {
            score_low: Color::Red,
            score_mid: Color::Indexed(130), // dark yellow reads better on light
            score_high: Color::Indexed(28),
            bar_empty: Color::Indexed(250),
            muted: Color::DarkGray,
            title_color: Color::Blue,
            likert_selected: Style::new().fg(Color::White).bg(Color::Blue).bold(),
            likert_unselected: Style::new().fg(Color::DarkGray),
            gauge_filled: Color::Blue,
            status_bar_bg: Color::Indexed(254),
            status_key_color: Color::Blue,
            flash_success: Color::Indexed(28),
            flash_error: Color::Red,
            popup_border: Color::Blue,
        }
    }

    /// Returns the color for a trait score, banded on the normalized
    /// (score+50)/100 scale: below 0.4 low, below 0.6 mid, the rest high.
    pub fn score_color(&self, score: f64) -> Color {
        let normalized = (score + 50.0) / 100.0;
        if normalized < 0.4 {
            self.score_low
        } else if normalized < 0.6 {
            self.score_mid
        } else {
            self.score_high
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_color_bands() {
        let colors = ThemeColors::dark();
        assert_eq!(colors.score_color(-30.0), colors.score_low);
        assert_eq!(colors.score_color(0.0), colors.score_mid);
        assert_eq!(colors.score_color(40.0), colors.score_high);
    }

    #[test]
    fn test_band_boundaries() {
        let colors = ThemeColors::dark();
        // -10 normalizes to exactly 0.4: mid, not low
        assert_eq!(colors.score_color(-10.0), colors.score_mid);
        // 10 normalizes to exactly 0.6: high, not mid
        assert_eq!(colors.score_color(10.0), colors.score_high);
    }
}
