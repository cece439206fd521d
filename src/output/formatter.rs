use owo_colors::OwoColorize;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use crate::questionnaire::Trait;
use crate::roster::CandidateRecord;
use crate::scoring::ScoreReport;

/// Bar length for trait rows, shrunk on narrow terminals.
const BAR_WIDTH: usize = 20;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Format a score without decimals ("50", "-30", "15")
pub fn format_score(score: f64) -> String {
    format!("{:.0}", score)
}

/// Band a trait score by its position on the normalized (score+50)/100
/// scale: below 0.4 is low, below 0.6 is mid, the rest is high.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Low,
    Mid,
    High,
}

pub fn score_band(score: f64) -> ScoreBand {
    let normalized = (score + 50.0) / 100.0;
    if normalized < 0.4 {
        ScoreBand::Low
    } else if normalized < 0.6 {
        ScoreBand::Mid
    } else {
        ScoreBand::High
    }
}

/// Render a trait score as a filled/empty bar over the [-50, 50] range.
pub fn trait_bar(score: f64, width: usize) -> String {
    let ratio = ((score + 50.0) / 100.0).clamp(0.0, 1.0);
    let filled = (ratio * width as f64).round() as usize;
    let empty = width.saturating_sub(filled);
    format!("{}{}", "█".repeat(filled), "░".repeat(empty))
}

fn bar_width() -> usize {
    match get_terminal_width() {
        Some(w) if w < 60 => 10,
        _ => BAR_WIDTH,
    }
}

fn trait_row(t: Trait, score: f64, use_colors: bool) -> String {
    let bar = trait_bar(score, bar_width());
    let score_str = format!("{:>4}", format_score(score));

    if use_colors {
        let colored_score = match score_band(score) {
            ScoreBand::Low => score_str.red().to_string(),
            ScoreBand::Mid => score_str.yellow().to_string(),
            ScoreBand::High => score_str.green().to_string(),
        };
        format!("  {:<18} {} {}", t.name(), colored_score, bar)
    } else {
        format!("  {:<18} {} {}", t.name(), score_str, bar)
    }
}

fn composite_row(label: &str, value: Option<f64>, use_colors: bool) -> String {
    let value_str = match value {
        Some(v) => format_score(v),
        None => "-".to_string(),
    };
    if use_colors {
        format!("  {:<18} {}", label, value_str.bold())
    } else {
        format!("  {:<18} {}", label, value_str)
    }
}

/// Format the results card for a freshly scored assessment.
pub fn format_results_card(
    email: &str,
    report: &ScoreReport,
    show_descriptions: bool,
    use_colors: bool,
) -> String {
    let mut lines = Vec::new();

    if use_colors {
        lines.push(format!("Personality profile for {}", email.bold()));
    } else {
        lines.push(format!("Personality profile for {}", email));
    }
    lines.push(String::new());

    for (t, score) in report.trait_scores.iter() {
        lines.push(trait_row(t, score, use_colors));
        if show_descriptions {
            lines.push(format!("    {}", dim_if(t.description(), use_colors)));
        }
    }

    lines.push(String::new());
    lines.push(composite_row(
        "Personality score",
        Some(report.personality_score),
        use_colors,
    ));
    lines.push(composite_row(
        "Fitment score",
        report.fitment_score,
        use_colors,
    ));

    lines.join("\n")
}

/// Format the stored card for a candidate from the roster (the `results`
/// subcommand). Traits without a stored score render as "-".
pub fn format_stored_card(
    email: &str,
    record: &CandidateRecord,
    show_descriptions: bool,
    use_colors: bool,
) -> String {
    let mut lines = Vec::new();

    lines.push(format!("Personality profile for {}", email));
    if let Some(completed_at) = record.completed_at {
        lines.push(format!(
            "  Completed: {}",
            completed_at.format("%Y-%m-%d %H:%M UTC")
        ));
    } else {
        lines.push("  Assessment not completed yet".to_string());
    }
    lines.push(String::new());

    for t in Trait::ALL {
        match record.trait_score(t) {
            Some(score) => {
                lines.push(trait_row(t, score, use_colors));
                if show_descriptions {
                    lines.push(format!("    {}", dim_if(t.description(), use_colors)));
                }
            }
            None => lines.push(format!("  {:<18}    -", t.name())),
        }
    }

    lines.push(String::new());
    lines.push(composite_row("Profile score", record.profile_score, use_colors));
    lines.push(composite_row(
        "Personality score",
        record.personality_score,
        use_colors,
    ));
    lines.push(composite_row("Fitment score", record.fitment_score, use_colors));

    lines.join("\n")
}

/// Per-trait breakdown lines for verbose mode.
pub fn format_breakdown(report: &ScoreReport) -> String {
    report
        .breakdown
        .iter()
        .map(|c| {
            format!(
                "  {}: {} item(s), sum {}/{} -> {}",
                c.measured,
                c.items,
                c.sum,
                c.items * 5,
                format_score(c.score)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn dim_if(text: &str, use_colors: bool) -> String {
    if use_colors {
        text.dimmed().to_string()
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::questionnaire::Question;
    use crate::scoring::score_responses;

    fn sample_report() -> ScoreReport {
        let questions: Vec<Question> = (1..=5)
            .map(|code| Question {
                code,
                text: format!("Item {}", code),
            })
            .collect();
        score_responses(&questions, &[5, 4, 3, 2, 1], Some(40.0)).unwrap()
    }

    #[test]
    fn test_format_score_no_decimals() {
        assert_eq!(format_score(50.0), "50");
        assert_eq!(format_score(-30.0), "-30");
        assert_eq!(format_score(0.0), "0");
    }

    #[test]
    fn test_score_band_thresholds() {
        // normalized < 0.4 -> below -10
        assert_eq!(score_band(-30.0), ScoreBand::Low);
        assert_eq!(score_band(-11.0), ScoreBand::Low);
        // -10 normalizes to exactly 0.4
        assert_eq!(score_band(-10.0), ScoreBand::Mid);
        assert_eq!(score_band(5.0), ScoreBand::Mid);
        // 10 normalizes to exactly 0.6
        assert_eq!(score_band(10.0), ScoreBand::High);
        assert_eq!(score_band(50.0), ScoreBand::High);
    }

    #[test]
    fn test_trait_bar_extremes() {
        assert_eq!(trait_bar(50.0, 10), "██████████");
        assert_eq!(trait_bar(-50.0, 10), "░░░░░░░░░░");
        assert_eq!(trait_bar(0.0, 10), "█████░░░░░");
    }

    #[test]
    fn test_trait_bar_clamps_out_of_range() {
        // Values past the scale ends must not panic or overflow the width
        assert_eq!(trait_bar(80.0, 10), "██████████");
        assert_eq!(trait_bar(-80.0, 10), "░░░░░░░░░░");
    }

    #[test]
    fn test_results_card_plain() {
        let report = sample_report();
        let card = format_results_card("ada@example.com", &report, false, false);

        assert!(card.contains("ada@example.com"));
        assert!(card.contains("Extraversion"));
        assert!(card.contains("Openness"));
        assert!(card.contains("Personality score"));
        assert!(card.contains("Fitment score"));
        // No descriptions requested
        assert!(!card.contains("sociability"));
    }

    #[test]
    fn test_results_card_with_descriptions() {
        let report = sample_report();
        let card = format_results_card("ada@example.com", &report, true, false);
        assert!(card.contains("sociability"));
    }

    #[test]
    fn test_stored_card_handles_missing_scores() {
        let record = CandidateRecord {
            profile_score: Some(40.0),
            ..CandidateRecord::default()
        };
        let card = format_stored_card("ada@example.com", &record, false, false);
        assert!(card.contains("Assessment not completed yet"));
        assert!(card.contains("Profile score"));
        // Unassessed traits show a dash
        assert!(card.contains("Extraversion"));
        assert!(card.contains("-"));
    }

    #[test]
    fn test_breakdown_lists_every_trait() {
        let report = sample_report();
        let breakdown = format_breakdown(&report);
        for t in Trait::ALL {
            assert!(breakdown.contains(t.name()), "missing {}", t);
        }
        assert!(breakdown.contains("1 item(s)"));
    }
}
