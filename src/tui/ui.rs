use crate::tui::app::{App, InputMode, Screen};
use crate::tui::theme::ThemeColors;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Clear, Gauge, Paragraph, Wrap};

pub fn draw(frame: &mut Frame, app: &App, colors: &ThemeColors) {
    let area = frame.area();

    // Handle very small terminal sizes gracefully
    if area.height < 10 || area.width < 40 {
        let msg = Paragraph::new("Terminal too small").alignment(Alignment::Center);
        frame.render_widget(msg, area);
        return;
    }

    match app.screen {
        Screen::Splash => render_splash(frame, app, colors),
        Screen::Question => render_question(frame, app, colors),
        Screen::Results => render_results(frame, app, colors),
    }

    if app.input_mode == InputMode::Help {
        render_help_popup(frame, colors);
    }
}

fn render_splash(frame: &mut Frame, app: &App, colors: &ThemeColors) {
    let area = frame.area();
    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(6),
        Constraint::Fill(1),
        Constraint::Length(1), // Status bar
    ])
    .split(area);

    let (_, total) = app.session.progress();
    let lines = vec![
        Line::from(Span::styled(
            "persona-fit",
            Style::default().fg(colors.title_color).bold(),
        )),
        Line::from(""),
        Line::from("A short Big Five personality assessment."),
        Line::from(format!(
            "{} statements. Rate each from 1 (strongly disagree) to 5 (strongly agree).",
            total
        )),
        Line::from(""),
        Line::from(Span::styled(
            "There are no right or wrong answers.",
            Style::default().fg(colors.muted),
        )),
    ];

    let splash = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(splash, chunks[1]);

    render_status_bar(
        frame,
        chunks[3],
        app,
        colors,
        &[("Enter", ":start "), ("q", ":quit")],
    );
}

fn render_question(frame: &mut Frame, app: &App, colors: &ThemeColors) {
    let area = frame.area();

    // Layout: progress(1) + position(1) + card(fill) + likert(3) + anchors(1) + status(1)
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .split(area);

    let (position, total) = app.session.progress();

    let gauge = Gauge::default()
        .ratio(position as f64 / total as f64)
        .gauge_style(Style::default().fg(colors.gauge_filled))
        .use_unicode(true)
        .label("");
    frame.render_widget(gauge, chunks[0]);

    let position_line = Paragraph::new(format!("{} / {}", position, total))
        .alignment(Alignment::Center)
        .style(Style::default().fg(colors.muted));
    frame.render_widget(position_line, chunks[1]);

    let question = Paragraph::new(app.session.current_question().text.clone())
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::bordered().border_style(Style::default().fg(colors.muted)));
    frame.render_widget(
        question,
        centered_rect_fixed(area.width.min(64), chunks[2].height.min(7), chunks[2]),
    );

    render_likert_row(frame, chunks[3], app, colors);

    // Pad the anchor labels to the rect they render in
    let anchor_width: usize = 44;
    let anchors = Line::from(vec![
        Span::styled("Strongly Disagree", Style::default().fg(colors.muted)),
        Span::raw(" ".repeat(anchor_width.saturating_sub(31))),
        Span::styled("Strongly Agree", Style::default().fg(colors.muted)),
    ]);
    frame.render_widget(
        Paragraph::new(anchors),
        centered_rect_fixed((anchor_width as u16).min(area.width), 1, chunks[4]),
    );

    let hints: &[(&str, &str)] = if app.session.is_last() {
        &[
            ("1-5", ":answer "),
            ("h", ":back "),
            ("Enter", ":complete "),
            ("?", ":help "),
            ("q", ":quit"),
        ]
    } else {
        &[
            ("1-5", ":answer "),
            ("h", "/"),
            ("l", ":prev/next "),
            ("?", ":help "),
            ("q", ":quit"),
        ]
    };
    render_status_bar(frame, chunks[5], app, colors, hints);
}

fn render_likert_row(frame: &mut Frame, area: Rect, app: &App, colors: &ThemeColors) {
    let selected = app.session.selected_raw(app.session.current_index());

    // Five fixed-width cells, centered as a group
    let row_area = centered_rect_fixed(29, 3, area);
    let cells = Layout::horizontal([
        Constraint::Length(5),
        Constraint::Length(1),
        Constraint::Length(5),
        Constraint::Length(1),
        Constraint::Length(5),
        Constraint::Length(1),
        Constraint::Length(5),
        Constraint::Length(1),
        Constraint::Length(5),
    ])
    .split(row_area);

    for value in 1..=5u8 {
        let style = if selected == Some(value) {
            colors.likert_selected
        } else {
            colors.likert_unselected
        };
        let cell = Paragraph::new(format!("{}", value))
            .alignment(Alignment::Center)
            .style(style)
            .block(Block::bordered().border_style(style));
        frame.render_widget(cell, cells[(value as usize - 1) * 2]);
    }
}

fn render_results(frame: &mut Frame, app: &App, colors: &ThemeColors) {
    let area = frame.area();
    let chunks = Layout::vertical([
        Constraint::Length(1), // Title
        Constraint::Length(1),
        Constraint::Fill(1),   // Trait bars + composites
        Constraint::Length(1), // Status bar
    ])
    .split(area);

    let title = Paragraph::new(Span::styled(
        "Your Personality Profile",
        Style::default().fg(colors.title_color).bold(),
    ))
    .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    let report = match &app.report {
        Some(report) => report,
        None => return,
    };

    let mut lines: Vec<Line> = Vec::new();
    for (measured, score) in report.trait_scores.iter() {
        let mut spans = vec![
            Span::raw(format!("{:<18}", measured.name())),
            Span::styled(
                format!("{:>4} ", crate::output::format_score(score)),
                Style::default().fg(colors.score_color(score)),
            ),
        ];
        spans.extend(score_bar(score, 24, colors).spans);
        lines.push(Line::from(spans));

        if app.config.show_descriptions {
            lines.push(Line::from(Span::styled(
                format!("  {}", measured.description()),
                Style::default().fg(colors.muted),
            )));
        }
        lines.push(Line::from(""));
    }

    if let Some(profile) = app.roster.profile_score(&app.email) {
        lines.push(Line::from(format!(
            "{:<18}{:>5}",
            "Profile score",
            crate::output::format_score(profile)
        )));
    }
    lines.push(Line::from(vec![
        Span::raw(format!("{:<18}", "Personality score")),
        Span::styled(
            format!("{:>5}", crate::output::format_score(report.personality_score)),
            Style::default().bold(),
        ),
    ]));
    if let Some(fitment) = report.fitment_score {
        lines.push(Line::from(vec![
            Span::raw(format!("{:<18}", "Fitment score")),
            Span::styled(
                format!("{:>5}", crate::output::format_score(fitment)),
                Style::default().bold(),
            ),
        ]));
    }

    let body_width = area.width.min(54);
    let body = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(
        body,
        centered_rect_fixed(body_width, chunks[2].height, chunks[2]),
    );

    render_status_bar(frame, chunks[3], app, colors, &[("q", ":quit")]);
}

/// A trait-score bar over the [-50, 50] range
fn score_bar(score: f64, width: usize, colors: &ThemeColors) -> Line<'static> {
    let ratio = ((score + 50.0) / 100.0).clamp(0.0, 1.0);
    let filled = (ratio * width as f64).round() as usize;
    let empty = width.saturating_sub(filled);

    let bar_color = colors.score_color(score);

    let mut spans = Vec::new();
    if filled > 0 {
        spans.push(Span::styled(
            "█".repeat(filled),
            Style::default().fg(bar_color),
        ));
    }
    if empty > 0 {
        spans.push(Span::styled(
            "░".repeat(empty),
            Style::default().fg(colors.bar_empty),
        ));
    }

    Line::from(spans)
}

fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    app: &App,
    colors: &ThemeColors,
    hints: &[(&str, &str)],
) {
    let text = if let Some((ref msg, _)) = app.flash_message {
        let msg_color = if msg.starts_with("Failed") || msg.starts_with("Cannot") || msg.starts_with("Scoring") {
            colors.flash_error
        } else {
            colors.flash_success
        };
        Line::from(Span::styled(msg.clone(), Style::default().fg(msg_color)))
    } else {
        let mut spans = vec![Span::styled(
            format!("{} answered  ", app.session.answered_count()),
            Style::default().fg(colors.muted),
        )];
        for (key, label) in hints {
            spans.push(Span::styled(
                *key,
                Style::default().fg(colors.status_key_color),
            ));
            spans.push(Span::raw(*label));
        }
        Line::from(spans)
    };

    frame.render_widget(
        Paragraph::new(text).style(Style::default().bg(colors.status_bar_bg)),
        area,
    );
}

/// Create a centered rectangle with fixed width and height
fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    // Clamp dimensions to area bounds
    let width = width.min(area.width);
    let height = height.min(area.height);

    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;

    Rect {
        x,
        y,
        width,
        height,
    }
}

/// Render the help overlay popup
fn render_help_popup(frame: &mut Frame, colors: &ThemeColors) {
    let popup_area = centered_rect_fixed(46, 12, frame.area());

    frame.render_widget(Clear, popup_area);

    let block = Block::bordered()
        .title(" Keyboard Shortcuts ")
        .border_style(Style::default().fg(colors.popup_border));
    frame.render_widget(block.clone(), popup_area);

    let inner = block.inner(popup_area);

    let key_style = Style::default().fg(colors.popup_border).bold();
    let help_lines = vec![
        Line::from(vec![
            Span::styled("1-5           ", key_style),
            Span::raw("Answer current statement"),
        ]),
        Line::from(vec![
            Span::styled("h / Left      ", key_style),
            Span::raw("Previous question"),
        ]),
        Line::from(vec![
            Span::styled("l / Right     ", key_style),
            Span::raw("Next question"),
        ]),
        Line::from(vec![
            Span::styled("Enter         ", key_style),
            Span::raw("Complete (on last question)"),
        ]),
        Line::from(vec![
            Span::styled("?             ", key_style),
            Span::raw("Show/hide this help"),
        ]),
        Line::from(vec![
            Span::styled("q / Ctrl-c    ", key_style),
            Span::raw("Quit"),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Press any key to close",
            Style::default().fg(colors.muted),
        )),
    ];

    frame.render_widget(Paragraph::new(help_lines), inner);
}
