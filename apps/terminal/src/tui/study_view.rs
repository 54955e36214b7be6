use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Gauge, Paragraph, Tabs, Wrap};

use super::palette::Palette;
use super::state::TuiState;

pub fn draw(f: &mut Frame, area: Rect, state: &TuiState, palette: &Palette) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // header
            Constraint::Length(3), // subject tabs
            Constraint::Length(3), // progress
            Constraint::Min(5),    // card
        ])
        .split(area);

    draw_header(f, chunks[0], state, palette);
    draw_tabs(f, chunks[1], state, palette);

    let subject = state.app.active_subject();
    if subject.is_empty() {
        let empty = Paragraph::new(vec![
            Line::from("No Cards Yet").style(Style::default().add_modifier(Modifier::BOLD)),
            Line::from(""),
            Line::from("Add some flashcards to start studying this subject."),
            Line::from("Press a to add the first card."),
        ])
        .alignment(Alignment::Center)
        .style(Style::default().fg(palette.text))
        .block(Block::default().borders(Borders::ALL));
        let rest = chunks[2].union(chunks[3]);
        f.render_widget(empty, rest);
        return;
    }

    draw_progress(f, chunks[2], state, palette);

    match state.app.completion() {
        Some(completion) => {
            let done = Paragraph::new(vec![
                Line::from("Congratulations!").style(
                    Style::default()
                        .fg(palette.known)
                        .add_modifier(Modifier::BOLD),
                ),
                Line::from(""),
                Line::from(completion.to_string()),
                Line::from(""),
                Line::from("Press r to study again."),
            ])
            .alignment(Alignment::Center)
            .style(Style::default().fg(palette.text))
            .block(Block::default().borders(Borders::ALL));
            f.render_widget(done, chunks[3]);
        }
        None => draw_card(f, chunks[3], state, palette),
    }
}

fn draw_header(f: &mut Frame, area: Rect, state: &TuiState, palette: &Palette) {
    let title = Line::from(vec![
        Span::styled(
            state.app.active_subject().name.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("   Confidence: "),
        Span::styled(
            format!("{}%", state.app.confidence_score()),
            Style::default().fg(palette.known),
        ),
    ]);
    let header = Paragraph::new(title)
        .style(Style::default().fg(palette.text))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, area);
}

fn draw_tabs(f: &mut Frame, area: Rect, state: &TuiState, palette: &Palette) {
    let titles: Vec<String> = state
        .app
        .catalog()
        .subjects()
        .iter()
        .map(|s| s.name.clone())
        .collect();
    let tabs = Tabs::new(titles)
        .select(state.app.active_subject_index())
        .style(Style::default().fg(palette.muted))
        .highlight_style(
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED),
        )
        .block(Block::default().borders(Borders::ALL).title(" Subjects (Tab) "));
    f.render_widget(tabs, area);
}

fn draw_progress(f: &mut Frame, area: Rect, state: &TuiState, palette: &Palette) {
    let session = state.app.session();
    let total = state.app.active_subject().card_count();
    let label = format!("{} / {}", session.current_card_index() + 1, total);
    let percent = state.app.progress().round().clamp(0.0, 100.0) as u16;
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(" Progress "))
        .gauge_style(Style::default().fg(palette.accent))
        .percent(percent)
        .label(label);
    f.render_widget(gauge, area);
}

fn draw_card(f: &mut Frame, area: Rect, state: &TuiState, palette: &Palette) {
    let Some(card) = state.app.current_card() else {
        return;
    };

    let (label, text, color, hint) = if state.app.is_flipped() {
        (
            " Answer ",
            card.answer.as_str(),
            palette.answer,
            Line::from(vec![
                Span::styled("k: know", Style::default().fg(palette.known)),
                Span::raw("   "),
                Span::styled("u: don't know", Style::default().fg(palette.unknown)),
            ]),
        )
    } else {
        (
            " Question ",
            card.question.as_str(),
            palette.question,
            Line::from("Press Space to reveal the answer")
                .style(Style::default().fg(palette.muted)),
        )
    };

    let body = Paragraph::new(vec![
        Line::from(""),
        Line::from(text.to_string()).style(Style::default().add_modifier(Modifier::BOLD)),
        Line::from(""),
        hint,
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .style(Style::default().fg(palette.text))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color))
            .title(label),
    );
    f.render_widget(body, area);
}
