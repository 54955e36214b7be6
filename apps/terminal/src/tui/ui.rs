use flipcards_core::ViewKind;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use super::palette::Palette;
use super::state::TuiState;
use super::{editor_view, status_bar, study_view, subjects_view};

const HELP: &[&str] = &[
    "Space    flip the card",
    "k / y    I know it",
    "u / n    I don't know it",
    "r        restart the deck",
    "Tab      next subject",
    "S-Tab    previous subject",
    "s        manage subjects",
    "a        add a card",
    "e        edit this card",
    "d        delete this card",
    "t        toggle dark mode",
    "?        toggle this help",
    "q / Esc  quit",
    "Ctrl-C   quit from any screen",
];

pub fn draw(f: &mut Frame, state: &TuiState) {
    let size = f.area();
    let palette = Palette::for_theme(state.app.theme());

    f.render_widget(
        Block::default().style(Style::default().bg(palette.background)),
        size,
    );

    // Main layout: screen + status bar
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(size);

    match state.app.view().kind() {
        ViewKind::Study => study_view::draw(f, outer[0], state, &palette),
        ViewKind::ManageSubjects => subjects_view::draw(f, outer[0], state, &palette),
        ViewKind::EditCard => editor_view::draw(f, outer[0], state, &palette),
    }
    status_bar::draw(f, outer[1], state, &palette);

    if state.show_help && state.app.view().kind() == ViewKind::Study {
        draw_help(f, outer[0], &palette);
    }
}

fn draw_help(f: &mut Frame, area: Rect, palette: &Palette) {
    let height = (HELP.len() as u16 + 2).min(area.height);
    let width = 40.min(area.width);
    let popup = Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    };

    // Clear the area behind the popup
    f.render_widget(Clear, popup);

    let lines: Vec<Line> = HELP.iter().map(|line| Line::from(*line)).collect();
    let help = Paragraph::new(lines)
        .style(Style::default().fg(palette.text).bg(palette.background))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.accent))
                .title(" Keys (?) "),
        );
    f.render_widget(help, popup);
}
