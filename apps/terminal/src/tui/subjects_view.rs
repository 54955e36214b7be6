use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};

use super::palette::Palette;
use super::state::TuiState;

pub fn draw(f: &mut Frame, area: Rect, state: &TuiState, palette: &Palette) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(area);

    let draft = state.app.view().new_subject_name().unwrap_or_default();
    let input = Paragraph::new(format!("{draft}█"))
        .style(Style::default().fg(palette.text))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Add New Subject (Enter) "),
        );
    f.render_widget(input, chunks[0]);

    let active = state.app.active_subject_index();
    let items: Vec<ListItem> = state
        .app
        .catalog()
        .summaries()
        .into_iter()
        .enumerate()
        .map(|(i, summary)| {
            let marker = if i == active { "* " } else { "  " };
            ListItem::new(Line::from(vec![
                Span::raw(marker),
                Span::styled(summary.name, Style::default().add_modifier(Modifier::BOLD)),
                Span::styled(
                    format!("  {} cards", summary.card_count),
                    Style::default().fg(palette.muted),
                ),
            ]))
        })
        .collect();

    let list = List::new(items)
        .style(Style::default().fg(palette.text))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Manage Subjects "),
        )
        .highlight_style(
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut list_state = ListState::default();
    list_state.select(Some(state.selected_subject));
    f.render_stateful_widget(list, chunks[1], &mut list_state);
}
