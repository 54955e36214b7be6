use flipcards_core::ViewKind;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use super::palette::Palette;
use super::state::TuiState;

pub fn draw(f: &mut Frame, area: Rect, state: &TuiState, palette: &Palette) {
    // Show flash message if present
    if let Some(ref msg) = state.flash_message {
        let flash = Paragraph::new(format!(" {}", msg))
            .style(Style::default().bg(palette.accent).fg(Color::Black));
        f.render_widget(flash, area);
        return;
    }

    let status = Paragraph::new(hints(state))
        .style(Style::default().bg(palette.status_bg).fg(palette.text));
    f.render_widget(status, area);
}

pub fn hints(state: &TuiState) -> &'static str {
    match state.app.view().kind() {
        ViewKind::Study if state.app.is_completed() => {
            " r: study again  Tab: next subject  s: subjects  t: theme  q: quit "
        }
        ViewKind::Study if state.app.is_flipped() => {
            " k: know  u: don't know  Space: flip back  q: quit "
        }
        ViewKind::Study => {
            " Space: flip  a: add  e: edit  d: delete  s: subjects  t: theme  ?: help  q: quit "
        }
        ViewKind::ManageSubjects => {
            " Type a name + Enter: add  Up/Down: select  Enter: study  Del: delete  Esc: back "
        }
        ViewKind::EditCard => " Tab: switch field  Enter: next/save  Ctrl-S: save  Esc: cancel ",
    }
}
