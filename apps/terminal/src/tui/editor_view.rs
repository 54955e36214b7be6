use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use super::palette::Palette;
use super::state::{EditorField, TuiState};

pub fn draw(f: &mut Frame, area: Rect, state: &TuiState, palette: &Palette) {
    let Some(editor) = state.app.view().card_editor() else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Percentage(40),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(area);

    let heading = if editor.is_new() { "Add New Card" } else { "Edit Card" };
    f.render_widget(
        Paragraph::new(heading)
            .style(Style::default().fg(palette.text).add_modifier(Modifier::BOLD)),
        chunks[0],
    );

    draw_field(
        f,
        chunks[1],
        " Question ",
        &editor.question,
        state.editor_field == EditorField::Question,
        palette,
    );
    draw_field(
        f,
        chunks[2],
        " Answer ",
        &editor.answer,
        state.editor_field == EditorField::Answer,
        palette,
    );

    let save = if editor.can_save() {
        Span::styled(
            if editor.is_new() { "Ctrl-S: add card" } else { "Ctrl-S: save changes" },
            Style::default().fg(palette.known),
        )
    } else {
        Span::styled(
            "Fill in both fields to save",
            Style::default().fg(palette.muted),
        )
    };
    f.render_widget(Paragraph::new(Line::from(save)), chunks[3]);
}

fn draw_field(
    f: &mut Frame,
    area: Rect,
    title: &str,
    text: &str,
    focused: bool,
    palette: &Palette,
) {
    let border = if focused { palette.accent } else { palette.muted };
    let content = if focused { format!("{text}█") } else { text.to_string() };
    let field = Paragraph::new(content)
        .wrap(Wrap { trim: false })
        .style(Style::default().fg(palette.text))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border))
                .title(title.to_string()),
        );
    f.render_widget(field, area);
}
