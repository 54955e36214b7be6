use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use flipcards_core::{PendingAdvance, ViewKind};

use super::state::{EditorField, TuiState};

/// What the event loop must do after a key was handled.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct KeyOutcome {
    /// Advance to hand to the scheduler.
    pub advance: Option<PendingAdvance>,
    /// The session epoch moved (reset or card deletion), so any scheduled
    /// advance is obsolete.
    pub cancel_advance: bool,
}

pub fn handle_key(state: &mut TuiState, key: KeyEvent) -> KeyOutcome {
    // Clear flash message on any keypress
    state.flash_message = None;

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.quit = true;
        return KeyOutcome::default();
    }

    let epoch = state.app.session().epoch();
    let advance = match state.app.view().kind() {
        ViewKind::Study => handle_study_key(state, key),
        ViewKind::ManageSubjects => {
            handle_subjects_key(state, key);
            None
        }
        ViewKind::EditCard => {
            handle_editor_key(state, key);
            None
        }
    };

    if state.app.view().kind() != ViewKind::Study {
        state.show_help = false;
    }

    KeyOutcome {
        advance,
        cancel_advance: state.app.session().epoch() != epoch,
    }
}

fn handle_study_key(state: &mut TuiState, key: KeyEvent) -> Option<PendingAdvance> {
    let card_count = state.app.active_subject().card_count();
    let answering = state.app.is_flipped() && !state.app.is_completed();

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => state.quit = true,
        KeyCode::Char(' ') => {
            if !state.app.is_completed() {
                state.app.flip();
            }
        }
        KeyCode::Char('k') | KeyCode::Char('y') if answering => return state.app.score(true),
        KeyCode::Char('u') | KeyCode::Char('n') if answering => return state.app.score(false),
        KeyCode::Char('r') => {
            state.app.restart();
            tracing::info!(subject = %state.app.active_subject().name, "restarted deck");
        }
        KeyCode::Tab | KeyCode::BackTab => {
            let len = state.app.catalog().len();
            let active = state.app.active_subject_index();
            let next = if key.code == KeyCode::Tab {
                (active + 1) % len
            } else {
                (active + len - 1) % len
            };
            if next != active {
                let result = state.app.select_subject(next);
                state.report("select subject", result);
            }
        }
        KeyCode::Char('s') => {
            let result = state.app.open_subject_manager();
            if state.report("open subject manager", result).is_some() {
                state.selected_subject = state.app.active_subject_index();
            }
        }
        KeyCode::Char('a') => {
            let result = state.app.open_new_card();
            if state.report("add card", result).is_some() {
                state.editor_field = EditorField::Question;
            }
        }
        KeyCode::Char('e') if card_count > 0 && !state.app.is_completed() => {
            let current = state.app.session().current_card_index();
            let result = state.app.open_card_edit(current);
            if state.report("edit card", result).is_some() {
                state.editor_field = EditorField::Question;
            }
        }
        KeyCode::Char('d') if !state.app.is_completed() => {
            if card_count > 1 {
                let subject = state.app.active_subject_index();
                let current = state.app.session().current_card_index();
                let result = state.app.delete_card(subject, current);
                if state.report("delete card", result).is_some() {
                    tracing::info!(subject, card = current, "deleted card");
                    state.flash("Card deleted");
                }
            } else {
                state.flash("The last card of a subject can only be edited");
            }
        }
        KeyCode::Char('t') => {
            state.app.toggle_theme();
        }
        KeyCode::Char('?') => {
            state.show_help = !state.show_help;
        }
        _ => {}
    }
    None
}

fn handle_subjects_key(state: &mut TuiState, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Esc => {
            let result = state.app.close_subject_manager();
            state.report("close subject manager", result);
        }
        KeyCode::Up => {
            state.selected_subject = state.selected_subject.saturating_sub(1);
        }
        KeyCode::Down => {
            if state.selected_subject + 1 < state.app.catalog().len() {
                state.selected_subject += 1;
            }
        }
        KeyCode::Enter => {
            let has_draft = state
                .app
                .view()
                .new_subject_name()
                .is_some_and(|name| !name.trim().is_empty());
            if has_draft {
                let result = state.app.submit_new_subject();
                if let Some(index) = state.report("add subject", result) {
                    let name = state.app.catalog().subjects()[index].name.clone();
                    tracing::info!(subject = %name, index, "added subject");
                    state.selected_subject = index;
                    state.flash(format!("Added {name}"));
                }
            } else {
                let selected = state.selected_subject;
                let result = state.app.select_subject(selected);
                state.report("select subject", result);
            }
        }
        KeyCode::Delete => {
            let selected = state.selected_subject;
            let result = state.app.delete_subject(selected);
            if state.report("delete subject", result).is_some() {
                tracing::info!(index = selected, "deleted subject");
                state.clamp_selected_subject();
            }
        }
        KeyCode::Char('t') if ctrl => {
            state.app.toggle_theme();
        }
        KeyCode::Backspace => {
            if let Some(draft) = state.app.new_subject_name_mut() {
                draft.pop();
            }
        }
        KeyCode::Char(c) if !ctrl => {
            if let Some(draft) = state.app.new_subject_name_mut() {
                draft.push(c);
            }
        }
        _ => {}
    }
}

fn handle_editor_key(state: &mut TuiState, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Esc => {
            let result = state.app.cancel_card_edit();
            state.report("cancel edit", result);
        }
        KeyCode::Tab | KeyCode::BackTab => {
            state.editor_field = state.editor_field.toggled();
        }
        KeyCode::Char('s') if ctrl => save_card(state),
        KeyCode::Enter => match state.editor_field {
            EditorField::Question => state.editor_field = EditorField::Answer,
            EditorField::Answer => save_card(state),
        },
        KeyCode::Backspace => {
            if let Some(text) = focused_text(state) {
                text.pop();
            }
        }
        KeyCode::Char(c) if !ctrl => {
            if let Some(text) = focused_text(state) {
                text.push(c);
            }
        }
        _ => {}
    }
}

fn focused_text(state: &mut TuiState) -> Option<&mut String> {
    let field = state.editor_field;
    state.app.card_editor_mut().map(|editor| match field {
        EditorField::Question => &mut editor.question,
        EditorField::Answer => &mut editor.answer,
    })
}

fn save_card(state: &mut TuiState) {
    let can_save = state
        .app
        .view()
        .card_editor()
        .is_some_and(|editor| editor.can_save());
    if !can_save {
        state.flash("Question and answer are both required");
        return;
    }

    let is_new = state
        .app
        .view()
        .card_editor()
        .is_some_and(|editor| editor.is_new());
    let result = state.app.save_card();
    if let Some(index) = state.report("save card", result) {
        let subject = state.app.active_subject_index();
        if is_new {
            tracing::info!(subject, card = index, "added card");
            state.flash("Card added");
        } else {
            tracing::info!(subject, card = index, "updated card");
            state.flash("Card saved");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flipcards_core::{Card, Catalog, StudyApp, Subject};
    use pretty_assertions::assert_eq;

    fn setup(counts: &[usize]) -> TuiState {
        let subjects = counts
            .iter()
            .enumerate()
            .map(|(s, &count)| Subject {
                name: format!("Subject {s}"),
                cards: (0..count)
                    .map(|c| Card {
                        question: format!("Q{c}"),
                        answer: format!("A{c}"),
                    })
                    .collect(),
            })
            .collect();
        TuiState::new(StudyApp::new(Catalog::from_subjects(subjects).unwrap()))
    }

    fn press(state: &mut TuiState, code: KeyCode) -> KeyOutcome {
        handle_key(state, KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn ctrl(state: &mut TuiState, c: char) -> KeyOutcome {
        handle_key(state, KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
    }

    fn type_text(state: &mut TuiState, text: &str) {
        for c in text.chars() {
            press(state, KeyCode::Char(c));
        }
    }

    #[test]
    fn space_flips_on_study_screen() {
        let mut state = setup(&[2]);
        press(&mut state, KeyCode::Char(' '));
        assert!(state.app.is_flipped());
        press(&mut state, KeyCode::Char(' '));
        assert!(!state.app.is_flipped());
    }

    #[test]
    fn space_types_in_subject_manager() {
        let mut state = setup(&[2]);
        press(&mut state, KeyCode::Char('s'));
        press(&mut state, KeyCode::Char(' '));
        assert!(!state.app.is_flipped());
        assert_eq!(state.app.view().new_subject_name(), Some(" "));
    }

    #[test]
    fn scoring_needs_a_flipped_card() {
        let mut state = setup(&[2]);
        let outcome = press(&mut state, KeyCode::Char('k'));
        assert_eq!(outcome, KeyOutcome::default());
        assert_eq!(state.app.session().answered_count(), 0);

        press(&mut state, KeyCode::Char(' '));
        let outcome = press(&mut state, KeyCode::Char('k'));
        let pending = outcome.advance.unwrap();
        assert_eq!(pending.card_index(), 0);
        assert!(!outcome.cancel_advance);

        // Card is still showing until the advance is applied.
        assert!(press(&mut state, KeyCode::Char('u')).advance.is_none());
        assert!(state.apply_advance(pending));
        assert_eq!(state.app.session().current_card_index(), 1);
        assert_eq!(state.app.confidence_score(), 100);
    }

    #[test]
    fn restart_cancels_advance() {
        let mut state = setup(&[2]);
        press(&mut state, KeyCode::Char(' '));
        press(&mut state, KeyCode::Char('n'));
        let outcome = press(&mut state, KeyCode::Char('r'));
        assert!(outcome.cancel_advance);
        assert_eq!(state.app.session().answered_count(), 0);
    }

    #[test]
    fn tab_cycles_subjects() {
        let mut state = setup(&[1, 1, 1]);
        let outcome = press(&mut state, KeyCode::Tab);
        assert!(outcome.cancel_advance);
        assert_eq!(state.app.active_subject_index(), 1);
        press(&mut state, KeyCode::BackTab);
        press(&mut state, KeyCode::BackTab);
        assert_eq!(state.app.active_subject_index(), 2);
    }

    #[test]
    fn delete_refuses_last_card() {
        let mut state = setup(&[1]);
        press(&mut state, KeyCode::Char('d'));
        assert_eq!(state.app.active_subject().card_count(), 1);
        assert!(state.flash_message.is_some());

        let mut state = setup(&[2]);
        press(&mut state, KeyCode::Char('d'));
        assert_eq!(state.app.active_subject().card_count(), 1);
        assert_eq!(state.flash_message.as_deref(), Some("Card deleted"));
    }

    #[test]
    fn delete_during_delay_cancels_advance() {
        let mut state = setup(&[3]);
        press(&mut state, KeyCode::Char(' '));
        let pending = press(&mut state, KeyCode::Char('k')).advance.unwrap();
        let outcome = press(&mut state, KeyCode::Char('d'));
        assert!(outcome.cancel_advance);
        assert!(!state.apply_advance(pending));
        assert_eq!(state.app.current_card().unwrap().question, "Q1");
        assert_eq!(state.app.session().answered_count(), 0);
    }

    #[test]
    fn add_subject_then_study_it() {
        let mut state = setup(&[2]);
        press(&mut state, KeyCode::Char('s'));
        type_text(&mut state, "Chemistry");
        press(&mut state, KeyCode::Enter);
        assert_eq!(state.app.catalog().len(), 2);
        assert_eq!(state.selected_subject, 1);
        assert_eq!(state.app.view().kind(), ViewKind::ManageSubjects);

        let outcome = press(&mut state, KeyCode::Enter);
        assert!(outcome.cancel_advance);
        assert_eq!(state.app.view().kind(), ViewKind::Study);
        assert_eq!(state.app.active_subject().name, "Chemistry");
    }

    #[test]
    fn delete_subject_from_manager() {
        let mut state = setup(&[1, 1]);
        press(&mut state, KeyCode::Char('s'));
        press(&mut state, KeyCode::Down);
        press(&mut state, KeyCode::Delete);
        assert_eq!(state.app.catalog().len(), 1);
        assert_eq!(state.selected_subject, 0);

        press(&mut state, KeyCode::Delete);
        assert_eq!(state.app.catalog().len(), 1);
        assert_eq!(
            state.flash_message.as_deref(),
            Some("cannot delete the last subject")
        );
    }

    #[test]
    fn escape_leaves_subject_manager() {
        let mut state = setup(&[1]);
        press(&mut state, KeyCode::Char('s'));
        press(&mut state, KeyCode::Esc);
        assert_eq!(state.app.view().kind(), ViewKind::Study);
        assert!(!state.quit);
    }

    #[test]
    fn add_card_through_editor() {
        let mut state = setup(&[0]);
        press(&mut state, KeyCode::Char('a'));
        assert_eq!(state.app.view().kind(), ViewKind::EditCard);
        type_text(&mut state, "What is 6x7?");
        press(&mut state, KeyCode::Enter);
        assert_eq!(state.editor_field, EditorField::Answer);
        type_text(&mut state, "42");
        press(&mut state, KeyCode::Enter);

        assert_eq!(state.app.view().kind(), ViewKind::Study);
        assert_eq!(
            state.app.current_card(),
            Some(&Card {
                question: "What is 6x7?".to_string(),
                answer: "42".to_string(),
            })
        );
    }

    #[test]
    fn blank_editor_cannot_save() {
        let mut state = setup(&[1]);
        press(&mut state, KeyCode::Char('a'));
        type_text(&mut state, "Question only");
        ctrl(&mut state, 's');
        assert_eq!(state.app.view().kind(), ViewKind::EditCard);
        assert_eq!(state.app.active_subject().card_count(), 1);
    }

    #[test]
    fn edit_card_and_cancel() {
        let mut state = setup(&[1]);
        press(&mut state, KeyCode::Char('e'));
        press(&mut state, KeyCode::Backspace);
        type_text(&mut state, "9");
        assert_eq!(
            state.app.view().card_editor().map(|e| e.question.as_str()),
            Some("Q9")
        );
        press(&mut state, KeyCode::Esc);
        assert_eq!(state.app.current_card().unwrap().question, "Q0");
    }

    #[test]
    fn edit_card_and_save() {
        let mut state = setup(&[1]);
        press(&mut state, KeyCode::Char('e'));
        press(&mut state, KeyCode::Tab);
        type_text(&mut state, "!");
        ctrl(&mut state, 's');
        assert_eq!(state.app.current_card().unwrap().answer, "A0!");
        assert_eq!(state.flash_message.as_deref(), Some("Card saved"));
    }

    #[test]
    fn ctrl_c_quits_anywhere() {
        let mut state = setup(&[1]);
        press(&mut state, KeyCode::Char('a'));
        ctrl(&mut state, 'c');
        assert!(state.quit);
    }
}
