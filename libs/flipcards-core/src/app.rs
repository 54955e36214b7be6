//! Application state: catalog, active subject, session, view and theme.
//!
//! `StudyApp` is the only type a front end needs to drive. Every structural
//! mutation funnels through [`StudyApp::repair_after_card_change`] or the
//! subject-deletion repair so indices held by the session and the card
//! editor always stay inside the catalog.

use std::fmt;

use serde::Serialize;

use crate::catalog::Catalog;
use crate::error::{Result, StudyError};
use crate::session::{PendingAdvance, Session};
use crate::types::{Card, Subject, SubjectSummary, Theme};
use crate::view::{CardEditor, View, ViewKind};

/// Read-only view of everything a renderer shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudySnapshot {
    pub subjects: Vec<SubjectSummary>,
    pub active_subject: usize,
    pub subject_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card: Option<Card>,
    pub card_index: usize,
    pub card_count: usize,
    pub progress: f64,
    pub confidence_score: u32,
    pub is_flipped: bool,
    pub completed: bool,
    pub view: ViewKind,
    pub theme: Theme,
}

/// Summary shown once every card in the run has been answered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Completion {
    pub subject_name: String,
    pub confidence_score: u32,
}

impl fmt::Display for Completion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "You've completed {} with {}% confidence!",
            self.subject_name, self.confidence_score
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CardChange {
    Added,
    Updated,
    Deleted(usize),
}

#[derive(Debug, Clone)]
pub struct StudyApp {
    catalog: Catalog,
    active_subject: usize,
    session: Session,
    view: View,
    theme: Theme,
}

impl StudyApp {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            active_subject: 0,
            session: Session::new(),
            view: View::Study,
            theme: Theme::default(),
        }
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    // --- reads ---

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn active_subject_index(&self) -> usize {
        self.active_subject
    }

    pub fn active_subject(&self) -> &Subject {
        &self.catalog.subjects()[self.active_subject]
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    fn card_count(&self) -> usize {
        self.active_subject().card_count()
    }

    pub fn current_card(&self) -> Option<&Card> {
        self.active_subject()
            .cards
            .get(self.session.current_card_index())
    }

    pub fn progress(&self) -> f64 {
        self.session.progress(self.card_count())
    }

    pub fn confidence_score(&self) -> u32 {
        self.session.confidence_score()
    }

    pub fn is_flipped(&self) -> bool {
        self.session.is_flipped()
    }

    pub fn is_completed(&self) -> bool {
        self.session.is_completed()
    }

    /// The celebration summary, once the run is complete.
    pub fn completion(&self) -> Option<Completion> {
        self.session.is_completed().then(|| Completion {
            subject_name: self.active_subject().name.clone(),
            confidence_score: self.session.confidence_score(),
        })
    }

    pub fn snapshot(&self) -> StudySnapshot {
        StudySnapshot {
            subjects: self.catalog.summaries(),
            active_subject: self.active_subject,
            subject_name: self.active_subject().name.clone(),
            card: self.current_card().cloned(),
            card_index: self.session.current_card_index(),
            card_count: self.card_count(),
            progress: self.progress(),
            confidence_score: self.confidence_score(),
            is_flipped: self.is_flipped(),
            completed: self.is_completed(),
            view: self.view.kind(),
            theme: self.theme,
        }
    }

    // --- session ---

    /// Make `index` the active subject and start a fresh run on it.
    ///
    /// Leaves the subject manager if it was open.
    pub fn select_subject(&mut self, index: usize) -> Result<()> {
        self.catalog.subject(index)?;
        self.active_subject = index;
        self.session.reset();
        if self.view.kind() == ViewKind::ManageSubjects {
            self.view = View::Study;
        }
        Ok(())
    }

    /// Toggle the current card. Returns false on an empty subject.
    pub fn flip(&mut self) -> bool {
        let count = self.card_count();
        self.session.flip(count)
    }

    /// Score the current card. The returned token must be handed to
    /// [`StudyApp::advance`], immediately or after a delay.
    pub fn score(&mut self, is_correct: bool) -> Option<PendingAdvance> {
        let count = self.card_count();
        self.session.score(is_correct, count)
    }

    /// Apply a deferred advance. Stale tokens are ignored.
    pub fn advance(&mut self, pending: PendingAdvance) -> bool {
        let count = self.card_count();
        self.session.advance(pending, count)
    }

    /// Score and advance in one step.
    pub fn score_now(&mut self, is_correct: bool) -> bool {
        match self.score(is_correct) {
            Some(pending) => self.advance(pending),
            None => false,
        }
    }

    /// Restart the run on the active subject.
    pub fn restart(&mut self) {
        self.session.reset();
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.theme
    }

    // --- catalog ---

    pub fn add_subject(&mut self, name: &str) -> Result<usize> {
        self.catalog.add_subject(name)
    }

    /// Delete a subject.
    ///
    /// Deleting a subject before the active one keeps the same subject
    /// active. Deleting the active subject makes the first subject active
    /// and starts a fresh run.
    pub fn delete_subject(&mut self, index: usize) -> Result<()> {
        self.catalog.delete_subject(index)?;
        if index < self.active_subject {
            self.active_subject -= 1;
        } else if index == self.active_subject {
            self.active_subject = 0;
            self.session.reset();
        }

        let mut discard_editor = false;
        if let Some(editor) = self.view.card_editor_mut() {
            let target = editor.subject_index();
            if target == index {
                discard_editor = true;
            } else if target > index {
                let card = editor.card_index();
                editor.retarget(target - 1, card);
            }
        }
        if discard_editor {
            self.view = View::Study;
        }
        Ok(())
    }

    pub fn add_card(
        &mut self,
        subject_index: usize,
        question: &str,
        answer: &str,
    ) -> Result<usize> {
        let index = self.catalog.add_card(subject_index, question, answer)?;
        self.repair_after_card_change(subject_index, CardChange::Added);
        Ok(index)
    }

    pub fn update_card(
        &mut self,
        subject_index: usize,
        card_index: usize,
        question: &str,
        answer: &str,
    ) -> Result<()> {
        self.catalog
            .update_card(subject_index, card_index, question, answer)?;
        self.repair_after_card_change(subject_index, CardChange::Updated);
        Ok(())
    }

    pub fn delete_card(&mut self, subject_index: usize, card_index: usize) -> Result<()> {
        self.catalog.delete_card(subject_index, card_index)?;
        self.repair_after_card_change(subject_index, CardChange::Deleted(card_index));
        Ok(())
    }

    /// Keep session and editor indices valid after a card list changed.
    fn repair_after_card_change(&mut self, subject_index: usize, change: CardChange) {
        let count = match self.catalog.card_count(subject_index) {
            Ok(count) => count,
            Err(_) => return,
        };

        if subject_index == self.active_subject {
            match change {
                CardChange::Deleted(deleted) => self.session.card_deleted(deleted, count),
                CardChange::Added | CardChange::Updated => self.session.clamp(count),
            }
        }

        let CardChange::Deleted(deleted) = change else {
            return;
        };
        let mut discard_editor = false;
        if let Some(editor) = self.view.card_editor_mut() {
            if editor.subject_index() == subject_index {
                match editor.card_index() {
                    Some(card) if card == deleted => discard_editor = true,
                    Some(card) if card > deleted => editor.retarget(subject_index, Some(card - 1)),
                    _ => {}
                }
            }
        }
        if discard_editor {
            self.view = View::Study;
        }
    }

    // --- view ---

    pub fn open_subject_manager(&mut self) -> Result<()> {
        self.view.open_subject_manager()
    }

    pub fn close_subject_manager(&mut self) -> Result<()> {
        self.view.close_subject_manager()
    }

    /// Draft of the subject name typed in the subject manager.
    pub fn new_subject_name_mut(&mut self) -> Option<&mut String> {
        self.view.new_subject_name_mut()
    }

    /// Add a subject from the subject manager's draft and clear the draft.
    pub fn submit_new_subject(&mut self) -> Result<usize> {
        let name = self
            .view
            .new_subject_name()
            .ok_or_else(|| {
                StudyError::Invariant("subject manager is not open".to_string())
            })?
            .to_string();
        let index = self.catalog.add_subject(&name)?;
        if let Some(draft) = self.view.new_subject_name_mut() {
            draft.clear();
        }
        Ok(index)
    }

    /// Open an empty editor for a new card in the active subject.
    pub fn open_new_card(&mut self) -> Result<()> {
        self.view
            .open_card_editor(CardEditor::new_card(self.active_subject))
    }

    /// Open the editor pre-filled with a card of the active subject.
    pub fn open_card_edit(&mut self, card_index: usize) -> Result<()> {
        let card = self.catalog.card(self.active_subject, card_index)?;
        let editor = CardEditor::existing_card(
            self.active_subject,
            card_index,
            &card.question,
            &card.answer,
        );
        self.view.open_card_editor(editor)
    }

    pub fn card_editor_mut(&mut self) -> Option<&mut CardEditor> {
        self.view.card_editor_mut()
    }

    /// Save the editor's draft and return to the study view.
    ///
    /// On a validation or range error the editor stays open with its draft.
    /// Returns the saved card's index.
    pub fn save_card(&mut self) -> Result<usize> {
        let editor = self
            .view
            .card_editor()
            .ok_or_else(|| StudyError::Invariant("card editor is not open".to_string()))?
            .clone();
        let subject = editor.subject_index();
        let index = match editor.card_index() {
            Some(card) => {
                self.update_card(subject, card, &editor.question, &editor.answer)?;
                card
            }
            None => self.add_card(subject, &editor.question, &editor.answer)?,
        };
        self.view = View::Study;
        Ok(index)
    }

    /// Leave the editor without saving.
    pub fn cancel_card_edit(&mut self) -> Result<()> {
        self.view.close_card_editor().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn app_with_cards(counts: &[usize]) -> StudyApp {
        let subjects = counts
            .iter()
            .enumerate()
            .map(|(s, &count)| Subject {
                name: format!("Subject {s}"),
                cards: (0..count)
                    .map(|c| Card {
                        question: format!("Q{s}.{c}"),
                        answer: format!("A{s}.{c}"),
                    })
                    .collect(),
            })
            .collect();
        StudyApp::new(Catalog::from_subjects(subjects).unwrap())
    }

    #[test]
    fn starts_on_first_subject_in_study_view() {
        let app = app_with_cards(&[2, 3]);
        assert_eq!(app.active_subject_index(), 0);
        assert_eq!(app.view().kind(), ViewKind::Study);
        assert_eq!(app.current_card().unwrap().question, "Q0.0");
        assert_eq!(app.theme(), Theme::Light);
    }

    #[test]
    fn select_subject_resets_and_leaves_manager() {
        let mut app = app_with_cards(&[2, 3]);
        app.flip();
        app.score_now(true);
        app.open_subject_manager().unwrap();
        app.select_subject(1).unwrap();
        assert_eq!(app.active_subject_index(), 1);
        assert_eq!(app.session().current_card_index(), 0);
        assert_eq!(app.session().answered_count(), 0);
        assert_eq!(app.view().kind(), ViewKind::Study);
    }

    #[test]
    fn select_subject_out_of_range() {
        let mut app = app_with_cards(&[2]);
        assert_eq!(
            app.select_subject(1),
            Err(StudyError::Range { what: "subject", index: 1, len: 1 })
        );
        assert_eq!(app.active_subject_index(), 0);
    }

    #[test]
    fn pending_advance_is_dropped_by_subject_switch() {
        let mut app = app_with_cards(&[3, 3]);
        let pending = app.score(true).unwrap();
        app.select_subject(1).unwrap();
        assert!(!app.advance(pending));
        assert_eq!(app.session().current_card_index(), 0);
    }

    #[test]
    fn pending_advance_is_dropped_by_restart() {
        let mut app = app_with_cards(&[3]);
        let pending = app.score(false).unwrap();
        app.restart();
        assert!(!app.advance(pending));
        assert_eq!(app.session().answered_count(), 0);
    }

    #[test]
    fn flip_during_delay_then_advance_unflips() {
        let mut app = app_with_cards(&[3]);
        app.flip();
        let pending = app.score(true).unwrap();
        app.flip();
        app.flip();
        assert!(app.is_flipped());
        assert!(app.score(false).is_none());
        assert!(app.advance(pending));
        assert!(!app.is_flipped());
        assert_eq!(app.session().current_card_index(), 1);
    }

    #[test]
    fn deleting_earlier_subject_keeps_active_subject() {
        let mut app = app_with_cards(&[1, 2, 3]);
        app.select_subject(2).unwrap();
        app.score_now(true);
        app.delete_subject(0).unwrap();
        assert_eq!(app.active_subject_index(), 1);
        assert_eq!(app.active_subject().name, "Subject 2");
        assert_eq!(app.session().current_card_index(), 1);
    }

    #[test]
    fn deleting_active_subject_falls_back_to_first() {
        let mut app = app_with_cards(&[1, 2, 3]);
        app.select_subject(2).unwrap();
        app.score_now(true);
        app.delete_subject(2).unwrap();
        assert_eq!(app.active_subject_index(), 0);
        assert_eq!(app.session().answered_count(), 0);
    }

    #[test]
    fn deleting_later_subject_leaves_session() {
        let mut app = app_with_cards(&[3, 2]);
        app.score_now(true);
        app.delete_subject(1).unwrap();
        assert_eq!(app.active_subject_index(), 0);
        assert_eq!(app.session().current_card_index(), 1);
    }

    #[test]
    fn deleting_last_subject_is_rejected() {
        let mut app = app_with_cards(&[2]);
        assert!(matches!(app.delete_subject(0), Err(StudyError::Invariant(_))));
        assert_eq!(app.catalog().len(), 1);
    }

    #[test]
    fn deleting_current_last_card_clamps() {
        let mut app = app_with_cards(&[3]);
        app.score_now(true);
        app.score_now(true);
        assert_eq!(app.session().current_card_index(), 2);
        app.delete_card(0, 2).unwrap();
        assert_eq!(app.session().current_card_index(), 1);
        assert_eq!(app.current_card().unwrap().question, "Q0.1");
        assert!(app.is_completed());
    }

    #[test]
    fn delete_current_card_during_delay_drops_advance() {
        let mut app = app_with_cards(&[2]);
        app.flip();
        let pending = app.score(true).unwrap();
        app.delete_card(0, 0).unwrap();
        assert!(!app.advance(pending));
        assert_eq!(app.current_card().unwrap().question, "Q0.1");
        assert_eq!(app.session().answered_count(), 0);
        assert!(!app.is_flipped());
        assert!(!app.is_completed());
        assert_eq!(app.completion(), None);
    }

    #[test]
    fn edit_current_card_during_delay_keeps_advance() {
        let mut app = app_with_cards(&[3]);
        let pending = app.score(true).unwrap();
        app.open_card_edit(0).unwrap();
        app.card_editor_mut().unwrap().answer = "changed".to_string();
        app.save_card().unwrap();
        assert!(app.advance(pending));
        assert_eq!(app.session().current_card_index(), 1);
        assert_eq!(app.catalog().card(0, 0).unwrap().answer, "changed");
    }

    #[test]
    fn card_changes_in_other_subjects_leave_session() {
        let mut app = app_with_cards(&[3, 3]);
        app.score_now(true);
        app.delete_card(1, 0).unwrap();
        app.add_card(1, "q", "a").unwrap();
        assert_eq!(app.session().current_card_index(), 1);
        assert_eq!(app.session().answered_count(), 1);
    }

    #[test]
    fn add_card_from_editor() {
        let mut app = app_with_cards(&[0]);
        app.open_new_card().unwrap();
        {
            let editor = app.card_editor_mut().unwrap();
            editor.question = " What is 2+2? ".to_string();
            editor.answer = "4".to_string();
        }
        assert_eq!(app.save_card().unwrap(), 0);
        assert_eq!(app.view().kind(), ViewKind::Study);
        assert_eq!(
            app.current_card(),
            Some(&Card {
                question: "What is 2+2?".to_string(),
                answer: "4".to_string(),
            })
        );
    }

    #[test]
    fn edit_card_prefills_and_saves_in_place() {
        let mut app = app_with_cards(&[2]);
        app.open_card_edit(1).unwrap();
        let editor = app.card_editor_mut().unwrap();
        assert_eq!(editor.question, "Q0.1");
        assert_eq!(editor.answer, "A0.1");
        editor.answer = "changed".to_string();
        app.save_card().unwrap();
        assert_eq!(app.catalog().card(0, 1).unwrap().answer, "changed");
        assert_eq!(app.catalog().card_count(0).unwrap(), 2);
    }

    #[test]
    fn invalid_save_keeps_editor_open() {
        let mut app = app_with_cards(&[1]);
        app.open_new_card().unwrap();
        app.card_editor_mut().unwrap().answer = "only an answer".to_string();
        assert_eq!(
            app.save_card(),
            Err(StudyError::Validation { field: "question" })
        );
        assert_eq!(app.view().kind(), ViewKind::EditCard);
        assert_eq!(app.catalog().card_count(0).unwrap(), 1);
    }

    #[test]
    fn cancel_discards_draft() {
        let mut app = app_with_cards(&[1]);
        app.open_card_edit(0).unwrap();
        app.card_editor_mut().unwrap().question = "draft".to_string();
        app.cancel_card_edit().unwrap();
        assert_eq!(app.view(), &View::Study);
        assert_eq!(app.catalog().card(0, 0).unwrap().question, "Q0.0");
    }

    #[test]
    fn editing_missing_card_is_a_range_error() {
        let mut app = app_with_cards(&[1]);
        assert!(matches!(
            app.open_card_edit(4),
            Err(StudyError::Range { what: "card", .. })
        ));
        assert_eq!(app.view().kind(), ViewKind::Study);
    }

    #[test]
    fn deleting_the_edited_card_closes_editor() {
        let mut app = app_with_cards(&[3]);
        app.open_card_edit(1).unwrap();
        app.delete_card(0, 1).unwrap();
        assert_eq!(app.view(), &View::Study);
    }

    #[test]
    fn deleting_an_earlier_card_retargets_editor() {
        let mut app = app_with_cards(&[3]);
        app.open_card_edit(2).unwrap();
        app.delete_card(0, 0).unwrap();
        assert_eq!(app.view().card_editor().unwrap().card_index(), Some(1));
    }

    #[test]
    fn submit_new_subject_uses_and_clears_draft() {
        let mut app = app_with_cards(&[1]);
        assert!(app.submit_new_subject().is_err());
        app.open_subject_manager().unwrap();
        app.new_subject_name_mut().unwrap().push_str(" Chemistry ");
        assert_eq!(app.submit_new_subject().unwrap(), 1);
        assert_eq!(app.catalog().subject(1).unwrap().name, "Chemistry");
        assert_eq!(app.view().new_subject_name(), Some(""));
    }

    #[test]
    fn blank_subject_draft_is_rejected() {
        let mut app = app_with_cards(&[1]);
        app.open_subject_manager().unwrap();
        app.new_subject_name_mut().unwrap().push_str("   ");
        assert_eq!(
            app.submit_new_subject(),
            Err(StudyError::Validation { field: "subject name" })
        );
        assert_eq!(app.catalog().len(), 1);
        assert_eq!(app.view().new_subject_name(), Some("   "));
    }

    #[test]
    fn completion_message() {
        let mut app = app_with_cards(&[2]);
        assert!(app.completion().is_none());
        app.score_now(true);
        app.score_now(false);
        let completion = app.completion().unwrap();
        assert_eq!(
            completion.to_string(),
            "You've completed Subject 0 with 50% confidence!"
        );
    }

    #[test]
    fn snapshot_reflects_state() {
        let mut app = app_with_cards(&[4]).with_theme(Theme::Dark);
        app.flip();
        app.score_now(true);
        app.flip();
        let snapshot = app.snapshot();
        assert_eq!(
            snapshot,
            StudySnapshot {
                subjects: vec![SubjectSummary {
                    name: "Subject 0".to_string(),
                    card_count: 4,
                }],
                active_subject: 0,
                subject_name: "Subject 0".to_string(),
                card: Some(Card {
                    question: "Q0.1".to_string(),
                    answer: "A0.1".to_string(),
                }),
                card_index: 1,
                card_count: 4,
                progress: 50.0,
                confidence_score: 100,
                is_flipped: true,
                completed: false,
                view: ViewKind::Study,
                theme: Theme::Dark,
            }
        );
    }

    #[test]
    fn toggle_theme_flips_flag() {
        let mut app = app_with_cards(&[1]);
        assert_eq!(app.toggle_theme(), Theme::Dark);
        assert_eq!(app.toggle_theme(), Theme::Light);
    }
}
