//! Which screen is active, plus any input being typed on it.

use crate::error::{Result, StudyError};
use serde::{Deserialize, Serialize};

/// Draft of a card being added or edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardEditor {
    subject_index: usize,
    card_index: Option<usize>,
    pub question: String,
    pub answer: String,
}

impl CardEditor {
    /// Empty draft for a new card in `subject_index`.
    pub fn new_card(subject_index: usize) -> Self {
        Self {
            subject_index,
            card_index: None,
            question: String::new(),
            answer: String::new(),
        }
    }

    /// Draft pre-filled with an existing card's text.
    pub fn existing_card(
        subject_index: usize,
        card_index: usize,
        question: &str,
        answer: &str,
    ) -> Self {
        Self {
            subject_index,
            card_index: Some(card_index),
            question: question.to_string(),
            answer: answer.to_string(),
        }
    }

    pub fn subject_index(&self) -> usize {
        self.subject_index
    }

    /// `None` when adding a new card.
    pub fn card_index(&self) -> Option<usize> {
        self.card_index
    }

    pub fn is_new(&self) -> bool {
        self.card_index.is_none()
    }

    /// Whether both fields hold non-blank text.
    pub fn can_save(&self) -> bool {
        !self.question.trim().is_empty() && !self.answer.trim().is_empty()
    }

    pub(crate) fn retarget(&mut self, subject_index: usize, card_index: Option<usize>) {
        self.subject_index = subject_index;
        self.card_index = card_index;
    }
}

/// Discriminant of [`View`] without the drafts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewKind {
    Study,
    ManageSubjects,
    EditCard,
}

impl ViewKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Study => "study",
            Self::ManageSubjects => "manage_subjects",
            Self::EditCard => "edit_card",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Study,
    ManageSubjects { new_subject_name: String },
    EditCard(CardEditor),
}

impl Default for View {
    fn default() -> Self {
        Self::Study
    }
}

impl View {
    pub fn kind(&self) -> ViewKind {
        match self {
            Self::Study => ViewKind::Study,
            Self::ManageSubjects { .. } => ViewKind::ManageSubjects,
            Self::EditCard(_) => ViewKind::EditCard,
        }
    }

    /// The flip key is only live on the study screen.
    pub fn accepts_flip_key(&self) -> bool {
        matches!(self, Self::Study)
    }

    pub fn open_subject_manager(&mut self) -> Result<()> {
        self.expect(ViewKind::Study, "open the subject manager")?;
        *self = Self::ManageSubjects {
            new_subject_name: String::new(),
        };
        Ok(())
    }

    pub fn close_subject_manager(&mut self) -> Result<()> {
        self.expect(ViewKind::ManageSubjects, "leave the subject manager")?;
        *self = Self::Study;
        Ok(())
    }

    pub fn open_card_editor(&mut self, editor: CardEditor) -> Result<()> {
        self.expect(ViewKind::Study, "open the card editor")?;
        *self = Self::EditCard(editor);
        Ok(())
    }

    /// Leave the editor, discarding the draft.
    pub fn close_card_editor(&mut self) -> Result<CardEditor> {
        match std::mem::take(self) {
            Self::EditCard(editor) => Ok(editor),
            other => {
                let kind = other.kind();
                *self = other;
                Err(transition_error("leave the card editor", kind))
            }
        }
    }

    pub fn card_editor(&self) -> Option<&CardEditor> {
        match self {
            Self::EditCard(editor) => Some(editor),
            _ => None,
        }
    }

    pub fn card_editor_mut(&mut self) -> Option<&mut CardEditor> {
        match self {
            Self::EditCard(editor) => Some(editor),
            _ => None,
        }
    }

    pub fn new_subject_name(&self) -> Option<&str> {
        match self {
            Self::ManageSubjects { new_subject_name } => Some(new_subject_name),
            _ => None,
        }
    }

    pub fn new_subject_name_mut(&mut self) -> Option<&mut String> {
        match self {
            Self::ManageSubjects { new_subject_name } => Some(new_subject_name),
            _ => None,
        }
    }

    fn expect(&self, kind: ViewKind, action: &str) -> Result<()> {
        if self.kind() == kind {
            Ok(())
        } else {
            Err(transition_error(action, self.kind()))
        }
    }
}

fn transition_error(action: &str, from: ViewKind) -> StudyError {
    StudyError::Invariant(format!("cannot {action} from the {} view", from.as_str()))
}
