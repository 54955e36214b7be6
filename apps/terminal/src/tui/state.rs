use flipcards_core::{PendingAdvance, StudyApp};

/// Which editor field receives typed characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorField {
    Question,
    Answer,
}

impl EditorField {
    pub fn toggled(self) -> Self {
        match self {
            Self::Question => Self::Answer,
            Self::Answer => Self::Question,
        }
    }
}

pub struct TuiState {
    pub app: StudyApp,

    // Cursor in the subject manager list
    pub selected_subject: usize,

    pub editor_field: EditorField,

    pub flash_message: Option<String>,
    pub show_help: bool,
    pub quit: bool,
}

impl TuiState {
    pub fn new(app: StudyApp) -> Self {
        Self {
            app,
            selected_subject: 0,
            editor_field: EditorField::Question,
            flash_message: None,
            show_help: false,
            quit: false,
        }
    }

    /// Unwrap a core result, turning a rejection into a flash message.
    pub fn report<T>(&mut self, action: &str, result: flipcards_core::Result<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(error) => {
                tracing::debug!(action, %error, "action rejected");
                self.flash_message = Some(error.to_string());
                None
            }
        }
    }

    pub fn flash(&mut self, message: impl Into<String>) {
        self.flash_message = Some(message.into());
    }

    /// Apply an advance delivered by the scheduler.
    pub fn apply_advance(&mut self, pending: PendingAdvance) -> bool {
        let applied = self.app.advance(pending);
        if applied {
            tracing::trace!(card = pending.card_index(), "advanced");
        } else {
            tracing::trace!(card = pending.card_index(), "dropped stale advance");
        }
        applied
    }

    /// Keep the subject manager cursor on an existing subject.
    pub fn clamp_selected_subject(&mut self) {
        let len = self.app.catalog().len();
        if self.selected_subject >= len {
            self.selected_subject = len.saturating_sub(1);
        }
    }
}
