//! Error types for flipcards-core.

use thiserror::Error;

/// Result type alias using StudyError.
pub type Result<T> = std::result::Result<T, StudyError>;

/// Errors returned by catalog, session and view operations.
///
/// Every error is raised before any state is touched, so a rejected
/// operation leaves the application exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StudyError {
    /// A required text field was blank after trimming.
    #[error("{field} must not be blank")]
    Validation { field: &'static str },

    /// An index was outside the current bounds.
    #[error("{what} index {index} out of range (len {len})")]
    Range {
        what: &'static str,
        index: usize,
        len: usize,
    },

    /// The operation would break a structural invariant.
    #[error("{0}")]
    Invariant(String),
}

impl StudyError {
    pub(crate) fn blank(field: &'static str) -> Self {
        Self::Validation { field }
    }

    pub(crate) fn out_of_range(what: &'static str, index: usize, len: usize) -> Self {
        Self::Range { what, index, len }
    }
}
