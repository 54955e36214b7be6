//! Core flashcard study model shared by every front end.
//!
//! Provides:
//! - Catalog of subjects and their question/answer cards
//! - Study session tracking (flip state, answered cards, confidence score)
//! - View selector for the study, subject manager and card editor screens
//! - `StudyApp`, which ties them together and keeps indices consistent

pub mod app;
pub mod catalog;
pub mod error;
mod samples;
pub mod session;
pub mod types;
pub mod view;

pub use app::{Completion, StudyApp, StudySnapshot};
pub use catalog::Catalog;
pub use error::{Result, StudyError};
pub use session::{PendingAdvance, Session};
pub use types::{Card, Subject, SubjectSummary, Theme};
pub use view::{CardEditor, View, ViewKind};
