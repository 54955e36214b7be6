//! Core types for the flipcards study model.

use crate::error::{Result, StudyError};
use serde::{Deserialize, Serialize};

/// A question/answer pair.
///
/// Cards have no stable ID; a card is identified by its position in the
/// owning subject's card list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub question: String,
    pub answer: String,
}

impl Card {
    /// Build a card from user input, trimming both fields.
    pub fn new(question: &str, answer: &str) -> Result<Self> {
        let question = question.trim();
        let answer = answer.trim();
        if question.is_empty() {
            return Err(StudyError::blank("question"));
        }
        if answer.is_empty() {
            return Err(StudyError::blank("answer"));
        }
        Ok(Self {
            question: question.to_string(),
            answer: answer.to_string(),
        })
    }
}

/// A named, ordered collection of cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub name: String,
    pub cards: Vec<Card>,
}

impl Subject {
    /// Create an empty subject, trimming the name.
    pub fn new(name: &str) -> Result<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StudyError::blank("subject name"));
        }
        Ok(Self {
            name: name.to_string(),
            cards: Vec::new(),
        })
    }

    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// Subject name and size, as listed in subject pickers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectSummary {
    pub name: String,
    pub card_count: usize,
}

impl From<&Subject> for SubjectSummary {
    fn from(subject: &Subject) -> Self {
        Self {
            name: subject.name.clone(),
            card_count: subject.card_count(),
        }
    }
}

/// Light/dark presentation flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    Light,
    Dark,
}

impl Default for Theme {
    fn default() -> Self {
        Self::Light
    }
}

impl Theme {
    /// The other theme.
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}
