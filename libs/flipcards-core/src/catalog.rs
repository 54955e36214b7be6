//! Ordered subjects and their cards.
//!
//! The catalog never drops below one subject. Every operation validates its
//! input before mutating, so a rejected call leaves the catalog untouched.

use crate::error::{Result, StudyError};
use crate::samples;
use crate::types::{Card, Subject, SubjectSummary};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    subjects: Vec<Subject>,
}

impl Catalog {
    /// Build a catalog from existing subjects.
    pub fn from_subjects(subjects: Vec<Subject>) -> Result<Self> {
        if subjects.is_empty() {
            return Err(StudyError::Invariant(
                "catalog needs at least one subject".to_string(),
            ));
        }
        Ok(Self { subjects })
    }

    /// A catalog holding a single empty subject.
    pub fn with_subject(name: &str) -> Result<Self> {
        Ok(Self {
            subjects: vec![Subject::new(name)?],
        })
    }

    /// The built-in sample subjects.
    pub fn sample() -> Self {
        Self {
            subjects: samples::subjects(),
        }
    }

    pub fn len(&self) -> usize {
        self.subjects.len()
    }

    /// Always false for a catalog built through the public constructors.
    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }

    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    pub fn subject(&self, index: usize) -> Result<&Subject> {
        self.subjects
            .get(index)
            .ok_or_else(|| StudyError::out_of_range("subject", index, self.subjects.len()))
    }

    pub fn card(&self, subject_index: usize, card_index: usize) -> Result<&Card> {
        let subject = self.subject(subject_index)?;
        subject
            .cards
            .get(card_index)
            .ok_or_else(|| StudyError::out_of_range("card", card_index, subject.cards.len()))
    }

    pub fn card_count(&self, subject_index: usize) -> Result<usize> {
        Ok(self.subject(subject_index)?.card_count())
    }

    pub fn summaries(&self) -> Vec<SubjectSummary> {
        self.subjects.iter().map(SubjectSummary::from).collect()
    }

    /// Append a new empty subject. Returns its index.
    ///
    /// Duplicate names are allowed.
    pub fn add_subject(&mut self, name: &str) -> Result<usize> {
        let subject = Subject::new(name)?;
        self.subjects.push(subject);
        Ok(self.subjects.len() - 1)
    }

    /// Remove a subject, shifting later subjects down by one.
    pub fn delete_subject(&mut self, index: usize) -> Result<Subject> {
        if self.subjects.len() <= 1 {
            return Err(StudyError::Invariant(
                "cannot delete the last subject".to_string(),
            ));
        }
        self.subject(index)?;
        Ok(self.subjects.remove(index))
    }

    /// Append a card to a subject. Returns the new card's index.
    pub fn add_card(
        &mut self,
        subject_index: usize,
        question: &str,
        answer: &str,
    ) -> Result<usize> {
        let card = Card::new(question, answer)?;
        let subject = self.subject_mut(subject_index)?;
        subject.cards.push(card);
        Ok(subject.cards.len() - 1)
    }

    /// Replace the card at `card_index` in place.
    pub fn update_card(
        &mut self,
        subject_index: usize,
        card_index: usize,
        question: &str,
        answer: &str,
    ) -> Result<()> {
        let card = Card::new(question, answer)?;
        let subject = self.subject_mut(subject_index)?;
        let len = subject.cards.len();
        let slot = subject
            .cards
            .get_mut(card_index)
            .ok_or_else(|| StudyError::out_of_range("card", card_index, len))?;
        *slot = card;
        Ok(())
    }

    /// Remove a card, shifting later cards down by one. The subject may end
    /// up empty.
    pub fn delete_card(&mut self, subject_index: usize, card_index: usize) -> Result<Card> {
        let subject = self.subject_mut(subject_index)?;
        if card_index >= subject.cards.len() {
            return Err(StudyError::out_of_range("card", card_index, subject.cards.len()));
        }
        Ok(subject.cards.remove(card_index))
    }

    fn subject_mut(&mut self, index: usize) -> Result<&mut Subject> {
        let len = self.subjects.len();
        self.subjects
            .get_mut(index)
            .ok_or_else(|| StudyError::out_of_range("subject", index, len))
    }
}
