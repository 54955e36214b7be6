//! Per-run study progress for the active subject.
//!
//! A session never reads the catalog itself; callers pass the active
//! subject's card count so the session can be tested in isolation.

use std::collections::BTreeSet;

/// Token for an advance that has been earned by scoring but not applied yet.
///
/// The token remembers the session epoch it was issued in. Any reset bumps
/// the epoch, as does deleting the scored card or one before it, so an
/// advance issued before either is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingAdvance {
    epoch: u64,
    card_index: usize,
}

impl PendingAdvance {
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Index of the card that was scored.
    pub fn card_index(&self) -> usize {
        self.card_index
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    current_card_index: usize,
    is_flipped: bool,
    answered: BTreeSet<usize>,
    /// Subset of `answered` marked as known.
    known: BTreeSet<usize>,
    completed: bool,
    epoch: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_card_index(&self) -> usize {
        self.current_card_index
    }

    pub fn is_flipped(&self) -> bool {
        self.is_flipped
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn answered_count(&self) -> usize {
        self.answered.len()
    }

    /// Number of answered cards judged known.
    pub fn confidence_count(&self) -> usize {
        self.known.len()
    }

    pub fn is_answered(&self, card_index: usize) -> bool {
        self.answered.contains(&card_index)
    }

    /// Percentage through the deck, counting the current card as seen.
    pub fn progress(&self, card_count: usize) -> f64 {
        if card_count == 0 {
            return 0.0;
        }
        (self.current_card_index + 1) as f64 / card_count as f64 * 100.0
    }

    /// Rounded percentage of answered cards marked known; 0 before any answer.
    pub fn confidence_score(&self) -> u32 {
        if self.answered.is_empty() {
            return 0;
        }
        (self.known.len() as f64 / self.answered.len() as f64 * 100.0).round() as u32
    }

    /// Back to the first card with nothing answered.
    pub fn reset(&mut self) {
        let epoch = self.epoch.wrapping_add(1);
        *self = Self {
            epoch,
            ..Self::default()
        };
    }

    /// Toggle the flip state. Returns false when there is no card to flip.
    pub fn flip(&mut self, card_count: usize) -> bool {
        if card_count == 0 {
            return false;
        }
        self.is_flipped = !self.is_flipped;
        true
    }

    /// Record a known/unknown judgement for the current card.
    ///
    /// Returns `None` when the card was already scored this run (or the
    /// subject is empty); nothing changes in that case. Otherwise the card is
    /// recorded and the returned token must be passed to [`Session::advance`]
    /// to move on.
    pub fn score(&mut self, is_correct: bool, card_count: usize) -> Option<PendingAdvance> {
        if card_count == 0 || self.answered.contains(&self.current_card_index) {
            return None;
        }
        self.answered.insert(self.current_card_index);
        if is_correct {
            self.known.insert(self.current_card_index);
        }
        Some(PendingAdvance {
            epoch: self.epoch,
            card_index: self.current_card_index,
        })
    }

    /// Apply an advance earned by [`Session::score`].
    ///
    /// Moves past the scored card, or marks the run completed when it was the
    /// last one. Returns false if the token is stale: the session was reset
    /// since it was issued, the current card moved, or the deck is now empty.
    pub fn advance(&mut self, pending: PendingAdvance, card_count: usize) -> bool {
        if pending.epoch != self.epoch
            || pending.card_index != self.current_card_index
            || card_count == 0
        {
            return false;
        }
        self.step(card_count);
        true
    }

    fn step(&mut self, card_count: usize) {
        let next = self.current_card_index + 1;
        if next >= card_count {
            self.completed = true;
        } else {
            self.current_card_index = next;
            self.is_flipped = false;
        }
    }

    /// Repair indices after card `deleted` was removed from the active
    /// subject, leaving `card_count` cards.
    ///
    /// Removing the current card or one before it invalidates any pending
    /// advance. If the card now current was already scored, the session moves
    /// past it right away instead.
    pub(crate) fn card_deleted(&mut self, deleted: usize, card_count: usize) {
        if card_count == 0 {
            self.reset();
            return;
        }
        self.answered = shift_down(&self.answered, deleted);
        self.known = shift_down(&self.known, deleted);
        if deleted > self.current_card_index {
            return;
        }

        self.epoch = self.epoch.wrapping_add(1);
        if deleted < self.current_card_index {
            self.current_card_index -= 1;
        } else {
            self.is_flipped = false;
            self.clamp(card_count);
        }

        if !self.completed && self.answered.contains(&self.current_card_index) {
            self.step(card_count);
        }
    }

    /// Keep the current index inside `card_count` cards.
    pub(crate) fn clamp(&mut self, card_count: usize) {
        if self.current_card_index >= card_count {
            self.current_card_index = card_count.saturating_sub(1);
        }
    }
}

fn shift_down(indices: &BTreeSet<usize>, removed: usize) -> BTreeSet<usize> {
    indices
        .iter()
        .filter(|&&i| i != removed)
        .map(|&i| if i > removed { i - 1 } else { i })
        .collect()
}
