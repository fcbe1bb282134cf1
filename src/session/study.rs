//! Study session state for one collection
//!
//! Tracks the current card, whether it is revealed, and the set of
//! cards the user has marked mastered this session. Mastery is not
//! persisted until the review completes; completing advances the
//! revision schedule, clears any lock, and returns the updated
//! collection for the store to persist.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::cards::models::{Flashcard, FlashcardCollection};
use crate::cards::schedule;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("collection has no flashcards")]
    EmptyCollection,

    #[error("review incomplete: {mastered} of {total} cards mastered")]
    ReviewIncomplete { mastered: usize, total: usize },
}

pub struct StudySession {
    collection: FlashcardCollection,
    index: usize,
    revealed: bool,
    mastered: HashSet<String>,
}

impl StudySession {
    pub fn new(collection: FlashcardCollection) -> Result<Self, SessionError> {
        if collection.flashcards.is_empty() {
            return Err(SessionError::EmptyCollection);
        }
        Ok(Self {
            collection,
            index: 0,
            revealed: false,
            mastered: HashSet::new(),
        })
    }

    pub fn collection(&self) -> &FlashcardCollection {
        &self.collection
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn card_count(&self) -> usize {
        self.collection.flashcards.len()
    }

    pub fn current_card(&self) -> &Flashcard {
        &self.collection.flashcards[self.index]
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    /// Flip the current card over (or back)
    pub fn flip(&mut self) {
        self.revealed = !self.revealed;
    }

    /// Reveal without flipping; used when an MCQ option is selected.
    /// Does not advance and does not record which option was chosen.
    pub fn reveal(&mut self) {
        self.revealed = true;
    }

    /// Correctness of each MCQ option against the correct answer
    pub fn option_correctness(&self) -> Option<Vec<bool>> {
        let card = self.current_card();
        let correct = card.correct_answer.as_deref()?;
        card.options
            .as_ref()
            .map(|options| options.iter().map(|o| o == correct).collect())
    }

    /// Move to the next card; clamped at the end, resets the revealed
    /// state
    pub fn next(&mut self) {
        if self.index + 1 < self.collection.flashcards.len() {
            self.index += 1;
            self.revealed = false;
        }
    }

    /// Move to the previous card; clamped at the start, resets the
    /// revealed state
    pub fn previous(&mut self) {
        if self.index > 0 {
            self.index -= 1;
            self.revealed = false;
        }
    }

    /// Jump to a card by position (grid view); out-of-range is ignored
    pub fn jump_to(&mut self, index: usize) {
        if index < self.collection.flashcards.len() && index != self.index {
            self.index = index;
            self.revealed = false;
        }
    }

    /// Toggle the current card's mastered mark
    pub fn toggle_mastered(&mut self) {
        let id = self.current_card().id.clone();
        if !self.mastered.remove(&id) {
            self.mastered.insert(id);
        }
    }

    pub fn is_mastered(&self, card_id: &str) -> bool {
        self.mastered.contains(card_id)
    }

    pub fn mastered_count(&self) -> usize {
        self.mastered.len()
    }

    /// Every card in the collection has been marked mastered
    pub fn is_complete(&self) -> bool {
        self.collection
            .flashcards
            .iter()
            .all(|c| self.mastered.contains(&c.id))
    }

    /// Finish the review: advances the schedule, clears the lock, and
    /// returns the updated collection for persistence
    pub fn complete_review(self, now: DateTime<Utc>) -> Result<FlashcardCollection, SessionError> {
        if !self.is_complete() {
            return Err(SessionError::ReviewIncomplete {
                mastered: self.mastered.len(),
                total: self.collection.flashcards.len(),
            });
        }

        let mut collection = self.collection;
        if let Some(current) = collection.revision_schedule.as_ref() {
            collection.revision_schedule = Some(schedule::advance(current, now));
        }
        collection.is_locked = false;
        collection.updated_at = now;
        Ok(collection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::models::{FlashcardType, RevisionSchedule};
    use chrono::{Duration, TimeZone};

    fn base_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    fn card(id: &str) -> Flashcard {
        Flashcard::new(
            id.to_string(),
            FlashcardType::Basic,
            format!("Front {}", id),
            format!("Back {}", id),
        )
    }

    fn collection(card_count: usize) -> FlashcardCollection {
        let cards = (0..card_count).map(|i| card(&format!("c{}", i))).collect();
        FlashcardCollection::new("Test".to_string(), None, cards, 3)
    }

    #[test]
    fn test_empty_collection_rejected() {
        let mut empty = collection(1);
        empty.flashcards.clear();
        assert!(matches!(
            StudySession::new(empty),
            Err(SessionError::EmptyCollection)
        ));
    }

    #[test]
    fn test_navigation_clamped() {
        let mut session = StudySession::new(collection(2)).unwrap();

        session.previous();
        assert_eq!(session.index(), 0);

        session.next();
        assert_eq!(session.index(), 1);
        session.next();
        assert_eq!(session.index(), 1);
    }

    #[test]
    fn test_navigation_resets_revealed() {
        let mut session = StudySession::new(collection(3)).unwrap();

        session.flip();
        assert!(session.is_revealed());

        session.next();
        assert!(!session.is_revealed());

        session.flip();
        session.previous();
        assert!(!session.is_revealed());

        session.flip();
        session.jump_to(2);
        assert!(!session.is_revealed());
    }

    #[test]
    fn test_flip_toggles() {
        let mut session = StudySession::new(collection(1)).unwrap();
        session.flip();
        assert!(session.is_revealed());
        session.flip();
        assert!(!session.is_revealed());
    }

    #[test]
    fn test_toggle_mastered() {
        let mut session = StudySession::new(collection(2)).unwrap();

        session.toggle_mastered();
        assert!(session.is_mastered("c0"));
        assert_eq!(session.mastered_count(), 1);

        session.toggle_mastered();
        assert!(!session.is_mastered("c0"));
        assert_eq!(session.mastered_count(), 0);
    }

    #[test]
    fn test_option_correctness() {
        let mut c = collection(1);
        c.flashcards[0].card_type = FlashcardType::Mcq;
        c.flashcards[0].options = Some(vec![
            "Golgi".to_string(),
            "Mitochondria".to_string(),
            "Ribosome".to_string(),
        ]);
        c.flashcards[0].correct_answer = Some("Mitochondria".to_string());

        let mut session = StudySession::new(c).unwrap();
        assert_eq!(
            session.option_correctness(),
            Some(vec![false, true, false])
        );

        session.reveal();
        assert!(session.is_revealed());
        // Choosing an option never advances
        assert_eq!(session.index(), 0);
    }

    #[test]
    fn test_complete_review_gated_on_mastery() {
        let mut session = StudySession::new(collection(2)).unwrap();
        session.toggle_mastered();

        let err = session.complete_review(base_time()).unwrap_err();
        assert!(matches!(
            err,
            SessionError::ReviewIncomplete {
                mastered: 1,
                total: 2
            }
        ));
    }

    #[test]
    fn test_complete_review_updates_collection() {
        let now = base_time();
        let mut c = collection(2);
        c.revision_schedule = Some(RevisionSchedule {
            interval: 5,
            next_revision: now - Duration::days(1),
            last_revised: None,
        });
        c.is_locked = true;
        c.locked_until = Some(now + Duration::days(1));

        let mut session = StudySession::new(c).unwrap();
        session.toggle_mastered();
        session.next();
        session.toggle_mastered();
        assert!(session.is_complete());

        let updated = session.complete_review(now).unwrap();

        assert!(!updated.is_locked);
        assert_eq!(updated.updated_at, now);
        let schedule = updated.revision_schedule.unwrap();
        assert_eq!(schedule.interval, 5);
        assert_eq!(schedule.next_revision, now + Duration::days(5));
        assert_eq!(schedule.last_revised, Some(now));
    }

    #[test]
    fn test_complete_review_without_schedule() {
        let now = base_time();
        let mut c = collection(1);
        c.revision_schedule = None;

        let mut session = StudySession::new(c).unwrap();
        session.toggle_mastered();

        let updated = session.complete_review(now).unwrap();
        assert!(updated.revision_schedule.is_none());
        assert!(!updated.is_locked);
    }
}
