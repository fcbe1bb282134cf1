//! Collection store
//!
//! Owns the canonical list of flashcard collections and mirrors it to
//! the key-value store on every mutation. Writes rewrite the full
//! serialized list; last write wins per collection id.

use chrono::{DateTime, Utc};

use crate::cards::models::FlashcardCollection;
use crate::cards::schedule;

use super::kv::{KeyValueStore, Result};

/// Record key for the serialized collection list
pub const COLLECTIONS_KEY: &str = "flashcard_collections";

/// Dashboard filter over the collection list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionFilter {
    All,
    Due,
    Locked,
}

/// Aggregate counts for the dashboard header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectionStats {
    pub total: usize,
    pub total_cards: usize,
    pub due: usize,
}

pub struct CollectionStore {
    kv: Box<dyn KeyValueStore>,
    collections: Vec<FlashcardCollection>,
}

impl CollectionStore {
    /// Load the collection list from the backing store
    pub fn new(kv: Box<dyn KeyValueStore>) -> Result<Self> {
        let collections = match kv.get(COLLECTIONS_KEY)? {
            Some(raw) => serde_json::from_str(&raw)?,
            None => Vec::new(),
        };
        Ok(Self { kv, collections })
    }

    pub fn collections(&self) -> &[FlashcardCollection] {
        &self.collections
    }

    pub fn get(&self, id: &str) -> Option<&FlashcardCollection> {
        self.collections.iter().find(|c| c.id == id)
    }

    /// Insert or replace by id, then persist the full list
    pub fn upsert(&mut self, collection: FlashcardCollection) -> Result<()> {
        match self.collections.iter_mut().find(|c| c.id == collection.id) {
            Some(existing) => *existing = collection,
            None => self.collections.push(collection),
        }
        self.persist()
    }

    /// Remove by id; reports whether anything was removed so the
    /// caller can clear a stale selection
    pub fn delete(&mut self, id: &str) -> Result<bool> {
        let before = self.collections.len();
        self.collections.retain(|c| c.id != id);
        if self.collections.len() == before {
            return Ok(false);
        }
        self.persist()?;
        Ok(true)
    }

    /// Filtered view with a case-insensitive search over name and
    /// description
    pub fn list(
        &self,
        filter: CollectionFilter,
        search: &str,
        now: DateTime<Utc>,
    ) -> Vec<&FlashcardCollection> {
        let query = search.to_lowercase();
        self.collections
            .iter()
            .filter(|c| {
                let matches_search = query.is_empty()
                    || c.name.to_lowercase().contains(&query)
                    || c.description
                        .as_ref()
                        .map_or(false, |d| d.to_lowercase().contains(&query));
                if !matches_search {
                    return false;
                }
                match filter {
                    CollectionFilter::All => true,
                    CollectionFilter::Due => c
                        .revision_schedule
                        .as_ref()
                        .map_or(false, |s| schedule::is_due(s, now)),
                    CollectionFilter::Locked => c.is_locked,
                }
            })
            .collect()
    }

    /// Lock every collection that has gone unreviewed past the grace
    /// period; returns the ids that were locked
    pub fn enforce_lock_policy(&mut self, now: DateTime<Utc>) -> Result<Vec<String>> {
        let mut locked = Vec::new();
        for collection in &mut self.collections {
            if schedule::should_lock(collection, now) {
                schedule::lock(collection, now);
                locked.push(collection.id.clone());
            }
        }
        if !locked.is_empty() {
            self.persist()?;
        }
        Ok(locked)
    }

    /// Log a reminder for every due, unlocked collection
    pub fn log_due_reminders(&self, now: DateTime<Utc>) {
        for collection in &self.collections {
            let due = collection
                .revision_schedule
                .as_ref()
                .map_or(false, |s| schedule::is_due(s, now));
            if due && !collection.is_locked {
                log::info!("Reminder: Time to review \"{}\"!", collection.name);
            }
        }
    }

    pub fn stats(&self, now: DateTime<Utc>) -> CollectionStats {
        CollectionStats {
            total: self.collections.len(),
            total_cards: self.collections.iter().map(|c| c.flashcards.len()).sum(),
            due: self
                .collections
                .iter()
                .filter(|c| {
                    c.revision_schedule
                        .as_ref()
                        .map_or(false, |s| schedule::is_due(s, now))
                })
                .count(),
        }
    }

    fn persist(&mut self) -> Result<()> {
        let raw = serde_json::to_string_pretty(&self.collections)?;
        self.kv.set(COLLECTIONS_KEY, &raw)
    }
}
