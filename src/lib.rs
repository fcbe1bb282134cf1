//! FlashGenius: AI-assisted flashcard generation with interval-based
//! revision scheduling.
//!
//! The library is organized the way the app drives it:
//! - [`generation`] turns free-text notes into flashcards, through the
//!   configured chat model or a deterministic fallback
//! - [`store`] persists the user profile and the collection list
//!   through a key-value store
//! - [`cards`] holds the data model, the revision scheduler, and the
//!   inline-markup rules
//! - [`session`] tracks one study session and completes reviews
//! - [`export`] renders card sets as plain text or a paginated document

pub mod ai;
pub mod cards;
pub mod export;
pub mod generation;
pub mod session;
pub mod store;
