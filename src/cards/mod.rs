//! Flashcard data model, revision scheduling, and inline markup rules

pub mod markup;
pub mod models;
pub mod schedule;

pub use models::*;
pub use schedule::{advance, days_until, is_due, lock, should_lock, DueStatus};
