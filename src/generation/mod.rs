//! Flashcard generation from notes: AI-backed with a deterministic fallback

pub mod engine;
pub mod fallback;

pub use engine::{GenerationEngine, GenerationError, MAX_CARDS_PER_GENERATION};
pub use fallback::fallback_generation;
