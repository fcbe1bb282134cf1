//! Data models for flashcards, collections, and the user profile

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Client-side user profile, created on first sign-in
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub phone: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(email: String, phone: String) -> Self {
        let now = Utc::now();
        Self {
            id: now.timestamp_millis().to_string(),
            email,
            phone,
            created_at: now,
        }
    }
}

/// Type of flashcard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FlashcardType {
    /// Question and answer over a single concept
    Basic,
    /// Asks how a concept is applied
    Application,
    /// Quiz-style prompt
    Quiz,
    /// Multiple choice; carries options and a correct answer
    Mcq,
    /// Fill-in-the-blank; carries a correct answer
    FillBlank,
}

impl FlashcardType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlashcardType::Basic => "basic",
            FlashcardType::Application => "application",
            FlashcardType::Quiz => "quiz",
            FlashcardType::Mcq => "mcq",
            FlashcardType::FillBlank => "fill-blank",
        }
    }
}

impl fmt::Display for FlashcardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Difficulty of a single card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// Difficulty requested for a generation run; `Mixed` lets the model
/// vary per card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DifficultyLevel {
    Easy,
    Medium,
    Hard,
    Mixed,
}

impl DifficultyLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            DifficultyLevel::Easy => "easy",
            DifficultyLevel::Medium => "medium",
            DifficultyLevel::Hard => "hard",
            DifficultyLevel::Mixed => "mixed",
        }
    }

    /// Concrete per-card difficulty; `Mixed` resolves to medium
    pub fn resolve(self) -> Difficulty {
        match self {
            DifficultyLevel::Easy => Difficulty::Easy,
            DifficultyLevel::Medium | DifficultyLevel::Mixed => Difficulty::Medium,
            DifficultyLevel::Hard => Difficulty::Hard,
        }
    }
}

/// A flashcard with a question (front) and answer (back)
///
/// Front and back carry rich text limited to the allow-listed inline
/// tags (`<strong>`, `<em>`, `<mark>`). Cards are immutable once in a
/// collection except for whole-record replacement or removal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flashcard {
    pub id: String,
    #[serde(rename = "type")]
    pub card_type: FlashcardType,
    pub front: String,
    pub back: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    /// Answer choices; present on mcq cards
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    /// Correct option or blank value; present on mcq and fill-blank cards
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct_answer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl Flashcard {
    pub fn new(id: String, card_type: FlashcardType, front: String, back: String) -> Self {
        Self {
            id,
            card_type,
            front,
            back,
            topic: None,
            tags: None,
            difficulty: None,
            options: None,
            correct_answer: None,
            explanation: None,
        }
    }
}

/// Interval-based due-date tracking for a collection
///
/// Invariant: `next_revision` is `last_revised + interval` days once a
/// review has happened, else creation time plus the interval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevisionSchedule {
    /// Review interval in days
    pub interval: u32,
    pub next_revision: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_revised: Option<DateTime<Utc>>,
}

impl RevisionSchedule {
    pub fn new(interval: u32, now: DateTime<Utc>) -> Self {
        Self {
            interval,
            next_revision: now + Duration::days(i64::from(interval)),
            last_revised: None,
        }
    }
}

/// A named, ordered set of flashcards with an optional revision schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlashcardCollection {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub flashcards: Vec<Flashcard>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision_schedule: Option<RevisionSchedule>,
    /// Set when the collection went unreviewed past the grace period;
    /// cleared only by a completed review
    #[serde(default)]
    pub is_locked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locked_until: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl FlashcardCollection {
    pub fn new(
        name: String,
        description: Option<String>,
        flashcards: Vec<Flashcard>,
        revision_interval: u32,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: now.timestamp_millis().to_string(),
            name,
            description,
            flashcards,
            created_at: now,
            updated_at: now,
            revision_schedule: Some(RevisionSchedule::new(revision_interval, now)),
            is_locked: false,
            locked_until: None,
            tags: None,
        }
    }
}

/// Options for one generation run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationOptions {
    pub include_basic: bool,
    pub include_application: bool,
    pub include_quiz: bool,
    #[serde(rename = "includeMCQ")]
    pub include_mcq: bool,
    pub include_fill_blank: bool,
    pub number_of_cards: usize,
    pub difficulty: DifficultyLevel,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            include_basic: true,
            include_application: true,
            include_quiz: false,
            include_mcq: false,
            include_fill_blank: false,
            number_of_cards: 10,
            difficulty: DifficultyLevel::Mixed,
        }
    }
}
