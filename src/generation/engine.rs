//! Flashcard generation engine
//!
//! The primary path asks the configured chat model for a JSON array of
//! cards. Any failure along that path - missing endpoint, transport
//! error, malformed or out-of-schema response - degrades to the
//! deterministic heuristic in [`super::fallback`] and is never
//! surfaced to the caller. Only input validation is a hard error.

use std::collections::HashSet;

use chrono::Utc;
use serde::Deserialize;
use thiserror::Error;
use uuid::Uuid;

use crate::ai::{ChatClient, ChatMessage, ChatRequest};
use crate::cards::markup::sanitize_inline_markup;
use crate::cards::models::{Difficulty, Flashcard, FlashcardType, GenerationOptions};

use super::fallback::fallback_generation;

/// Upper bound on cards per generation request
pub const MAX_CARDS_PER_GENERATION: usize = 50;

#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("notes are empty")]
    EmptyNotes,

    #[error("number of cards must be between 1 and {}", MAX_CARDS_PER_GENERATION)]
    InvalidCardCount,
}

#[derive(Error, Debug)]
enum ParseError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("card {index}: {reason}")]
    InvalidCard { index: usize, reason: &'static str },
}

const SYSTEM_INSTRUCTION: &str = "You are an expert educational content creator specializing in creating high-quality flashcards. \
Your task is to analyze the provided notes and generate flashcards that help students understand and retain information effectively.\n\
\n\
Guidelines:\n\
- Extract key concepts, definitions, and important information\n\
- Create clear, concise questions and answers\n\
- Use proper formatting with HTML tags for emphasis (<strong>, <em>, <mark>)\n\
- For topics and titles, use <strong> tags\n\
- For important concepts, use <mark> tags\n\
- Ensure questions are specific and answers are comprehensive\n\
- Include context and explanations where helpful\n\
- Return ONLY valid JSON in the specified format, no additional text";

/// Card shape expected from the model; unknown `type` values fail the
/// parse rather than being coerced
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCard {
    #[serde(default)]
    id: Option<String>,
    #[serde(rename = "type")]
    card_type: FlashcardType,
    front: String,
    back: String,
    #[serde(default)]
    topic: Option<String>,
    #[serde(default)]
    tags: Option<Vec<String>>,
    #[serde(default)]
    difficulty: Option<Difficulty>,
    #[serde(default)]
    options: Option<Vec<String>>,
    #[serde(default)]
    correct_answer: Option<String>,
    #[serde(default)]
    explanation: Option<String>,
}

pub struct GenerationEngine {
    chat: Box<dyn ChatClient>,
    model: String,
}

impl GenerationEngine {
    pub fn new(chat: Box<dyn ChatClient>, model: String) -> Self {
        Self { chat, model }
    }

    /// Generate flashcards from free-text notes.
    ///
    /// Returns at most `options.number_of_cards` cards, each with an id
    /// unique within the batch. A failed AI call falls back to the
    /// heuristic generator; only input validation can fail.
    pub async fn generate(
        &self,
        notes: &str,
        options: &GenerationOptions,
    ) -> Result<Vec<Flashcard>, GenerationError> {
        if notes.trim().is_empty() {
            return Err(GenerationError::EmptyNotes);
        }
        if options.number_of_cards == 0 || options.number_of_cards > MAX_CARDS_PER_GENERATION {
            return Err(GenerationError::InvalidCardCount);
        }

        let request = ChatRequest {
            messages: vec![
                ChatMessage::system(SYSTEM_INSTRUCTION),
                ChatMessage::user(build_prompt(notes, options)),
            ],
            model: self.model.clone(),
        };

        match self.chat.chat(request).await {
            Ok(response) => {
                match parse_response(&response.message.content, options.number_of_cards) {
                    Ok(cards) => Ok(cards),
                    Err(err) => {
                        log::warn!("Failed to parse AI response: {}", err);
                        Ok(fallback_generation(notes, options))
                    }
                }
            }
            Err(err) => {
                log::warn!("AI generation failed: {}", err);
                Ok(fallback_generation(notes, options))
            }
        }
    }
}

fn build_prompt(notes: &str, options: &GenerationOptions) -> String {
    let mut card_types = Vec::new();
    if options.include_basic {
        card_types.push("basic concept cards");
    }
    if options.include_application {
        card_types.push("application-based cards");
    }
    if options.include_quiz {
        card_types.push("quiz-style cards");
    }
    if options.include_mcq {
        card_types.push("multiple choice questions");
    }
    if options.include_fill_blank {
        card_types.push("fill-in-the-blank cards");
    }

    format!(
        "Analyze the following notes and generate {count} flashcards.\n\
         \n\
         Card types to include: {types}\n\
         Difficulty level: {difficulty}\n\
         \n\
         Notes:\n\
         {notes}\n\
         \n\
         Return a JSON array with the following structure:\n\
         [\n\
           {{\n\
             \"id\": \"unique-id\",\n\
             \"type\": \"basic|application|quiz|mcq|fill-blank\",\n\
             \"front\": \"Question or prompt (use <strong> for topics/titles, <mark> for key concepts)\",\n\
             \"back\": \"Answer or explanation (formatted with HTML tags)\",\n\
             \"topic\": \"Main topic (optional)\",\n\
             \"difficulty\": \"easy|medium|hard\",\n\
             \"options\": [\"option1\", \"option2\", \"option3\", \"option4\"],\n\
             \"correctAnswer\": \"correct option\",\n\
             \"explanation\": \"Why this is correct (optional)\"\n\
           }}\n\
         ]\n\
         \n\
         Important formatting rules:\n\
         - Use <strong>text</strong> for all topics, titles, and headings\n\
         - Use <mark>important concept</mark> for key terms and concepts that need emphasis\n\
         - Use <em>text</em> for subtle emphasis\n\
         - Keep questions clear and concise\n\
         - Provide comprehensive answers with context\n\
         - For MCQ, include 4 options with one correct answer\n\
         - For fill-in-blank, use _____ in the front and provide the answer in correctAnswer field\n\
         \n\
         Return ONLY the JSON array, no additional text or markdown.",
        count = options.number_of_cards,
        types = card_types.join(", "),
        difficulty = options.difficulty.as_str(),
        notes = notes,
    )
}

/// Remove enclosing markdown code fences, if any
fn strip_code_fences(response: &str) -> String {
    let trimmed = response.trim();
    if trimmed.starts_with("```") {
        trimmed
            .replace("```json\n", "")
            .replace("```json", "")
            .replace("```\n", "")
            .replace("```", "")
    } else {
        trimmed.to_string()
    }
}

fn parse_response(content: &str, limit: usize) -> Result<Vec<Flashcard>, ParseError> {
    let cleaned = strip_code_fences(content);
    let raw: Vec<RawCard> = serde_json::from_str(&cleaned)?;

    let mut cards = Vec::with_capacity(raw.len());
    for (index, card) in raw.into_iter().enumerate() {
        cards.push(validate_card(card, index)?);
    }

    // Ids must be unique within the batch even when the model repeats
    // itself
    let mut seen = HashSet::new();
    for card in &mut cards {
        if !seen.insert(card.id.clone()) {
            card.id = synthesize_id();
            seen.insert(card.id.clone());
        }
    }

    cards.truncate(limit);
    Ok(cards)
}

fn validate_card(raw: RawCard, index: usize) -> Result<Flashcard, ParseError> {
    let invalid = |reason| ParseError::InvalidCard { index, reason };

    match raw.card_type {
        FlashcardType::Mcq => {
            let has_options = raw.options.as_ref().map_or(false, |o| o.len() >= 2);
            if !has_options || raw.correct_answer.is_none() {
                return Err(invalid("mcq card requires options and correctAnswer"));
            }
        }
        FlashcardType::FillBlank => {
            if raw.correct_answer.is_none() {
                return Err(invalid("fill-blank card requires correctAnswer"));
            }
        }
        _ => {
            if raw.options.is_some() || raw.correct_answer.is_some() {
                return Err(invalid("options are only valid on mcq and fill-blank cards"));
            }
        }
    }

    let front = sanitize_inline_markup(&raw.front);
    let back = sanitize_inline_markup(&raw.back);
    if front.trim().is_empty() || back.trim().is_empty() {
        return Err(invalid("card front and back must be non-empty"));
    }

    let id = match raw.id {
        Some(id) if !id.trim().is_empty() => id,
        _ => synthesize_id(),
    };

    Ok(Flashcard {
        id,
        card_type: raw.card_type,
        front,
        back,
        topic: raw.topic,
        tags: raw.tags,
        difficulty: raw.difficulty,
        options: raw.options,
        correct_answer: raw.correct_answer,
        explanation: raw.explanation,
    })
}

/// Id for cards that arrive without one; unique within the batch
fn synthesize_id() -> String {
    format!(
        "ai-{}-{}",
        Utc::now().timestamp_millis(),
        Uuid::new_v4().simple()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{ChatError, ChatResponse};
    use crate::cards::models::DifficultyLevel;
    use async_trait::async_trait;

    struct StaticChat {
        content: String,
    }

    #[async_trait]
    impl ChatClient for StaticChat {
        async fn chat(&self, _request: ChatRequest) -> Result<ChatResponse, ChatError> {
            Ok(ChatResponse {
                message: ChatMessage {
                    role: "assistant".to_string(),
                    content: self.content.clone(),
                },
            })
        }
    }

    struct FailingChat;

    #[async_trait]
    impl ChatClient for FailingChat {
        async fn chat(&self, _request: ChatRequest) -> Result<ChatResponse, ChatError> {
            Err(ChatError::NotConfigured)
        }
    }

    fn engine(content: &str) -> GenerationEngine {
        GenerationEngine::new(
            Box::new(StaticChat {
                content: content.to_string(),
            }),
            "test-model".to_string(),
        )
    }

    fn options(count: usize) -> GenerationOptions {
        GenerationOptions {
            number_of_cards: count,
            include_mcq: true,
            include_fill_blank: true,
            ..GenerationOptions::default()
        }
    }

    const NOTES: &str = "Mitosis is cell division. Meiosis produces gametes.";

    #[tokio::test]
    async fn test_generate_rejects_empty_notes() {
        let engine = engine("[]");
        let result = engine.generate("   \n", &options(5)).await;
        assert!(matches!(result, Err(GenerationError::EmptyNotes)));
    }

    #[tokio::test]
    async fn test_generate_rejects_bad_card_count() {
        let engine = engine("[]");
        assert!(matches!(
            engine.generate(NOTES, &options(0)).await,
            Err(GenerationError::InvalidCardCount)
        ));
        assert!(matches!(
            engine.generate(NOTES, &options(51)).await,
            Err(GenerationError::InvalidCardCount)
        ));
    }

    #[tokio::test]
    async fn test_generate_parses_ai_response() {
        let engine = engine(
            r#"[
                {"id": "a1", "type": "basic", "front": "What is <strong>mitosis</strong>?", "back": "Cell division"},
                {"id": "a2", "type": "mcq", "front": "Pick one", "back": "B",
                 "options": ["A", "B", "C", "D"], "correctAnswer": "B", "explanation": "Because"}
            ]"#,
        );

        let cards = engine.generate(NOTES, &options(5)).await.unwrap();

        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].id, "a1");
        assert_eq!(cards[0].card_type, FlashcardType::Basic);
        assert_eq!(cards[1].options.as_ref().unwrap().len(), 4);
        assert_eq!(cards[1].correct_answer.as_deref(), Some("B"));
    }

    #[tokio::test]
    async fn test_generate_strips_code_fences() {
        let engine = engine(
            "```json\n[{\"id\": \"a1\", \"type\": \"quiz\", \"front\": \"Q\", \"back\": \"A\"}]\n```",
        );

        let cards = engine.generate(NOTES, &options(5)).await.unwrap();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].card_type, FlashcardType::Quiz);
    }

    #[tokio::test]
    async fn test_generate_synthesizes_missing_ids() {
        let engine = engine(
            r#"[
                {"type": "basic", "front": "Q1", "back": "A1"},
                {"id": "", "type": "basic", "front": "Q2", "back": "A2"},
                {"id": "keep", "type": "basic", "front": "Q3", "back": "A3"}
            ]"#,
        );

        let cards = engine.generate(NOTES, &options(5)).await.unwrap();

        let ids: HashSet<&str> = cards.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids.len(), 3);
        assert!(cards[0].id.starts_with("ai-"));
        assert!(cards[1].id.starts_with("ai-"));
        assert_eq!(cards[2].id, "keep");
    }

    #[tokio::test]
    async fn test_generate_truncates_to_requested_count() {
        let engine = engine(
            r#"[
                {"id": "a1", "type": "basic", "front": "Q1", "back": "A1"},
                {"id": "a2", "type": "basic", "front": "Q2", "back": "A2"},
                {"id": "a3", "type": "basic", "front": "Q3", "back": "A3"}
            ]"#,
        );

        let cards = engine.generate(NOTES, &options(2)).await.unwrap();
        assert_eq!(cards.len(), 2);
    }

    #[tokio::test]
    async fn test_generate_sanitizes_markup() {
        let engine = engine(
            r#"[{"id": "a1", "type": "basic",
                "front": "<div>What is <strong>mitosis</strong>?</div><script>x()</script>",
                "back": "<mark>Cell division</mark>"}]"#,
        );

        let cards = engine.generate(NOTES, &options(5)).await.unwrap();
        assert_eq!(cards[0].front, "What is <strong>mitosis</strong>?");
        assert_eq!(cards[0].back, "<mark>Cell division</mark>");
    }

    #[tokio::test]
    async fn test_generate_unknown_type_falls_back() {
        let engine = engine(r#"[{"id": "a1", "type": "essay", "front": "Q", "back": "A"}]"#);

        let cards = engine.generate(NOTES, &options(5)).await.unwrap();
        assert!(cards.iter().all(|c| c.id.starts_with("fallback-")));
        assert!(!cards.is_empty());
    }

    #[tokio::test]
    async fn test_generate_mcq_without_options_falls_back() {
        let engine = engine(r#"[{"id": "a1", "type": "mcq", "front": "Q", "back": "A"}]"#);

        let cards = engine.generate(NOTES, &options(5)).await.unwrap();
        assert!(cards.iter().all(|c| c.id.starts_with("fallback-")));
    }

    #[tokio::test]
    async fn test_generate_options_on_basic_card_fall_back() {
        let engine = engine(
            r#"[{"id": "a1", "type": "basic", "front": "Q", "back": "A",
                "options": ["x", "y"], "correctAnswer": "x"}]"#,
        );

        let cards = engine.generate(NOTES, &options(5)).await.unwrap();
        assert!(cards.iter().all(|c| c.id.starts_with("fallback-")));
    }

    #[tokio::test]
    async fn test_generate_non_array_falls_back() {
        let engine = engine(r#"{"cards": []}"#);

        let cards = engine.generate(NOTES, &options(5)).await.unwrap();
        assert!(cards.iter().all(|c| c.id.starts_with("fallback-")));
    }

    #[tokio::test]
    async fn test_generate_chat_failure_falls_back() {
        let engine = GenerationEngine::new(Box::new(FailingChat), "test-model".to_string());

        let opts = GenerationOptions {
            number_of_cards: 2,
            include_application: false,
            ..GenerationOptions::default()
        };
        let cards = engine.generate(NOTES, &opts).await.unwrap();

        // The fallback scenario: only sentence 0 yields a basic card
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].id, "fallback-0");
        assert_eq!(cards[0].card_type, FlashcardType::Basic);
    }

    #[tokio::test]
    async fn test_generate_reassigns_duplicate_ids() {
        let engine = engine(
            r#"[
                {"id": "dup", "type": "basic", "front": "Q1", "back": "A1"},
                {"id": "dup", "type": "basic", "front": "Q2", "back": "A2"}
            ]"#,
        );

        let cards = engine.generate(NOTES, &options(5)).await.unwrap();

        assert_eq!(cards[0].id, "dup");
        assert_ne!(cards[1].id, "dup");
        assert!(cards[1].id.starts_with("ai-"));
    }

    #[tokio::test]
    async fn test_generate_id_uniqueness_within_batch() {
        let body: Vec<String> = (0..10)
            .map(|_| r#"{"type": "basic", "front": "Q", "back": "A"}"#.to_string())
            .collect();
        let engine = engine(&format!("[{}]", body.join(",")));

        let cards = engine.generate(NOTES, &options(10)).await.unwrap();
        let ids: HashSet<&str> = cards.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids.len(), cards.len());
    }

    #[test]
    fn test_build_prompt_lists_enabled_types() {
        let opts = GenerationOptions {
            include_quiz: true,
            include_mcq: true,
            number_of_cards: 7,
            difficulty: DifficultyLevel::Hard,
            ..GenerationOptions::default()
        };

        let prompt = build_prompt("Some notes", &opts);

        assert!(prompt.contains("generate 7 flashcards"));
        assert!(prompt.contains(
            "basic concept cards, application-based cards, quiz-style cards, multiple choice questions"
        ));
        assert!(!prompt.contains("fill-in-the-blank cards"));
        assert!(prompt.contains("Difficulty level: hard"));
        assert!(prompt.contains("Some notes"));
    }
}
