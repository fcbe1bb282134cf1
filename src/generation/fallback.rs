//! Deterministic fallback generation used when the AI path fails
//!
//! Splits the notes into candidate sentences and derives templated
//! cards round-robin across the enabled basic/application/quiz types.
//! Never touches the network and never fails; the same notes and
//! options always produce the same cards.

use crate::cards::models::{Flashcard, FlashcardType, GenerationOptions};

/// Minimum trimmed sentence length considered card-worthy
const MIN_SENTENCE_LEN: usize = 21;

/// Derive up to `number_of_cards` flashcards from the notes without
/// the AI service.
pub fn fallback_generation(notes: &str, options: &GenerationOptions) -> Vec<Flashcard> {
    let sentences: Vec<&str> = notes
        .split(['.', '!', '?'])
        .filter(|s| s.trim().len() >= MIN_SENTENCE_LEN)
        .collect();

    let difficulty = options.difficulty.resolve();
    let max_cards = options.number_of_cards.min(sentences.len());
    let mut cards = Vec::new();

    for (i, raw) in sentences.iter().take(max_cards).enumerate() {
        let sentence = raw.trim();

        let card = if options.include_basic && i % 3 == 0 {
            let lead: Vec<&str> = sentence.split(' ').take(5).collect();
            Some(make_card(
                i,
                FlashcardType::Basic,
                format!("What is meant by: <strong>{}...</strong>?", lead.join(" ")),
                format!("<mark>{}</mark>", sentence),
            ))
        } else if options.include_application && i % 3 == 1 {
            Some(make_card(
                i,
                FlashcardType::Application,
                format!(
                    "How would you apply: <strong>{}...</strong>?",
                    prefix_chars(sentence, 50)
                ),
                format!("Application: {}", sentence),
            ))
        } else if options.include_quiz && i % 3 == 2 {
            Some(make_card(
                i,
                FlashcardType::Quiz,
                format!(
                    "<strong>Quiz:</strong> {}...",
                    prefix_chars(sentence, sentence.chars().count() / 2)
                ),
                sentence.to_string(),
            ))
        } else {
            None
        };

        if let Some(mut card) = card {
            card.difficulty = Some(difficulty);
            cards.push(card);
        }
    }

    cards
}

fn make_card(index: usize, card_type: FlashcardType, front: String, back: String) -> Flashcard {
    Flashcard::new(format!("fallback-{}", index), card_type, front, back)
}

fn prefix_chars(s: &str, n: usize) -> String {
    s.chars().take(n).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::models::{Difficulty, DifficultyLevel};

    fn options(basic: bool, application: bool, quiz: bool, count: usize) -> GenerationOptions {
        GenerationOptions {
            include_basic: basic,
            include_application: application,
            include_quiz: quiz,
            include_mcq: false,
            include_fill_blank: false,
            number_of_cards: count,
            difficulty: DifficultyLevel::Mixed,
        }
    }

    #[test]
    fn test_fallback_deterministic() {
        let notes = "The cell membrane regulates what enters the cell. \
                     Ribosomes assemble proteins from amino acids. \
                     The nucleus stores the genetic material of the cell.";
        let opts = options(true, true, true, 10);

        assert_eq!(fallback_generation(notes, &opts), fallback_generation(notes, &opts));
    }

    #[test]
    fn test_fallback_mitosis_scenario() {
        let notes = "Mitosis is cell division. Meiosis produces gametes.";
        let opts = options(true, false, false, 2);

        let cards = fallback_generation(notes, &opts);

        // Only index 0 satisfies i % 3 == 0 for the basic type
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].id, "fallback-0");
        assert_eq!(cards[0].card_type, FlashcardType::Basic);
        assert!(cards[0].front.contains("Mitosis is cell division"));
        assert_eq!(cards[0].back, "<mark>Mitosis is cell division</mark>");
        assert_eq!(cards[0].difficulty, Some(Difficulty::Medium));
    }

    #[test]
    fn test_fallback_round_robin_types() {
        let notes = "The cell membrane regulates what enters the cell. \
                     Ribosomes assemble proteins from amino acids. \
                     The nucleus stores the genetic material of the cell.";
        let opts = options(true, true, true, 10);

        let cards = fallback_generation(notes, &opts);

        assert_eq!(cards.len(), 3);
        assert_eq!(cards[0].card_type, FlashcardType::Basic);
        assert_eq!(cards[1].card_type, FlashcardType::Application);
        assert_eq!(cards[2].card_type, FlashcardType::Quiz);
        assert!(cards[1].back.starts_with("Application: "));
        assert!(cards[2].front.starts_with("<strong>Quiz:</strong> "));
    }

    #[test]
    fn test_fallback_respects_card_count() {
        let notes = "The cell membrane regulates what enters the cell. \
                     Ribosomes assemble proteins from amino acids. \
                     The nucleus stores the genetic material of the cell.";
        let opts = options(true, true, true, 2);

        assert_eq!(fallback_generation(notes, &opts).len(), 2);
    }

    #[test]
    fn test_fallback_skips_short_sentences() {
        let notes = "Too short. Tiny! Also very short here?";
        let opts = options(true, true, true, 10);

        assert!(fallback_generation(notes, &opts).is_empty());
    }

    #[test]
    fn test_fallback_disabled_types_produce_nothing() {
        let notes = "The cell membrane regulates what enters the cell. \
                     Ribosomes assemble proteins from amino acids.";
        let opts = options(false, false, false, 10);

        assert!(fallback_generation(notes, &opts).is_empty());
    }

    #[test]
    fn test_fallback_difficulty_resolution() {
        let notes = "The cell membrane regulates what enters the cell.";
        let mut opts = options(true, false, false, 5);
        opts.difficulty = DifficultyLevel::Hard;

        let cards = fallback_generation(notes, &opts);
        assert_eq!(cards[0].difficulty, Some(Difficulty::Hard));
    }
}
