//! Plain-text export of a card set

use crate::cards::models::Flashcard;

/// Render cards to the plain-text interchange format: a small header,
/// then each card's type, front, back, options, and correct answer,
/// separated by rule lines.
pub fn export_text(name: &str, description: Option<&str>, cards: &[Flashcard]) -> String {
    let name = if name.is_empty() { "Untitled" } else { name };
    let description = description.filter(|d| !d.is_empty()).unwrap_or("N/A");

    let mut text = format!("Collection: {}\n", name);
    text.push_str(&format!("Description: {}\n", description));
    text.push_str(&format!("\n{}\n\n", "=".repeat(50)));

    for (index, card) in cards.iter().enumerate() {
        text.push_str(&format!(
            "Card {} [{}]\n",
            index + 1,
            card.card_type.as_str().to_uppercase()
        ));
        text.push_str(&format!("Front: {}\n", card.front));
        text.push_str(&format!("Back: {}\n", card.back));
        if let Some(options) = &card.options {
            text.push_str(&format!("Options: {}\n", options.join(", ")));
        }
        if let Some(answer) = &card.correct_answer {
            text.push_str(&format!("Correct Answer: {}\n", answer));
        }
        text.push_str(&format!("\n{}\n\n", "-".repeat(50)));
    }

    text
}
