//! Paginated print document: a title page followed by one page per card
//!
//! Markup is stripped down to plain text for print. The builder is
//! pure; writing the rendered output is the caller's concern.

use chrono::{DateTime, Utc};

use crate::cards::markup::strip_markup;
use crate::cards::models::Flashcard;

/// An answer choice on a card page; `correct` marks the checkmark
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionLine {
    pub label: char,
    pub text: String,
    pub correct: bool,
}

/// One card rendered for print
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardPage {
    pub number: usize,
    pub total: usize,
    pub card_type: String,
    pub question: String,
    pub answer: String,
    pub options: Vec<OptionLine>,
    pub explanation: Option<String>,
}

/// Paginated document for a collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintDocument {
    pub title: String,
    pub total_cards: usize,
    pub generated_at: DateTime<Utc>,
    pub pages: Vec<CardPage>,
}

/// Build the print document for a card set
pub fn build_document(name: &str, cards: &[Flashcard], now: DateTime<Utc>) -> PrintDocument {
    let total = cards.len();
    let pages = cards
        .iter()
        .enumerate()
        .map(|(i, card)| CardPage {
            number: i + 1,
            total,
            card_type: card.card_type.as_str().to_uppercase(),
            question: strip_markup(&card.front),
            answer: strip_markup(&card.back),
            options: card
                .options
                .as_deref()
                .unwrap_or(&[])
                .iter()
                .enumerate()
                .map(|(j, option)| OptionLine {
                    label: (b'A' + j as u8) as char,
                    text: option.clone(),
                    correct: card.correct_answer.as_deref() == Some(option.as_str()),
                })
                .collect(),
            explanation: card.explanation.clone(),
        })
        .collect();

    PrintDocument {
        title: if name.is_empty() {
            "Flashcards".to_string()
        } else {
            name.to_string()
        },
        total_cards: total,
        generated_at: now,
        pages,
    }
}

/// Render the document as plain text, pages separated by form feeds
pub fn render_document(document: &PrintDocument) -> String {
    let mut out = String::new();

    out.push_str(&format!("{}\n\n", document.title));
    out.push_str(&format!("Total Cards: {}\n", document.total_cards));
    out.push_str(&format!(
        "Generated: {}\n",
        document.generated_at.format("%Y-%m-%d")
    ));

    for page in &document.pages {
        out.push('\u{0C}');
        out.push('\n');
        out.push_str(&format!(
            "Card {} of {}  [{}]\n\n",
            page.number, page.total, page.card_type
        ));
        out.push_str(&format!("Question:\n{}\n\n", page.question));
        out.push_str(&format!("{}\n\n", "-".repeat(60)));
        out.push_str(&format!("Answer:\n{}\n", page.answer));
        if !page.options.is_empty() {
            out.push_str("\nOptions:\n");
            for option in &page.options {
                let mark = if option.correct { " ✓" } else { "" };
                out.push_str(&format!("  {}. {}{}\n", option.label, option.text, mark));
            }
        }
        if let Some(explanation) = &page.explanation {
            out.push_str(&format!("\nExplanation: {}\n", explanation));
        }
    }

    out
}
