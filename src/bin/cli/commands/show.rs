use anyhow::{Context, Result};

use flashgenius::cards::markup::strip_markup;

use crate::app::App;
use crate::OutputFormat;

pub fn run(app: App, key: &str, format: &OutputFormat) -> Result<()> {
    let collection = app.resolve_collection(key).context("Collection not found")?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(collection)?);
        }
        OutputFormat::Plain => {
            println!(
                "{} ({} cards)",
                collection.name,
                collection.flashcards.len()
            );
            if let Some(description) = &collection.description {
                println!("{}", description);
            }

            for (i, card) in collection.flashcards.iter().enumerate() {
                println!();
                println!("Card {} [{}]", i + 1, card.card_type);
                println!("  Front: {}", strip_markup(&card.front));
                println!("  Back:  {}", strip_markup(&card.back));
                if let Some(options) = &card.options {
                    for (j, option) in options.iter().enumerate() {
                        let mark = if card.correct_answer.as_deref() == Some(option.as_str()) {
                            " ✓"
                        } else {
                            ""
                        };
                        println!("    {}. {}{}", (b'A' + j as u8) as char, option, mark);
                    }
                }
                if let Some(explanation) = &card.explanation {
                    println!("  Explanation: {}", explanation);
                }
            }
        }
    }

    Ok(())
}
