use anyhow::{bail, Context, Result};
use chrono::Utc;

use flashgenius::cards::models::{Flashcard, FlashcardType};

use crate::app::App;
use crate::CardTypeArg;

/// Append a hand-written card to an existing collection
pub fn add(
    mut app: App,
    key: &str,
    card_type: CardTypeArg,
    front: &str,
    back: &str,
) -> Result<()> {
    if front.trim().is_empty() || back.trim().is_empty() {
        bail!("Please fill in both front and back of the card");
    }

    let card_type = match card_type {
        CardTypeArg::Basic => FlashcardType::Basic,
        CardTypeArg::Application => FlashcardType::Application,
        CardTypeArg::Quiz => FlashcardType::Quiz,
        CardTypeArg::Mcq | CardTypeArg::FillBlank => {
            bail!("Manual cards support the basic, application, and quiz types")
        }
    };

    let mut collection = app
        .resolve_collection(key)
        .cloned()
        .context("Collection not found")?;

    let id = format!("manual-{}", Utc::now().timestamp_millis());
    collection.flashcards.push(Flashcard::new(
        id,
        card_type,
        front.to_string(),
        back.to_string(),
    ));
    collection.updated_at = Utc::now();

    println!(
        "Added card to \"{}\" ({} cards)",
        collection.name,
        collection.flashcards.len()
    );
    app.collections.upsert(collection)?;
    Ok(())
}

/// Remove a card by id; a collection is never left empty
pub fn remove(mut app: App, key: &str, card_id: &str) -> Result<()> {
    let mut collection = app
        .resolve_collection(key)
        .cloned()
        .context("Collection not found")?;

    let before = collection.flashcards.len();
    collection.flashcards.retain(|c| c.id != card_id);
    if collection.flashcards.len() == before {
        bail!("No card with id {} in \"{}\"", card_id, collection.name);
    }
    if collection.flashcards.is_empty() {
        bail!("A collection cannot be left without flashcards");
    }
    collection.updated_at = Utc::now();

    println!("Removed card {} from \"{}\"", card_id, collection.name);
    app.collections.upsert(collection)?;
    Ok(())
}
