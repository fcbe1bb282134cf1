use std::fs;
use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::Utc;

use flashgenius::ai::HttpChatClient;
use flashgenius::cards::models::{FlashcardCollection, GenerationOptions};
use flashgenius::cards::schedule::days_until;
use flashgenius::generation::GenerationEngine;

use crate::app::App;
use crate::{CardTypeArg, DifficultyArg};

#[allow(clippy::too_many_arguments)]
pub async fn run(
    mut app: App,
    notes_path: &Path,
    name: &str,
    description: Option<String>,
    interval: u32,
    count: usize,
    types: &[CardTypeArg],
    difficulty: DifficultyArg,
) -> Result<()> {
    if app.profile.load()?.is_none() {
        bail!("Sign in first: flashgenius login --email <email> --phone <phone>");
    }
    if name.trim().is_empty() {
        bail!("Please enter a collection name");
    }

    let notes = read_notes(notes_path)?;
    if notes.trim().is_empty() {
        bail!("Please enter some notes to analyze");
    }

    let options = GenerationOptions {
        include_basic: types.contains(&CardTypeArg::Basic),
        include_application: types.contains(&CardTypeArg::Application),
        include_quiz: types.contains(&CardTypeArg::Quiz),
        include_mcq: types.contains(&CardTypeArg::Mcq),
        include_fill_blank: types.contains(&CardTypeArg::FillBlank),
        number_of_cards: count,
        difficulty: difficulty.into(),
    };

    let model = app.chat_config.model.clone();
    let chat = HttpChatClient::new(app.chat_config.clone());
    let engine = GenerationEngine::new(Box::new(chat), model);

    let cards = engine.generate(&notes, &options).await?;
    if cards.is_empty() {
        bail!("No flashcards could be generated from these notes");
    }

    let collection = FlashcardCollection::new(
        name.to_string(),
        description.filter(|d| !d.trim().is_empty()),
        cards,
        interval,
    );

    println!(
        "Saved \"{}\" with {} cards (next review: {})",
        collection.name,
        collection.flashcards.len(),
        days_until(collection.revision_schedule.as_ref(), Utc::now())
    );
    app.collections.upsert(collection)?;
    Ok(())
}

fn read_notes(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut notes = String::new();
        std::io::stdin()
            .read_to_string(&mut notes)
            .context("Failed to read notes from stdin")?;
        Ok(notes)
    } else {
        fs::read_to_string(path)
            .with_context(|| format!("Failed to read notes from {}", path.display()))
    }
}
