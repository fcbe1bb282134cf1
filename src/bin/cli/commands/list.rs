use anyhow::Result;
use chrono::Utc;

use flashgenius::cards::schedule::days_until;
use flashgenius::store::CollectionFilter;

use crate::app::App;
use crate::OutputFormat;

pub fn run(
    mut app: App,
    filter: CollectionFilter,
    search: &str,
    format: &OutputFormat,
) -> Result<()> {
    let now = Utc::now();

    // Apply the lock policy before showing anything, then surface due
    // reminders through the log
    for id in app.collections.enforce_lock_policy(now)? {
        if let Some(collection) = app.collections.get(&id) {
            log::warn!("\"{}\" was locked after a missed review", collection.name);
        }
    }
    app.collections.log_due_reminders(now);

    let collections = app.collections.list(filter, search, now);

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&collections)?);
        }
        OutputFormat::Plain => {
            if collections.is_empty() {
                println!("No collections found");
            }
            for collection in &collections {
                let lock_marker = if collection.is_locked { " [locked]" } else { "" };
                println!(
                    "{}  {} ({} cards, {}){}",
                    collection.id,
                    collection.name,
                    collection.flashcards.len(),
                    days_until(collection.revision_schedule.as_ref(), now),
                    lock_marker
                );
                if let Some(description) = &collection.description {
                    println!("    {}", description);
                }
            }

            let stats = app.collections.stats(now);
            println!();
            println!(
                "{} collections, {} cards, {} due for review",
                stats.total, stats.total_cards, stats.due
            );
        }
    }

    Ok(())
}
