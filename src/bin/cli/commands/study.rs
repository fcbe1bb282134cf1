use std::io::{self, BufRead, Write};

use anyhow::{bail, Context, Result};
use chrono::Utc;

use flashgenius::cards::markup::strip_markup;
use flashgenius::session::StudySession;

use crate::app::App;

pub fn run(mut app: App, key: &str) -> Result<()> {
    let collection = app
        .resolve_collection(key)
        .cloned()
        .context("Collection not found")?;

    if collection.is_locked {
        match collection.locked_until {
            Some(until) => bail!(
                "\"{}\" is locked. Available after: {}",
                collection.name,
                until.format("%Y-%m-%d")
            ),
            None => bail!("\"{}\" is locked", collection.name),
        }
    }

    println!(
        "Studying \"{}\" - {} cards",
        collection.name,
        collection.flashcards.len()
    );
    println!("Commands: [f]lip  [n]ext  [p]rev  [o]ption reveal  [m]aster  [c]omplete  [q]uit");

    let mut session = StudySession::new(collection)?;
    let stdin = io::stdin();

    loop {
        render_card(&session);
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            // EOF ends the session without completing the review
            return Ok(());
        }

        match line.trim() {
            "f" | "flip" => session.flip(),
            "n" | "next" => session.next(),
            "p" | "prev" => session.previous(),
            "o" | "option" => session.reveal(),
            "m" | "master" => session.toggle_mastered(),
            "q" | "quit" => return Ok(()),
            "c" | "complete" => {
                if session.is_complete() {
                    break;
                }
                println!(
                    "Master every card first ({} of {} so far)",
                    session.mastered_count(),
                    session.card_count()
                );
            }
            "" => {}
            other => println!("Unknown command: {}", other),
        }
    }

    let updated = session.complete_review(Utc::now())?;
    app.collections.upsert(updated)?;
    println!("Great job! Review completed. See you next time!");
    Ok(())
}

fn render_card(session: &StudySession) {
    let card = session.current_card();
    let mastered = if session.is_mastered(&card.id) {
        " ✓ mastered"
    } else {
        ""
    };

    println!();
    println!(
        "Card {} of {} [{}]{}",
        session.index() + 1,
        session.card_count(),
        card.card_type,
        mastered
    );
    println!("  {}", strip_markup(&card.front));

    if let Some(options) = &card.options {
        let correctness = session.option_correctness().unwrap_or_default();
        for (j, option) in options.iter().enumerate() {
            let mark = if session.is_revealed() && correctness.get(j).copied().unwrap_or(false) {
                " ✓"
            } else {
                ""
            };
            println!("    {}. {}{}", (b'A' + j as u8) as char, option, mark);
        }
    }

    if session.is_revealed() {
        println!("  --");
        println!("  {}", strip_markup(&card.back));
        if let Some(explanation) = &card.explanation {
            println!("  Explanation: {}", explanation);
        }
    }

    println!(
        "  Mastered: {} / {}",
        session.mastered_count(),
        session.card_count()
    );
}
