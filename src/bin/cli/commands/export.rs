use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::Utc;

use flashgenius::export::{build_document, export_text, render_document};

use crate::app::App;
use crate::ExportKind;

pub fn run(app: App, key: &str, kind: ExportKind, output: Option<PathBuf>) -> Result<()> {
    let collection = app.resolve_collection(key).context("Collection not found")?;

    let (content, extension) = match kind {
        ExportKind::Text => (
            export_text(
                &collection.name,
                collection.description.as_deref(),
                &collection.flashcards,
            ),
            "txt",
        ),
        ExportKind::Document => {
            let document = build_document(&collection.name, &collection.flashcards, Utc::now());
            (render_document(&document), "pages.txt")
        }
    };

    let path = output.unwrap_or_else(|| default_file_name(&collection.name, extension));
    if let Err(err) = fs::write(&path, content) {
        match kind {
            ExportKind::Document => bail!(
                "Failed to write {}: {}. Try exporting as text instead.",
                path.display(),
                err
            ),
            ExportKind::Text => bail!("Failed to write {}: {}", path.display(), err),
        }
    }

    println!("Exported \"{}\" to {}", collection.name, path.display());
    Ok(())
}

/// "Biology Chapter 3" becomes biology_chapter_3_flashcards.txt
fn default_file_name(name: &str, extension: &str) -> PathBuf {
    let slug: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect();
    let slug = if slug.is_empty() {
        "flashcards".to_string()
    } else {
        slug
    };
    PathBuf::from(format!("{}_flashcards.{}", slug, extension))
}
