use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};

use crate::app::App;

pub fn run(mut app: App, key: &str, yes: bool) -> Result<()> {
    let collection = app.resolve_collection(key).context("Collection not found")?;
    let id = collection.id.clone();
    let name = collection.name.clone();

    if !yes {
        print!("Delete \"{}\"? [y/N] ", name);
        io::stdout().flush()?;
        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        if !matches!(line.trim(), "y" | "Y" | "yes") {
            println!("Cancelled");
            return Ok(());
        }
    }

    if app.collections.delete(&id)? {
        println!("Deleted \"{}\"", name);
    }
    Ok(())
}
