use anyhow::Result;

use crate::app::App;
use crate::OutputFormat;

pub fn login(mut app: App, email: &str, phone: &str) -> Result<()> {
    let user = app.profile.sign_in(email, phone)?;
    println!("Signed in as {}", user.email);
    Ok(())
}

pub fn logout(mut app: App) -> Result<()> {
    app.profile.clear()?;
    println!("Signed out");
    Ok(())
}

pub fn show(app: App, format: &OutputFormat) -> Result<()> {
    match app.profile.load()? {
        Some(user) => match format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&user)?),
            OutputFormat::Plain => {
                println!("Email: {}", user.email);
                println!("Phone: {}", user.phone);
                println!("Member since: {}", user.created_at.format("%Y-%m-%d"));
            }
        },
        None => println!("No profile stored. Sign in with: flashgenius login --email <email> --phone <phone>"),
    }
    Ok(())
}
