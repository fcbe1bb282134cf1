mod app;
mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use flashgenius::cards::models::DifficultyLevel;
use flashgenius::store::CollectionFilter;

#[derive(Parser)]
#[command(name = "flashgenius", about = "AI-assisted flashcard study tool", version)]
struct Cli {
    /// Use a specific data directory (default: platform data dir)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum CardTypeArg {
    Basic,
    Application,
    Quiz,
    Mcq,
    FillBlank,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum DifficultyArg {
    Easy,
    Medium,
    Hard,
    Mixed,
}

impl From<DifficultyArg> for DifficultyLevel {
    fn from(arg: DifficultyArg) -> Self {
        match arg {
            DifficultyArg::Easy => DifficultyLevel::Easy,
            DifficultyArg::Medium => DifficultyLevel::Medium,
            DifficultyArg::Hard => DifficultyLevel::Hard,
            DifficultyArg::Mixed => DifficultyLevel::Mixed,
        }
    }
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum FilterArg {
    All,
    Due,
    Locked,
}

impl From<FilterArg> for CollectionFilter {
    fn from(arg: FilterArg) -> Self {
        match arg {
            FilterArg::All => CollectionFilter::All,
            FilterArg::Due => CollectionFilter::Due,
            FilterArg::Locked => CollectionFilter::Locked,
        }
    }
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum ExportKind {
    Text,
    Document,
}

#[derive(Subcommand)]
enum Command {
    /// Sign in with an email and phone number
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
    },

    /// Clear the stored profile
    Logout,

    /// Show the stored profile
    Profile,

    /// Generate flashcards from notes and save them as a collection
    Generate {
        /// Notes file ("-" reads from stdin)
        notes: PathBuf,
        /// Collection name
        #[arg(long)]
        name: String,
        /// Collection description
        #[arg(long)]
        description: Option<String>,
        /// Revision interval in days
        #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u32).range(1..))]
        interval: u32,
        /// Number of cards to generate
        #[arg(long, default_value_t = 10)]
        count: usize,
        /// Card types to include
        #[arg(long, value_delimiter = ',', default_values = ["basic", "application"])]
        types: Vec<CardTypeArg>,
        /// Difficulty level
        #[arg(long, default_value = "mixed")]
        difficulty: DifficultyArg,
    },

    /// List collections
    List {
        /// Show all, due, or locked collections
        #[arg(long, default_value = "all")]
        filter: FilterArg,
        /// Case-insensitive search over name and description
        #[arg(long, default_value = "")]
        search: String,
    },

    /// Show a collection's cards
    Show {
        /// Collection id or name
        collection: String,
    },

    /// Run an interactive study session
    Study {
        /// Collection id or name
        collection: String,
    },

    /// Add a hand-written card to a collection
    AddCard {
        /// Collection id or name
        collection: String,
        /// Card type
        #[arg(long = "type", default_value = "basic")]
        card_type: CardTypeArg,
        /// Front of the card (question or prompt)
        #[arg(long)]
        front: String,
        /// Back of the card (answer or explanation)
        #[arg(long)]
        back: String,
    },

    /// Remove a card from a collection
    RemoveCard {
        /// Collection id or name
        collection: String,
        /// Card id
        card: String,
    },

    /// Export a collection to a file
    Export {
        /// Collection id or name
        collection: String,
        /// Export format
        #[arg(long, default_value = "text")]
        kind: ExportKind,
        /// Output file (defaults to a name derived from the collection)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Delete a collection
    Delete {
        /// Collection id or name
        collection: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let app = app::App::new(cli.data_dir)?;

    match cli.command {
        Command::Login { email, phone } => commands::profile::login(app, &email, &phone),
        Command::Logout => commands::profile::logout(app),
        Command::Profile => commands::profile::show(app, &cli.format),
        Command::Generate {
            notes,
            name,
            description,
            interval,
            count,
            types,
            difficulty,
        } => {
            commands::generate::run(
                app,
                &notes,
                &name,
                description,
                interval,
                count,
                &types,
                difficulty,
            )
            .await
        }
        Command::List { filter, search } => {
            commands::list::run(app, filter.into(), &search, &cli.format)
        }
        Command::Show { collection } => commands::show::run(app, &collection, &cli.format),
        Command::AddCard {
            collection,
            card_type,
            front,
            back,
        } => commands::cards::add(app, &collection, card_type, &front, &back),
        Command::RemoveCard { collection, card } => {
            commands::cards::remove(app, &collection, &card)
        }
        Command::Study { collection } => commands::study::run(app, &collection),
        Command::Export {
            collection,
            kind,
            output,
        } => commands::export::run(app, &collection, kind, output),
        Command::Delete { collection, yes } => commands::delete::run(app, &collection, yes),
    }
}
