use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use flashgenius::ai::ChatConfig;
use flashgenius::cards::models::FlashcardCollection;
use flashgenius::store::{CollectionStore, FileKeyValueStore, ProfileStore};

/// Shared application state for CLI commands
pub struct App {
    pub profile: ProfileStore,
    pub collections: CollectionStore,
    pub chat_config: ChatConfig,
}

impl App {
    /// Initialize from the given or default data directory
    pub fn new(data_dir: Option<PathBuf>) -> Result<Self> {
        let data_dir = match data_dir {
            Some(dir) => dir,
            None => FileKeyValueStore::default_data_dir()
                .context("Failed to resolve data directory")?,
        };

        let kv = FileKeyValueStore::new(data_dir.clone());
        kv.init().context("Failed to initialize data directory")?;

        let profile = ProfileStore::new(Box::new(FileKeyValueStore::new(data_dir.clone())));
        let collections =
            CollectionStore::new(Box::new(kv)).context("Failed to load collections")?;
        let chat_config = load_chat_config(&data_dir);

        Ok(Self {
            profile,
            collections,
            chat_config,
        })
    }

    /// Find a collection by id, exact name, or name prefix
    /// (case-insensitive)
    pub fn resolve_collection(&self, key: &str) -> Option<&FlashcardCollection> {
        let collections = self.collections.collections();
        let lowered = key.to_lowercase();

        collections
            .iter()
            .find(|c| c.id == key)
            .or_else(|| {
                collections
                    .iter()
                    .find(|c| c.name.to_lowercase() == lowered)
            })
            .or_else(|| {
                collections
                    .iter()
                    .find(|c| c.name.to_lowercase().starts_with(&lowered))
            })
    }
}

/// Read `config.json` from the data directory. A missing or malformed
/// config means the AI endpoint is unavailable; generation then uses
/// the heuristic fallback.
fn load_chat_config(data_dir: &Path) -> ChatConfig {
    let path = data_dir.join("config.json");
    match fs::read_to_string(&path) {
        Ok(raw) => match serde_json::from_str(&raw) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("Ignoring malformed config.json: {}", err);
                ChatConfig::default()
            }
        },
        Err(_) => ChatConfig::default(),
    }
}
