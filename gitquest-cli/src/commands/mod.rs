pub mod lang;
pub mod levels;
pub mod play;
pub mod reset;
pub mod status;

use anyhow::{Context, Result};
use std::path::PathBuf;

use gitquest_core::i18n::Locale;
use gitquest_core::{Catalog, GameState, Storage};

pub fn get_db_path(custom_path: Option<PathBuf>) -> PathBuf {
    custom_path.unwrap_or_else(|| {
        std::env::current_dir()
            .unwrap()
            .join(".gitquest")
            .join("gitquest.db")
    })
}

/// One loaded game session: storage handle, translation catalog, active
/// locale, and the game state. Level screens mutate `state` and call
/// [`save`](Session::save) after every store action.
pub struct Session {
    pub storage: Storage,
    pub catalog: Catalog,
    pub locale: Locale,
    pub state: GameState,
}

impl Session {
    pub fn load(db: Option<PathBuf>) -> Result<Self> {
        let db_path = get_db_path(db);
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let storage = Storage::new(&db_path)
            .with_context(|| format!("Failed to open database at {:?}", db_path))?;
        let catalog = Catalog::load()?;
        let locale = storage.load_locale()?;
        let state = storage.load_game()?;

        Ok(Self {
            storage,
            catalog,
            locale,
            state,
        })
    }

    pub fn save(&self) -> Result<()> {
        self.storage
            .save_game(&self.state)
            .context("Failed to save game progress")
    }

    pub fn t(&self, key: &str) -> String {
        self.catalog.message(key, self.locale).to_string()
    }

    pub fn tf(&self, key: &str, params: &[(&str, &str)]) -> String {
        self.catalog.format(key, self.locale, params)
    }

    /// Resolve a copy key and post it as an avatar message.
    pub fn say(&mut self, key: &str) {
        let text = self.t(key);
        self.state.add_avatar_message(text, Some(key));
    }

    pub fn say_with(&mut self, key: &str, params: &[(&str, &str)]) {
        let text = self.tf(key, params);
        self.state.add_avatar_message(text, Some(key));
    }
}
