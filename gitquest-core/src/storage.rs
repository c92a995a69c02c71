use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

use crate::error::Result;
use crate::game::GameState;
use crate::i18n::Locale;

const SCHEMA_VERSION: i32 = 1;

/// Well-known key for the partialized game state.
pub const PROGRESS_KEY: &str = "gitquest-progress";
/// Well-known key for the display language.
pub const LOCALE_KEY: &str = "gitquest-locale";

/// Key-value store for game progress and settings, JSON-serialized values
/// with last-write-wins semantics.
pub struct Storage {
    conn: Connection,
}

impl Storage {
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let conn = Connection::open(db_path)?;
        let mut storage = Self { conn };
        storage.initialize()?;
        Ok(storage)
    }

    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let mut storage = Self { conn };
        storage.initialize()?;
        Ok(storage)
    }

    fn initialize(&mut self) -> Result<()> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS schema_version (
                version INTEGER PRIMARY KEY
            );

            CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated TEXT NOT NULL
            );
            "#,
        )?;

        let version: Option<i32> = self
            .conn
            .query_row("SELECT version FROM schema_version", [], |row| row.get(0))
            .optional()?;

        if version.is_none() {
            self.conn.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![SCHEMA_VERSION],
            )?;
        }

        Ok(())
    }

    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string(value)?;
        self.conn.execute(
            "INSERT INTO kv (key, value, updated) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated = excluded.updated",
            params![key, json, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    /// Read a value back. Missing keys and values that no longer deserialize
    /// both come back as `None`; a stale save starts the game fresh instead
    /// of failing.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let raw: Option<String> = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()?;

        Ok(raw.and_then(|json| serde_json::from_str(&json).ok()))
    }

    pub fn remove(&self, key: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }

    pub fn save_game(&self, state: &GameState) -> Result<()> {
        self.set(PROGRESS_KEY, state)
    }

    pub fn load_game(&self) -> Result<GameState> {
        Ok(self.get(PROGRESS_KEY)?.unwrap_or_default())
    }

    pub fn save_locale(&self, locale: Locale) -> Result<()> {
        self.set(LOCALE_KEY, &locale)
    }

    pub fn load_locale(&self) -> Result<Locale> {
        Ok(self.get(LOCALE_KEY)?.unwrap_or_default())
    }
}
