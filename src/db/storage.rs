use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};

use super::connection::{ensure_schema, open_in_memory};

/// Key holding the JSON-encoded catalog.
pub const SONGS_KEY: &str = "musicLibrarySongs";
/// Key holding the signed session token.
pub const TOKEN_KEY: &str = "musicLibraryToken";

/// String key/value store backed by SQLite. Every write is committed before
/// the call returns, so a mutation is durable by the time the UI redraws.
pub struct Storage {
    conn: Connection,
}

impl Storage {
    pub fn open(db_path: &Path) -> Result<Self> {
        let conn = ensure_schema(db_path)?;
        tracing::debug!(path = %db_path.display(), "opened storage");
        Ok(Self { conn })
    }

    pub fn in_memory() -> Result<Self> {
        Ok(Self {
            conn: open_in_memory()?,
        })
    }

    /// Read the value stored under `key`, or `None` when nothing was saved.
    pub fn get_item(&self, key: &str) -> Result<Option<String>> {
        self.conn
            .query_row(
                "SELECT value FROM storage WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
            .with_context(|| format!("failed to read storage key {key}"))
    }

    /// Insert or overwrite the value under `key`.
    pub fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO storage (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                params![key, value],
            )
            .with_context(|| format!("failed to write storage key {key}"))?;
        Ok(())
    }

    /// Delete `key`. Removing a key that was never set is not an error.
    pub fn remove_item(&self, key: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM storage WHERE key = ?1", params![key])
            .with_context(|| format!("failed to remove storage key {key}"))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_reads_as_none() {
        let storage = Storage::in_memory().unwrap();
        assert_eq!(storage.get_item(SONGS_KEY).unwrap(), None);
    }

    #[test]
    fn set_item_overwrites_previous_value() {
        let storage = Storage::in_memory().unwrap();
        storage.set_item(TOKEN_KEY, "first").unwrap();
        storage.set_item(TOKEN_KEY, "second").unwrap();
        assert_eq!(
            storage.get_item(TOKEN_KEY).unwrap().as_deref(),
            Some("second")
        );
    }

    #[test]
    fn remove_item_is_idempotent() {
        let storage = Storage::in_memory().unwrap();
        storage.set_item(TOKEN_KEY, "token").unwrap();
        storage.remove_item(TOKEN_KEY).unwrap();
        storage.remove_item(TOKEN_KEY).unwrap();
        assert_eq!(storage.get_item(TOKEN_KEY).unwrap(), None);
    }

    #[test]
    fn values_survive_reopening_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("library.sqlite");
        {
            let storage = Storage::open(&path).unwrap();
            storage.set_item(SONGS_KEY, "[]").unwrap();
        }
        let storage = Storage::open(&path).unwrap();
        assert_eq!(storage.get_item(SONGS_KEY).unwrap().as_deref(), Some("[]"));
    }
}
