//! SQLite settings storage.

use std::path::Path;

use async_sqlite::{Client, ClientBuilder};
use async_trait::async_trait;
use dashmap::DashMap;

use super::{SettingsBackend, SettingsError};

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS settings (
    key TEXT PRIMARY KEY,
    value BLOB NOT NULL
)";

/// Settings table in an SQLite file, fronted by a read-through cache.
pub struct SqliteBackend {
    client: Client,
    cache: DashMap<String, Vec<u8>>,
}

impl SqliteBackend {
    /// Open (creating if needed) the database at `path`.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let client = ClientBuilder::new().path(path).open().await?;
        Self::with_client(client).await
    }

    /// A private database that lives as long as the backend. Used when no
    /// data directory is available, and by tests.
    pub async fn in_memory() -> Result<Self, SettingsError> {
        let client = ClientBuilder::new().open().await?;
        Self::with_client(client).await
    }

    async fn with_client(client: Client) -> Result<Self, SettingsError> {
        client.conn(|conn| conn.execute(CREATE_TABLE, [])).await?;
        Ok(Self {
            client,
            cache: DashMap::new(),
        })
    }
}

#[async_trait]
impl SettingsBackend for SqliteBackend {
    async fn get_bytes(&self, key: &str) -> Result<Option<Vec<u8>>, SettingsError> {
        if let Some(value) = self.cache.get(key) {
            return Ok(Some(value.clone()));
        }

        let key_owned = key.to_string();
        let stored = self
            .client
            .conn(move |conn| {
                let mut stmt = conn.prepare("SELECT value FROM settings WHERE key = ?")?;
                let mut rows = stmt.query([&key_owned])?;
                match rows.next()? {
                    Some(row) => Ok(Some(row.get::<_, Vec<u8>>(0)?)),
                    None => Ok(None),
                }
            })
            .await?;

        if let Some(value) = &stored {
            self.cache.insert(key.to_string(), value.clone());
        }
        Ok(stored)
    }

    async fn set_bytes(&self, key: &str, value: Vec<u8>) -> Result<(), SettingsError> {
        let key_owned = key.to_string();
        let row_value = value.clone();
        self.client
            .conn(move |conn| {
                conn.execute(
                    "INSERT INTO settings (key, value) VALUES (?, ?)
                     ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                    rusqlite::params![&key_owned, &row_value],
                )
            })
            .await?;

        self.cache.insert(key.to_string(), value);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), SettingsError> {
        let key_owned = key.to_string();
        self.client
            .conn(move |conn| conn.execute("DELETE FROM settings WHERE key = ?", [&key_owned]))
            .await?;

        self.cache.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_get_delete() {
        let backend = SqliteBackend::in_memory().await.unwrap();
        assert_eq!(backend.get_bytes("k").await.unwrap(), None);

        backend.set_bytes("k", vec![1, 2]).await.unwrap();
        backend.set_bytes("k", vec![3]).await.unwrap();
        assert_eq!(backend.get_bytes("k").await.unwrap(), Some(vec![3]));

        // Bypass the cache to see what reached the table.
        backend.cache.clear();
        assert_eq!(backend.get_bytes("k").await.unwrap(), Some(vec![3]));

        backend.delete("k").await.unwrap();
        assert_eq!(backend.get_bytes("k").await.unwrap(), None);
    }
}
