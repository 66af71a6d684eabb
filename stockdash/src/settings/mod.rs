//! Typed, persistent settings.

mod backend;
mod sqlite;

pub use backend::SettingsBackend;
pub use sqlite::SqliteBackend;

use std::sync::Arc;

use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;

use crate::profile::Profile;

const LAST_EMAIL: &str = "auth.last_email";
const PROFILE: &str = "profile.defaults";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("database error: {0}")]
    Database(#[from] async_sqlite::Error),
    #[error("serialization error: {0}")]
    Serialization(bincode::Error),
    #[error("deserialization error: {0}")]
    Deserialization(bincode::Error),
}

/// Settings the application remembers between runs, stored as bincode
/// values behind a [`SettingsBackend`].
#[derive(Clone)]
pub struct Settings {
    backend: Arc<dyn SettingsBackend>,
}

impl Settings {
    pub fn new(backend: impl SettingsBackend + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, SettingsError> {
        match self.backend.get_bytes(key).await? {
            Some(bytes) => bincode::deserialize(&bytes)
                .map(Some)
                .map_err(SettingsError::Deserialization),
            None => Ok(None),
        }
    }

    async fn set<T: Serialize + Sync>(&self, key: &str, value: &T) -> Result<(), SettingsError> {
        let bytes = bincode::serialize(value).map_err(SettingsError::Serialization)?;
        self.backend.set_bytes(key, bytes).await
    }

    /// Email of the last successful sign-in, used to prefill the form.
    pub async fn last_email(&self) -> Result<Option<String>, SettingsError> {
        self.get(LAST_EMAIL).await
    }

    pub async fn set_last_email(&self, email: &str) -> Result<(), SettingsError> {
        self.set(LAST_EMAIL, &email.to_string()).await
    }

    /// Investor profile defaults for the sign-up form.
    pub async fn profile(&self) -> Result<Profile, SettingsError> {
        Ok(self.get(PROFILE).await?.unwrap_or_default())
    }

    pub async fn set_profile(&self, profile: &Profile) -> Result<(), SettingsError> {
        self.set(PROFILE, profile).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn settings() -> Settings {
        Settings::new(SqliteBackend::in_memory().await.unwrap())
    }

    #[tokio::test]
    async fn test_last_email() {
        let settings = settings().await;
        assert_eq!(settings.last_email().await.unwrap(), None);

        settings.set_last_email("jane@example.com").await.unwrap();
        assert_eq!(
            settings.last_email().await.unwrap().as_deref(),
            Some("jane@example.com")
        );

        settings.set_last_email("joe@example.com").await.unwrap();
        assert_eq!(
            settings.last_email().await.unwrap().as_deref(),
            Some("joe@example.com")
        );
    }

    #[tokio::test]
    async fn test_profile_defaults_until_saved() {
        let settings = settings().await;
        assert_eq!(settings.profile().await.unwrap(), Profile::default());

        let profile = Profile {
            investment_goals: "Income".to_string(),
            ..Profile::default()
        };
        settings.set_profile(&profile).await.unwrap();
        assert_eq!(settings.profile().await.unwrap(), profile);
    }
}
