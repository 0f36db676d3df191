use crate::{ClientError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

/// Key under which the session identity is persisted
pub const SESSION_KEY: &str = "userId";

/// Durable local state holding the opaque session identity.
///
/// Implementations must be synchronous so that the session store can rehydrate
/// before any consumer reads it.
pub trait SessionStorage: Send + Sync {
    /// Read the persisted identity, `None` when nothing is stored.
    fn load(&self) -> Result<Option<String>>;

    /// Persist the identity, replacing any previous value.
    fn save(&self, identity: &str) -> Result<()>;

    /// Remove the persisted identity. Removing a missing value is not an error.
    fn remove(&self) -> Result<()>;
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredSession {
    #[serde(rename = "userId", default, skip_serializing_if = "Option::is_none")]
    user_id: Option<String>,
}

/// File backed session storage in the XDG data directory.
///
/// The identity is stored as JSON in `~/.local/share/spotify-app/session.json`
/// unless a different path is given.
#[derive(Debug, Clone)]
pub struct FileSessionStorage {
    path: PathBuf,
}

impl FileSessionStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Storage at the default XDG location.
    pub fn default_location() -> Result<Self> {
        Ok(Self::new(Self::default_path()?))
    }

    /// Get the default session file path using XDG directories.
    ///
    /// Returns a path like: `~/.local/share/spotify-app/session.json`
    pub fn default_path() -> Result<PathBuf> {
        let data_dir = dirs::data_dir().ok_or_else(|| {
            ClientError::Storage("Cannot determine XDG data directory".to_string())
        })?;

        Ok(data_dir.join("spotify-app").join("session.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStorage for FileSessionStorage {
    fn load(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(&self.path)?;
        let stored: StoredSession = serde_json::from_str(&json)
            .map_err(|e| ClientError::Storage(format!("Failed to parse session file: {e}")))?;

        log::debug!("Session loaded from: {}", self.path.display());
        Ok(stored.user_id.filter(|id| !id.is_empty()))
    }

    fn save(&self, identity: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let stored = StoredSession {
            user_id: Some(identity.to_string()),
        };
        let json = serde_json::to_string(&stored)
            .map_err(|e| ClientError::Storage(format!("Failed to serialize session: {e}")))?;
        fs::write(&self.path, json)?;

        log::debug!("Session saved to: {}", self.path.display());
        Ok(())
    }

    fn remove(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
            log::debug!("Session removed from: {}", self.path.display());
        }
        Ok(())
    }
}

/// In-memory key/value storage, used for tests and for embedding without a disk.
#[derive(Debug, Default)]
pub struct MemorySessionStorage {
    values: Mutex<HashMap<String, String>>,
}

impl MemorySessionStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage that already holds an identity, as if written by a previous run.
    pub fn with_identity(identity: &str) -> Self {
        let storage = Self::new();
        storage.entries().insert(SESSION_KEY.to_string(), identity.to_string());
        storage
    }

    /// Raw read of the persisted key, bypassing the session store.
    pub fn get(&self) -> Option<String> {
        self.entries().get(SESSION_KEY).cloned()
    }

    fn entries(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.values.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SessionStorage for MemorySessionStorage {
    fn load(&self) -> Result<Option<String>> {
        Ok(self.get().filter(|id| !id.is_empty()))
    }

    fn save(&self, identity: &str) -> Result<()> {
        self.entries()
            .insert(SESSION_KEY.to_string(), identity.to_string());
        Ok(())
    }

    fn remove(&self) -> Result<()> {
        self.entries().remove(SESSION_KEY);
        Ok(())
    }
}
