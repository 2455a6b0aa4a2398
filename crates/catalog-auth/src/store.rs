//! Token persistence.

use crate::token::StoredToken;
use crate::AuthError;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// The single accessor for the persisted bearer token.
pub trait TokenStore: Send + Sync {
    /// Read the stored token.
    ///
    /// Returns `None` if nothing has been saved.
    fn load(&self) -> Result<Option<StoredToken>, AuthError>;

    /// Replace the stored token.
    fn save(&self, token: &StoredToken) -> Result<(), AuthError>;

    /// Remove the stored token. Clearing an empty store is not an error.
    fn clear(&self) -> Result<(), AuthError>;
}

/// Token store backed by a JSON file.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Store the token at `path`; parent directories are created on save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the token file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<StoredToken>, AuthError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(None);
        }

        let stored: StoredToken = serde_json::from_str(&content)?;
        Ok(Some(stored))
    }

    fn save(&self, token: &StoredToken) -> Result<(), AuthError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let content = serde_json::to_string_pretty(token)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), AuthError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory token store, for tests and one-shot sessions.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    slot: Mutex<Option<StoredToken>>,
}

impl MemoryTokenStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store already holding a token.
    pub fn with_token(token: StoredToken) -> Self {
        Self {
            slot: Mutex::new(Some(token)),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<StoredToken>, AuthError> {
        let slot = self
            .slot
            .lock()
            .map_err(|e| AuthError::Store(e.to_string()))?;
        Ok(slot.clone())
    }

    fn save(&self, token: &StoredToken) -> Result<(), AuthError> {
        let mut slot = self
            .slot
            .lock()
            .map_err(|e| AuthError::Store(e.to_string()))?;
        *slot = Some(token.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), AuthError> {
        let mut slot = self
            .slot
            .lock()
            .map_err(|e| AuthError::Store(e.to_string()))?;
        *slot = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BearerToken;
    use tempfile::TempDir;

    #[test]
    fn test_file_store_roundtrip() {
        let dir = TempDir::new().unwrap();
        let store = FileTokenStore::new(dir.path().join("nested").join("token.json"));

        assert!(store.load().unwrap().is_none());

        let stored = StoredToken::now(BearerToken::new("tok-1"));
        store.save(&stored).unwrap();
        assert!(store.path().exists());
        assert_eq!(store.load().unwrap(), Some(stored));

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
        store.clear().unwrap();
    }

    #[test]
    fn test_file_store_rejects_corrupt_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("token.json");
        std::fs::write(&path, "not json").unwrap();

        let store = FileTokenStore::new(&path);
        assert!(matches!(store.load(), Err(AuthError::Serialization(_))));
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryTokenStore::new();
        assert!(store.load().unwrap().is_none());

        store.save(&StoredToken::now(BearerToken::new("m"))).unwrap();
        assert_eq!(store.load().unwrap().unwrap().token.as_str(), "m");

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
    }
}
