use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::TokenStore;
use crate::error::StoreError;

/// Session file name in the store directory
const SESSION_FILE: &str = "session.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredToken {
    token: String,
    stored_at: DateTime<Utc>,
}

/// File-backed credential store.
///
/// Persists the token as pretty-printed JSON in `session.json` under a
/// caller-supplied directory. A missing or unparsable file reads as an absent
/// credential.
pub struct FileTokenStore {
    dir: PathBuf,
}

impl FileTokenStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn session_path(&self) -> PathBuf {
        self.dir.join(SESSION_FILE)
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self) -> Option<String> {
        let path = self.session_path();
        if !path.exists() {
            return None;
        }

        let contents = match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) => {
                warn!(error = %e, "Failed to read session file");
                return None;
            }
        };

        match serde_json::from_str::<StoredToken>(&contents) {
            Ok(stored) => Some(stored.token),
            Err(e) => {
                warn!(error = %e, "Failed to parse session file");
                None
            }
        }
    }

    fn set(&self, token: &str) -> Result<(), StoreError> {
        let stored = StoredToken {
            token: token.to_string(),
            stored_at: Utc::now(),
        };

        let path = self.session_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(&stored)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    fn remove(&self) -> Result<(), StoreError> {
        let path = self.session_path();
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().to_path_buf());

        assert!(store.get().is_none());

        store.set("abc.def.ghi").unwrap();
        assert_eq!(store.get().as_deref(), Some("abc.def.ghi"));

        store.remove().unwrap();
        assert!(store.get().is_none());
    }

    #[test]
    fn test_get_with_corrupt_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().to_path_buf());

        std::fs::write(dir.path().join(SESSION_FILE), "not json").unwrap();
        assert!(store.get().is_none());
    }

    #[test]
    fn test_set_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("nested"));

        store.set("tok").unwrap();
        assert_eq!(store.get().as_deref(), Some("tok"));
    }

    #[test]
    fn test_remove_when_absent_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().to_path_buf());
        assert!(store.remove().is_ok());
    }
}
