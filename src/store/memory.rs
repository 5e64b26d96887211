use std::sync::Mutex;

use super::TokenStore;
use crate::error::StoreError;

/// In-process credential store.
///
/// The default choice for tests and for embedders that receive the token over
/// some other channel and only need the monitor's lifecycle tracking.
#[derive(Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Option<String> {
        self.token.lock().unwrap().clone()
    }

    fn set(&self, token: &str) -> Result<(), StoreError> {
        *self.token.lock().unwrap() = Some(token.to_string());
        Ok(())
    }

    fn remove(&self) -> Result<(), StoreError> {
        *self.token.lock().unwrap() = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove_round_trip() {
        let store = MemoryTokenStore::new();
        assert!(store.get().is_none());

        store.set("abc.def.ghi").unwrap();
        assert_eq!(store.get().as_deref(), Some("abc.def.ghi"));

        store.remove().unwrap();
        assert!(store.get().is_none());
    }

    #[test]
    fn test_set_replaces_existing() {
        let store = MemoryTokenStore::new();
        store.set("first").unwrap();
        store.set("second").unwrap();
        assert_eq!(store.get().as_deref(), Some("second"));
    }

    #[test]
    fn test_remove_when_empty_is_noop() {
        let store = MemoryTokenStore::new();
        assert!(store.remove().is_ok());
    }
}
