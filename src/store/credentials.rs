use keyring::Entry;
use tracing::warn;

use super::TokenStore;
use crate::error::StoreError;

/// Keychain service name for stored session tokens
const SERVICE_NAME: &str = "tokenwatch";

/// OS-keychain-backed credential store.
///
/// Tokens survive process restarts and never touch the filesystem in plain
/// text. One entry per account under the `tokenwatch` service.
pub struct KeyringTokenStore {
    account: String,
}

impl KeyringTokenStore {
    pub fn new(account: impl Into<String>) -> Self {
        Self {
            account: account.into(),
        }
    }
}

impl TokenStore for KeyringTokenStore {
    fn get(&self) -> Option<String> {
        let entry = match Entry::new(SERVICE_NAME, &self.account) {
            Ok(entry) => entry,
            Err(e) => {
                warn!(error = %e, "Failed to open keyring entry");
                return None;
            }
        };

        match entry.get_password() {
            Ok(token) => Some(token),
            // No entry is the normal state after logout
            Err(keyring::Error::NoEntry) => None,
            Err(e) => {
                warn!(error = %e, "Failed to read token from keychain");
                None
            }
        }
    }

    fn set(&self, token: &str) -> Result<(), StoreError> {
        let entry = Entry::new(SERVICE_NAME, &self.account)?;
        entry.set_password(token)?;
        Ok(())
    }

    fn remove(&self) -> Result<(), StoreError> {
        let entry = Entry::new(SERVICE_NAME, &self.account)?;
        match entry.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
