//! Credential store collaborators.
//!
//! This module provides:
//! - `TokenStore`: the contract the session monitor reads credentials through
//! - `MemoryTokenStore`: in-process storage for embedders and tests
//! - `KeyringTokenStore`: secure OS-level storage via keyring
//! - `FileTokenStore`: JSON session file in a caller-supplied directory
//!
//! The monitor only ever calls `get()`; writing and removing credentials is
//! the auth owner's job on login and logout.

pub mod credentials;
pub mod file;
pub mod memory;

pub use credentials::KeyringTokenStore;
pub use file::FileTokenStore;
pub use memory::MemoryTokenStore;

use crate::error::StoreError;

/// Key-value persistence of the bearer credential.
pub trait TokenStore: Send + Sync {
    /// The stored credential, or `None` if absent.
    ///
    /// Backend read failures also yield `None`: a credential that cannot be
    /// read must never be treated as a live session.
    fn get(&self) -> Option<String>;

    /// Store a credential, replacing any existing one.
    fn set(&self, token: &str) -> Result<(), StoreError>;

    /// Remove the stored credential. Removing an absent credential is a no-op.
    fn remove(&self) -> Result<(), StoreError>;
}
