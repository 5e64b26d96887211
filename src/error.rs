use thiserror::Error;

/// Errors surfaced by credential store write paths.
///
/// Read paths (`TokenStore::get`) never return these; backend read failures
/// degrade to an absent credential so a broken store is treated like a
/// logged-out session.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Keychain error: {0}")]
    Keyring(#[from] keyring::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
