//! tokenwatch - client-side session lifecycle monitoring.
//!
//! Given a bearer credential with self-describing expiry claims, this crate
//! decides and signals when the session is alive, warned, or dead: it decodes
//! the claims, tracks remaining validity, emits a single advance warning
//! inside the final minutes, and deterministically terminates the session
//! when the credential expires.
//!
//! This is a client-side advisory layer only. Credentials are never refreshed
//! or verified here; the server remains the authority on validity.
//!
//! ```no_run
//! use std::sync::Arc;
//! use tokenwatch::{CallbackRegistry, MemoryTokenStore, SessionMonitor};
//!
//! # async fn example() {
//! let store = Arc::new(MemoryTokenStore::new());
//! let monitor = SessionMonitor::new(store.clone());
//!
//! monitor.register_callbacks(
//!     CallbackRegistry::new()
//!         .on_warning(|minutes| eprintln!("Session expires in {} min", minutes))
//!         .on_expired(|| eprintln!("Session expired, logging out")),
//! );
//!
//! // After login persists a token:
//! monitor.start();
//!
//! // On logout:
//! monitor.stop();
//! # }
//! ```

pub mod claims;
pub mod config;
pub mod error;
pub mod monitor;
pub mod store;

pub use claims::Claims;
pub use config::MonitorConfig;
pub use error::StoreError;
pub use monitor::{CallbackRegistry, SessionMonitor};
pub use store::{FileTokenStore, KeyringTokenStore, MemoryTokenStore, TokenStore};
