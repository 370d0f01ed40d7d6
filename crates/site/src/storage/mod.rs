//! Browser-local key-value storage.
//!
//! Every visitor gets one opaque key-value area scoped to their session
//! cookie. Nothing in it is shared between browsers or synchronised, and
//! nothing expires except the session itself.
//!
//! Values are JSON strings wrapped in versioned records. A record that cannot
//! be read back (malformed JSON, unknown version, invalid field) is reported
//! as a [`StorageParseError`] and callers recover by treating it as absent.

pub mod favorites;
pub mod users;

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

use thiserror::Error;
use tower_sessions::Session;

pub use favorites::{FavoriteEntry, FavoritesStore, SaveOutcome};
pub use users::{RegisteredUser, RegistrationError, UserRegistry};

/// Record schema version written by this build.
pub const SCHEMA_VERSION: u32 = 1;

/// A persisted blob could not be decoded.
#[derive(Debug, Error)]
pub enum StorageParseError {
    /// Not valid JSON, or JSON of the wrong shape.
    #[error("malformed record: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Written by a schema this build does not understand.
    #[error("unsupported record version {found} (expected {SCHEMA_VERSION})")]
    UnsupportedVersion { found: u32 },

    /// Well-formed, but a field failed validation.
    #[error("invalid record: {0}")]
    Invalid(String),
}

/// Errors from the storage backend itself.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Session store failed to load or save.
    #[error("session store error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// Record could not be serialized.
    #[error("could not encode record: {0}")]
    Encode(serde_json::Error),

    /// Stored blob was unreadable.
    #[error(transparent)]
    Parse(#[from] StorageParseError),
}

/// An opaque string key-value area.
pub trait KeyValueStore: Send + Sync {
    /// Read the raw blob stored under `key`.
    fn get_raw(
        &self,
        key: &str,
    ) -> impl Future<Output = Result<Option<String>, StorageError>> + Send;

    /// Replace the raw blob stored under `key`.
    fn set_raw(
        &self,
        key: &str,
        value: String,
    ) -> impl Future<Output = Result<(), StorageError>> + Send;
}

/// Reject records written under a schema this build does not know.
pub(crate) const fn check_version(found: u32) -> Result<(), StorageParseError> {
    if found == SCHEMA_VERSION {
        Ok(())
    } else {
        Err(StorageParseError::UnsupportedVersion { found })
    }
}

// =============================================================================
// Session-backed storage
// =============================================================================

/// Storage area backed by the visitor's tower-sessions session.
#[derive(Clone)]
pub struct SessionStorage {
    session: Session,
}

impl SessionStorage {
    #[must_use]
    pub const fn new(session: Session) -> Self {
        Self { session }
    }
}

impl KeyValueStore for SessionStorage {
    async fn get_raw(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.session.get::<String>(key).await?)
    }

    async fn set_raw(&self, key: &str, value: String) -> Result<(), StorageError> {
        self.session.insert(key, value).await?;
        Ok(())
    }
}

// =============================================================================
// In-memory storage
// =============================================================================

/// Process-local storage area for tests.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStorage {
    async fn get_raw(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    async fn set_raw(&self, key: &str, value: String) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), value);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_storage_round_trip() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get_raw("k").await.unwrap(), None);

        storage.set_raw("k", "v1".to_string()).await.unwrap();
        storage.set_raw("k", "v2".to_string()).await.unwrap();
        assert_eq!(storage.get_raw("k").await.unwrap().as_deref(), Some("v2"));
    }

    #[tokio::test]
    async fn test_memory_storage_clones_share_area() {
        let storage = MemoryStorage::new();
        let other_tab = storage.clone();

        storage.set_raw("k", "v".to_string()).await.unwrap();
        assert_eq!(other_tab.get_raw("k").await.unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn test_check_version() {
        assert!(check_version(SCHEMA_VERSION).is_ok());
        assert!(matches!(
            check_version(7),
            Err(StorageParseError::UnsupportedVersion { found: 7 })
        ));
    }
}
