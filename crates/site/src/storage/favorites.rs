//! Favorites store.
//!
//! An append-only list of saved recipe summaries, keyed by recipe id and kept
//! in the visitor's storage area under [`FAVORITES_KEY`]. Entries are never
//! updated or removed.
//!
//! Saves are read-modify-write and not atomic: two browser tabs saving at the
//! same time can each overwrite the other's append (last writer wins).

use std::collections::HashSet;

use mealfinder_core::RecipeId;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::{KeyValueStore, SCHEMA_VERSION, StorageError, StorageParseError, check_version};

/// Storage key for the favorites record.
pub const FAVORITES_KEY: &str = "mealfinder.favorites";

/// A saved recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteEntry {
    pub id: RecipeId,
    pub title: String,
    pub image: String,
}

/// Result of a save.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Entry was appended.
    Added,
    /// An entry with the same id was already stored; nothing changed.
    AlreadyPresent,
}

/// Versioned on-disk shape: `{"version": 1, "entries": [...]}`.
#[derive(Debug, Serialize, Deserialize)]
struct FavoritesRecord {
    version: u32,
    entries: Vec<FavoriteEntry>,
}

impl FavoritesRecord {
    fn decode(raw: &str) -> Result<Vec<FavoriteEntry>, StorageParseError> {
        let record: Self = serde_json::from_str(raw)?;
        check_version(record.version)?;

        // A record holding the same id twice was not written by this store
        let mut seen = HashSet::new();
        for entry in &record.entries {
            if !seen.insert(&entry.id) {
                return Err(StorageParseError::Invalid(format!(
                    "duplicate favorite id {}",
                    entry.id
                )));
            }
        }

        Ok(record.entries)
    }

    fn encode(entries: Vec<FavoriteEntry>) -> Result<String, StorageError> {
        serde_json::to_string(&Self {
            version: SCHEMA_VERSION,
            entries,
        })
        .map_err(StorageError::Encode)
    }
}

/// Favorites kept in one visitor's storage area.
pub struct FavoritesStore<S> {
    storage: S,
}

impl<S: KeyValueStore> FavoritesStore<S> {
    #[must_use]
    pub const fn new(storage: S) -> Self {
        Self { storage }
    }

    async fn try_load(&self) -> Result<Vec<FavoriteEntry>, StorageError> {
        match self.storage.get_raw(FAVORITES_KEY).await? {
            Some(raw) => Ok(FavoritesRecord::decode(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    /// All saved entries in save order.
    ///
    /// Unreadable storage counts as empty; the failure is logged, never
    /// returned.
    pub async fn list(&self) -> Vec<FavoriteEntry> {
        self.try_load().await.unwrap_or_else(|e| {
            tracing::warn!(error = %e, key = FAVORITES_KEY, "Treating unreadable favorites as empty");
            Vec::new()
        })
    }

    /// Append `entry` unless its id is already saved.
    ///
    /// Saving the same id twice leaves exactly one entry. If the existing
    /// blob is unreadable it is replaced by a fresh record holding only
    /// `entry`.
    ///
    /// # Errors
    ///
    /// Returns an error if the updated record cannot be written back.
    #[instrument(skip(self, entry), fields(id = %entry.id))]
    pub async fn save(&self, entry: FavoriteEntry) -> Result<SaveOutcome, StorageError> {
        let mut entries = self.list().await;

        if entries.iter().any(|e| e.id == entry.id) {
            return Ok(SaveOutcome::AlreadyPresent);
        }

        entries.push(entry);
        let raw = FavoritesRecord::encode(entries)?;
        self.storage.set_raw(FAVORITES_KEY, raw).await?;

        tracing::debug!("Favorite saved");
        Ok(SaveOutcome::Added)
    }
}
