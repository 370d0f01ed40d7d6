//! Locally registered accounts.
//!
//! One record per username, stored under `mealfinder.user.<username>` in the
//! visitor's storage area. Passwords are hashed with Argon2id; the plaintext
//! never reaches storage. There is no login flow: a record only proves that
//! the name was registered from this browser.

use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
};
use chrono::{DateTime, Utc};
use mealfinder_core::{Username, UsernameError};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::instrument;

use super::{KeyValueStore, SCHEMA_VERSION, StorageError, StorageParseError, check_version};

/// Prefix of every user record key.
pub const USER_KEY_PREFIX: &str = "mealfinder.user.";

/// Storage key for `username`.
#[must_use]
pub fn user_key(username: &Username) -> String {
    format!("{USER_KEY_PREFIX}{username}")
}

/// Errors that can occur during registration.
#[derive(Debug, Error)]
pub enum RegistrationError {
    /// Username or password left blank.
    #[error("username and password are required")]
    MissingField,

    /// Username failed validation.
    #[error("invalid username: {0}")]
    InvalidUsername(#[from] UsernameError),

    /// A record already exists under this username.
    #[error("username already registered")]
    AlreadyRegistered,

    /// Password hashing failed.
    #[error("password hashing error")]
    PasswordHash,

    /// Storage read or write failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

/// A registered account as persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisteredUser {
    pub username: Username,
    /// Argon2 PHC string.
    pub password_hash: String,
    pub registered_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
struct UserRecord {
    version: u32,
    #[serde(flatten)]
    user: RegisteredUser,
}

impl UserRecord {
    fn decode(raw: &str, expected: &Username) -> Result<RegisteredUser, StorageParseError> {
        let record: Self = serde_json::from_str(raw)?;
        check_version(record.version)?;

        if &record.user.username != expected {
            return Err(StorageParseError::Invalid(format!(
                "record for '{}' stored under key for '{expected}'",
                record.user.username
            )));
        }

        Ok(record.user)
    }

    fn encode(user: &RegisteredUser) -> Result<String, StorageError> {
        serde_json::to_string(&Self {
            version: SCHEMA_VERSION,
            user: user.clone(),
        })
        .map_err(StorageError::Encode)
    }
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<String, RegistrationError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| RegistrationError::PasswordHash)
}

/// Registered accounts kept in one visitor's storage area.
pub struct UserRegistry<S> {
    storage: S,
}

impl<S: KeyValueStore> UserRegistry<S> {
    #[must_use]
    pub const fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Look up a registered account.
    ///
    /// An unreadable record counts as absent.
    pub async fn find(&self, username: &Username) -> Option<RegisteredUser> {
        let raw = match self.storage.get_raw(&user_key(username)).await {
            Ok(raw) => raw?,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read user record");
                return None;
            }
        };

        UserRecord::decode(&raw, username)
            .inspect_err(|e| {
                tracing::warn!(error = %e, username = %username, "Treating unreadable user record as absent");
            })
            .ok()
    }

    /// Register a new account.
    ///
    /// # Errors
    ///
    /// Returns `RegistrationError::MissingField` if either field is blank.
    /// Returns `RegistrationError::InvalidUsername` if the username is invalid.
    /// Returns `RegistrationError::AlreadyRegistered` if the name is taken.
    #[instrument(skip(self, password))]
    pub async fn register(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<RegisteredUser, RegistrationError> {
        let password = password.expose_secret();
        if username.trim().is_empty() || password.is_empty() {
            return Err(RegistrationError::MissingField);
        }

        let username = Username::parse(username)?;

        if self.find(&username).await.is_some() {
            return Err(RegistrationError::AlreadyRegistered);
        }

        let user = RegisteredUser {
            password_hash: hash_password(password)?,
            username,
            registered_at: Utc::now(),
        };

        self.storage
            .set_raw(&user_key(&user.username), UserRecord::encode(&user)?)
            .await?;

        tracing::info!(username = %user.username, "User registered");
        Ok(user)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use argon2::{PasswordHash, PasswordVerifier};

    use super::*;
    use crate::storage::MemoryStorage;

    fn secret(s: &str) -> SecretString {
        SecretString::from(s.to_string())
    }

    #[tokio::test]
    async fn test_register_stores_hash_not_plaintext() {
        let storage = MemoryStorage::new();
        let registry = UserRegistry::new(storage.clone());

        let user = registry
            .register("anna", &secret("hunter2-but-longer"))
            .await
            .unwrap();

        let raw = storage
            .get_raw(&user_key(&user.username))
            .await
            .unwrap()
            .unwrap();
        assert!(!raw.contains("hunter2-but-longer"));
        assert!(raw.contains("\"version\":1"));

        let parsed = PasswordHash::new(&user.password_hash).unwrap();
        assert!(
            Argon2::default()
                .verify_password(b"hunter2-but-longer", &parsed)
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_register_then_find() {
        let registry = UserRegistry::new(MemoryStorage::new());
        let user = registry.register("anna", &secret("pw")).await.unwrap();

        let found = registry
            .find(&Username::parse("anna").unwrap())
            .await
            .unwrap();
        assert_eq!(found, user);
    }

    #[tokio::test]
    async fn test_blank_fields_rejected() {
        let registry = UserRegistry::new(MemoryStorage::new());

        assert!(matches!(
            registry.register("", &secret("pw")).await,
            Err(RegistrationError::MissingField)
        ));
        assert!(matches!(
            registry.register("   ", &secret("pw")).await,
            Err(RegistrationError::MissingField)
        ));
        assert!(matches!(
            registry.register("anna", &secret("")).await,
            Err(RegistrationError::MissingField)
        ));
    }

    #[tokio::test]
    async fn test_invalid_username_rejected() {
        let registry = UserRegistry::new(MemoryStorage::new());
        assert!(matches!(
            registry.register(" anna", &secret("pw")).await,
            Err(RegistrationError::InvalidUsername(
                UsernameError::SurroundingWhitespace
            ))
        ));
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected() {
        let registry = UserRegistry::new(MemoryStorage::new());
        registry.register("anna", &secret("first")).await.unwrap();

        assert!(matches!(
            registry.register("anna", &secret("second")).await,
            Err(RegistrationError::AlreadyRegistered)
        ));
    }

    #[tokio::test]
    async fn test_corrupt_record_is_absent_and_can_be_replaced() {
        let storage = MemoryStorage::new();
        let anna = Username::parse("anna").unwrap();
        storage
            .set_raw(&user_key(&anna), "{\"username\":".to_string())
            .await
            .unwrap();
        let registry = UserRegistry::new(storage);

        assert!(registry.find(&anna).await.is_none());
        assert!(registry.register("anna", &secret("pw")).await.is_ok());
    }

    #[tokio::test]
    async fn test_record_under_wrong_key_is_absent() {
        let storage = MemoryStorage::new();
        let registry = UserRegistry::new(storage.clone());
        let anna = registry.register("anna", &secret("pw")).await.unwrap();

        let raw = storage
            .get_raw(&user_key(&anna.username))
            .await
            .unwrap()
            .unwrap();
        let bob = Username::parse("bob").unwrap();
        storage.set_raw(&user_key(&bob), raw).await.unwrap();

        assert!(registry.find(&bob).await.is_none());
    }
}
