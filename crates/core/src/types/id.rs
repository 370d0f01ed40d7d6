//! Recipe identifier type.
//!
//! TheMealDB hands out identifiers as strings (`"52772"`), but nothing in the
//! API promises they stay numeric, so [`RecipeId`] treats them as opaque text
//! and only compares them for equality.

use core::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Errors that can occur when parsing a [`RecipeId`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RecipeIdError {
    /// The input is empty or only whitespace.
    #[error("recipe id cannot be empty")]
    Empty,
    /// The input is too long to be a real identifier.
    #[error("recipe id must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
}

/// An opaque recipe identifier.
///
/// ## Constraints
///
/// - Non-empty after trimming surrounding whitespace
/// - At most 64 characters
///
/// ## Examples
///
/// ```
/// use mealfinder_core::RecipeId;
///
/// let id = RecipeId::parse(" 52772 ").unwrap();
/// assert_eq!(id.as_str(), "52772");
///
/// assert!(RecipeId::parse("").is_err());
/// assert!(RecipeId::parse("   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RecipeId(String);

impl RecipeId {
    /// Maximum length of an identifier.
    pub const MAX_LENGTH: usize = 64;

    /// Parse a `RecipeId` from a string, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns an error if the trimmed input is empty or longer than
    /// [`RecipeId::MAX_LENGTH`].
    pub fn parse(s: &str) -> Result<Self, RecipeIdError> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(RecipeIdError::Empty);
        }

        if trimmed.chars().count() > Self::MAX_LENGTH {
            return Err(RecipeIdError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `RecipeId` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for RecipeId {
    type Err = RecipeIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for RecipeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Accepts both `"52772"` and `52772` on the wire.
impl<'de> Deserialize<'de> for RecipeId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(u64),
        }

        let raw = match Raw::deserialize(deserializer)? {
            Raw::Text(s) => s,
            Raw::Number(n) => n.to_string(),
        };

        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
