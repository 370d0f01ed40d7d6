//! TheMealDB API client.
//!
//! # Architecture
//!
//! - Plain JSON over HTTP GET, one request per call, no retries
//! - TheMealDB is the source of truth - no local sync, no response cache
//! - Responses are wrapped in a `{"meals": ...}` envelope where a missing or
//!   `null` list means "no matches", never an error
//!
//! # Endpoints
//!
//! | operation | path | query |
//! |-----------|------|-------|
//! | search by name | `search.php` | `s=<term>` |
//! | search by ingredient | `filter.php` | `i=<term>` |
//! | lookup by id | `lookup.php` | `i=<id>` |
//! | random | `random.php` | none |
//!
//! # Example
//!
//! ```rust,ignore
//! use mealfinder_site::mealdb::{MealDbClient, RecipeSource};
//!
//! let client = MealDbClient::new(&config.mealdb)?;
//!
//! let by_name = client.search_by_name("arrabiata").await?;
//! let detail = client.lookup_by_id(&by_name[0].id).await?;
//! ```

mod client;
mod conversions;
pub mod types;

pub use client::MealDbClient;
pub use types::*;

use std::future::Future;

use mealfinder_core::RecipeId;
use thiserror::Error;

/// Errors that can occur when talking to TheMealDB.
///
/// Every variant is a network-level failure from the caller's point of view:
/// an empty result is not an error and is reported as an empty `Vec` or
/// `None` instead.
#[derive(Debug, Error)]
pub enum MealDbError {
    /// Transport failed (DNS, connect, TLS, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream answered with a non-success status.
    #[error("Upstream returned HTTP {0}")]
    Status(u16),

    /// Response body was not a valid meals envelope.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Endpoint URL could not be built from the configured base URL.
    #[error("Invalid endpoint URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The random endpoint answered with no recipe at all.
    #[error("Random endpoint returned no recipe")]
    EmptyRandom,
}

/// A source of recipes.
///
/// Implemented by [`MealDbClient`] for production and by stubs in tests so
/// page controllers can be exercised without a network.
pub trait RecipeSource: Send + Sync {
    /// Search recipes whose name matches `query`.
    fn search_by_name(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Vec<RecipeSummary>, MealDbError>> + Send;

    /// Search recipes that use the ingredient `query`.
    ///
    /// Results never carry a category.
    fn search_by_ingredient(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Vec<RecipeSummary>, MealDbError>> + Send;

    /// Look up a single recipe; `Ok(None)` when the id is unknown.
    fn lookup_by_id(
        &self,
        id: &RecipeId,
    ) -> impl Future<Output = Result<Option<RecipeDetail>, MealDbError>> + Send;

    /// Fetch one random recipe.
    fn random(&self) -> impl Future<Output = Result<RecipeDetail, MealDbError>> + Send;
}
