//! TheMealDB HTTP client implementation.
//!
//! Uses `reqwest` 0.13 for HTTP. Every operation issues exactly one GET and
//! never retries.

use std::sync::Arc;
use std::time::Duration;

use mealfinder_core::RecipeId;
use tracing::{debug, instrument};
use url::Url;

use crate::config::MealDbConfig;

use super::conversions::{
    MealsEnvelope, RawMeal, convert_detail, convert_ingredient_match, convert_summary,
};
use super::types::{RecipeDetail, RecipeSummary};
use super::{MealDbError, RecipeSource};

/// Maximum number of body characters copied into error logs.
const LOGGED_BODY_CHARS: usize = 500;

const SEARCH_PATH: &str = "search.php";
const FILTER_PATH: &str = "filter.php";
const LOOKUP_PATH: &str = "lookup.php";
const RANDOM_PATH: &str = "random.php";

// =============================================================================
// MealDbClient
// =============================================================================

/// Client for TheMealDB JSON API.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone)]
pub struct MealDbClient {
    inner: Arc<MealDbClientInner>,
}

struct MealDbClientInner {
    client: reqwest::Client,
    /// Base URL without trailing slash, e.g. `https://www.themealdb.com/api/json/v1/1`.
    base_url: String,
}

impl MealDbClient {
    /// Create a new client.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured base URL is not a valid URL or the
    /// HTTP client cannot be built.
    pub fn new(config: &MealDbConfig) -> Result<Self, MealDbError> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        // Validate once up front so a typo fails at startup, not per request
        Url::parse(&base_url)?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("mealfinder/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            inner: Arc::new(MealDbClientInner { client, base_url }),
        })
    }

    /// Build the URL for `path` with URL-encoded query parameters.
    fn endpoint(&self, path: &str, params: &[(&str, &str)]) -> Result<Url, MealDbError> {
        let raw = format!("{}/{path}", self.inner.base_url);
        if params.is_empty() {
            return Ok(Url::parse(&raw)?);
        }
        Ok(Url::parse_with_params(&raw, params)?)
    }

    /// Issue one GET and parse the meals envelope.
    async fn fetch(&self, path: &str, params: &[(&str, &str)]) -> Result<Vec<RawMeal>, MealDbError> {
        let url = self.endpoint(path, params)?;

        let response = self.inner.client.get(url).send().await?;
        let status = response.status();

        // Get response body as text first for better error diagnostics
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %body.chars().take(LOGGED_BODY_CHARS).collect::<String>(),
                "TheMealDB returned non-success status"
            );
            return Err(MealDbError::Status(status.as_u16()));
        }

        let envelope: MealsEnvelope = serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %body.chars().take(LOGGED_BODY_CHARS).collect::<String>(),
                "Failed to parse TheMealDB response"
            );
            MealDbError::Parse(e)
        })?;

        debug!(count = envelope.meals.len(), "TheMealDB response parsed");
        Ok(envelope.meals)
    }
}

impl RecipeSource for MealDbClient {
    #[instrument(skip(self))]
    async fn search_by_name(&self, query: &str) -> Result<Vec<RecipeSummary>, MealDbError> {
        let meals = self.fetch(SEARCH_PATH, &[("s", query)]).await?;
        Ok(meals.into_iter().map(convert_summary).collect())
    }

    #[instrument(skip(self))]
    async fn search_by_ingredient(&self, query: &str) -> Result<Vec<RecipeSummary>, MealDbError> {
        let meals = self.fetch(FILTER_PATH, &[("i", query)]).await?;
        Ok(meals.into_iter().map(convert_ingredient_match).collect())
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn lookup_by_id(&self, id: &RecipeId) -> Result<Option<RecipeDetail>, MealDbError> {
        let meals = self.fetch(LOOKUP_PATH, &[("i", id.as_str())]).await?;
        Ok(meals.into_iter().next().map(convert_detail))
    }

    #[instrument(skip(self))]
    async fn random(&self) -> Result<RecipeDetail, MealDbError> {
        let meals = self.fetch(RANDOM_PATH, &[]).await?;
        meals
            .into_iter()
            .next()
            .map(convert_detail)
            .ok_or(MealDbError::EmptyRandom)
    }
}
