//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::SiteConfig;
use crate::controllers::SearchSequencer;
use crate::mealdb::{MealDbClient, MealDbError};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. Visitor data (favorites,
/// registrations) lives in the session, not here.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: SiteConfig,
    recipes: MealDbClient,
    sequencer: SearchSequencer,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the TheMealDB client cannot be built from the
    /// configuration.
    pub fn new(config: SiteConfig) -> Result<Self, MealDbError> {
        let recipes = MealDbClient::new(&config.mealdb)?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                recipes,
                sequencer: SearchSequencer::default(),
            }),
        })
    }

    /// Get a reference to the site configuration.
    #[must_use]
    pub fn config(&self) -> &SiteConfig {
        &self.inner.config
    }

    /// Get a reference to the TheMealDB client.
    #[must_use]
    pub fn recipes(&self) -> &MealDbClient {
        &self.inner.recipes
    }

    /// Get a reference to the search stale-response guard.
    #[must_use]
    pub fn sequencer(&self) -> &SearchSequencer {
        &self.inner.sequencer
    }
}
