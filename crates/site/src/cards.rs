//! Recipe cards.
//!
//! A card is the display unit shared by every recipe grid: thumbnail, title,
//! optional category line, a link to the detail page and a save button. The
//! save button posts to `/favorites` and replaces its own label with the
//! [`SaveFeedback`] text it gets back.

use crate::mealdb::{RecipeDetail, RecipeSummary};
use crate::storage::{FavoriteEntry, SaveOutcome};

/// Path of the detail page.
pub const DETAIL_PATH: &str = "/recipe";

/// Path the save button posts to.
pub const SAVE_PATH: &str = "/favorites";

/// Card display data for templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeCard {
    pub id: String,
    pub title: String,
    pub image: String,
    pub category: Option<String>,
    pub detail_href: String,
}

/// Detail page link for a recipe id.
#[must_use]
pub fn detail_href(id: &str) -> String {
    format!("{DETAIL_PATH}?id={}", urlencoding::encode(id))
}

impl From<&RecipeSummary> for RecipeCard {
    fn from(recipe: &RecipeSummary) -> Self {
        Self {
            id: recipe.id.to_string(),
            title: recipe.name.clone(),
            image: recipe.thumbnail.clone(),
            category: recipe.category.clone(),
            detail_href: detail_href(recipe.id.as_str()),
        }
    }
}

impl From<&RecipeDetail> for RecipeCard {
    fn from(recipe: &RecipeDetail) -> Self {
        Self::from(&recipe.summary())
    }
}

impl From<&FavoriteEntry> for RecipeCard {
    fn from(entry: &FavoriteEntry) -> Self {
        Self {
            id: entry.id.to_string(),
            title: entry.title.clone(),
            image: entry.image.clone(),
            category: None,
            detail_href: detail_href(entry.id.as_str()),
        }
    }
}

/// Label the save button shows after a click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveFeedback {
    Saved,
    AlreadySaved,
    /// Storage could not be written; the click can be retried.
    Failed,
}

impl SaveFeedback {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Saved => "Saved",
            Self::AlreadySaved => "Already saved",
            Self::Failed => "Couldn't save",
        }
    }
}

impl From<SaveOutcome> for SaveFeedback {
    fn from(outcome: SaveOutcome) -> Self {
        match outcome {
            SaveOutcome::Added => Self::Saved,
            SaveOutcome::AlreadyPresent => Self::AlreadySaved,
        }
    }
}
