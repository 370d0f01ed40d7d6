//! Recipe detail controller.

use mealfinder_core::RecipeId;
use tracing::instrument;

use super::ViewState;
use crate::cards::RecipeCard;
use crate::mealdb::{RecipeDetail, RecipeSource};

pub const NO_SELECTION: &str = "No recipe selected";
pub const NOT_FOUND: &str = "Recipe not found.";
pub const LOAD_FAILED: &str = "Failed to load recipe.";

/// Placeholder for an unknown category.
pub const MISSING_CATEGORY: &str = "\u{2014}";

/// Everything the detail page renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeView {
    /// Card for the save button.
    pub card: RecipeCard,
    pub name: String,
    pub image: String,
    pub category: String,
    pub area: Option<String>,
    pub tags: Vec<String>,
    pub youtube: Option<String>,
    pub source: Option<String>,
    pub ingredients: Vec<String>,
    /// Instructions split into non-blank paragraphs.
    pub instructions: Vec<String>,
}

impl From<RecipeDetail> for RecipeView {
    fn from(recipe: RecipeDetail) -> Self {
        let card = RecipeCard::from(&recipe);
        let instructions = recipe
            .instructions
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect();

        Self {
            card,
            category: recipe
                .category
                .unwrap_or_else(|| MISSING_CATEGORY.to_string()),
            ingredients: recipe.ingredients.iter().map(|i| i.display()).collect(),
            name: recipe.name,
            image: recipe.thumbnail,
            area: recipe.area,
            tags: recipe.tags,
            youtube: recipe.youtube,
            source: recipe.source,
            instructions,
        }
    }
}

/// Load the recipe selected by the `id` query parameter.
///
/// - no id: `Idle`, no request
/// - unknown id: `Empty`
/// - request failed: `Error`
#[instrument(skip(source))]
pub async fn load_detail<S: RecipeSource>(source: &S, id: Option<&str>) -> ViewState<RecipeView> {
    let Some(raw) = id.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return ViewState::Idle;
    };

    // Ids that cannot exist upstream are not worth a round trip
    let Ok(id) = RecipeId::parse(raw) else {
        tracing::debug!("Rejected malformed recipe id");
        return ViewState::Empty;
    };

    match source.lookup_by_id(&id).await {
        Ok(Some(recipe)) => ViewState::Success {
            value: RecipeView::from(recipe),
            partial: false,
        },
        Ok(None) => {
            tracing::debug!(%id, "Recipe not found");
            ViewState::Empty
        }
        Err(e) => {
            tracing::warn!(error = %e, %id, "Recipe lookup failed");
            ViewState::Error
        }
    }
}
