//! Domain types for TheMealDB recipes.
//!
//! These types provide a clean API separate from the raw `strMeal`-style
//! wire records.

use mealfinder_core::RecipeId;

// =============================================================================
// Recipe Types
// =============================================================================

/// Minimal recipe record returned by every endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeSummary {
    /// Upstream identifier (`idMeal`).
    pub id: RecipeId,
    /// Display name.
    pub name: String,
    /// Thumbnail image URL.
    pub thumbnail: String,
    /// Category, absent for ingredient-filter results.
    pub category: Option<String>,
}

/// Full recipe record from the lookup and random endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeDetail {
    pub id: RecipeId,
    pub name: String,
    pub thumbnail: String,
    pub category: Option<String>,
    /// Cuisine area, e.g. "Italian".
    pub area: Option<String>,
    pub tags: Vec<String>,
    pub instructions: String,
    /// External video link.
    pub youtube: Option<String>,
    /// Original recipe source link.
    pub source: Option<String>,
    /// Ingredient slots with blanks removed, in slot order.
    pub ingredients: Vec<Ingredient>,
}

impl RecipeDetail {
    /// Project this detail record down to a summary.
    #[must_use]
    pub fn summary(&self) -> RecipeSummary {
        RecipeSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            thumbnail: self.thumbnail.clone(),
            category: self.category.clone(),
        }
    }
}

impl From<RecipeDetail> for RecipeSummary {
    fn from(detail: RecipeDetail) -> Self {
        Self {
            id: detail.id,
            name: detail.name,
            thumbnail: detail.thumbnail,
            category: detail.category,
        }
    }
}

// =============================================================================
// Ingredient Types
// =============================================================================

/// One non-blank ingredient slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ingredient {
    pub name: String,
    pub measure: Option<String>,
}

impl Ingredient {
    /// Text shown in the ingredient list: `"<measure> <name>"`, or just the
    /// name when no measure was given.
    #[must_use]
    pub fn display(&self) -> String {
        match self.measure.as_deref() {
            Some(measure) => format!("{measure} {}", self.name),
            None => self.name.clone(),
        }
    }
}
