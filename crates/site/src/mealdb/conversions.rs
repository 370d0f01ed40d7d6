//! Wire record parsing and conversion into domain types.

use std::collections::HashMap;

use mealfinder_core::RecipeId;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::types::{Ingredient, RecipeDetail, RecipeSummary};

/// Number of numbered ingredient/measure slots on a meal record.
pub const INGREDIENT_SLOTS: usize = 20;

/// The `{"meals": ...}` envelope wrapping every response.
#[derive(Debug, Deserialize)]
pub struct MealsEnvelope {
    #[serde(default, deserialize_with = "meals_or_empty")]
    pub meals: Vec<RawMeal>,
}

/// A meal as sent by TheMealDB.
///
/// Only the fixed fields are named; the numbered `strIngredientN` and
/// `strMeasureN` slots land in `slots`.
#[derive(Debug, Deserialize)]
pub struct RawMeal {
    #[serde(rename = "idMeal")]
    pub id: RecipeId,
    #[serde(rename = "strMeal", default)]
    pub name: Option<String>,
    #[serde(rename = "strMealThumb", default)]
    pub thumbnail: Option<String>,
    #[serde(rename = "strCategory", default)]
    pub category: Option<String>,
    #[serde(rename = "strArea", default)]
    pub area: Option<String>,
    #[serde(rename = "strTags", default)]
    pub tags: Option<String>,
    #[serde(rename = "strInstructions", default)]
    pub instructions: Option<String>,
    #[serde(rename = "strYoutube", default)]
    pub youtube: Option<String>,
    #[serde(rename = "strSource", default)]
    pub source: Option<String>,
    #[serde(flatten)]
    pub slots: HashMap<String, Value>,
}

/// `meals` is `null`, absent, a list, or (on some misses) the literal string
/// `"no data found"`. Everything that is not a list means no matches.
fn meals_or_empty<'de, D>(deserializer: D) -> Result<Vec<RawMeal>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => items
            .into_iter()
            .map(|item| RawMeal::deserialize(item).map_err(serde::de::Error::custom))
            .collect(),
        _ => Ok(Vec::new()),
    }
}

/// Trimmed, non-empty text or `None`.
fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn slot_text<'a>(slots: &'a HashMap<String, Value>, key: &str) -> Option<&'a str> {
    slots
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Collect the numbered ingredient slots, skipping blank ingredients and
/// keeping slot order.
pub fn compact_ingredients(slots: &HashMap<String, Value>) -> Vec<Ingredient> {
    (1..=INGREDIENT_SLOTS)
        .filter_map(|n| {
            let name = slot_text(slots, &format!("strIngredient{n}"))?;
            let measure = slot_text(slots, &format!("strMeasure{n}"));
            Some(Ingredient {
                name: name.to_string(),
                measure: measure.map(String::from),
            })
        })
        .collect()
}

fn split_tags(tags: Option<String>) -> Vec<String> {
    tags.unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}

pub fn convert_summary(raw: RawMeal) -> RecipeSummary {
    RecipeSummary {
        id: raw.id,
        name: raw.name.unwrap_or_default(),
        thumbnail: raw.thumbnail.unwrap_or_default(),
        category: non_blank(raw.category),
    }
}

/// Ingredient-filter results never carry a category, whatever the payload says.
pub fn convert_ingredient_match(raw: RawMeal) -> RecipeSummary {
    RecipeSummary {
        category: None,
        ..convert_summary(raw)
    }
}

pub fn convert_detail(raw: RawMeal) -> RecipeDetail {
    let ingredients = compact_ingredients(&raw.slots);

    RecipeDetail {
        id: raw.id,
        name: raw.name.unwrap_or_default(),
        thumbnail: raw.thumbnail.unwrap_or_default(),
        category: non_blank(raw.category),
        area: non_blank(raw.area),
        tags: split_tags(raw.tags),
        instructions: raw.instructions.unwrap_or_default(),
        youtube: non_blank(raw.youtube),
        source: non_blank(raw.source),
        ingredients,
    }
}
