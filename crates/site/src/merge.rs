//! Search result merging.

use std::collections::HashSet;

use mealfinder_core::RecipeId;

use crate::mealdb::RecipeSummary;

/// Merge name-search and ingredient-search results for the same query.
///
/// By-name results come first in their original order, followed by
/// by-ingredient results whose id has not been seen yet, in their original
/// order. Identity is the recipe id only; a later record with a known id is
/// dropped even if its content differs.
#[must_use]
pub fn merge_results(
    by_name: Vec<RecipeSummary>,
    by_ingredient: Vec<RecipeSummary>,
) -> Vec<RecipeSummary> {
    let mut seen: HashSet<RecipeId> = HashSet::with_capacity(by_name.len() + by_ingredient.len());
    let mut merged = Vec::with_capacity(by_name.len() + by_ingredient.len());

    for recipe in by_name.into_iter().chain(by_ingredient) {
        if seen.insert(recipe.id.clone()) {
            merged.push(recipe);
        }
    }

    merged
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn recipe(id: &str, category: Option<&str>) -> RecipeSummary {
        RecipeSummary {
            id: RecipeId::parse(id).unwrap(),
            name: format!("Recipe {id}"),
            thumbnail: format!("https://img/{id}.jpg"),
            category: category.map(String::from),
        }
    }

    fn ids(recipes: &[RecipeSummary]) -> Vec<&str> {
        recipes.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_overlapping_results_are_deduplicated() {
        let merged = merge_results(
            vec![recipe("1", Some("Beef")), recipe("2", Some("Beef"))],
            vec![recipe("2", None), recipe("3", None)],
        );
        assert_eq!(ids(&merged), ["1", "2", "3"]);
    }

    #[test]
    fn test_by_name_copy_wins() {
        let merged = merge_results(vec![recipe("2", Some("Beef"))], vec![recipe("2", None)]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged.first().unwrap().category.as_deref(), Some("Beef"));
    }

    #[test]
    fn test_both_empty() {
        assert!(merge_results(Vec::new(), Vec::new()).is_empty());
    }

    #[test]
    fn test_one_side_empty_keeps_order() {
        let merged = merge_results(Vec::new(), vec![recipe("9", None), recipe("4", None)]);
        assert_eq!(ids(&merged), ["9", "4"]);

        let merged = merge_results(vec![recipe("9", None), recipe("4", None)], Vec::new());
        assert_eq!(ids(&merged), ["9", "4"]);
    }

    #[test]
    fn test_repeated_ids_within_one_side_collapse() {
        let merged = merge_results(
            vec![recipe("1", None), recipe("1", None)],
            vec![recipe("5", None), recipe("5", None)],
        );
        assert_eq!(ids(&merged), ["1", "5"]);
    }
}
