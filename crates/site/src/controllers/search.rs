//! Search controller.
//!
//! A query runs a name search and an ingredient search concurrently and shows
//! the merged, de-duplicated list. Each side settles on its own:
//!
//! | name | ingredient | merged | state |
//! |------|------------|--------|-------|
//! | ok | ok | empty | `Empty` |
//! | ok | ok | some | `Success` |
//! | ok / failed | failed / ok | some | `Success`, partial |
//! | ok / failed | failed / ok | empty | `Error` |
//! | failed | failed | - | `Error` |

use tracing::instrument;

use super::ViewState;
use crate::cards::RecipeCard;
use crate::mealdb::{MealDbError, RecipeSource, RecipeSummary};
use crate::merge::merge_results;

/// Shown before anything has been searched.
pub const PROMPT: &str = "Type ingredient or recipe name above to search.";

/// Shown when the results could not be loaded.
pub const LOAD_FAILED: &str = "Failed to load results.";

/// Outcome of one search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResults {
    /// Trimmed query; empty when nothing was searched.
    pub query: String,
    pub state: ViewState<Vec<RecipeCard>>,
    /// Result count line, e.g. `3 result(s) for "beef"`.
    pub summary: Option<String>,
}

impl SearchResults {
    fn new(query: &str, state: ViewState<Vec<RecipeCard>>) -> Self {
        let summary = match &state {
            ViewState::Success { value, .. } => {
                Some(format!("{} result(s) for \"{query}\"", value.len()))
            }
            ViewState::Empty => Some(format!("No results for \"{query}\"")),
            ViewState::Idle | ViewState::Error => None,
        };

        Self {
            query: query.to_string(),
            state,
            summary,
        }
    }

    /// Nothing searched yet.
    #[must_use]
    pub fn idle() -> Self {
        Self::new("", ViewState::Idle)
    }

    /// Message shown in place of results.
    #[must_use]
    pub const fn message(&self) -> Option<&'static str> {
        match self.state {
            ViewState::Idle => Some(PROMPT),
            ViewState::Error => Some(LOAD_FAILED),
            ViewState::Success { .. } | ViewState::Empty => None,
        }
    }
}

fn settle(
    result: Result<Vec<RecipeSummary>, MealDbError>,
    side: &'static str,
    failures: &mut usize,
) -> Vec<RecipeSummary> {
    result.unwrap_or_else(|e| {
        *failures += 1;
        tracing::warn!(error = %e, side, "Search request failed");
        Vec::new()
    })
}

/// Run a search for `query`.
///
/// A blank query makes no requests and stays idle.
#[instrument(skip(source))]
pub async fn run_search<S: RecipeSource>(source: &S, query: &str) -> SearchResults {
    let query = query.trim();
    if query.is_empty() {
        return SearchResults::idle();
    }

    let (by_name, by_ingredient) = tokio::join!(
        source.search_by_name(query),
        source.search_by_ingredient(query)
    );

    let mut failures = 0;
    let by_name = settle(by_name, "name", &mut failures);
    let by_ingredient = settle(by_ingredient, "ingredient", &mut failures);

    let cards: Vec<RecipeCard> = merge_results(by_name, by_ingredient)
        .iter()
        .map(RecipeCard::from)
        .collect();

    tracing::debug!(results = cards.len(), failures, "Search settled");
    SearchResults::new(query, ViewState::from_batch(cards, failures))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::controllers::testing::{StubSource, summary};

    fn ids(results: &SearchResults) -> Vec<&str> {
        results.state.items().iter().map(|c| c.id.as_str()).collect()
    }

    fn source_with(name: Vec<RecipeSummary>, ingredient: Vec<RecipeSummary>) -> StubSource {
        let mut source = StubSource::default();
        source.by_name.insert("beef".to_string(), name);
        source.by_ingredient.insert("beef".to_string(), ingredient);
        source
    }

    #[tokio::test]
    async fn test_blank_query_makes_no_requests() {
        let source = StubSource::default();

        let results = run_search(&source, "   ").await;

        assert!(results.state.is_idle());
        assert_eq!(results.summary, None);
        assert_eq!(results.message(), Some(PROMPT));
        assert_eq!(source.calls(), 0);
    }

    #[tokio::test]
    async fn test_merged_and_counted() {
        let source = source_with(
            vec![summary("1", "Beef stew"), summary("2", "Beef pie")],
            vec![summary("2", "Beef pie"), summary("3", "Pho")],
        );

        let results = run_search(&source, "beef").await;

        assert_eq!(ids(&results), ["1", "2", "3"]);
        assert!(!results.state.is_partial());
        assert_eq!(results.summary.as_deref(), Some("3 result(s) for \"beef\""));
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn test_query_is_trimmed() {
        let source = source_with(vec![summary("1", "Beef stew")], Vec::new());

        let results = run_search(&source, "  beef ").await;

        assert_eq!(results.query, "beef");
        assert_eq!(ids(&results), ["1"]);
    }

    #[tokio::test]
    async fn test_both_sides_empty_is_empty_not_error() {
        let source = source_with(Vec::new(), Vec::new());

        let results = run_search(&source, "beef").await;

        assert_eq!(results.state, ViewState::Empty);
        assert_eq!(results.summary.as_deref(), Some("No results for \"beef\""));
    }

    #[tokio::test]
    async fn test_both_sides_fail_is_error() {
        let mut source = StubSource::default();
        source.failing_names = vec!["beef".to_string()];
        source.ingredient_fails = true;

        let results = run_search(&source, "beef").await;

        assert_eq!(results.state, ViewState::Error);
        assert_eq!(results.summary, None);
        assert_eq!(results.message(), Some(LOAD_FAILED));
    }

    #[tokio::test]
    async fn test_one_side_fails_with_results_is_partial() {
        let mut source = source_with(vec![summary("1", "Beef stew")], Vec::new());
        source.ingredient_fails = true;

        let results = run_search(&source, "beef").await;

        assert!(results.state.is_partial());
        assert_eq!(ids(&results), ["1"]);
    }

    #[tokio::test]
    async fn test_one_side_fails_without_results_is_error() {
        let mut source = source_with(Vec::new(), Vec::new());
        source.failing_names = vec!["beef".to_string()];

        let results = run_search(&source, "beef").await;

        assert_eq!(results.state, ViewState::Error);
    }
}
