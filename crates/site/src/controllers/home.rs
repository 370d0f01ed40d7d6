//! Home page controller.
//!
//! The home page shows fixed tag chips plus two recipe sections that load
//! concurrently and degrade independently:
//!
//! - **Trending**: six independent random picks
//! - **Featured**: the first two name-search hits for each featured pick
//!
//! Within a section every fetch settles on its own. Whatever succeeded is
//! shown; the section is only an error when nothing came back and something
//! failed.

use std::collections::HashSet;

use futures::future::join_all;
use mealfinder_core::RecipeId;
use tracing::instrument;

use super::ViewState;
use crate::cards::RecipeCard;
use crate::mealdb::RecipeSource;

/// Tag chips under the home search box.
pub const TAGS: [&str; 10] = [
    "chicken", "beef", "rice", "egg", "salmon", "pasta", "soup", "cake", "tofu", "potato",
];

/// Number of random picks in the trending section.
pub const TRENDING_COUNT: usize = 6;

/// Name searches behind the featured section, in display order.
pub const FEATURED_PICKS: [&str; 5] = ["Chicken", "Beef", "Prawn", "Arrabiata", "Curry"];

/// Results kept from each featured pick.
pub const FEATURED_PER_PICK: usize = 2;

/// A quick-search link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagChip {
    pub label: String,
    pub href: String,
}

/// Chips for [`TAGS`], labels capitalised.
#[must_use]
pub fn tag_chips() -> Vec<TagChip> {
    TAGS.iter()
        .map(|tag| TagChip {
            label: capitalize(tag),
            href: format!("/search?q={}", urlencoding::encode(tag)),
        })
        .collect()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// One recipe grid on the home page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeSection {
    pub title: &'static str,
    pub state: ViewState<Vec<RecipeCard>>,
    pub error_message: &'static str,
    pub empty_message: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeSections {
    pub trending: HomeSection,
    pub featured: HomeSection,
}

/// Load both home sections concurrently.
pub async fn load_home<S: RecipeSource>(source: &S) -> HomeSections {
    let (trending, featured) = tokio::join!(load_trending(source), load_featured(source));

    HomeSections {
        trending: HomeSection {
            title: "Trending",
            state: trending,
            error_message: "Unable to load trending.",
            empty_message: "Nothing trending right now.",
        },
        featured: HomeSection {
            title: "Featured",
            state: featured,
            error_message: "Unable to load featured.",
            empty_message: "No featured recipes right now.",
        },
    }
}

/// Six random picks. Repeated picks are shown once.
#[instrument(skip(source))]
pub async fn load_trending<S: RecipeSource>(source: &S) -> ViewState<Vec<RecipeCard>> {
    let results = join_all((0..TRENDING_COUNT).map(|_| source.random())).await;

    let mut seen: HashSet<RecipeId> = HashSet::new();
    let mut cards = Vec::with_capacity(TRENDING_COUNT);
    let mut failures = 0;

    for result in results {
        match result {
            Ok(recipe) => {
                if seen.insert(recipe.id.clone()) {
                    cards.push(RecipeCard::from(&recipe));
                }
            }
            Err(e) => {
                failures += 1;
                tracing::warn!(error = %e, "Random pick failed");
            }
        }
    }

    if failures > 0 {
        tracing::warn!(failures, loaded = cards.len(), "Trending partially loaded");
    }

    ViewState::from_batch(cards, failures)
}

/// First [`FEATURED_PER_PICK`] hits of each featured pick, in pick order.
#[instrument(skip(source))]
pub async fn load_featured<S: RecipeSource>(source: &S) -> ViewState<Vec<RecipeCard>> {
    let results = join_all(FEATURED_PICKS.iter().map(|pick| source.search_by_name(pick))).await;

    let mut seen: HashSet<RecipeId> = HashSet::new();
    let mut cards = Vec::with_capacity(FEATURED_PICKS.len() * FEATURED_PER_PICK);
    let mut failures = 0;

    for (pick, result) in FEATURED_PICKS.iter().zip(results) {
        match result {
            Ok(recipes) => {
                for recipe in recipes.iter().take(FEATURED_PER_PICK) {
                    if seen.insert(recipe.id.clone()) {
                        cards.push(RecipeCard::from(recipe));
                    }
                }
            }
            Err(e) => {
                failures += 1;
                tracing::warn!(error = %e, pick, "Featured pick failed");
            }
        }
    }

    ViewState::from_batch(cards, failures)
}
