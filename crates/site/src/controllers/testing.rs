//! Scriptable recipe source for controller tests.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use mealfinder_core::RecipeId;

use crate::mealdb::{MealDbError, RecipeDetail, RecipeSource, RecipeSummary};

#[derive(Default)]
pub struct StubSource {
    pub by_name: HashMap<String, Vec<RecipeSummary>>,
    pub by_ingredient: HashMap<String, Vec<RecipeSummary>>,
    pub details: HashMap<String, RecipeDetail>,
    /// Queries whose name search fails.
    pub failing_names: Vec<String>,
    pub ingredient_fails: bool,
    pub lookup_fails: bool,
    /// One entry per `random()` call; `None` fails that call.
    pub randoms: Mutex<VecDeque<Option<RecipeDetail>>>,
    pub calls: AtomicUsize,
}

impl StubSource {
    pub fn with_randoms(randoms: impl IntoIterator<Item = Option<RecipeDetail>>) -> Self {
        Self {
            randoms: Mutex::new(randoms.into_iter().collect()),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn record_call(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

fn unavailable() -> MealDbError {
    MealDbError::Status(503)
}

#[allow(clippy::unwrap_used)]
pub fn summary(id: &str, name: &str) -> RecipeSummary {
    RecipeSummary {
        id: RecipeId::parse(id).unwrap(),
        name: name.to_string(),
        thumbnail: format!("https://img/{id}.jpg"),
        category: None,
    }
}

#[allow(clippy::unwrap_used)]
pub fn detail(id: &str, name: &str) -> RecipeDetail {
    RecipeDetail {
        id: RecipeId::parse(id).unwrap(),
        name: name.to_string(),
        thumbnail: format!("https://img/{id}.jpg"),
        category: None,
        area: None,
        tags: Vec::new(),
        instructions: "Cook it.".to_string(),
        youtube: None,
        source: None,
        ingredients: Vec::new(),
    }
}

impl RecipeSource for StubSource {
    async fn search_by_name(&self, query: &str) -> Result<Vec<RecipeSummary>, MealDbError> {
        self.record_call();
        if self.failing_names.iter().any(|q| q == query) {
            return Err(unavailable());
        }
        Ok(self.by_name.get(query).cloned().unwrap_or_default())
    }

    async fn search_by_ingredient(&self, query: &str) -> Result<Vec<RecipeSummary>, MealDbError> {
        self.record_call();
        if self.ingredient_fails {
            return Err(unavailable());
        }
        Ok(self.by_ingredient.get(query).cloned().unwrap_or_default())
    }

    async fn lookup_by_id(&self, id: &RecipeId) -> Result<Option<RecipeDetail>, MealDbError> {
        self.record_call();
        if self.lookup_fails {
            return Err(unavailable());
        }
        Ok(self.details.get(id.as_str()).cloned())
    }

    async fn random(&self) -> Result<RecipeDetail, MealDbError> {
        self.record_call();
        #[allow(clippy::unwrap_used)]
        let next = self.randoms.lock().unwrap().pop_front().flatten();
        next.ok_or_else(unavailable)
    }
}
