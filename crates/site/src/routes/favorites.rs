//! Favorites route handlers.
//!
//! Favorites live in the visitor's session. Saving answers with the new
//! button label as plain text; a storage failure is reported through the
//! label, never as an error page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Form, response::IntoResponse};
use mealfinder_core::RecipeId;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::cards::{RecipeCard, SaveFeedback};
use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::storage::{FavoriteEntry, FavoritesStore, SessionStorage};

/// Save button form data.
#[derive(Debug, Deserialize)]
pub struct SaveForm {
    pub id: String,
    pub title: String,
    pub image: String,
}

#[derive(Template, WebTemplate)]
#[template(path = "favorites.html")]
pub struct FavoritesTemplate {
    pub cards: Vec<RecipeCard>,
}

/// List saved recipes in save order.
#[instrument(skip(session))]
pub async fn index(session: Session) -> impl IntoResponse {
    let entries = FavoritesStore::new(SessionStorage::new(session)).list().await;

    FavoritesTemplate {
        cards: entries.iter().map(RecipeCard::from).collect(),
    }
}

/// Save a recipe and return the button label.
#[instrument(skip(session, form), fields(id = %form.id))]
pub async fn save(session: Session, Form(form): Form<SaveForm>) -> Result<&'static str> {
    let id = RecipeId::parse(&form.id).map_err(|e| AppError::BadRequest(e.to_string()))?;

    let store = FavoritesStore::new(SessionStorage::new(session));
    let entry = FavoriteEntry {
        id,
        title: form.title,
        image: form.image,
    };

    let feedback = match store.save(entry).await {
        Ok(outcome) => {
            add_breadcrumb("favorites", "Saved recipe", Some(&[("recipe_id", form.id.as_str())]));
            SaveFeedback::from(outcome)
        }
        Err(e) => {
            tracing::warn!(error = %e, "Failed to save favorite");
            SaveFeedback::Failed
        }
    };

    Ok(feedback.label())
}
