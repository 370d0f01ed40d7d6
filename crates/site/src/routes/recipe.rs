//! Recipe detail route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::instrument;

use crate::controllers::detail::{LOAD_FAILED, NO_SELECTION, NOT_FOUND, RecipeView, load_detail};
use crate::controllers::ViewState;
use crate::filters;
use crate::state::AppState;

/// Query parameters for the detail page.
#[derive(Debug, Deserialize)]
pub struct RecipeQuery {
    pub id: Option<String>,
}

#[derive(Template, WebTemplate)]
#[template(path = "recipe.html")]
pub struct RecipeTemplate {
    pub recipe: Option<RecipeView>,
    /// Shown instead of the recipe.
    pub message: Option<&'static str>,
}

/// Display one recipe.
///
/// Unknown ids answer 404 and upstream failures 502, each with an inline
/// message rather than an error page.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, Query(query): Query<RecipeQuery>) -> Response {
    let (status, template) = match load_detail(state.recipes(), query.id.as_deref()).await {
        ViewState::Success { value, .. } => (
            StatusCode::OK,
            RecipeTemplate {
                recipe: Some(value),
                message: None,
            },
        ),
        ViewState::Idle => (StatusCode::OK, RecipeTemplate::notice(NO_SELECTION)),
        ViewState::Empty => (StatusCode::NOT_FOUND, RecipeTemplate::notice(NOT_FOUND)),
        ViewState::Error => (StatusCode::BAD_GATEWAY, RecipeTemplate::notice(LOAD_FAILED)),
    };

    (status, template).into_response()
}

impl RecipeTemplate {
    const fn notice(message: &'static str) -> Self {
        Self {
            recipe: None,
            message: Some(message),
        }
    }
}
