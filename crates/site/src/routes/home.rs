//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use crate::controllers::home::{HomeSection, TagChip, load_home, tag_chips};
use crate::filters;
use crate::state::AppState;

#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub tags: Vec<TagChip>,
    /// Trending, then featured.
    pub sections: Vec<HomeSection>,
}

#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> impl IntoResponse {
    let sections = load_home(state.recipes()).await;

    HomeTemplate {
        tags: tag_chips(),
        sections: vec![sections.trending, sections.featured],
    }
}
