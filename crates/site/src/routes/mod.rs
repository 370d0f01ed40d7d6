//! HTTP route handlers for the site.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page (tags, trending, featured)
//! GET  /health                 - Health check
//!
//! # Search
//! GET  /search?q=              - Search page
//! GET  /search/results?q=&cid=&seq= - Results fragment (204 when superseded)
//!
//! # Recipes
//! GET  /recipe?id=             - Recipe detail
//!
//! # Favorites (session storage)
//! GET  /favorites              - Saved recipes
//! POST /favorites              - Save a recipe (returns button label)
//!
//! # Auth
//! GET  /auth/register          - Register page
//! POST /auth/register          - Register action
//! ```

pub mod auth;
pub mod favorites;
pub mod home;
pub mod recipe;
pub mod search;

use axum::{Router, extract::Request, middleware as axum_middleware, routing::get};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::cards::{DETAIL_PATH, SAVE_PATH};
use crate::middleware::{
    create_session_layer, request_id_middleware, security_headers_middleware,
};
use crate::state::AppState;

/// Directory static assets are served from, relative to the workspace root.
pub const STATIC_DIR: &str = "crates/site/static";

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new().route("/register", get(auth::register_page).post(auth::register))
}

/// Create the search routes router.
pub fn search_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(search::page))
        .route("/results", get(search::results))
}

/// Create all page routes for the site.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .nest("/search", search_routes())
        .route(DETAIL_PATH, get(recipe::show))
        .route(SAVE_PATH, get(favorites::index).post(favorites::save))
        .nest("/auth", auth_routes())
}

/// Build the complete application: pages, static assets and middleware.
///
/// Sentry layers are added by the binary on top of this.
pub fn app(state: AppState) -> Router {
    let session_layer = create_session_layer(state.config());

    Router::new()
        .route("/health", get(health))
        .merge(routes())
        .nest_service("/static", ServeDir::new(STATIC_DIR))
        .layer(session_layer)
        .layer(axum_middleware::from_fn(security_headers_middleware))
        .layer(axum_middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(request_span))
        .with_state(state)
}

/// Span for one request; `request_id` is filled in by the request ID
/// middleware.
fn request_span(request: &Request) -> tracing::Span {
    tracing::info_span!(
        "request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = tracing::field::Empty,
    )
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check TheMealDB.
async fn health() -> &'static str {
    "ok"
}
