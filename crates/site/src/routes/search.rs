//! Search route handlers.
//!
//! `GET /search` renders the full page and mints a fresh controller id for
//! it. The page script then fetches `GET /search/results` with that id and
//! an increasing `seq` for every query it submits; the sequencer drops any
//! response that has been overtaken by a later submit from the same page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::instrument;
use uuid::Uuid;

use crate::controllers::{SearchResults, run_search};
use crate::filters;
use crate::state::AppState;

/// Query parameters for the search page.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

/// Query parameters for the results fragment.
#[derive(Debug, Deserialize)]
pub struct ResultsQuery {
    pub q: Option<String>,
    /// Controller id of the page issuing the request.
    pub cid: Option<Uuid>,
    /// Per-page submit counter, increasing with every query.
    pub seq: Option<u64>,
}

/// Full search page.
#[derive(Template, WebTemplate)]
#[template(path = "search.html")]
pub struct SearchTemplate {
    pub controller_id: Uuid,
    pub results: SearchResults,
}

/// Results fragment swapped into the search page.
#[derive(Template, WebTemplate)]
#[template(path = "partials/search_results.html")]
pub struct SearchResultsTemplate {
    pub results: SearchResults,
}

/// Display the search page, running the search when `q` is present.
#[instrument(skip(state))]
pub async fn page(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> impl IntoResponse {
    let results = run_search(state.recipes(), query.q.as_deref().unwrap_or_default()).await;

    SearchTemplate {
        controller_id: Uuid::new_v4(),
        results,
    }
}

/// Results fragment for one query.
///
/// Answers 204 No Content when a newer request from the same page was
/// submitted, whether it arrived before this one or while it was in flight.
/// Requests without both `cid` and `seq` are not sequenced.
#[instrument(skip(state))]
pub async fn results(
    State(state): State<AppState>,
    Query(query): Query<ResultsQuery>,
) -> Response {
    let ticket = match (query.cid, query.seq) {
        (Some(cid), Some(seq)) => Some(state.sequencer().admit(cid, seq)),
        _ => None,
    };

    if let Some(ticket) = &ticket {
        if !state.sequencer().is_current(ticket) {
            tracing::debug!(seq = ticket.seq(), "Skipping search already superseded");
            return StatusCode::NO_CONTENT.into_response();
        }
    }

    let results = run_search(state.recipes(), query.q.as_deref().unwrap_or_default()).await;

    if let Some(ticket) = &ticket {
        if !state.sequencer().is_current(ticket) {
            tracing::debug!(seq = ticket.seq(), "Dropping superseded search response");
            return StatusCode::NO_CONTENT.into_response();
        }
    }

    SearchResultsTemplate { results }.into_response()
}
