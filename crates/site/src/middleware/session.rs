//! Session middleware configuration.
//!
//! The session is the visitor's storage area: favorites and local
//! registrations live in it, keyed the same way a browser's local storage
//! would be. Sessions are held in process memory and vanish on restart.
//!
//! The store is a moka cache: each session is evicted once its inactivity
//! expiry passes, and at most [`MAX_SESSIONS`] are kept, least recently
//! used going first when the cap is hit.

use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_moka_store::MokaStore;

use crate::config::SiteConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "mealfinder_session";

/// Upper bound on sessions held in memory.
pub const MAX_SESSIONS: u64 = 100_000;

/// Session expiry time in seconds (30 days of inactivity).
const SESSION_EXPIRY_SECONDS: i64 = 30 * 24 * 60 * 60;

/// Create the session layer with a bounded in-memory store.
#[must_use]
pub fn create_session_layer(config: &SiteConfig) -> SessionManagerLayer<MokaStore> {
    SessionManagerLayer::new(MokaStore::new(Some(MAX_SESSIONS)))
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(config.is_secure())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}
