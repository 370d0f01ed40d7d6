//! End-to-end tests for the Mealfinder site.
//!
//! Each test starts the full application on an ephemeral port, with
//! TheMealDB replaced by a `wiremock` server, and talks to it over HTTP with
//! a cookie-keeping client so the session behaves like one browser's storage
//! area.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p mealfinder-integration-tests
//! ```

use std::time::Duration;

use mealfinder_site::config::{LogFormat, MealDbConfig, SiteConfig};
use mealfinder_site::routes;
use mealfinder_site::state::AppState;
use reqwest::{Client, Response};
use serde_json::{Value, json};
use wiremock::MockServer;

/// Path prefix of the mocked TheMealDB API.
pub const API_PREFIX: &str = "/api/json/v1/1";

/// A running site wired to a mock TheMealDB.
pub struct TestContext {
    pub client: Client,
    pub base_url: String,
    pub mealdb: MockServer,
}

impl TestContext {
    /// Start the mock API and the site.
    ///
    /// # Panics
    ///
    /// Panics if the site cannot be started.
    pub async fn new() -> Self {
        let mealdb = MockServer::start().await;

        let config = SiteConfig {
            host: [127, 0, 0, 1].into(),
            port: 0,
            base_url: "http://localhost".to_string(),
            mealdb: MealDbConfig {
                base_url: format!("{}{API_PREFIX}", mealdb.uri()),
                timeout_secs: 5,
            },
            log_format: LogFormat::Pretty,
            sentry_dsn: None,
            sentry_environment: None,
        };

        let state = AppState::new(config).expect("Failed to build application state");
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Listener has no address");

        tokio::spawn(async move {
            let _ = axum::serve(listener, routes::app(state)).await;
        });

        let client = Client::builder()
            .cookie_store(true)
            .timeout(Duration::from_secs(10))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: format!("http://{addr}"),
            mealdb,
        }
    }

    /// GET a site path.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be sent.
    pub async fn get(&self, path: &str) -> Response {
        self.client
            .get(format!("{}{path}", self.base_url))
            .send()
            .await
            .expect("GET request failed")
    }

    /// POST a form to a site path.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be sent.
    pub async fn post_form(&self, path: &str, form: &[(&str, &str)]) -> Response {
        self.client
            .post(format!("{}{path}", self.base_url))
            .form(form)
            .send()
            .await
            .expect("POST request failed")
    }

    /// Number of requests the mock API has seen.
    pub async fn mealdb_requests(&self) -> usize {
        self.mealdb
            .received_requests()
            .await
            .map_or(0, |requests| requests.len())
    }
}

/// Mock API path for an endpoint, e.g. `api_path("search.php")`.
#[must_use]
pub fn api_path(endpoint: &str) -> String {
    format!("{API_PREFIX}/{endpoint}")
}

/// A full meal record as TheMealDB sends it.
#[must_use]
pub fn meal(id: &str, name: &str) -> Value {
    json!({
        "idMeal": id,
        "strMeal": name,
        "strMealThumb": format!("https://www.themealdb.com/images/media/meals/{id}.jpg"),
        "strCategory": "Seafood",
        "strArea": "Thai",
        "strTags": "Soup,Spicy",
        "strInstructions": "Simmer the broth.\r\nAdd noodles.",
        "strYoutube": "",
        "strSource": null,
        "strIngredient1": "Rice noodles",
        "strMeasure1": "200g",
        "strIngredient2": "",
        "strMeasure2": "",
        "strIngredient3": "Coconut milk",
        "strMeasure3": "1 can"
    })
}

/// A `{"meals": [...]}` envelope.
#[must_use]
pub fn meals(items: Vec<Value>) -> Value {
    json!({ "meals": items })
}

/// The envelope TheMealDB sends when nothing matched.
#[must_use]
pub fn no_meals() -> Value {
    json!({ "meals": null })
}
