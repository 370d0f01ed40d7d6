//! Local registration route handlers.
//!
//! Accounts are recorded in the visitor's session only. There is no login:
//! registering just stores the name and a password hash.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use secrecy::SecretString;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::filters;
use crate::storage::{RegistrationError, SessionStorage, UserRegistry};

// =============================================================================
// Form Types
// =============================================================================

/// Registration form data. Missing fields arrive blank.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RegisterForm {
    pub username: String,
    pub password: String,
}

// =============================================================================
// Templates
// =============================================================================

/// Register page template.
#[derive(Template, WebTemplate, Default)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    pub error: Option<String>,
    /// Username to keep in the form after a failed attempt.
    pub username: String,
    /// Set once registration succeeded.
    pub registered: Option<String>,
}

fn error_message(error: &RegistrationError) -> String {
    match error {
        RegistrationError::MissingField => "Please fill in every field".to_string(),
        RegistrationError::InvalidUsername(e) => format!("Invalid username: {e}"),
        RegistrationError::AlreadyRegistered => "That username is already registered".to_string(),
        RegistrationError::PasswordHash | RegistrationError::Storage(_) => {
            "Registration failed, please try again".to_string()
        }
    }
}

// =============================================================================
// Registration Routes
// =============================================================================

/// Display the registration page.
pub async fn register_page() -> impl IntoResponse {
    RegisterTemplate::default()
}

/// Handle registration form submission.
#[instrument(skip(session, form), fields(username = %form.username))]
pub async fn register(session: Session, Form(form): Form<RegisterForm>) -> Result<Response> {
    let registry = UserRegistry::new(SessionStorage::new(session));
    let password = SecretString::from(form.password);

    match registry.register(&form.username, &password).await {
        Ok(user) => Ok(RegisterTemplate {
            registered: Some(user.username.to_string()),
            ..RegisterTemplate::default()
        }
        .into_response()),
        Err(RegistrationError::Storage(e)) => Err(AppError::Storage(e)),
        Err(e) => {
            tracing::debug!(error = %e, "Registration rejected");
            let template = RegisterTemplate {
                error: Some(error_message(&e)),
                username: form.username,
                registered: None,
            };
            Ok((StatusCode::UNPROCESSABLE_ENTITY, template).into_response())
        }
    }
}
