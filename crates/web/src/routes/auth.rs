//! Authentication route handlers.
//!
//! Registration, login, and logout. A successful registration logs the
//! account in right away; registering an email that already exists lands on
//! the login page with a note instead.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use tower_sessions::Session;

use super::{MessageQuery, flash_message};
use crate::{
    error::Result,
    middleware::auth::{clear_current_user, set_current_user},
    models::CurrentUser,
    services::auth::{AuthError, AuthService},
    state::AppState,
};

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Registration form data.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub email: String,
    pub password: String,
    pub name: String,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub error: Option<&'static str>,
}

/// Registration page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    pub error: Option<&'static str>,
}

// =============================================================================
// Login Routes
// =============================================================================

/// Display the login page.
pub async fn login_page(Query(query): Query<MessageQuery>) -> impl IntoResponse {
    LoginTemplate {
        error: query.error.as_deref().and_then(flash_message),
    }
}

/// Handle login form submission.
///
/// An unknown email and a wrong password produce different messages, the
/// same distinction the pages have always made.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    let auth = AuthService::new(state.store());

    match auth.login(&form.email, &form.password).await {
        Ok(account) => {
            if let Err(e) = set_current_user(&session, &CurrentUser::from(&account)).await {
                tracing::error!("Failed to set session: {}", e);
                return Ok(Redirect::to("/login?error=session").into_response());
            }
            Ok(Redirect::to("/").into_response())
        }
        Err(AuthError::UnknownEmail) => {
            tracing::warn!("Login attempt for unknown email");
            Ok(Redirect::to("/login?error=no_account").into_response())
        }
        Err(AuthError::WrongPassword) => {
            tracing::warn!("Wrong password for {}", form.email);
            Ok(Redirect::to("/login?error=bad_password").into_response())
        }
        Err(e) => Err(e.into()),
    }
}

// =============================================================================
// Registration Routes
// =============================================================================

/// Display the registration page.
pub async fn register_page(Query(query): Query<MessageQuery>) -> impl IntoResponse {
    RegisterTemplate {
        error: query.error.as_deref().and_then(flash_message),
    }
}

/// Handle registration form submission.
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RegisterForm>,
) -> Result<Response> {
    let auth = AuthService::new(state.store());

    match auth.register(&form.email, &form.password, &form.name).await {
        Ok(account) => {
            if let Err(e) = set_current_user(&session, &CurrentUser::from(&account)).await {
                tracing::error!("Failed to set session after registration: {}", e);
                return Ok(Redirect::to("/login?error=session").into_response());
            }
            Ok(Redirect::to("/").into_response())
        }
        Err(AuthError::AccountExists) => {
            tracing::warn!("Registration for already registered email");
            Ok(Redirect::to("/login?error=exists").into_response())
        }
        Err(AuthError::InvalidEmail(e)) => {
            tracing::warn!("Registration with invalid email: {}", e);
            Ok(Redirect::to("/register?error=invalid_email").into_response())
        }
        Err(e) => Err(e.into()),
    }
}

// =============================================================================
// Logout Route
// =============================================================================

/// Handle logout.
///
/// Clears the session and returns to the login page.
pub async fn logout(session: Session) -> Response {
    if let Err(e) = clear_current_user(&session).await {
        tracing::error!("Failed to clear session: {}", e);
    }

    // Also destroy the entire session
    if let Err(e) = session.flush().await {
        tracing::error!("Failed to flush session: {}", e);
    }

    Redirect::to("/login").into_response()
}
