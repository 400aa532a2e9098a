//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                        - Product list (requires login)
//! GET  /health                  - Liveness check
//! GET  /health/ready            - Readiness check (pings storage)
//!
//! # Auth
//! GET  /login                   - Login page
//! POST /login                   - Login action
//! GET  /register                - Registration page
//! POST /register                - Registration action
//! GET  /logout                  - Logout action
//!
//! # Products (require login)
//! POST /producto/nuevo          - Create product
//! GET  /producto/editar/{id}    - Edit form
//! POST /producto/editar/{id}    - Update product
//! GET  /producto/eliminar/{id}  - Delete product
//! ```
//!
//! Handlers report expected failures by redirecting with a short message
//! code in the query string; [`flash_message`] resolves codes to the text
//! the pages show.

pub mod auth;
pub mod products;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use serde::Deserialize;
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use crate::{middleware::session::create_session_layer, state::AppState};

/// Query parameters for message display.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Resolve a message code from the query string to display text.
///
/// Unknown codes resolve to `None` and nothing is shown, so nobody can
/// inject text into the pages through the query string.
#[must_use]
pub fn flash_message(code: &str) -> Option<&'static str> {
    match code {
        "exists" => Some("Ya estás registrado. Inicia sesión."),
        "invalid_email" => Some("Correo no válido."),
        "no_account" => Some("Ese correo no existe."),
        "bad_password" => Some("Contraseña incorrecta."),
        "session" => Some("No se pudo iniciar la sesión."),
        "not_yours" => Some("No autorizado o el producto no existe."),
        "bad_price" => Some("Precio inválido."),
        "updated" => Some("Producto actualizado."),
        "deleted" => Some("Producto eliminado."),
        _ => None,
    }
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/logout", get(auth::logout))
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/nuevo", post(products::create))
        .route(
            "/editar/{id}",
            get(products::edit_page).post(products::update),
        )
        .route("/eliminar/{id}", get(products::delete))
}

/// Create all application routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Product list is the home page
        .route("/", get(products::index))
        // Product routes
        .nest("/producto", product_routes())
        // Auth routes
        .merge(auth_routes())
}

/// Build the complete application.
///
/// Sessions and request tracing are layered here so the binary and the
/// tests run the same stack.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .merge(routes())
        .layer(create_session_layer())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record("latency_ms", latency.as_millis() as u64);
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Verifies storage connectivity before returning OK.
/// Returns 503 Service Unavailable if the store is not reachable.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match state.store().ping().await {
        Ok(()) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flash_message_known_codes() {
        assert_eq!(
            flash_message("not_yours"),
            Some("No autorizado o el producto no existe.")
        );
        assert_eq!(flash_message("exists"), Some("Ya estás registrado. Inicia sesión."));
        assert_eq!(flash_message("updated"), Some("Producto actualizado."));
    }

    #[test]
    fn test_flash_message_rejects_unknown_codes() {
        assert_eq!(flash_message("nonsense"), None);
        assert_eq!(flash_message(""), None);
        assert_eq!(flash_message("<script>"), None);
    }
}
