//! Application-wide error handling.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::{services::auth::AuthError, storage::StoreError};

/// Application-wide error type.
///
/// Handlers deal with expected failures themselves (wrong password, product
/// not owned) by redirecting with a message code; anything that reaches this
/// type is unexpected and turns into a plain status response.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    #[error("auth error: {0}")]
    Auth(#[from] AuthError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::Store(StoreError::NotFound) => (StatusCode::NOT_FOUND, "No encontrado."),
            Self::Store(e) => {
                tracing::error!("Storage error: {e}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Algo salió mal.")
            }
            Self::Auth(e) => {
                tracing::error!("Auth error: {e}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Algo salió mal.")
            }
        };

        (status, message).into_response()
    }
}

/// Convenience result type for handlers.
pub type Result<T> = std::result::Result<T, AppError>;
