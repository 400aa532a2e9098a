//! Authentication extractor.
//!
//! Route handlers that need a logged-in account take [`RequireAuth`] as an
//! argument; everyone else gets redirected to the login page.

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::{
    models::{Account, CurrentUser, session::keys},
    state::AppState,
    storage::StoreError,
};

/// Extractor that requires a logged-in account.
///
/// The session holds only the account id; the full account is re-read from
/// storage on every request, so handlers always see current data and a
/// session that outlived its account counts as logged out.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(RequireAuth(account): RequireAuth) -> impl IntoResponse {
///     format!("Hola, {}", account.name)
/// }
/// ```
pub struct RequireAuth(pub Account);

/// Rejection returned when no logged-in account can be resolved.
pub enum AuthRejection {
    /// Not logged in; go to the login page.
    RedirectToLogin,
    /// The session layer is not installed.
    NoSessionLayer,
    /// Storage failed while resolving the account.
    Store(StoreError),
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to("/login").into_response(),
            Self::NoSessionLayer => {
                tracing::error!("Session layer missing from the middleware stack");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
            Self::Store(e) => {
                tracing::error!("Storage error while resolving session account: {e}");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

impl<S> FromRequestParts<S> for RequireAuth
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // Get the session from extensions (set by SessionManagerLayer)
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or(AuthRejection::NoSessionLayer)?;

        let current: Option<CurrentUser> = session.get(keys::CURRENT_USER).await.ok().flatten();
        let Some(current) = current else {
            return Err(AuthRejection::RedirectToLogin);
        };

        let state = AppState::from_ref(state);
        let account = state
            .store()
            .find_account_by_id(&current.id)
            .await
            .map_err(AuthRejection::Store)?;

        account.map(Self).ok_or(AuthRejection::RedirectToLogin)
    }
}

/// Helper to set the current user in the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_user(
    session: &Session,
    user: &CurrentUser,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(keys::CURRENT_USER, user).await
}

/// Helper to clear the current user from the session (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_user(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.remove::<CurrentUser>(keys::CURRENT_USER).await?;
    Ok(())
}
