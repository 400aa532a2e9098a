//! Seed the storage backend with a bootstrap account.
//!
//! Creates an account that can log in to the web UI right away. Defaults to
//! `admin@admin.com` / `admin`; pass `-e`, `-p` and `-n` to override. Running
//! the command twice is harmless: an address that is already registered is
//! left untouched.

use tracing::info;

use tienda_web::config::DatabaseConfig;
use tienda_web::services::auth::{AuthError, AuthService};
use tienda_web::storage;

/// Create a bootstrap account unless the address is already taken.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the storage backend is
/// unreachable, or the account cannot be created.
pub async fn account(
    email: &str,
    password: &str,
    name: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let config = DatabaseConfig::from_env()?;
    let store = storage::connect(&config).await?;

    let auth = AuthService::new(store.as_ref());
    match auth.register(email, password, name).await {
        Ok(created) => {
            info!(email = %created.email, "Account created");
            Ok(())
        }
        Err(AuthError::AccountExists) => {
            info!(email = %email, "Account already exists; nothing to do");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
