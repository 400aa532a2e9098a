//! Authentication error types.

use thiserror::Error;
use tienda_core::EmailError;

use crate::storage::StoreError;

/// Errors from authentication flows.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The submitted email does not parse
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// No account with that email
    #[error("unknown email")]
    UnknownEmail,

    /// The password does not match the stored hash
    #[error("wrong password")]
    WrongPassword,

    /// The email is already registered
    #[error("account already exists")]
    AccountExists,

    /// Storage failure
    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    /// Hashing failed, or the stored hash is not a valid PHC string
    #[error("password hashing failed")]
    PasswordHash,
}
