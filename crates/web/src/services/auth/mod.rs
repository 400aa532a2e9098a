//! Authentication service.
//!
//! Registration and login flows over the storage backend, plus the argon2
//! hashing they share. Credential failures are reported as distinct
//! variants because the pages show different messages for an unknown email
//! and a wrong password.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use tienda_core::Email;

use crate::{
    models::Account,
    storage::{StorageBackend, StoreError},
};

/// Service for authentication flows.
pub struct AuthService<'a> {
    store: &'a dyn StorageBackend,
}

impl<'a> AuthService<'a> {
    /// Create a new service borrowing the given store.
    #[must_use]
    pub const fn new(store: &'a dyn StorageBackend) -> Self {
        Self { store }
    }

    /// Register a new account and return it.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` if the email does not parse,
    /// `AuthError::AccountExists` if the email is already registered, or a
    /// storage/hashing error.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<Account, AuthError> {
        let email = Email::parse(email)?;
        let password_hash = hash_password(password)?;

        self.store
            .create_account(&email, &password_hash, name)
            .await
            .map_err(|e| match e {
                StoreError::Conflict(_) => AuthError::AccountExists,
                other => AuthError::Store(other),
            })
    }

    /// Verify credentials and return the matching account.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::UnknownEmail` if no account has that email,
    /// `AuthError::WrongPassword` if the password does not match, or a
    /// storage error.
    pub async fn login(&self, email: &str, password: &str) -> Result<Account, AuthError> {
        // An address that does not even parse certainly has no account.
        let email = Email::parse(email).map_err(|_| AuthError::UnknownEmail)?;

        let Some(account) = self.store.find_account_by_email(&email).await? else {
            return Err(AuthError::UnknownEmail);
        };

        verify_password(password, &account.password_hash)?;
        Ok(account)
    }
}

// =============================================================================
// Password Hashing
// =============================================================================

/// Hash a password with argon2 and a fresh random salt.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a stored PHC hash string.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed = PasswordHash::new(hash).map_err(|_| AuthError::PasswordHash)?;
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .map_err(|_| AuthError::WrongPassword)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_password() {
        let hash = hash_password("hunter2").unwrap();

        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("hunter2", &hash).is_ok());
    }

    #[test]
    fn test_hashes_are_salted() {
        let first = hash_password("hunter2").unwrap();
        let second = hash_password("hunter2").unwrap();

        assert_ne!(first, second);
    }

    #[test]
    fn test_verify_rejects_wrong_password() {
        let hash = hash_password("hunter2").unwrap();

        assert!(matches!(
            verify_password("something-else", &hash),
            Err(AuthError::WrongPassword)
        ));
    }

    #[test]
    fn test_verify_rejects_malformed_hash() {
        assert!(matches!(
            verify_password("hunter2", "not-a-phc-string"),
            Err(AuthError::PasswordHash)
        ));
    }
}
