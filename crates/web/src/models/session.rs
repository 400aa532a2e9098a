//! Session-scoped models.

use serde::{Deserialize, Serialize};
use tienda_core::AccountId;

use super::account::Account;

/// Minimal identity stored in the session.
///
/// Only the account id goes in; extractors re-read the full [`Account`]
/// from storage on every request, so a session never shadows stored data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: AccountId,
}

impl From<&Account> for CurrentUser {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id.clone(),
        }
    }
}

/// Session keys for authentication data.
pub mod keys {
    /// Key for storing the current logged-in user.
    pub const CURRENT_USER: &str = "current_user";
}
