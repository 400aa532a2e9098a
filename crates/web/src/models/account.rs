//! Registered account model.

use serde::{Deserialize, Serialize};
use tienda_core::{AccountId, Email};

/// A registered account.
///
/// The id is backend-specific: the relational store hands out integer row
/// ids, the document store keys accounts on their email address. Neither
/// shape leaks past [`AccountId`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub email: Email,
    /// Display name shown in the page header.
    pub name: String,
    /// Argon2 hash in PHC string format.
    pub password_hash: String,
}
