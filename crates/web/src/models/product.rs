//! Product model.

use serde::{Deserialize, Serialize};
use tienda_core::{AccountId, Price, ProductId};

/// A product owned by one account.
///
/// Every read and write goes through the owner; a product is invisible to
/// everyone but the account that created it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub owner_id: AccountId,
}
