//! Storage layer.
//!
//! All persistence goes through the [`StorageBackend`] trait. Two
//! implementations exist, one per engine:
//!
//! - [`relational::RelationalStore`] - SQLite via sqlx
//! - [`document::DocumentStore`] - MongoDB
//!
//! [`connect`] picks one at startup from the configuration; nothing past
//! that point knows which engine is running.

pub mod document;
pub mod relational;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tienda_core::{AccountId, Email, Price, ProductId};

use crate::{
    config::{BackendKind, DatabaseConfig},
    models::{Account, Product},
};

pub use document::DocumentStore;
pub use relational::RelationalStore;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Relational engine error
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Document engine error
    #[error("document store error: {0}")]
    Document(#[from] mongodb::error::Error),

    /// Stored data that no longer parses (e.g. invalid email in storage)
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Entity not found, or not visible to the requesting owner
    #[error("not found")]
    NotFound,

    /// Unique constraint violation
    #[error("conflict: {0}")]
    Conflict(String),
}

/// Persistence operations the application needs.
///
/// Every product operation takes the owner and filters by it inside the
/// store, so "someone else's product" and "no such product" come back as
/// the same answer.
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Check that the backing engine answers.
    ///
    /// # Errors
    ///
    /// Returns an engine error if the store is unreachable.
    async fn ping(&self) -> Result<(), StoreError>;

    /// Find an account by email address.
    ///
    /// # Errors
    ///
    /// Returns an engine error or `StoreError::DataCorruption` if stored
    /// data no longer parses.
    async fn find_account_by_email(&self, email: &Email) -> Result<Option<Account>, StoreError>;

    /// Find an account by its id.
    ///
    /// An id that cannot belong to this backend resolves to `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns an engine error or `StoreError::DataCorruption` if stored
    /// data no longer parses.
    async fn find_account_by_id(&self, id: &AccountId) -> Result<Option<Account>, StoreError>;

    /// Create a new account.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Conflict` if the email is already registered,
    /// or an engine error.
    async fn create_account(
        &self,
        email: &Email,
        password_hash: &str,
        name: &str,
    ) -> Result<Account, StoreError>;

    /// List all products belonging to one owner.
    ///
    /// An owner with no products gets an empty list.
    ///
    /// # Errors
    ///
    /// Returns an engine error or `StoreError::DataCorruption` if stored
    /// data no longer parses.
    async fn list_products_for_owner(&self, owner: &AccountId) -> Result<Vec<Product>, StoreError>;

    /// Create a product for the given owner.
    ///
    /// # Errors
    ///
    /// Returns an engine error if the insert fails.
    async fn create_product(
        &self,
        owner: &AccountId,
        name: &str,
        price: Price,
    ) -> Result<Product, StoreError>;

    /// Fetch one product, visible only to its owner.
    ///
    /// Resolves to `Ok(None)` both when the id does not exist and when it
    /// belongs to a different owner.
    ///
    /// # Errors
    ///
    /// Returns an engine error or `StoreError::DataCorruption` if stored
    /// data no longer parses.
    async fn find_product_for_owner(
        &self,
        id: &ProductId,
        owner: &AccountId,
    ) -> Result<Option<Product>, StoreError>;

    /// Replace name and price of a product, if the owner matches.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` when nothing matched the id/owner
    /// pair, or an engine error.
    async fn update_product(
        &self,
        id: &ProductId,
        owner: &AccountId,
        name: &str,
        price: Price,
    ) -> Result<(), StoreError>;

    /// Delete a product, if the owner matches.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` when nothing matched the id/owner
    /// pair, or an engine error.
    async fn delete_product(&self, id: &ProductId, owner: &AccountId) -> Result<(), StoreError>;
}

/// Connect the backend named by the configuration.
///
/// This is the single point where the engine choice is made.
///
/// # Errors
///
/// Returns an engine error if the store cannot be reached or migrated.
pub async fn connect(config: &DatabaseConfig) -> Result<Arc<dyn StorageBackend>, StoreError> {
    match config.engine {
        BackendKind::Sqlite => {
            let store = RelationalStore::connect(config).await?;
            Ok(Arc::new(store))
        }
        BackendKind::Mongo => {
            let store = DocumentStore::connect(config).await?;
            Ok(Arc::new(store))
        }
    }
}
