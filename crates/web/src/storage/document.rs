//! Document storage backend (MongoDB).
//!
//! Accounts are identified by their email address at the application level;
//! the `_id` the engine assigns is never exposed. Products use their
//! ObjectId in hex form. There is no unique index on account emails, so
//! uniqueness rests on the check in [`DocumentStore::create_account`] alone.

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    Client, Collection, Database,
    bson::{doc, oid::ObjectId},
    options::ClientOptions,
};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use tienda_core::{AccountId, Email, Price, ProductId};

use super::{StorageBackend, StoreError};
use crate::{
    config::DatabaseConfig,
    models::{Account, Product},
};

/// MongoDB-backed store.
pub struct DocumentStore {
    db: Database,
    accounts: Collection<AccountDoc>,
    products: Collection<ProductDoc>,
}

impl DocumentStore {
    /// Wrap an existing database handle.
    #[must_use]
    pub fn new(db: Database) -> Self {
        let accounts = db.collection("accounts");
        let products = db.collection("products");
        Self {
            db,
            accounts,
            products,
        }
    }

    /// Connect to the server named by the configuration.
    ///
    /// The driver connects lazily, so this pings the server once to catch
    /// a bad address at startup instead of on the first request.
    ///
    /// # Errors
    ///
    /// Returns an engine error if the server is unreachable.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StoreError> {
        let mut options = ClientOptions::parse(config.connection_url().expose_secret()).await?;
        options.app_name = Some("tienda".to_string());
        let client = Client::with_options(options)?;
        let store = Self::new(client.database(&config.name));
        store.ping().await?;
        Ok(store)
    }
}

// =============================================================================
// Document Types
// =============================================================================

#[derive(Debug, Serialize, Deserialize)]
struct AccountDoc {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    email: String,
    name: String,
    password_hash: String,
}

impl AccountDoc {
    fn into_account(self) -> Result<Account, StoreError> {
        let email = Email::parse(&self.email).map_err(|e| {
            StoreError::DataCorruption(format!("invalid email in account document: {e}"))
        })?;
        Ok(Account {
            id: AccountId::new(self.email),
            email,
            name: self.name,
            password_hash: self.password_hash,
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct ProductDoc {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    name: String,
    price: String,
    owner_id: String,
}

impl ProductDoc {
    fn into_product(self) -> Result<Product, StoreError> {
        let id = self
            .id
            .ok_or_else(|| StoreError::DataCorruption("product document missing _id".to_string()))?;
        let price = self.price.parse::<Price>().map_err(|e| {
            StoreError::DataCorruption(format!("invalid price for product {id}: {e}"))
        })?;
        Ok(Product {
            id: ProductId::new(id.to_hex()),
            name: self.name,
            price,
            owner_id: AccountId::new(self.owner_id),
        })
    }
}

// =============================================================================
// StorageBackend
// =============================================================================

#[async_trait]
impl StorageBackend for DocumentStore {
    async fn ping(&self) -> Result<(), StoreError> {
        self.db.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }

    async fn find_account_by_email(&self, email: &Email) -> Result<Option<Account>, StoreError> {
        let found = self
            .accounts
            .find_one(doc! { "email": email.as_str() })
            .await?;

        found.map(AccountDoc::into_account).transpose()
    }

    async fn find_account_by_id(&self, id: &AccountId) -> Result<Option<Account>, StoreError> {
        // Account ids are email addresses on this backend.
        let found = self.accounts.find_one(doc! { "email": id.as_str() }).await?;

        found.map(AccountDoc::into_account).transpose()
    }

    async fn create_account(
        &self,
        email: &Email,
        password_hash: &str,
        name: &str,
    ) -> Result<Account, StoreError> {
        // Check-then-insert: without a unique index on email, two
        // concurrent registrations for the same address can both pass the
        // check and both insert.
        let existing = self
            .accounts
            .find_one(doc! { "email": email.as_str() })
            .await?;
        if existing.is_some() {
            return Err(StoreError::Conflict("email already registered".to_string()));
        }

        let account = AccountDoc {
            id: None,
            email: email.as_str().to_string(),
            name: name.to_string(),
            password_hash: password_hash.to_string(),
        };
        self.accounts.insert_one(&account).await?;

        Ok(Account {
            id: AccountId::new(email.as_str()),
            email: email.clone(),
            name: name.to_string(),
            password_hash: password_hash.to_string(),
        })
    }

    async fn list_products_for_owner(&self, owner: &AccountId) -> Result<Vec<Product>, StoreError> {
        let mut cursor = self.products.find(doc! { "owner_id": owner.as_str() }).await?;

        let mut products = Vec::new();
        while let Some(found) = cursor.try_next().await? {
            products.push(found.into_product()?);
        }
        Ok(products)
    }

    async fn create_product(
        &self,
        owner: &AccountId,
        name: &str,
        price: Price,
    ) -> Result<Product, StoreError> {
        let product = ProductDoc {
            id: None,
            name: name.to_string(),
            price: price.to_string(),
            owner_id: owner.as_str().to_string(),
        };
        let result = self.products.insert_one(&product).await?;

        let id = result.inserted_id.as_object_id().ok_or_else(|| {
            StoreError::DataCorruption("engine returned a non-ObjectId insert id".to_string())
        })?;

        Ok(Product {
            id: ProductId::new(id.to_hex()),
            name: name.to_string(),
            price,
            owner_id: owner.clone(),
        })
    }

    async fn find_product_for_owner(
        &self,
        id: &ProductId,
        owner: &AccountId,
    ) -> Result<Option<Product>, StoreError> {
        let Ok(object_id) = ObjectId::parse_str(id.as_str()) else {
            return Ok(None);
        };

        let found = self
            .products
            .find_one(doc! { "_id": object_id, "owner_id": owner.as_str() })
            .await?;

        found.map(ProductDoc::into_product).transpose()
    }

    async fn update_product(
        &self,
        id: &ProductId,
        owner: &AccountId,
        name: &str,
        price: Price,
    ) -> Result<(), StoreError> {
        let Ok(object_id) = ObjectId::parse_str(id.as_str()) else {
            return Err(StoreError::NotFound);
        };

        let result = self
            .products
            .update_one(
                doc! { "_id": object_id, "owner_id": owner.as_str() },
                doc! { "$set": { "name": name, "price": price.to_string() } },
            )
            .await?;

        if result.matched_count == 0 {
            return Err(StoreError::NotFound);
        }

        Ok(())
    }

    async fn delete_product(&self, id: &ProductId, owner: &AccountId) -> Result<(), StoreError> {
        let Ok(object_id) = ObjectId::parse_str(id.as_str()) else {
            return Err(StoreError::NotFound);
        };

        let result = self
            .products
            .delete_one(doc! { "_id": object_id, "owner_id": owner.as_str() })
            .await?;

        if result.deleted_count == 0 {
            return Err(StoreError::NotFound);
        }

        Ok(())
    }
}
