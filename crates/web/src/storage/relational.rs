//! Relational storage backend (SQLite via sqlx).

use async_trait::async_trait;
use secrecy::ExposeSecret;
use sqlx::{SqlitePool, migrate::Migrator, sqlite::SqlitePoolOptions};
use tienda_core::{AccountId, Email, Price, ProductId};

use super::{StorageBackend, StoreError};
use crate::{
    config::DatabaseConfig,
    models::{Account, Product},
};

/// Embedded migrations, applied on connect.
pub static MIGRATOR: Migrator = sqlx::migrate!();

/// SQLite-backed store.
pub struct RelationalStore {
    pool: SqlitePool,
}

impl RelationalStore {
    /// Wrap an existing pool. Migrations are the caller's business.
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open the database named by the configuration and apply migrations.
    ///
    /// # Errors
    ///
    /// Returns an engine error if the database cannot be opened or a
    /// migration fails.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StoreError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(config.connection_url().expose_secret())
            .await?;
        MIGRATOR.run(&pool).await.map_err(sqlx::Error::from)?;
        Ok(Self::new(pool))
    }
}

// =============================================================================
// Row Types
// =============================================================================

#[derive(sqlx::FromRow)]
struct AccountRow {
    id: i64,
    email: String,
    name: String,
    password_hash: String,
}

impl AccountRow {
    fn into_account(self) -> Result<Account, StoreError> {
        let email = Email::parse(&self.email).map_err(|e| {
            StoreError::DataCorruption(format!("invalid email for account {}: {e}", self.id))
        })?;
        Ok(Account {
            id: AccountId::new(self.id.to_string()),
            email,
            name: self.name,
            password_hash: self.password_hash,
        })
    }
}

#[derive(sqlx::FromRow)]
struct ProductRow {
    id: i64,
    name: String,
    price: String,
    owner_id: i64,
}

impl ProductRow {
    fn into_product(self) -> Result<Product, StoreError> {
        let price = self.price.parse::<Price>().map_err(|e| {
            StoreError::DataCorruption(format!("invalid price for product {}: {e}", self.id))
        })?;
        Ok(Product {
            id: ProductId::new(self.id.to_string()),
            name: self.name,
            price,
            owner_id: AccountId::new(self.owner_id.to_string()),
        })
    }
}

// =============================================================================
// StorageBackend
// =============================================================================

#[async_trait]
impl StorageBackend for RelationalStore {
    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn find_account_by_email(&self, email: &Email) -> Result<Option<Account>, StoreError> {
        let row = sqlx::query_as::<_, AccountRow>(
            "SELECT id, email, name, password_hash FROM accounts WHERE email = ?",
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(AccountRow::into_account).transpose()
    }

    async fn find_account_by_id(&self, id: &AccountId) -> Result<Option<Account>, StoreError> {
        // Ids from another backend are not numeric and cannot match here.
        let Ok(account_id) = id.as_str().parse::<i64>() else {
            return Ok(None);
        };

        let row = sqlx::query_as::<_, AccountRow>(
            "SELECT id, email, name, password_hash FROM accounts WHERE id = ?",
        )
        .bind(account_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(AccountRow::into_account).transpose()
    }

    async fn create_account(
        &self,
        email: &Email,
        password_hash: &str,
        name: &str,
    ) -> Result<Account, StoreError> {
        let result = sqlx::query("INSERT INTO accounts (email, name, password_hash) VALUES (?, ?, ?)")
            .bind(email.as_str())
            .bind(name)
            .bind(password_hash)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(ref db_err) = e
                    && db_err.is_unique_violation()
                {
                    StoreError::Conflict("email already registered".to_string())
                } else {
                    e.into()
                }
            })?;

        Ok(Account {
            id: AccountId::new(result.last_insert_rowid().to_string()),
            email: email.clone(),
            name: name.to_string(),
            password_hash: password_hash.to_string(),
        })
    }

    async fn list_products_for_owner(&self, owner: &AccountId) -> Result<Vec<Product>, StoreError> {
        let Ok(owner_id) = owner.as_str().parse::<i64>() else {
            return Ok(Vec::new());
        };

        let rows = sqlx::query_as::<_, ProductRow>(
            "SELECT id, name, price, owner_id FROM products WHERE owner_id = ? ORDER BY id",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(ProductRow::into_product).collect()
    }

    async fn create_product(
        &self,
        owner: &AccountId,
        name: &str,
        price: Price,
    ) -> Result<Product, StoreError> {
        let Ok(owner_id) = owner.as_str().parse::<i64>() else {
            return Err(StoreError::NotFound);
        };

        let result = sqlx::query("INSERT INTO products (name, price, owner_id) VALUES (?, ?, ?)")
            .bind(name)
            .bind(price.to_string())
            .bind(owner_id)
            .execute(&self.pool)
            .await?;

        Ok(Product {
            id: ProductId::new(result.last_insert_rowid().to_string()),
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
        let Ok(product_id) = id.as_str().parse::<i64>() else {
            return Ok(None);
        };
        let Ok(owner_id) = owner.as_str().parse::<i64>() else {
            return Ok(None);
        };

        let row = sqlx::query_as::<_, ProductRow>(
            "SELECT id, name, price, owner_id FROM products WHERE id = ? AND owner_id = ?",
        )
        .bind(product_id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(ProductRow::into_product).transpose()
    }

    async fn update_product(
        &self,
        id: &ProductId,
        owner: &AccountId,
        name: &str,
        price: Price,
    ) -> Result<(), StoreError> {
        let Ok(product_id) = id.as_str().parse::<i64>() else {
            return Err(StoreError::NotFound);
        };
        let Ok(owner_id) = owner.as_str().parse::<i64>() else {
            return Err(StoreError::NotFound);
        };

        let result = sqlx::query("UPDATE products SET name = ?, price = ? WHERE id = ? AND owner_id = ?")
            .bind(name)
            .bind(price.to_string())
            .bind(product_id)
            .bind(owner_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }

        Ok(())
    }

    async fn delete_product(&self, id: &ProductId, owner: &AccountId) -> Result<(), StoreError> {
        let Ok(product_id) = id.as_str().parse::<i64>() else {
            return Err(StoreError::NotFound);
        };
        let Ok(owner_id) = owner.as_str().parse::<i64>() else {
            return Err(StoreError::NotFound);
        };

        let result = sqlx::query("DELETE FROM products WHERE id = ? AND owner_id = ?")
            .bind(product_id)
            .bind(owner_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }

        Ok(())
    }
}
