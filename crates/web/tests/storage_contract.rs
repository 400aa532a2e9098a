//! Storage backend contract tests.
//!
//! One scenario exercises every trait operation, so both engines can be
//! checked for identical behavior. SQLite runs in-memory on every test
//! run; the MongoDB tests need a reachable server (`TIENDA_DB_HOST` or
//! `TIENDA_DB_URL`) and are ignored by default. Each MongoDB run uses a
//! database named after the test process.

use std::process;

use secrecy::SecretString;
use sqlx::sqlite::SqlitePoolOptions;
use tienda_core::{AccountId, Email, Price, ProductId};
use tienda_web::{
    config::{BackendKind, DatabaseConfig},
    storage::{DocumentStore, RelationalStore, StorageBackend, StoreError, relational::MIGRATOR},
};

// ============================================================================
// Backends Under Test
// ============================================================================

async fn relational_store() -> RelationalStore {
    // A single connection keeps every query on the same in-memory database.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database");
    MIGRATOR.run(&pool).await.expect("Failed to run migrations");
    RelationalStore::new(pool)
}

fn document_config() -> DatabaseConfig {
    DatabaseConfig {
        engine: BackendKind::Mongo,
        url: std::env::var("TIENDA_DB_URL").ok().map(SecretString::from),
        host: std::env::var("TIENDA_DB_HOST").unwrap_or_else(|_| "localhost".to_string()),
        port: 27017,
        user: String::new(),
        password: SecretString::from(""),
        name: format!("tienda_test_{}", process::id()),
    }
}

async fn document_store() -> DocumentStore {
    DocumentStore::connect(&document_config())
        .await
        .expect("Failed to connect to MongoDB")
}

fn email(address: &str) -> Email {
    Email::parse(address).expect("Test email should parse")
}

fn price(value: &str) -> Price {
    value.parse().expect("Test price should parse")
}

// ============================================================================
// Shared Contract
// ============================================================================

/// Run the full storage contract against one backend.
#[allow(clippy::too_many_lines)]
async fn exercise_contract(store: &dyn StorageBackend) {
    store.ping().await.expect("Ping should succeed");

    // Accounts
    let alice = store
        .create_account(&email("alice@example.com"), "hash-alice", "Alice")
        .await
        .expect("Creating alice should succeed");
    let bob = store
        .create_account(&email("bob@example.com"), "hash-bob", "Bob")
        .await
        .expect("Creating bob should succeed");
    assert_ne!(alice.id, bob.id);

    // A sequential duplicate is refused on every backend
    let err = store
        .create_account(&email("alice@example.com"), "hash-other", "Alice Two")
        .await
        .expect_err("Duplicate email should be refused");
    assert!(matches!(err, StoreError::Conflict(_)));

    // Lookups
    let found = store
        .find_account_by_email(&email("alice@example.com"))
        .await
        .expect("Lookup should succeed")
        .expect("Alice should be found by email");
    assert_eq!(found.id, alice.id);
    assert_eq!(found.name, "Alice");
    assert_eq!(found.password_hash, "hash-alice");

    let found = store
        .find_account_by_id(&alice.id)
        .await
        .expect("Lookup should succeed")
        .expect("Alice should be found by id");
    assert_eq!(found.email.as_str(), "alice@example.com");

    let missing = store
        .find_account_by_email(&email("nobody@example.com"))
        .await
        .expect("Lookup should succeed");
    assert!(missing.is_none());

    let missing = store
        .find_account_by_id(&AccountId::new("no-such-account"))
        .await
        .expect("Lookup should succeed");
    assert!(missing.is_none());

    // A fresh account owns nothing
    let products = store
        .list_products_for_owner(&bob.id)
        .await
        .expect("Listing should succeed");
    assert!(products.is_empty());

    // Products, listed in insertion order
    let mochila = store
        .create_product(&alice.id, "Mochila", price("19.99"))
        .await
        .expect("Creating a product should succeed");
    let taza = store
        .create_product(&alice.id, "Taza", price("5"))
        .await
        .expect("Creating a product should succeed");
    assert_ne!(mochila.id, taza.id);

    let products = store
        .list_products_for_owner(&alice.id)
        .await
        .expect("Listing should succeed");
    assert_eq!(products.len(), 2);
    assert_eq!(products[0].name, "Mochila");
    assert_eq!(products[0].price, price("19.99"));
    assert_eq!(products[1].name, "Taza");

    // Another owner cannot see or touch them
    let foreign = store
        .find_product_for_owner(&mochila.id, &bob.id)
        .await
        .expect("Lookup should succeed");
    assert!(foreign.is_none());

    let err = store
        .update_product(&mochila.id, &bob.id, "Robada", price("1"))
        .await
        .expect_err("Foreign update should be refused");
    assert!(matches!(err, StoreError::NotFound));

    let err = store
        .delete_product(&mochila.id, &bob.id)
        .await
        .expect_err("Foreign delete should be refused");
    assert!(matches!(err, StoreError::NotFound));

    // The owner can
    let found = store
        .find_product_for_owner(&mochila.id, &alice.id)
        .await
        .expect("Lookup should succeed")
        .expect("Owner should see the product");
    assert_eq!(found.name, "Mochila");
    assert_eq!(found.owner_id, alice.id);

    store
        .update_product(&mochila.id, &alice.id, "Mochila grande", price("25"))
        .await
        .expect("Owner update should succeed");
    let found = store
        .find_product_for_owner(&mochila.id, &alice.id)
        .await
        .expect("Lookup should succeed")
        .expect("Product should still exist");
    assert_eq!(found.name, "Mochila grande");
    assert_eq!(found.price, price("25"));

    store
        .delete_product(&taza.id, &alice.id)
        .await
        .expect("Owner delete should succeed");
    let err = store
        .delete_product(&taza.id, &alice.id)
        .await
        .expect_err("Second delete should find nothing");
    assert!(matches!(err, StoreError::NotFound));

    let products = store
        .list_products_for_owner(&alice.id)
        .await
        .expect("Listing should succeed");
    assert_eq!(products.len(), 1);

    // Ids that cannot belong to any backend resolve to nothing
    let missing = store
        .find_product_for_owner(&ProductId::new("definitely-not-an-id"), &alice.id)
        .await
        .expect("Lookup should succeed");
    assert!(missing.is_none());
}

// ============================================================================
// SQLite
// ============================================================================

#[tokio::test]
async fn test_relational_store_contract() {
    let store = relational_store().await;
    exercise_contract(&store).await;
}

#[tokio::test]
async fn test_relational_duplicate_race_yields_single_account() {
    // A plain `sqlite::memory:` database is private to its connection, so a
    // one-connection pool would serialize the inserts. A named shared-cache
    // database with two connections lets them overlap.
    let pool = SqlitePoolOptions::new()
        .max_connections(2)
        .connect("sqlite:file:tienda_race?mode=memory&cache=shared")
        .await
        .expect("Failed to open in-memory database");
    MIGRATOR.run(&pool).await.expect("Failed to run migrations");
    let store = RelationalStore::new(pool);
    let racer = email("race@example.com");

    let (first, second) = tokio::join!(
        store.create_account(&racer, "hash-one", "One"),
        store.create_account(&racer, "hash-two", "Two"),
    );

    // The unique index lets exactly one registration through, whichever
    // connection wins; the other insert lands on the index and is refused.
    let first_won = first.is_ok();
    assert!(first_won ^ second.is_ok());
    let loser = if first_won { second } else { first };
    assert!(matches!(loser, Err(StoreError::Conflict(_))));

    let stored = store
        .find_account_by_email(&racer)
        .await
        .expect("Lookup should succeed")
        .expect("The winning registration should be stored");
    let winner_hash = if first_won { "hash-one" } else { "hash-two" };
    assert_eq!(stored.password_hash, winner_hash);
}

// ============================================================================
// MongoDB
// ============================================================================

#[tokio::test]
#[ignore = "Requires a running MongoDB (set TIENDA_DB_HOST or TIENDA_DB_URL)"]
async fn test_document_store_contract() {
    let store = document_store().await;
    exercise_contract(&store).await;
}

#[tokio::test]
#[ignore = "Requires a running MongoDB (set TIENDA_DB_HOST or TIENDA_DB_URL)"]
async fn test_document_duplicate_race_is_not_serialized() {
    let store = document_store().await;
    let racer = email("race@example.com");

    let (first, second) = tokio::join!(
        store.create_account(&racer, "hash-one", "One"),
        store.create_account(&racer, "hash-two", "Two"),
    );

    // No unique index backs the pre-insert check, so both registrations
    // can succeed; at least one always does.
    assert!(first.is_ok() || second.is_ok());
}
