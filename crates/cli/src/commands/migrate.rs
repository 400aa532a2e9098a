//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! tienda-cli migrate
//! ```
//!
//! # Environment Variables
//!
//! Reads the same `TIENDA_DB_*` variables as the web server (see
//! `tienda_web::config`). Migrations only exist for the relational engine;
//! the document engine creates its collections on first use.

use secrecy::ExposeSecret;
use sqlx::sqlite::SqlitePoolOptions;
use tracing::info;

use tienda_web::config::{BackendKind, DatabaseConfig};
use tienda_web::storage::relational::MIGRATOR;

/// Apply pending migrations to the relational database.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the database is
/// unreachable, or a migration fails.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let config = DatabaseConfig::from_env()?;

    if config.engine == BackendKind::Mongo {
        info!("Document engine selected; collections are created on first use");
        return Ok(());
    }

    let url = config.connection_url();

    info!("Connecting to database...");
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect(url.expose_secret())
        .await?;

    info!("Running migrations...");
    MIGRATOR.run(&pool).await?;

    info!("Migrations complete!");
    Ok(())
}
