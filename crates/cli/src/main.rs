//! Tienda CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Apply pending database migrations
//! tienda-cli migrate
//!
//! # Create a bootstrap account (defaults to admin@admin.com / admin)
//! tienda-cli seed
//!
//! # Create a specific account
//! tienda-cli seed -e alice@example.com -p s3cret -n "Alice"
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations (relational engine only)
//! - `seed` - Create a bootstrap account so the web UI is usable right away
//!
//! Both commands read the same `TIENDA_DB_*` environment variables as the
//! web server, so they operate on whichever engine the server would use.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "tienda-cli")]
#[command(author, version, about = "Tienda CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Create a bootstrap account
    Seed {
        /// Email address for the account
        #[arg(short, long, default_value = "admin@admin.com")]
        email: String,

        /// Password for the account
        #[arg(short, long, default_value = "admin")]
        password: String,

        /// Display name for the account
        #[arg(short, long, default_value = "Admin")]
        name: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seed {
            email,
            password,
            name,
        } => {
            commands::seed::account(&email, &password, &name).await?;
        }
    }
    Ok(())
}
