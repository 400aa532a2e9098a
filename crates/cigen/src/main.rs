//! Tienda CI generator - interactive pipeline wizard.
//!
//! Asks a short series of questions on the console and writes two files
//! under the current directory: the pipeline YAML for the chosen platform
//! (GitHub Actions or GitLab CI) and a Markdown document explaining every
//! secret/variable the pipeline needs.
//!
//! # Usage
//!
//! ```bash
//! tienda-cigen
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::env;

use anyhow::{Context as _, Result};
use tracing_subscriber::EnvFilter;

use tienda_cigen::generate;
use tienda_cigen::prompt::StdinPrompter;

fn main() -> Result<()> {
    // Diagnostics go to stderr so they never mix with the wizard's prompts.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let root = env::current_dir().context("current directory is not accessible")?;
    generate::run(&StdinPrompter, &root)?;
    Ok(())
}
