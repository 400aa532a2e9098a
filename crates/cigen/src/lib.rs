//! Interactive CI/CD pipeline generator.
//!
//! Asks a short sequence of console questions and produces two files: a
//! ready-to-commit pipeline definition for GitHub Actions or GitLab CI, and
//! a Markdown document listing every secret/variable the pipeline expects
//! together with where to obtain its value.
//!
//! ## Modules
//!
//! - `config` - the flat configuration record the questions produce
//! - `generate` - end-to-end wiring: questions, render, file writes
//! - `prompt` - console prompting seam
//! - `questions` - the question flow itself
//! - `render` - tera rendering of the embedded pipeline templates
//! - `summary` - the companion instructions document
//! - `testing` - scripted prompter for driving the flow in tests

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod generate;
pub mod prompt;
pub mod questions;
pub mod render;
pub mod summary;

pub mod testing;
