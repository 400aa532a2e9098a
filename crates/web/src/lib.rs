//! Tienda web application library.
//!
//! This crate provides the product-list application as a library,
//! allowing it to be tested in-process and reused by the cli.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod storage;
