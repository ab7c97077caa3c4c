//! # Shoptrack Database Crate
//!
//! This crate is the data-access layer for users and the products they track.
//! It owns every SQL statement in the system and hides them behind
//! `DbRepository`.
//!
//! ## Architectural Principles
//!
//! - **Injected store handle:** Nothing here knows where the database lives.
//!   The caller opens a pool with `connect` and hands it to `DbRepository::new`.
//! - **One connection per operation:** Each repository method acquires one
//!   pooled connection and releases it before returning.
//! - **Typed rows:** Rows decode straight into `core_types::{User, Product}`.
//!
//! ## Public API
//!
//! - `connect`: Opens the SQLite connection pool.
//! - `run_migrations`: Creates the `users` and `products` tables if needed.
//! - `DbRepository`: All create, list, buy, rate and delete operations.
//! - `DbError`: The specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod connection;
pub mod error;
pub mod repository;

// Re-export the key components to create a clean, public-facing API.
pub use connection::{connect, run_migrations};
pub use error::DbError;
pub use repository::DbRepository;
