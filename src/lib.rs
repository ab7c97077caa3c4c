//! Personal shopping tracker: users, the products they own, and the SQLite
//! store behind them.
//!
//! This package only stitches the workspace crates together. Open a store with
//! [`open_store`] (or [`database::connect`] for a bare pool) and call the CRUD
//! operations on the returned [`DbRepository`].

pub use configuration::{Config, ConfigError, LoggingSettings, StoreSettings, init_tracing, load_config};
pub use core_types::{BoughtFlag, CoreError, Product, ProductFilter, Rating, User};
pub use database::{DbError, DbRepository, connect, run_migrations};
pub use sqlx::sqlite::SqlitePool;

/// Connects to the store described by `settings`, makes sure the schema exists
/// and wraps the pool in a repository.
pub async fn open_store(settings: &StoreSettings) -> Result<DbRepository, DbError> {
    let pool = connect(settings).await?;
    run_migrations(&pool).await?;
    tracing::info!(path = %settings.database_path.display(), "Store ready");
    Ok(DbRepository::new(pool))
}
