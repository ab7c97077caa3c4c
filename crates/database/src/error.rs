use core_types::CoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Invalid database configuration: {0}")]
    ConnectionConfigError(String),

    /// Any failure reported by the store itself, with the driver error kept as the source.
    #[error("Store operation failed: {0}")]
    Store(#[from] sqlx::Error),

    #[error("Database migration failed: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),

    #[error("You have already bought this product")]
    AlreadyBought,

    #[error("{0}")]
    NoProductsDeleted(String),

    /// A domain value, such as a rating, was rejected before reaching the store.
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("The requested data was not found in the database.")]
    NotFound,
}

