use crate::error::DbError;
use configuration::StoreSettings;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::time::Duration;

/// Opens a connection pool to the SQLite store described by `settings`.
///
/// The caller owns the returned pool and passes it to `DbRepository::new`;
/// nothing in this crate keeps a global handle to the store.
pub async fn connect(settings: &StoreSettings) -> Result<SqlitePool, DbError> {
    if settings.database_path.as_os_str().is_empty() {
        return Err(DbError::ConnectionConfigError(
            "database_path must be set.".to_string(),
        ));
    }

    // Ownership between users and products is a convention, not a constraint.
    let options = SqliteConnectOptions::new()
        .filename(&settings.database_path)
        .create_if_missing(settings.create_if_missing)
        .journal_mode(SqliteJournalMode::Wal)
        .foreign_keys(false);

    let pool = SqlitePoolOptions::new()
        .max_connections(settings.max_connections.max(1))
        .acquire_timeout(Duration::from_secs(settings.acquire_timeout_secs))
        .connect_with(options)
        .await?;

    tracing::debug!(path = %settings.database_path.display(), "Connected to store");
    Ok(pool)
}

/// Applies the embedded schema so both tables exist before first use.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), DbError> {
    // Embedded at build time from this crate's migrations directory.
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
