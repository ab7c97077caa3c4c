// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use error::ConfigError;
pub use logging::init_tracing;
pub use settings::{Config, LoggingSettings, StoreSettings};

/// Loads the application configuration from `config.toml` and the environment.
///
/// This function is the primary entry point for this crate. Both sources are
/// optional; anything they leave out falls back to the defaults on `Config`.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from("config.toml")
}

/// Like [`load_config`], but reads the file at `path`.
///
/// Environment variables use the `SHOPTRACK` prefix and `__` between
/// sections, e.g. `SHOPTRACK__STORE__DATABASE_PATH`.
pub fn load_config_from(path: &str) -> Result<Config, ConfigError> {
    // A missing .env file is the normal case.
    dotenvy::dotenv().ok();

    let config = build_config(path, environment())?;
    tracing::debug!(
        path,
        database_path = %config.store.database_path.display(),
        max_connections = config.store.max_connections,
        "Loaded configuration"
    );
    Ok(config)
}

fn environment() -> config::Environment {
    config::Environment::with_prefix("SHOPTRACK")
        .separator("__")
        .try_parsing(true)
}

/// Layers `env` over the optional file at `path` and validates the result.
fn build_config(path: &str, env: config::Environment) -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::with_name(path).required(false))
        .add_source(env)
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    validate(&config)?;

    Ok(config)
}

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.store.database_path.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "store.database_path must not be empty".to_string(),
        ));
    }
    if config.store.max_connections == 0 {
        return Err(ConfigError::ValidationError(
            "store.max_connections must be at least 1".to_string(),
        ));
    }
    Ok(())
}
