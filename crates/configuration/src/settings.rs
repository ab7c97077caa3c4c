use serde::Deserialize;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub store: StoreSettings,
    pub logging: LoggingSettings,
}

/// Where the SQLite store lives and how connections to it are handed out.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    /// Path of the SQLite database file.
    pub database_path: PathBuf,
    /// The store is a single-writer file, so one connection is the sane default.
    pub max_connections: u32,
    /// How long an operation waits for a free connection before failing.
    pub acquire_timeout_secs: u64,
    pub create_if_missing: bool,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("database.db"),
            max_connections: 1,
            acquire_timeout_secs: 5,
            create_if_missing: true,
        }
    }
}

impl StoreSettings {
    /// Settings for a database file at `path`, everything else defaulted.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            database_path: path.into(),
            ..Self::default()
        }
    }
}

/// Parameters for the tracing subscriber.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// An `EnvFilter` directive, used when `RUST_LOG` is not set.
    pub filter: String,
    /// Emit one JSON object per event instead of the compact text format.
    pub json: bool,
    /// Write to this file instead of stdout.
    pub file: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            json: false,
            file: None,
        }
    }
}
