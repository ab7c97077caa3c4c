use crate::error::ConfigError;
use crate::settings::LoggingSettings;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

type OutputLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Installs the global tracing subscriber described by `settings`.
///
/// `RUST_LOG` takes precedence over `settings.filter`. Fails if a global
/// subscriber is already set, so callers that may run twice (tests) can
/// ignore the error.
pub fn init_tracing(settings: &LoggingSettings) -> Result<(), ConfigError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&settings.filter).map_err(|e| {
            ConfigError::ValidationError(format!("invalid log filter '{}': {}", settings.filter, e))
        })?,
    };

    tracing_subscriber::registry()
        .with(output_layer(settings)?)
        .with(filter)
        .try_init()
        .map_err(|e| ConfigError::LoggingError(e.to_string()))
}

/// The fmt layer for `settings`: compact or JSON, to stdout or to a file.
fn output_layer(settings: &LoggingSettings) -> Result<OutputLayer, ConfigError> {
    let layer = match (&settings.file, settings.json) {
        (Some(path), json) => {
            let directory = path.parent().filter(|p| !p.as_os_str().is_empty());
            let file_name = path.file_name().ok_or_else(|| {
                ConfigError::ValidationError(format!("log file '{}' has no file name", path.display()))
            })?;
            let appender = tracing_appender::rolling::never(
                directory.unwrap_or_else(|| std::path::Path::new(".")),
                file_name,
            );
            let layer = fmt::layer().with_ansi(false).with_writer(appender);
            if json { layer.json().boxed() } else { layer.compact().boxed() }
        }
        (None, true) => fmt::layer().json().boxed(),
        (None, false) => fmt::layer().with_target(false).compact().boxed(),
    };
    Ok(layer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn log_to_file(path: PathBuf, json: bool) -> String {
        let settings = LoggingSettings {
            json,
            file: Some(path.clone()),
            ..LoggingSettings::default()
        };
        let subscriber = tracing_subscriber::registry().with(output_layer(&settings).unwrap());
        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(product_id = 7, "hello from the store");
        });
        std::fs::read_to_string(path).unwrap()
    }

    #[test]
    fn file_output_is_compact_text() {
        let dir = tempfile::tempdir().unwrap();
        let contents = log_to_file(dir.path().join("shoptrack.log"), false);

        assert!(contents.contains("hello from the store"));
        assert!(contents.contains("product_id=7"));
        assert!(!contents.trim_start().starts_with('{'));
    }

    #[test]
    fn file_output_can_be_json() {
        let dir = tempfile::tempdir().unwrap();
        let contents = log_to_file(dir.path().join("shoptrack.json"), true);
        let line = contents.lines().next().unwrap();

        assert!(line.starts_with('{') && line.ends_with('}'));
        assert!(line.contains("\"level\":\"INFO\""));
        assert!(line.contains("\"message\":\"hello from the store\""));
        assert!(line.contains("\"product_id\":7"));
    }

    #[test]
    fn stdout_json_layer_builds() {
        let settings = LoggingSettings {
            json: true,
            ..LoggingSettings::default()
        };
        assert!(output_layer(&settings).is_ok());
    }

    #[test]
    fn log_file_without_name_is_rejected() {
        let settings = LoggingSettings {
            file: Some(PathBuf::from("/")),
            ..LoggingSettings::default()
        };
        let err = output_layer(&settings).err().unwrap();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }
}
