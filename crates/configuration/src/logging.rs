use crate::error::ConfigError;
use crate::settings::LoggingSettings;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Installs the global tracing subscriber described by `settings`.
///
/// `RUST_LOG` overrides the configured level. When a log directory is set the
/// returned guard must be kept alive for buffered lines to be flushed.
pub fn init_tracing(settings: &LoggingSettings) -> Result<Option<WorkerGuard>, ConfigError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.level))
        .map_err(|e| ConfigError::Logging(e.to_string()))?;

    match &settings.directory {
        Some(directory) => {
            let appender = tracing_appender::rolling::daily(directory, &settings.file_prefix);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let subscriber = FmtSubscriber::builder()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(writer)
                .finish();
            tracing::subscriber::set_global_default(subscriber)
                .map_err(|e| ConfigError::Logging(e.to_string()))?;
            tracing::info!(directory = %directory.display(), "File logging enabled.");
            Ok(Some(guard))
        }
        None => {
            let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
            tracing::subscriber::set_global_default(subscriber)
                .map_err(|e| ConfigError::Logging(e.to_string()))?;
            Ok(None)
        }
    }
}
