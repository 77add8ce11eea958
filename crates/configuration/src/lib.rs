// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod options;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use error::ConfigError;
pub use logging::init_tracing;
pub use options::{OptionOverrides, TableOptions};
pub use settings::{LoggingSettings, PeriodSettings, Settings};

/// Prefix of the environment variables that override file settings,
/// e.g. `REPORTING__TABLE__WITH_TOTAL=true`.
pub const ENV_PREFIX: &str = "REPORTING";

/// Loads the settings from `reporting.toml` (if present) and the environment.
pub fn load_settings() -> Result<Settings, ConfigError> {
    load_settings_from("reporting")
}

/// Loads the settings from the file named `path` (any extension the `config`
/// crate understands, optional) and then from `REPORTING__*` variables.
pub fn load_settings_from(path: &str) -> Result<Settings, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::with_name(path).required(false))
        .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
        .build()?;

    // Attempt to deserialize the entire configuration into our `Settings` struct
    let settings = builder.try_deserialize::<Settings>()?;
    settings.validate()?;

    Ok(settings)
}
