use crate::error::ConfigError;
use crate::options::OptionOverrides;
use serde::Deserialize;
use std::path::PathBuf;

/// The root configuration structure for the reporting system.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Deployment-wide table switches, applied on top of the built-in defaults.
    pub table: OptionOverrides,
    pub periods: PeriodSettings,
    pub logging: LoggingSettings,
}

/// Contains parameters for period resolution.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PeriodSettings {
    /// Resolve week numbers with ISO-8601 rules (Monday-first, week 1 holds
    /// the first Thursday). When false, weeks start on Sunday and week 1 begins
    /// on the first Sunday of the year.
    pub iso_weeks: bool,
}

/// Contains parameters for the tracing subscriber.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default filter directive; `RUST_LOG` takes precedence when set.
    pub level: String,
    /// When set, logs go to a daily rolling file in this directory.
    pub directory: Option<PathBuf>,
    pub file_prefix: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
            file_prefix: "reporting.log".to_string(),
        }
    }
}

const LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

impl Settings {
    /// Parses settings from TOML text, without consulting the environment.
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?
            .try_deserialize::<Settings>()?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let level = self.logging.level.trim().to_ascii_lowercase();
        if !LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "logging.level must be one of {:?}, got '{}'",
                LEVELS, self.logging.level
            )));
        }
        if self.logging.directory.is_some() && self.logging.file_prefix.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "logging.file_prefix cannot be empty when a log directory is set".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let settings = Settings::from_toml_str("").unwrap();
        assert_eq!(settings.table, OptionOverrides::default());
        assert!(!settings.periods.iso_weeks);
        assert_eq!(settings.logging.level, "info");
        assert!(settings.logging.directory.is_none());
    }

    #[test]
    fn sections_are_read() {
        let settings = Settings::from_toml_str(
            r#"
            [table]
            with_total = true
            with_percentage = true

            [periods]
            iso_weeks = true

            [logging]
            level = "debug"
            "#,
        )
        .unwrap();
        assert_eq!(settings.table.with_total, Some(true));
        assert_eq!(settings.table.with_percentage, Some(true));
        assert_eq!(settings.table.with_data, None);
        assert!(settings.periods.iso_weeks);
        assert_eq!(settings.logging.level, "debug");
    }

    #[test]
    fn unknown_level_is_rejected() {
        let result = Settings::from_toml_str("[logging]\nlevel = \"loud\"\n");
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }
}
