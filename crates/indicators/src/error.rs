use diagnostics::ValidationError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IndicatorError {
    /// The combination of indicator, entity and period has nothing to report.
    /// The engine turns it into an empty value; it never leaves the engine.
    #[error("No source data")]
    NoSourceData,

    #[error("Missing data for indicator '{indicator}' at {period}")]
    MissingData { indicator: String, period: String },

    #[error("Indicator configuration error: {0}")]
    Configuration(String),

    #[error("Unknown indicator row '{0}'")]
    UnknownRow(String),

    #[error("Total of indicator '{0}' overflows")]
    Overflow(String),

    #[error("Data source failure: {0}")]
    Source(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}
