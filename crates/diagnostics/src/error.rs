use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Expected data is missing: {0}")]
    MissingData(String),

    #[error("Data is invalidated by business rules: {0}")]
    IncorrectData(String),

    #[error("{value} is not a valid data for {field}")]
    Conversion { field: String, value: String },
}
