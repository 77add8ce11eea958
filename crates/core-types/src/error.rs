use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Invalid input for {0}: {1}")]
    InvalidInput(String, String),

    #[error("Period must not end before it starts: {start} > {end}")]
    InvalidInterval { start: String, end: String },

    #[error("Report cannot move from {from} to {to}")]
    InvalidTransition { from: String, to: String },
}
