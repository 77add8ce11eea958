use crate::registry::RegistryError;
use core_types::PeriodKind;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PeriodError {
    #[error("Invalid calendar date: {0}")]
    InvalidDate(String),

    #[error("Week {week} does not exist in {year}")]
    InvalidWeek { year: i32, week: u32 },

    #[error("{0} periods have no alignment rule")]
    Unaligned(PeriodKind),

    #[error("Boundaries {start} - {end} are not aligned to {kind} periods")]
    Misaligned {
        kind: PeriodKind,
        start: String,
        end: String,
    },

    #[error("Period must not end before it starts: {start} > {end}")]
    InvalidInterval { start: String, end: String },

    #[error("Period registry failure: {0}")]
    Registry(#[from] RegistryError),
}
