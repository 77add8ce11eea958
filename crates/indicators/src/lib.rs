//! # Reporting Indicators
//!
//! Computation of indicator tables: for one entity and an ordered list of
//! periods, the value of every declared line at every period, with optional
//! totals and percentages of a reference line.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** depends on `core-types`, `diagnostics` and the
//!   `configuration` option layers only. Raw data comes from the line
//!   functions of an `IndicatorSet`, usually through an `IndicatorSource`.
//! - **Static declaration:** lines are declared by each set as `IndicatorRow`
//!   descriptors; nothing is discovered at run time.
//! - **Absent is not wrong:** `IndicatorError::NoSourceData` from a line
//!   becomes an empty cell. Every other error aborts the computation.
//!
//! ## Public API
//!
//! - `IndicatorEngine`: option resolution, references and table building.
//! - `IndicatorSet` / `IndicatorRow`: the declaration of a table's lines.
//! - `IndicatorSource` / `MemorySource`: raw values per indicator, entity and period.
//! - `IndicatorTable`, `LineData`, `Cell`, `Column`: the computed output.
//! - `IndicatorError`: the specific error types of this crate.

pub mod engine;
pub mod error;
pub mod row;
pub mod source;
pub mod table;

pub use engine::{IndicatorEngine, RATE_OVERFLOW, SKIPPED_PERIODS};
pub use error::IndicatorError;
pub use row::{ComputeFn, IndicatorRow, IndicatorSet};
pub use source::{IndicatorSource, MemorySource};
pub use table::{Cell, Column, IndicatorTable, LineData};
