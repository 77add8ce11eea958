//! # Reporting Diagnostics
//!
//! Collection of the non-fatal problems met while ingesting, validating and
//! aggregating report data.
//!
//! ## Architectural Principles
//!
//! - **Layer 0 Logic:** no knowledge of periods or indicators; every other crate
//!   may hand its messages to an `ErrorManager`.
//! - **Accumulate, don't raise:** business-rule violations are recorded and
//!   inspected by the caller through `count()` / `all()`. Only absent data that
//!   the caller asked for without a silent fallback is an `Err`.
//!
//! ## Public API
//!
//! - `ErrorManager`: category-sorted, duplicate-suppressing message store.
//! - `FormData` / `FieldValue`: already-converted ingestion output.
//! - `DataValidator`: hook for business rules.
//! - `ValidationError`: the specific error types of this crate.

pub mod error;
pub mod form;
pub mod manager;

pub use error::ValidationError;
pub use form::{CONVERSION_CATEGORY, DataValidator, FieldValue, FormData, MISSING_CATEGORY};
pub use manager::{DEFAULT_CATEGORY, ErrorManager};
