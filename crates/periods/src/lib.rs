//! # Reporting Periods
//!
//! Canonical time intervals for periodic reports.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** pure calendar arithmetic over `core-types`; storage is
//!   reached only through the `PeriodRegistry` trait.
//! - **Aligned by construction:** every non-custom period is produced by its
//!   kind's boundary rule, so two lookups of instants in the same unit always
//!   meet the same stored period.
//! - **Idempotent access:** `find_or_create` may be called any number of times
//!   with the same arguments and yields the same period.
//!
//! ## Public API
//!
//! - `PeriodIndex`: lookup-or-create and navigation over a registry.
//! - `boundaries_for`: the boundary rule of each `PeriodKind`.
//! - `PeriodRegistry` / `MemoryRegistry`: the storage contract and an in-memory store.
//! - `WeekResolver` / `CalendarWeeks`: week-number to week-range resolution.
//! - `PeriodError`, `RegistryError`: the specific error types of this crate.

pub mod boundaries;
pub mod error;
pub mod index;
pub mod registry;
pub mod weeks;

pub use boundaries::{Boundaries, boundaries_for};
pub use error::PeriodError;
pub use index::{CalendarSpec, PeriodIndex};
pub use registry::{MemoryRegistry, PeriodRegistry, RegistryError};
pub use weeks::{CalendarWeeks, WeekResolver};
