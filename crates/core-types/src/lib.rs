pub mod entity;
pub mod enums;
pub mod error;
pub mod period;
pub mod report;

// Re-export the core types to provide a clean public API.
pub use entity::{Entity, EntityType};
pub use enums::{PeriodKind, ReportStatus};
pub use error::CoreError;
pub use period::{Period, PeriodId};
pub use report::{ReceiptGenerator, Report};
