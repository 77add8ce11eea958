use crate::error::CoreError;
use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The calendar unit a `Period` is aligned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodKind {
    Day,
    Week,
    Month,
    Quarter,
    Semester,
    Year,
    /// Caller-supplied interval with no alignment rule.
    Custom,
}

impl PeriodKind {
    /// Smallest representable step between two instants of a period boundary.
    /// An aligned period ends exactly one tick before its successor begins.
    pub const TICK_MICROS: i64 = 1;

    pub fn tick() -> Duration {
        Duration::microseconds(Self::TICK_MICROS)
    }

    /// Every kind, in increasing order of length.
    pub fn all() -> [PeriodKind; 7] {
        [
            PeriodKind::Day,
            PeriodKind::Week,
            PeriodKind::Month,
            PeriodKind::Quarter,
            PeriodKind::Semester,
            PeriodKind::Year,
            PeriodKind::Custom,
        ]
    }

    /// Nominal length in days, used only to step from one period to the next.
    ///
    /// Approximate for the irregular kinds (a month is 28 days); the stepped
    /// instant is realigned by the boundary rule.
    pub fn delta_days(&self) -> Option<i64> {
        match self {
            PeriodKind::Day => Some(1),
            PeriodKind::Week => Some(7),
            PeriodKind::Month => Some(28),
            PeriodKind::Quarter => Some(91),
            PeriodKind::Semester => Some(182),
            PeriodKind::Year => Some(365),
            PeriodKind::Custom => None,
        }
    }

    pub fn delta(&self) -> Option<Duration> {
        self.delta_days().map(Duration::days)
    }

    pub fn is_aligned(&self) -> bool {
        !matches!(self, PeriodKind::Custom)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PeriodKind::Day => "day",
            PeriodKind::Week => "week",
            PeriodKind::Month => "month",
            PeriodKind::Quarter => "quarter",
            PeriodKind::Semester => "semester",
            PeriodKind::Year => "year",
            PeriodKind::Custom => "custom",
        }
    }

    /// Human readable name of the kind.
    pub fn label(&self) -> &'static str {
        match self {
            PeriodKind::Day => "Day",
            PeriodKind::Week => "Week",
            PeriodKind::Month => "Month",
            PeriodKind::Quarter => "Quarter",
            PeriodKind::Semester => "Semester",
            PeriodKind::Year => "Year",
            PeriodKind::Custom => "Custom",
        }
    }
}

impl fmt::Display for PeriodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PeriodKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PeriodKind::all()
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CoreError::InvalidInput("period kind".to_string(), s.to_string()))
    }
}

/// Lifecycle of a submitted report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReportStatus {
    Unsaved,
    Created,
    Incomplete,
    Erroneous,
    Complete,
    Closed,
}

impl ReportStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::Unsaved => "Unsaved",
            ReportStatus::Created => "Created",
            ReportStatus::Incomplete => "Incomplete",
            ReportStatus::Erroneous => "Erroneous",
            ReportStatus::Complete => "Complete",
            ReportStatus::Closed => "Closed",
        }
    }
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
