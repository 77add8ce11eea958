use crate::enums::PeriodKind;
use crate::error::CoreError;
use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Registry-assigned identity of a period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PeriodId(pub u64);

impl fmt::Display for PeriodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A closed interval `[start_on, end_on]` tagged with its kind.
///
/// Periods are immutable once a registry hands them out. For every kind but
/// `Custom` the boundaries are the canonical ones of the kind's alignment rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "PeriodRecord")]
pub struct Period {
    id: PeriodId,
    kind: PeriodKind,
    start_on: DateTime<Utc>,
    end_on: DateTime<Utc>,
}

/// Unchecked wire form of a `Period`.
#[derive(Deserialize)]
struct PeriodRecord {
    id: PeriodId,
    kind: PeriodKind,
    start_on: DateTime<Utc>,
    end_on: DateTime<Utc>,
}

impl TryFrom<PeriodRecord> for Period {
    type Error = CoreError;

    fn try_from(record: PeriodRecord) -> Result<Self, Self::Error> {
        Period::new(record.id, record.kind, record.start_on, record.end_on)
    }
}

impl Period {
    pub fn new(
        id: PeriodId,
        kind: PeriodKind,
        start_on: DateTime<Utc>,
        end_on: DateTime<Utc>,
    ) -> Result<Self, CoreError> {
        if start_on > end_on {
            return Err(CoreError::InvalidInterval {
                start: start_on.to_rfc3339(),
                end: end_on.to_rfc3339(),
            });
        }
        Ok(Self {
            id,
            kind,
            start_on,
            end_on,
        })
    }

    pub fn id(&self) -> PeriodId {
        self.id
    }

    pub fn kind(&self) -> PeriodKind {
        self.kind
    }

    pub fn start_on(&self) -> DateTime<Utc> {
        self.start_on
    }

    pub fn end_on(&self) -> DateTime<Utc> {
        self.end_on
    }

    /// Instant at half of the period's duration.
    pub fn middle(&self) -> DateTime<Utc> {
        self.start_on + (self.end_on - self.start_on) / 2
    }

    /// Strict interior test: neither boundary instant is included.
    pub fn includes(&self, instant: DateTime<Utc>) -> bool {
        self.start_on < instant && instant < self.end_on
    }

    /// Whether both periods describe the same `(start, end, kind)` triple.
    pub fn same_interval(&self, other: &Period) -> bool {
        self.kind == other.kind && self.start_on == other.start_on && self.end_on == other.end_on
    }

    /// Human readable label of the period, e.g. `03 2024` for a month.
    pub fn name(&self) -> String {
        let middle = self.middle();
        match self.kind {
            PeriodKind::Day => middle.format("%Y-%m-%d").to_string(),
            PeriodKind::Week => format!("Week of {}", self.start_on.format("%Y-%m-%d")),
            PeriodKind::Month => middle.format("%m %Y").to_string(),
            PeriodKind::Quarter => format!("Q{} {}", (middle.month0() / 3) + 1, middle.year()),
            PeriodKind::Semester => format!("S{} {}", (middle.month0() / 6) + 1, middle.year()),
            PeriodKind::Year => middle.format("%Y").to_string(),
            PeriodKind::Custom => format!(
                "{} - {}",
                self.start_on.format("%Y-%m-%d %H:%M"),
                self.end_on.format("%Y-%m-%d %H:%M")
            ),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}
