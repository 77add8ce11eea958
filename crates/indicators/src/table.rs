use core_types::{Period, PeriodId};
use diagnostics::ErrorManager;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

/// One value of a line for one period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Cell {
    pub value: Option<Decimal>,
    pub percent: Option<Decimal>,
}

impl Cell {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_none() && self.percent.is_none()
    }
}

/// A period column of the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Column {
    pub id: PeriodId,
    pub name: String,
}

impl From<&Period> for Column {
    fn from(period: &Period) -> Self {
        Self {
            id: period.id(),
            name: period.name(),
        }
    }
}

/// The computed values of one indicator line across every period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineData {
    pub name: String,
    pub label: String,
    pub index: i32,
    pub is_reference: bool,
    pub values: BTreeMap<PeriodId, Cell>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<Cell>,
}

impl LineData {
    pub fn cell(&self, period: PeriodId) -> Option<&Cell> {
        self.values.get(&period)
    }

    pub fn value(&self, period: PeriodId) -> Option<Decimal> {
        self.cell(period).and_then(|cell| cell.value)
    }

    pub fn percent(&self, period: PeriodId) -> Option<Decimal> {
        self.cell(period).and_then(|cell| cell.percent)
    }
}

/// The final output of the `IndicatorEngine`: a two-dimensional table of
/// lines by periods, ordered by `(index, name)`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorTable {
    pub columns: Vec<Column>,
    pub lines: Vec<LineData>,
    /// Non-fatal notes gathered while computing, such as skipped periods.
    pub diagnostics: ErrorManager,
}

impl IndicatorTable {
    pub fn line(&self, name: &str) -> Option<&LineData> {
        self.lines.iter().find(|line| line.name == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.lines.iter().map(|line| line.name.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
