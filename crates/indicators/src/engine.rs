use crate::error::IndicatorError;
use crate::row::{IndicatorRow, IndicatorSet};
use crate::table::{Cell, Column, IndicatorTable, LineData};
use configuration::{OptionOverrides, TableOptions};
use core_types::{Entity, Period};
use diagnostics::ErrorManager;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::{debug, info, warn};

/// Diagnostics category for periods skipped by `IndicatorSet::period_is_valid`.
pub const SKIPPED_PERIODS: &str = "periods";
/// Diagnostics category for percentages that could not be represented.
pub const RATE_OVERFLOW: &str = "rates";

/// Computes the indicator table of one entity over an ordered list of periods.
///
/// Construction resolves the options and the reference of every line, so a
/// table build never fails on configuration.
#[derive(Debug)]
pub struct IndicatorEngine<'a, S: IndicatorSet> {
    set: &'a S,
    entity: &'a Entity,
    periods: &'a [Period],
    options: TableOptions,
    rows: Vec<IndicatorRow<S>>,
    /// Denominator line of every line whose reference could be resolved.
    references: HashMap<&'static str, &'static str>,
}

impl<'a, S: IndicatorSet> IndicatorEngine<'a, S> {
    /// Creates an engine with the caller's `overrides` layered over the
    /// set's defaults, themselves layered over `TableOptions::default()`.
    pub fn new(
        set: &'a S,
        entity: &'a Entity,
        periods: &'a [Period],
        overrides: &OptionOverrides,
    ) -> Result<Self, IndicatorError> {
        let options = TableOptions::layered([&S::default_options(), overrides]);
        let rows = S::rows();

        let mut seen = HashSet::new();
        for row in &rows {
            if !seen.insert(row.name) {
                return Err(IndicatorError::Configuration(format!(
                    "indicator '{}' is declared twice",
                    row.name
                )));
            }
        }

        let references = resolve_references(&rows, options.with_percentage)?;
        debug!(
            entity = %entity.slug,
            periods = periods.len(),
            rows = rows.len(),
            ?options,
            "Indicator engine ready"
        );

        Ok(Self {
            set,
            entity,
            periods,
            options,
            rows,
            references,
        })
    }

    pub fn options(&self) -> TableOptions {
        self.options
    }

    pub fn entity(&self) -> &Entity {
        self.entity
    }

    pub fn periods(&self) -> &[Period] {
        self.periods
    }

    /// Lines in declaration order.
    pub fn rows(&self) -> &[IndicatorRow<S>] {
        &self.rows
    }

    pub fn row(&self, name: &str) -> Result<&IndicatorRow<S>, IndicatorError> {
        self.rows
            .iter()
            .find(|row| row.name == name)
            .ok_or_else(|| IndicatorError::UnknownRow(name.to_string()))
    }

    /// The line percentages of `name` are computed against.
    pub fn reference_row_of(&self, name: &str) -> Result<&IndicatorRow<S>, IndicatorError> {
        let row = self.row(name)?;
        let reference = self.references.get(row.name).ok_or_else(|| {
            IndicatorError::Configuration(format!("indicator '{}' has no reference line", row.name))
        })?;
        self.row(reference)
    }

    /// Value of line `name` at `period`, `None` when the source has nothing.
    pub fn get_indicator_data(
        &self,
        name: &str,
        period: &Period,
    ) -> Result<Option<Decimal>, IndicatorError> {
        let row = self.row(name)?;
        match row.compute(self.set, self.entity, period) {
            Ok(value) => Ok(Some(value)),
            Err(IndicatorError::NoSourceData) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Ratio of line `name` to its reference line at `period`.
    ///
    /// A reference line is 1 against itself. A missing value gives `None` and
    /// a zero reference gives 0.
    pub fn get_indicator_rate(
        &self,
        name: &str,
        period: &Period,
    ) -> Result<Option<Decimal>, IndicatorError> {
        let value = self.get_indicator_data(name, period)?;
        let mut notes = ErrorManager::new();
        self.rate_of(name, period, value, &mut notes)
    }

    /// Every cell of line `name`, plus its total when enabled.
    pub fn get_line_data(&self, name: &str) -> Result<LineData, IndicatorError> {
        let row = self.row(name)?;
        let mut notes = ErrorManager::new();
        self.line_data(row, &mut notes)
    }

    /// Computes the whole table.
    pub fn build(&self) -> Result<IndicatorTable, IndicatorError> {
        info!(
            entity = %self.entity.slug,
            periods = self.periods.len(),
            "Building indicator table"
        );

        let mut ordered: Vec<&IndicatorRow<S>> = self
            .rows
            .iter()
            .filter(|row| self.options.with_reference || !row.is_reference)
            .collect();
        ordered.sort_by_key(|row| row.sort_key());

        let mut notes = ErrorManager::new();
        let lines = ordered
            .into_iter()
            .map(|row| self.line_data(row, &mut notes))
            .collect::<Result<Vec<_>, _>>()?;

        if !notes.is_empty() {
            warn!(count = notes.count(), "Indicator table built with notes");
        }

        Ok(IndicatorTable {
            columns: self.periods.iter().map(Column::from).collect(),
            lines,
            diagnostics: notes,
        })
    }

    fn line_data(
        &self,
        row: &IndicatorRow<S>,
        notes: &mut ErrorManager,
    ) -> Result<LineData, IndicatorError> {
        let mut values = BTreeMap::new();
        let mut total = Decimal::ZERO;

        for period in self.periods {
            if !self.set.period_is_valid(self.entity, period) {
                notes.add_to(
                    SKIPPED_PERIODS,
                    format!(
                        "{} has no valid data for {}",
                        period.name(),
                        self.entity.display_name()
                    ),
                );
                values.insert(period.id(), Cell::empty());
                continue;
            }

            let value = self.get_indicator_data(row.name, period)?;
            let percent = if self.options.with_percentage {
                self.rate_of(row.name, period, value, notes)?
            } else {
                None
            };

            if let Some(value) = value {
                total = total
                    .checked_add(value)
                    .ok_or_else(|| IndicatorError::Overflow(row.name.to_string()))?;
            }

            values.insert(
                period.id(),
                Cell {
                    value: value.filter(|_| self.options.with_data),
                    percent,
                },
            );
        }

        let total = self.options.with_total.then(|| Cell {
            value: Some(total).filter(|_| self.options.with_data),
            percent: Some(Decimal::ONE),
        });

        Ok(LineData {
            name: row.name.to_string(),
            label: row.display_label().to_string(),
            index: row.index,
            is_reference: row.is_reference,
            values,
            total,
        })
    }

    fn rate_of(
        &self,
        name: &str,
        period: &Period,
        value: Option<Decimal>,
        notes: &mut ErrorManager,
    ) -> Result<Option<Decimal>, IndicatorError> {
        let reference = self.reference_row_of(name)?;
        if reference.name == name {
            return Ok(Some(Decimal::ONE));
        }
        let Some(value) = value else {
            return Ok(None);
        };
        let Some(reference_value) = self.get_indicator_data(reference.name, period)? else {
            return Ok(None);
        };
        if reference_value.is_zero() {
            return Ok(Some(Decimal::ZERO));
        }

        match value.checked_div(reference_value) {
            Some(rate) => Ok(Some(rate)),
            None => {
                warn!(indicator = name, period = %period.id(), "Rate is out of range");
                notes.add_to(
                    RATE_OVERFLOW,
                    format!("{} / {} at {} is out of range", name, reference.name, period.name()),
                );
                Ok(None)
            }
        }
    }
}

/// Maps every line to its denominator line.
///
/// Explicit references must name a declared line. The others fall back to
/// the unique line flagged as reference; when percentages are requested that
/// line has to exist.
fn resolve_references<S>(
    rows: &[IndicatorRow<S>],
    with_percentage: bool,
) -> Result<HashMap<&'static str, &'static str>, IndicatorError> {
    let flagged: Vec<&'static str> = rows
        .iter()
        .filter(|row| row.is_reference)
        .map(|row| row.name)
        .collect();

    let mut references = HashMap::new();
    for row in rows {
        let reference = if let Some(explicit) = row.reference {
            if !rows.iter().any(|candidate| candidate.name == explicit) {
                return Err(IndicatorError::Configuration(format!(
                    "indicator '{}' refers to unknown line '{}'",
                    row.name, explicit
                )));
            }
            explicit
        } else if row.is_reference {
            row.name
        } else {
            match flagged.as_slice() {
                [only] => *only,
                [] if with_percentage => {
                    return Err(IndicatorError::Configuration(format!(
                        "no reference line for indicator '{}'",
                        row.name
                    )));
                }
                _ if with_percentage => {
                    return Err(IndicatorError::Configuration(format!(
                        "ambiguous reference for indicator '{}': {}",
                        row.name,
                        flagged.join(", ")
                    )));
                }
                _ => continue,
            }
        };
        references.insert(row.name, reference);
    }
    Ok(references)
}
