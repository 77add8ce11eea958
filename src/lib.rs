//! # Reportbook
//!
//! Periodic statistical reports over a hierarchy of entities: canonical
//! reporting periods, indicator tables with totals and reference
//! percentages, and the bookkeeping of non-fatal data problems.
//!
//! This crate is the facade of the workspace. It re-exports the public API of
//! every layer and ties the deployment `Settings` to the period index and the
//! indicator engine through `Reporting`.

use chrono::{DateTime, Utc};
use thiserror::Error;

pub use configuration::{
    ConfigError, LoggingSettings, OptionOverrides, PeriodSettings, Settings, TableOptions,
    init_tracing, load_settings, load_settings_from,
};
pub use core_types::{
    CoreError, Entity, EntityType, Period, PeriodId, PeriodKind, ReceiptGenerator, Report,
    ReportStatus,
};
pub use diagnostics::{
    CONVERSION_CATEGORY, DEFAULT_CATEGORY, DataValidator, ErrorManager, FieldValue, FormData,
    MISSING_CATEGORY, ValidationError,
};
pub use indicators::{
    Cell, Column, IndicatorEngine, IndicatorError, IndicatorRow, IndicatorSet, IndicatorSource,
    IndicatorTable, LineData, MemorySource,
};
pub use periods::{
    CalendarSpec, CalendarWeeks, MemoryRegistry, PeriodError, PeriodIndex, PeriodRegistry,
    RegistryError, WeekResolver,
};

#[derive(Error, Debug)]
pub enum ReportingError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Period(#[from] PeriodError),

    #[error(transparent)]
    Indicator(#[from] IndicatorError),
}

/// A deployment: its settings and the period index over its registry.
#[derive(Debug)]
pub struct Reporting<R> {
    settings: Settings,
    index: PeriodIndex<R>,
}

impl<R: PeriodRegistry> Reporting<R> {
    pub fn new(settings: Settings, registry: R) -> Self {
        let index = PeriodIndex::from_settings(registry, &settings.periods);
        Self { settings, index }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn periods(&mut self) -> &mut PeriodIndex<R> {
        &mut self.index
    }

    /// An engine whose caller layer is the deployment table switches
    /// overridden by `overrides`.
    pub fn engine<'a, S: IndicatorSet>(
        &self,
        set: &'a S,
        entity: &'a Entity,
        periods: &'a [Period],
        overrides: &OptionOverrides,
    ) -> Result<IndicatorEngine<'a, S>, IndicatorError> {
        IndicatorEngine::new(set, entity, periods, &self.settings.table.then(overrides))
    }

    /// Builds the table of `count` consecutive `kind` periods starting with
    /// the one holding `from`.
    pub fn table<S: IndicatorSet>(
        &mut self,
        set: &S,
        entity: &Entity,
        kind: PeriodKind,
        from: DateTime<Utc>,
        count: usize,
        overrides: &OptionOverrides,
    ) -> Result<IndicatorTable, ReportingError> {
        let periods = self.index.series(kind, from, count)?;
        tracing::debug!(%kind, count = periods.len(), entity = %entity.slug, "Periods resolved.");
        let engine = self.engine(set, entity, &periods, overrides)?;
        Ok(engine.build()?)
    }
}
