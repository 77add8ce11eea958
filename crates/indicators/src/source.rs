use crate::error::IndicatorError;
use core_types::{Entity, Period, PeriodId};
use rust_decimal::Decimal;
use std::collections::HashMap;
use uuid::Uuid;

/// Answers "value of indicator X for entity E at period P".
///
/// An ordinary absence of data is `Err(IndicatorError::NoSourceData)`.
pub trait IndicatorSource {
    fn indicator_value(
        &self,
        indicator: &str,
        entity: &Entity,
        period: &Period,
    ) -> Result<Decimal, IndicatorError>;
}

impl<T: IndicatorSource + ?Sized> IndicatorSource for &T {
    fn indicator_value(
        &self,
        indicator: &str,
        entity: &Entity,
        period: &Period,
    ) -> Result<Decimal, IndicatorError> {
        (**self).indicator_value(indicator, entity, period)
    }
}

/// Values held in memory, keyed by indicator, entity and period.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    values: HashMap<(String, Uuid, PeriodId), Decimal>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, indicator: &str, entity: &Entity, period: &Period, value: Decimal) {
        self.values
            .insert((indicator.to_string(), entity.id, period.id()), value);
    }

    pub fn with(mut self, indicator: &str, entity: &Entity, period: &Period, value: Decimal) -> Self {
        self.set(indicator, entity, period, value);
        self
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl IndicatorSource for MemorySource {
    fn indicator_value(
        &self,
        indicator: &str,
        entity: &Entity,
        period: &Period,
    ) -> Result<Decimal, IndicatorError> {
        self.values
            .get(&(indicator.to_string(), entity.id, period.id()))
            .copied()
            .ok_or(IndicatorError::NoSourceData)
    }
}
