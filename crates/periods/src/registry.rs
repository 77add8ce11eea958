use chrono::{DateTime, Utc};
use core_types::{CoreError, Period, PeriodId, PeriodKind};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Period registry is unavailable: {0}")]
    Unavailable(String),

    #[error("Period registry is corrupt: {0}")]
    Corrupt(String),

    #[error("A {kind} period already exists for {start} - {end}")]
    Duplicate {
        kind: PeriodKind,
        start: String,
        end: String,
    },

    #[error("Rejected period: {0}")]
    Rejected(#[from] CoreError),
}

/// The backing store of periods.
///
/// Each call is assumed atomic. A store shared between writers must make
/// `create` an "insert if absent" operation so that no two periods share the
/// same `(start, end, kind)` triple.
pub trait PeriodRegistry {
    fn get(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        kind: PeriodKind,
    ) -> Result<Option<Period>, RegistryError>;

    fn create(
        &mut self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        kind: PeriodKind,
    ) -> Result<Period, RegistryError>;

    /// Every stored period of `kind`, earliest first.
    fn list(&self, kind: PeriodKind) -> Result<Vec<Period>, RegistryError>;
}

type IntervalKey = (PeriodKind, DateTime<Utc>, DateTime<Utc>);

/// A registry held in memory, handing out sequential ids.
#[derive(Debug, Default)]
pub struct MemoryRegistry {
    periods: Vec<Period>,
    by_interval: HashMap<IntervalKey, usize>,
}

impl MemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.periods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }
}

impl PeriodRegistry for MemoryRegistry {
    fn get(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        kind: PeriodKind,
    ) -> Result<Option<Period>, RegistryError> {
        Ok(self
            .by_interval
            .get(&(kind, start, end))
            .map(|&idx| self.periods[idx].clone()))
    }

    fn create(
        &mut self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        kind: PeriodKind,
    ) -> Result<Period, RegistryError> {
        let key = (kind, start, end);
        if self.by_interval.contains_key(&key) {
            return Err(RegistryError::Duplicate {
                kind,
                start: start.to_rfc3339(),
                end: end.to_rfc3339(),
            });
        }
        let id = PeriodId(self.periods.len() as u64 + 1);
        let period = Period::new(id, kind, start, end)?;
        self.by_interval.insert(key, self.periods.len());
        self.periods.push(period.clone());
        Ok(period)
    }

    fn list(&self, kind: PeriodKind) -> Result<Vec<Period>, RegistryError> {
        let mut periods: Vec<Period> = self
            .periods
            .iter()
            .filter(|p| p.kind() == kind)
            .cloned()
            .collect();
        periods.sort_by_key(|p| (p.start_on(), p.end_on()));
        Ok(periods)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn create_refuses_duplicates() {
        let mut registry = MemoryRegistry::new();
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();

        let period = registry.create(start, end, PeriodKind::Custom).unwrap();
        assert_eq!(period.id(), PeriodId(1));
        assert!(matches!(
            registry.create(start, end, PeriodKind::Custom),
            Err(RegistryError::Duplicate { .. })
        ));

        // Same boundaries under another kind are a distinct period.
        let other = registry.create(start, end, PeriodKind::Day).unwrap();
        assert_eq!(other.id(), PeriodId(2));
        assert_eq!(registry.get(start, end, PeriodKind::Custom).unwrap(), Some(period));
    }

    #[test]
    fn inverted_interval_is_rejected() {
        let mut registry = MemoryRegistry::new();
        let start = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert!(matches!(
            registry.create(start, end, PeriodKind::Custom),
            Err(RegistryError::Rejected(_))
        ));
        assert!(registry.is_empty());
    }
}
