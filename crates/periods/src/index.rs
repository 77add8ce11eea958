use crate::boundaries::{Boundaries, boundaries_for, shifted};
use crate::error::PeriodError;
use crate::registry::PeriodRegistry;
use crate::weeks::{CalendarWeeks, WeekResolver};
use chrono::{DateTime, NaiveDate, Utc};
use configuration::PeriodSettings;
use core_types::{Period, PeriodKind};

/// A partial calendar position, resolved by `PeriodIndex::find_or_create_from`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CalendarSpec {
    pub year: i32,
    pub month: Option<u32>,
    pub day: Option<u32>,
    pub week: Option<u32>,
    pub hour: Option<u32>,
    pub minute: Option<u32>,
    pub second: Option<u32>,
}

impl CalendarSpec {
    pub fn year(year: i32) -> Self {
        Self {
            year,
            ..Self::default()
        }
    }

    pub fn month(year: i32, month: u32) -> Self {
        Self {
            month: Some(month),
            ..Self::year(year)
        }
    }

    pub fn day(year: i32, month: u32, day: u32) -> Self {
        Self {
            day: Some(day),
            ..Self::month(year, month)
        }
    }

    pub fn week(year: i32, week: u32) -> Self {
        Self {
            week: Some(week),
            ..Self::year(year)
        }
    }

    pub fn at(mut self, hour: u32, minute: u32, second: u32) -> Self {
        self.hour = Some(hour);
        self.minute = Some(minute);
        self.second = Some(second);
        self
    }

    /// The instant designated by the position; unset parts default to the start
    /// of their unit (month 1, day 1, 00:00:00).
    pub fn instant(&self) -> Result<DateTime<Utc>, PeriodError> {
        let month = self.month.unwrap_or(1);
        let day = self.day.unwrap_or(1);
        let (hour, minute, second) = (
            self.hour.unwrap_or(0),
            self.minute.unwrap_or(0),
            self.second.unwrap_or(0),
        );
        NaiveDate::from_ymd_opt(self.year, month, day)
            .and_then(|date| date.and_hms_opt(hour, minute, second))
            .map(|naive| naive.and_utc())
            .ok_or_else(|| {
                PeriodError::InvalidDate(format!(
                    "{}-{:02}-{:02} {:02}:{:02}:{:02}",
                    self.year, month, day, hour, minute, second
                ))
            })
    }
}

/// Idempotent access to the periods of a registry.
///
/// Every period handed out for an aligned kind carries the canonical
/// boundaries of that kind; the registry guarantees uniqueness of
/// `(start, end, kind)`.
#[derive(Debug)]
pub struct PeriodIndex<R, W = CalendarWeeks> {
    registry: R,
    weeks: W,
}

impl<R: PeriodRegistry> PeriodIndex<R, CalendarWeeks> {
    pub fn new(registry: R) -> Self {
        Self::with_weeks(registry, CalendarWeeks::default())
    }

    pub fn from_settings(registry: R, settings: &PeriodSettings) -> Self {
        Self::with_weeks(registry, CalendarWeeks::from_settings(settings))
    }
}

impl<R: PeriodRegistry, W: WeekResolver> PeriodIndex<R, W> {
    pub fn with_weeks(registry: R, weeks: W) -> Self {
        Self { registry, weeks }
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    pub fn weeks(&self) -> &W {
        &self.weeks
    }

    pub fn into_registry(self) -> R {
        self.registry
    }

    pub fn boundaries_for(
        &self,
        kind: PeriodKind,
        instant: DateTime<Utc>,
    ) -> Result<Boundaries, PeriodError> {
        boundaries_for(kind, instant, &self.weeks)
    }

    /// Returns the period with exactly these boundaries, creating it if needed.
    ///
    /// For aligned kinds the boundaries must be canonical.
    pub fn find_or_create(
        &mut self,
        kind: PeriodKind,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Period, PeriodError> {
        if start > end {
            return Err(PeriodError::InvalidInterval {
                start: start.to_rfc3339(),
                end: end.to_rfc3339(),
            });
        }
        if kind.is_aligned() && self.boundaries_for(kind, start)? != (start, end) {
            return Err(PeriodError::Misaligned {
                kind,
                start: start.to_rfc3339(),
                end: end.to_rfc3339(),
            });
        }

        if let Some(period) = self.registry.get(start, end, kind)? {
            tracing::trace!(id = %period.id(), %kind, "Period found.");
            return Ok(period);
        }

        let period = self.registry.create(start, end, kind)?;
        tracing::debug!(id = %period.id(), %kind, %start, %end, "Period created.");
        Ok(period)
    }

    /// The `kind` period holding `instant`.
    pub fn find_or_create_for_instant(
        &mut self,
        kind: PeriodKind,
        instant: DateTime<Utc>,
    ) -> Result<Period, PeriodError> {
        let (start, end) = self.boundaries_for(kind, instant)?;
        self.find_or_create(kind, start, end)
    }

    /// Resolves a partial calendar position.
    ///
    /// A position holding only a year yields the `Year` period and one holding a
    /// week yields the `Week` period, whatever `kind` is. Any other position is the
    /// `kind` period holding `spec.instant()`.
    pub fn find_or_create_from(
        &mut self,
        kind: PeriodKind,
        spec: CalendarSpec,
    ) -> Result<Period, PeriodError> {
        if let Some(week) = spec.week {
            let (start, end) = self.weeks.week_from_weeknum(spec.year, week)?;
            return self.find_or_create(PeriodKind::Week, start, end);
        }
        if spec.month.is_none() {
            let instant = CalendarSpec::year(spec.year).instant()?;
            return self.find_or_create_for_instant(PeriodKind::Year, instant);
        }
        let instant = spec.instant()?;
        self.find_or_create_for_instant(kind, instant)
    }

    /// The period following `period` in time.
    ///
    /// Aligned kinds step from the midpoint by the kind's nominal delta and
    /// realign; a custom period is followed by the adjacent interval of the
    /// same length.
    pub fn next(&mut self, period: &Period) -> Result<Period, PeriodError> {
        match period.kind().delta() {
            Some(delta) => {
                let target = shifted(period.middle(), delta)?;
                self.find_or_create_for_instant(period.kind(), target)
            }
            None => {
                let start = shifted(period.end_on(), PeriodKind::tick())?;
                let end = shifted(start, period.end_on() - period.start_on())?;
                self.find_or_create(period.kind(), start, end)
            }
        }
    }

    /// `count` consecutive periods of `kind`, the first one holding `from`.
    pub fn series(
        &mut self,
        kind: PeriodKind,
        from: DateTime<Utc>,
        count: usize,
    ) -> Result<Vec<Period>, PeriodError> {
        let mut periods = Vec::with_capacity(count);
        if count == 0 {
            return Ok(periods);
        }
        let mut current = self.find_or_create_for_instant(kind, from)?;
        for _ in 1..count {
            let next = self.next(&current)?;
            periods.push(current);
            current = next;
        }
        periods.push(current);
        Ok(periods)
    }

    /// Strict interior test, see `Period::includes`.
    pub fn includes(period: &Period, instant: DateTime<Utc>) -> bool {
        period.includes(instant)
    }

    /// Every registered period of `kind`, earliest first.
    pub fn of_kind(&self, kind: PeriodKind) -> Result<Vec<Period>, PeriodError> {
        Ok(self.registry.list(kind)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{MemoryRegistry, RegistryError};
    use chrono::{Duration, TimeZone};

    fn index() -> PeriodIndex<MemoryRegistry> {
        PeriodIndex::new(MemoryRegistry::new())
    }

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn find_or_create_is_idempotent() {
        let mut index = index();
        let start = at(2024, 3, 1);
        let end = at(2024, 4, 1) - PeriodKind::tick();

        let first = index.find_or_create(PeriodKind::Month, start, end).unwrap();
        let second = index.find_or_create(PeriodKind::Month, start, end).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.id(), second.id());
        assert_eq!(index.registry().len(), 1);
    }

    #[test]
    fn aligned_kinds_refuse_arbitrary_boundaries() {
        let mut index = index();
        let result = index.find_or_create(PeriodKind::Month, at(2024, 3, 2), at(2024, 4, 1));
        assert!(matches!(result, Err(PeriodError::Misaligned { .. })));

        let custom = index
            .find_or_create(PeriodKind::Custom, at(2024, 3, 2), at(2024, 4, 1))
            .unwrap();
        assert_eq!(custom.kind(), PeriodKind::Custom);
    }

    #[test]
    fn inverted_interval_never_reaches_the_registry() {
        let mut index = index();
        let result = index.find_or_create(PeriodKind::Custom, at(2024, 3, 2), at(2024, 3, 1));
        assert!(matches!(result, Err(PeriodError::InvalidInterval { .. })));
        assert!(index.registry().is_empty());
    }

    #[test]
    fn instants_of_the_same_month_share_a_period() {
        let mut index = index();
        let a = index.find_or_create_for_instant(PeriodKind::Month, at(2024, 2, 1)).unwrap();
        let b = index
            .find_or_create_for_instant(PeriodKind::Month, at(2024, 2, 29) + Duration::hours(23))
            .unwrap();
        assert_eq!(a.id(), b.id());
    }

    #[test]
    fn calendar_spec_shortcuts() {
        let mut index = index();

        let year = index.find_or_create_from(PeriodKind::Month, CalendarSpec::year(2024)).unwrap();
        assert_eq!(year.kind(), PeriodKind::Year);
        assert_eq!(year.start_on(), at(2024, 1, 1));
        assert_eq!(year.end_on(), at(2025, 1, 1) - PeriodKind::tick());

        let week = index.find_or_create_from(PeriodKind::Day, CalendarSpec::week(2024, 1)).unwrap();
        assert_eq!(week.kind(), PeriodKind::Week);
        assert_eq!(week.start_on(), at(2024, 1, 7));

        let month = index.find_or_create_from(PeriodKind::Month, CalendarSpec::month(2024, 5)).unwrap();
        assert_eq!(month.start_on(), at(2024, 5, 1));

        let day = index
            .find_or_create_from(PeriodKind::Day, CalendarSpec::day(2024, 5, 17).at(13, 30, 0))
            .unwrap();
        assert_eq!(day.start_on(), at(2024, 5, 17));

        let invalid = index.find_or_create_from(PeriodKind::Day, CalendarSpec::day(2024, 2, 30));
        assert!(matches!(invalid, Err(PeriodError::InvalidDate(_))));
    }

    #[test]
    fn next_month_realigns_after_nominal_delta() {
        let mut index = index();
        let jan = index.find_or_create_from(PeriodKind::Month, CalendarSpec::month(2024, 1)).unwrap();
        let feb = index.next(&jan).unwrap();
        let mar = index.next(&feb).unwrap();
        assert_eq!(feb.start_on(), at(2024, 2, 1));
        assert_eq!(mar.start_on(), at(2024, 3, 1));

        let dec = index.find_or_create_from(PeriodKind::Month, CalendarSpec::month(2023, 12)).unwrap();
        assert_eq!(index.next(&dec).unwrap().start_on(), at(2024, 1, 1));
    }

    #[test]
    fn next_steps_every_aligned_kind_by_one_unit() {
        let mut index = index();
        let cases = [
            (PeriodKind::Week, at(2024, 1, 14)),
            (PeriodKind::Quarter, at(2024, 4, 1)),
            (PeriodKind::Semester, at(2024, 7, 1)),
            (PeriodKind::Year, at(2025, 1, 1)),
        ];
        for (kind, expected) in cases {
            let first = index.find_or_create_for_instant(kind, at(2024, 1, 10)).unwrap();
            let next = index.next(&first).unwrap();
            assert_eq!(next.start_on(), expected, "{kind}");
            assert_eq!(next.start_on(), first.end_on() + PeriodKind::tick(), "{kind}");
        }
    }

    #[test]
    fn next_custom_is_adjacent_with_same_length() {
        let mut index = index();
        let start = at(2024, 1, 1);
        let first = index
            .find_or_create(PeriodKind::Custom, start, start + Duration::hours(6))
            .unwrap();
        let next = index.next(&first).unwrap();
        assert_eq!(next.start_on(), first.end_on() + PeriodKind::tick());
        assert_eq!(next.end_on() - next.start_on(), first.end_on() - first.start_on());
    }

    #[test]
    fn next_past_the_calendar_range_is_an_error() {
        let mut index = index();
        let end = DateTime::<Utc>::MAX_UTC;
        let last = index
            .find_or_create(PeriodKind::Custom, end - Duration::hours(1), end)
            .unwrap();
        assert!(matches!(index.next(&last), Err(PeriodError::InvalidDate(_))));

        let last_day = index
            .find_or_create_for_instant(PeriodKind::Day, end - Duration::days(1))
            .unwrap();
        assert!(matches!(index.next(&last_day), Err(PeriodError::InvalidDate(_))));
    }

    #[test]
    fn series_and_listing() {
        let mut index = index();
        let months = index.series(PeriodKind::Month, at(2023, 11, 15), 4).unwrap();
        let names: Vec<_> = months.iter().map(Period::name).collect();
        assert_eq!(names, vec!["11 2023", "12 2023", "01 2024", "02 2024"]);

        // Out-of-order creation still lists chronologically.
        index.find_or_create_for_instant(PeriodKind::Month, at(2023, 1, 1)).unwrap();
        let listed = index.of_kind(PeriodKind::Month).unwrap();
        assert_eq!(listed.len(), 5);
        assert_eq!(listed[0].start_on(), at(2023, 1, 1));
        assert!(index.of_kind(PeriodKind::Day).unwrap().is_empty());
        assert!(index.series(PeriodKind::Day, at(2024, 1, 1), 0).unwrap().is_empty());
    }

    struct Offline;

    impl PeriodRegistry for Offline {
        fn get(
            &self,
            _: DateTime<Utc>,
            _: DateTime<Utc>,
            _: PeriodKind,
        ) -> Result<Option<Period>, RegistryError> {
            Err(RegistryError::Unavailable("connection refused".to_string()))
        }

        fn create(
            &mut self,
            _: DateTime<Utc>,
            _: DateTime<Utc>,
            _: PeriodKind,
        ) -> Result<Period, RegistryError> {
            unreachable!("lookup fails first")
        }

        fn list(&self, _: PeriodKind) -> Result<Vec<Period>, RegistryError> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn registry_failures_propagate() {
        let mut index = PeriodIndex::new(Offline);
        let result = index.find_or_create_for_instant(PeriodKind::Day, at(2024, 1, 1));
        assert_eq!(
            result,
            Err(PeriodError::Registry(RegistryError::Unavailable(
                "connection refused".to_string()
            )))
        );
    }
}
