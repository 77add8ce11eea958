use crate::boundaries::shifted;
use crate::error::PeriodError;
use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc, Weekday};
use configuration::PeriodSettings;
use core_types::PeriodKind;

/// Translates between week numbers and week boundaries.
///
/// The resolver is authoritative for `Week` periods: the index never derives
/// week boundaries on its own.
pub trait WeekResolver {
    /// `(year, week)` numbering of the week holding `date`.
    fn week_of(&self, date: NaiveDate) -> (i32, u32);

    /// First and last instant of week `week` of `year`.
    fn week_from_weeknum(
        &self,
        year: i32,
        week: u32,
    ) -> Result<(DateTime<Utc>, DateTime<Utc>), PeriodError>;
}

/// Gregorian week numbering, ISO-8601 or Sunday-first.
///
/// Sunday-first numbering follows `strftime("%U")`: week 1 begins on the first
/// Sunday of the year and the days before it form week 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarWeeks {
    is_iso: bool,
}

impl Default for CalendarWeeks {
    fn default() -> Self {
        Self::sunday_first()
    }
}

impl CalendarWeeks {
    pub fn new(is_iso: bool) -> Self {
        Self { is_iso }
    }

    pub fn iso() -> Self {
        Self::new(true)
    }

    pub fn sunday_first() -> Self {
        Self::new(false)
    }

    pub fn from_settings(settings: &PeriodSettings) -> Self {
        Self::new(settings.iso_weeks)
    }

    pub fn is_iso(&self) -> bool {
        self.is_iso
    }
}

/// Days from January 1st to the first Sunday of its year.
fn sunday_offset(jan1: NaiveDate) -> u32 {
    (7 - jan1.weekday().num_days_from_sunday()) % 7
}

fn first_sunday(year: i32) -> Result<NaiveDate, PeriodError> {
    let jan1 = NaiveDate::from_ymd_opt(year, 1, 1)
        .ok_or_else(|| PeriodError::InvalidDate(format!("{year}-01-01")))?;
    Ok(jan1 + Duration::days(i64::from(sunday_offset(jan1))))
}

fn week_span(first_day: NaiveDate) -> Result<(DateTime<Utc>, DateTime<Utc>), PeriodError> {
    let start = first_day.and_time(NaiveTime::MIN).and_utc();
    Ok((start, shifted(start, Duration::days(7))? - PeriodKind::tick()))
}

impl WeekResolver for CalendarWeeks {
    fn week_of(&self, date: NaiveDate) -> (i32, u32) {
        if self.is_iso {
            let week = date.iso_week();
            return (week.year(), week.week());
        }
        let ordinal0 = date.ordinal0();
        let offset = sunday_offset(date - Duration::days(i64::from(ordinal0)));
        if ordinal0 < offset {
            (date.year(), 0)
        } else {
            (date.year(), (ordinal0 - offset) / 7 + 1)
        }
    }

    fn week_from_weeknum(
        &self,
        year: i32,
        week: u32,
    ) -> Result<(DateTime<Utc>, DateTime<Utc>), PeriodError> {
        let invalid = || PeriodError::InvalidWeek { year, week };
        if week > 53 {
            return Err(invalid());
        }

        let first_day = if self.is_iso {
            NaiveDate::from_isoywd_opt(year, week, Weekday::Mon).ok_or_else(invalid)?
        } else {
            let sunday = first_sunday(year)?;
            // Week 0 only exists when the year does not start on a Sunday.
            if week == 0 && sunday.ordinal0() == 0 {
                return Err(invalid());
            }
            let first_day = sunday
                .checked_add_signed(Duration::weeks(i64::from(week) - 1))
                .ok_or_else(invalid)?;
            // Week 53 only exists when it still starts inside `year`.
            if first_day.year() > year {
                return Err(invalid());
            }
            first_day
        };
        week_span(first_day)
    }
}
