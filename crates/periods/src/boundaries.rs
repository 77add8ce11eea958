use crate::error::PeriodError;
use crate::weeks::WeekResolver;
use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc};
use core_types::PeriodKind;

pub type Boundaries = (DateTime<Utc>, DateTime<Utc>);

/// Canonical boundaries of the `kind` period holding `instant`.
///
/// The start is the first instant of the calendar unit and the end lies one
/// tick before the next unit begins. `Custom` has no rule and is an error.
pub fn boundaries_for<W>(
    kind: PeriodKind,
    instant: DateTime<Utc>,
    weeks: &W,
) -> Result<Boundaries, PeriodError>
where
    W: WeekResolver + ?Sized,
{
    match kind {
        PeriodKind::Day => {
            let start = midnight(instant.date_naive());
            Ok((start, shifted(start, Duration::days(1))? - PeriodKind::tick()))
        }
        PeriodKind::Week => {
            let (year, week) = weeks.week_of(instant.date_naive());
            weeks.week_from_weeknum(year, week)
        }
        PeriodKind::Month => month_aligned(instant, 1),
        PeriodKind::Quarter => month_aligned(instant, 3),
        PeriodKind::Semester => month_aligned(instant, 6),
        PeriodKind::Year => month_aligned(instant, 12),
        PeriodKind::Custom => Err(PeriodError::Unaligned(kind)),
    }
}

/// `instant + by`, or `InvalidDate` when the result is out of the calendar range.
pub(crate) fn shifted(instant: DateTime<Utc>, by: Duration) -> Result<DateTime<Utc>, PeriodError> {
    instant
        .checked_add_signed(by)
        .ok_or_else(|| PeriodError::InvalidDate(format!("{} + {}", instant.to_rfc3339(), by)))
}

fn midnight(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

fn first_of_month(year: i32, month0: u32) -> Result<DateTime<Utc>, PeriodError> {
    NaiveDate::from_ymd_opt(year, month0 + 1, 1)
        .map(midnight)
        .ok_or_else(|| PeriodError::InvalidDate(format!("{}-{:02}-01", year, month0 + 1)))
}

/// Boundaries of the `span`-month unit holding `instant`, where units are
/// counted from January (`span` must divide 12).
fn month_aligned(instant: DateTime<Utc>, span: u32) -> Result<Boundaries, PeriodError> {
    let year = instant.year();
    let month0 = instant.month0() / span * span;
    let next = month0 + span;

    let start = first_of_month(year, month0)?;
    let next_start = first_of_month(year + (next / 12) as i32, next % 12)?;
    Ok((start, next_start - PeriodKind::tick()))
}
