use crate::calendar::{CalendarError, DaySkip, WorkingDayCalendar, WorkingDays};
use crate::config::PolicyConfig;
use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EarlyReleaseAssessment {
    pub eligible: bool,
    pub earliest_release_date: NaiveDate,
}

/// Releases landing on a Friday, weekend or holiday may go out earlier.
/// Friday counts even when the calendar treats it as a working day.
pub fn is_early_release_day<C: WorkingDayCalendar + ?Sized>(
    days: &WorkingDays<'_, C>,
    release_date: NaiveDate,
) -> bool {
    matches!(
        release_date.weekday(),
        Weekday::Fri | Weekday::Sat | Weekday::Sun
    ) || days.is_non_working_day(release_date)
}

/// Eligibility and earliest permissible release date.
///
/// A release date matching the HDC actual date is never an early release.
// TODO: revisit the HDC carve-out once the early release policy for curfew cases is settled.
pub fn early_release_eligibility<C: WorkingDayCalendar + ?Sized>(
    days: &WorkingDays<'_, C>,
    policy: &PolicyConfig,
    release_date: NaiveDate,
    home_detention_curfew_actual_date: Option<NaiveDate>,
) -> Result<EarlyReleaseAssessment, CalendarError> {
    let released_on_curfew = home_detention_curfew_actual_date == Some(release_date);
    let eligible = !released_on_curfew && is_early_release_day(days, release_date);

    let earliest_release_date = if eligible {
        days.working_days_before(
            release_date,
            policy.early_release_working_days,
            DaySkip::NonWorkingDaysAndFridays,
        )?
    } else {
        release_date
    };

    Ok(EarlyReleaseAssessment {
        eligible,
        earliest_release_date,
    })
}

/// Whether the case is close enough to release that an unallocated case
/// should raise a warning.
pub fn is_allocation_warning_required<C: WorkingDayCalendar + ?Sized>(
    days: &WorkingDays<'_, C>,
    policy: &PolicyConfig,
    release_date: Option<NaiveDate>,
    today: NaiveDate,
) -> Result<bool, CalendarError> {
    let Some(release_date) = release_date else {
        return Ok(false);
    };
    if release_date < today {
        return Ok(false);
    }

    let threshold = days.working_days_before(
        release_date,
        policy.allocation_warning_working_days,
        DaySkip::NonWorkingDaysAndFridays,
    )?;
    Ok(today >= threshold)
}
