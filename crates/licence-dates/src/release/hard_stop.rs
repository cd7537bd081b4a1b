use crate::calendar::{CalendarError, DaySkip, WorkingDayCalendar, WorkingDays};
use crate::config::PolicyConfig;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Dates from which prison staff rather than probation own the licence.
///
/// `warning_date <= hard_stop_date <= licence start date` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HardStopWindow {
    pub hard_stop_date: NaiveDate,
    pub warning_date: NaiveDate,
}

pub fn hard_stop_window<C: WorkingDayCalendar + ?Sized>(
    days: &WorkingDays<'_, C>,
    policy: &PolicyConfig,
    licence_start_date: Option<NaiveDate>,
) -> Result<Option<HardStopWindow>, CalendarError> {
    let Some(start) = licence_start_date else {
        return Ok(None);
    };

    let adjusted_start = days.last_working_day(start)?;
    let hard_stop_date = days.working_days_before(
        adjusted_start,
        policy.hard_stop_working_days,
        DaySkip::NonWorkingDays,
    )?;
    let warning_date = days.working_days_before(
        hard_stop_date,
        policy.hard_stop_warning_working_days,
        DaySkip::NonWorkingDays,
    )?;

    Ok(Some(HardStopWindow {
        hard_stop_date,
        warning_date,
    }))
}

/// True from the hard stop date up to and including the licence start date.
pub fn is_in_hard_stop_period<C: WorkingDayCalendar + ?Sized>(
    days: &WorkingDays<'_, C>,
    policy: &PolicyConfig,
    licence_start_date: Option<NaiveDate>,
    today: NaiveDate,
) -> Result<bool, CalendarError> {
    let (Some(start), Some(window)) = (
        licence_start_date,
        hard_stop_window(days, policy, licence_start_date)?,
    ) else {
        return Ok(false);
    };

    Ok(window.hard_stop_date <= today && today <= start)
}

/// True when today falls within the due-soon window ending on the licence
/// start date.
pub fn is_due_within_working_days<C: WorkingDayCalendar + ?Sized>(
    days: &WorkingDays<'_, C>,
    policy: &PolicyConfig,
    licence_start_date: Option<NaiveDate>,
    today: NaiveDate,
) -> Result<bool, CalendarError> {
    let Some(start) = licence_start_date else {
        return Ok(false);
    };

    let window_opens =
        days.working_days_before(start, policy.due_soon_working_days, DaySkip::NonWorkingDays)?;
    Ok(window_opens <= today && today <= start)
}
