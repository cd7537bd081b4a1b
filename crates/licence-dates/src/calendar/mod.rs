//! Working-day arithmetic over a pluggable holiday calendar.
//!
//! The calendar itself only answers "is this a non-working day". Counting back
//! over working days goes through [`WorkingDays`], which bounds every walk so a
//! misconfigured calendar fails with [`CalendarError::Exhausted`] instead of
//! looping or silently producing a wrong date.

mod bank_holidays;

pub use bank_holidays::{BankHolidayCalendar, HolidaySourceError, SharedCalendar};

use chrono::{Datelike, NaiveDate, Weekday};
use std::sync::Arc;

/// Source of truth for non-working days (weekends and declared holidays).
pub trait WorkingDayCalendar: Send + Sync {
    fn is_non_working_day(&self, date: NaiveDate) -> bool;

    fn is_working_day(&self, date: NaiveDate) -> bool {
        !self.is_non_working_day(date)
    }
}

impl<C: WorkingDayCalendar + ?Sized> WorkingDayCalendar for &C {
    fn is_non_working_day(&self, date: NaiveDate) -> bool {
        (**self).is_non_working_day(date)
    }
}

impl<C: WorkingDayCalendar + ?Sized> WorkingDayCalendar for Arc<C> {
    fn is_non_working_day(&self, date: NaiveDate) -> bool {
        (**self).is_non_working_day(date)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CalendarError {
    #[error("calendar exhausted: no qualifying working day within {lookback_days} days before {from}")]
    Exhausted { from: NaiveDate, lookback_days: u32 },
}

/// Which days are passed over when counting working days backwards.
///
/// The two variants are separate policies: hard stop and licence start
/// rollback skip only calendar non-working days, while the early release and
/// allocation warning countbacks also skip every Friday.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DaySkip {
    NonWorkingDays,
    NonWorkingDaysAndFridays,
}

impl DaySkip {
    pub fn skips<C: WorkingDayCalendar + ?Sized>(self, calendar: &C, date: NaiveDate) -> bool {
        match self {
            DaySkip::NonWorkingDays => calendar.is_non_working_day(date),
            DaySkip::NonWorkingDaysAndFridays => {
                date.weekday() == Weekday::Fri || calendar.is_non_working_day(date)
            }
        }
    }
}

/// Bounded working-day counter over a borrowed calendar.
pub struct WorkingDays<'a, C: ?Sized> {
    calendar: &'a C,
    lookback_days: u32,
}

impl<C: ?Sized> Clone for WorkingDays<'_, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C: ?Sized> Copy for WorkingDays<'_, C> {}

impl<'a, C: WorkingDayCalendar + ?Sized> WorkingDays<'a, C> {
    pub fn new(calendar: &'a C, lookback_days: u32) -> Self {
        Self {
            calendar,
            lookback_days: lookback_days.max(1),
        }
    }

    pub fn calendar(&self) -> &'a C {
        self.calendar
    }

    pub fn is_non_working_day(&self, date: NaiveDate) -> bool {
        self.calendar.is_non_working_day(date)
    }

    /// Returns `date` when it is a working day, otherwise the closest working
    /// day strictly before it.
    pub fn last_working_day(&self, date: NaiveDate) -> Result<NaiveDate, CalendarError> {
        if self.calendar.is_working_day(date) {
            Ok(date)
        } else {
            self.previous_day(date, DaySkip::NonWorkingDays)
        }
    }

    /// The `count`th day strictly before `date` that `skip` does not pass over.
    /// A count of zero returns `date` unchanged.
    pub fn working_days_before(
        &self,
        date: NaiveDate,
        count: u32,
        skip: DaySkip,
    ) -> Result<NaiveDate, CalendarError> {
        let mut current = date;
        for _ in 0..count {
            current = self.previous_day(current, skip)?;
        }
        Ok(current)
    }

    fn previous_day(&self, from: NaiveDate, skip: DaySkip) -> Result<NaiveDate, CalendarError> {
        let exhausted = CalendarError::Exhausted {
            from,
            lookback_days: self.lookback_days,
        };

        let mut candidate = from;
        for _ in 0..self.lookback_days {
            candidate = candidate.pred_opt().ok_or(exhausted)?;
            if !skip.skips(self.calendar, candidate) {
                return Ok(candidate);
            }
        }

        tracing::warn!(%from, lookback_days = self.lookback_days, "working day lookback exhausted");
        Err(exhausted)
    }
}
