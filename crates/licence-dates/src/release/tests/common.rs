use chrono::NaiveDate;

use crate::calendar::{BankHolidayCalendar, WorkingDays};
use crate::config::PolicyConfig;
use crate::release::domain::SentenceDateSet;

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

/// England and Wales bank holidays for 2024.
pub(super) fn calendar() -> BankHolidayCalendar {
    BankHolidayCalendar::new([
        date(2024, 1, 1),
        date(2024, 3, 29),
        date(2024, 4, 1),
        date(2024, 5, 6),
        date(2024, 5, 27),
        date(2024, 8, 26),
        date(2024, 12, 25),
        date(2024, 12, 26),
    ])
}

pub(super) fn policy() -> PolicyConfig {
    PolicyConfig::default()
}

pub(super) fn working_days(calendar: &BankHolidayCalendar) -> WorkingDays<'_, BankHolidayCalendar> {
    WorkingDays::new(calendar, policy().calendar_lookback_days)
}

pub(super) fn conditional_release(crd: NaiveDate) -> SentenceDateSet {
    SentenceDateSet {
        conditional_release_date: Some(crd),
        ..SentenceDateSet::default()
    }
}
