use super::WorkingDayCalendar;
use chrono::{Datelike, NaiveDate, Weekday};
use serde::Deserialize;
use std::collections::{BTreeSet, HashMap};
use std::io::Read;
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

/// Weekends plus a fixed set of declared bank holidays.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BankHolidayCalendar {
    holidays: BTreeSet<NaiveDate>,
}

#[derive(Debug, thiserror::Error)]
pub enum HolidaySourceError {
    #[error("failed to read bank holiday source: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid bank holiday data: {0}")]
    Json(#[from] serde_json::Error),
    #[error("bank holiday data has no division named '{0}'")]
    UnknownDivision(String),
}

/// One division of the gov.uk bank holiday feed.
#[derive(Debug, Deserialize)]
struct DivisionFeed {
    #[serde(default)]
    events: Vec<HolidayEvent>,
}

#[derive(Debug, Deserialize)]
struct HolidayEvent {
    date: NaiveDate,
}

impl BankHolidayCalendar {
    pub fn new<I>(holidays: I) -> Self
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        Self {
            holidays: holidays.into_iter().collect(),
        }
    }

    pub fn weekends_only() -> Self {
        Self::default()
    }

    /// Reads the gov.uk `bank-holidays.json` layout and keeps the events of
    /// one division, e.g. `england-and-wales`.
    pub fn from_gov_uk_reader<R: Read>(
        reader: R,
        division: &str,
    ) -> Result<Self, HolidaySourceError> {
        let mut feed: HashMap<String, DivisionFeed> = serde_json::from_reader(reader)?;
        let selected = feed
            .remove(division)
            .ok_or_else(|| HolidaySourceError::UnknownDivision(division.to_string()))?;

        let calendar = Self::new(selected.events.into_iter().map(|event| event.date));
        tracing::debug!(
            division,
            holidays = calendar.holidays.len(),
            "loaded bank holiday calendar"
        );
        Ok(calendar)
    }

    pub fn from_gov_uk_path<P: AsRef<Path>>(
        path: P,
        division: &str,
    ) -> Result<Self, HolidaySourceError> {
        let file = std::fs::File::open(path)?;
        Self::from_gov_uk_reader(std::io::BufReader::new(file), division)
    }

    pub fn is_bank_holiday(&self, date: NaiveDate) -> bool {
        self.holidays.contains(&date)
    }

    pub fn holidays(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.holidays.iter().copied()
    }
}

impl WorkingDayCalendar for BankHolidayCalendar {
    fn is_non_working_day(&self, date: NaiveDate) -> bool {
        matches!(date.weekday(), Weekday::Sat | Weekday::Sun) || self.is_bank_holiday(date)
    }
}

/// Process-wide calendar handle.
///
/// Readers take an `Arc` snapshot for the duration of a calculation; a refresh
/// swaps the whole calendar so no reader sees a half-updated holiday set.
#[derive(Debug, Clone, Default)]
pub struct SharedCalendar {
    current: Arc<RwLock<Arc<BankHolidayCalendar>>>,
}

impl SharedCalendar {
    pub fn new(calendar: BankHolidayCalendar) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(calendar))),
        }
    }

    pub fn snapshot(&self) -> Arc<BankHolidayCalendar> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*guard)
    }

    pub fn replace(&self, calendar: BankHolidayCalendar) {
        let next = Arc::new(calendar);
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *guard = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const FEED: &str = r#"{
        "england-and-wales": {
            "division": "england-and-wales",
            "events": [
                { "title": "Spring bank holiday", "date": "2024-05-27", "notes": "", "bunting": true },
                { "title": "Christmas Day", "date": "2024-12-25", "notes": "", "bunting": true }
            ]
        },
        "scotland": {
            "division": "scotland",
            "events": [
                { "title": "Summer bank holiday", "date": "2024-08-05", "notes": "", "bunting": true }
            ]
        }
    }"#;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn weekends_are_non_working() {
        let calendar = BankHolidayCalendar::weekends_only();
        assert!(calendar.is_non_working_day(date(2024, 6, 8)));
        assert!(calendar.is_non_working_day(date(2024, 6, 9)));
        assert!(calendar.is_working_day(date(2024, 6, 7)));
    }

    #[test]
    fn parses_selected_division_from_gov_uk_feed() {
        let calendar = BankHolidayCalendar::from_gov_uk_reader(Cursor::new(FEED), "england-and-wales")
            .expect("feed parses");

        assert!(calendar.is_bank_holiday(date(2024, 5, 27)));
        assert!(calendar.is_non_working_day(date(2024, 12, 25)));
        assert!(!calendar.is_bank_holiday(date(2024, 8, 5)));
        assert_eq!(calendar.holidays().count(), 2);
    }

    #[test]
    fn unknown_division_is_an_error() {
        let error = BankHolidayCalendar::from_gov_uk_reader(Cursor::new(FEED), "wales")
            .expect_err("division missing");
        assert!(matches!(error, HolidaySourceError::UnknownDivision(name) if name == "wales"));
    }

    #[test]
    fn missing_file_propagates_io_error() {
        let error = BankHolidayCalendar::from_gov_uk_path("./does-not-exist.json", "scotland")
            .expect_err("io error");
        assert!(matches!(error, HolidaySourceError::Io(_)));
    }

    #[test]
    fn shared_calendar_swaps_without_touching_existing_snapshots() {
        let shared = SharedCalendar::new(BankHolidayCalendar::weekends_only());
        let before = shared.snapshot();

        shared.replace(BankHolidayCalendar::new([date(2024, 5, 27)]));
        let after = shared.snapshot();

        assert!(!before.is_non_working_day(date(2024, 5, 27)));
        assert!(after.is_non_working_day(date(2024, 5, 27)));
    }
}
