//! Licence date and release eligibility rules.
//!
//! Given the sentence dates held on a prison record, the [`release`] module
//! decides which kind of release applies, derives the licence start date, the
//! hard stop window, early release eligibility and the caseload tab, and
//! compares two snapshots of a case to find material date changes.
//!
//! Every calculation takes `today` explicitly and reads working days through
//! the [`calendar::WorkingDayCalendar`] trait, so results are reproducible.

pub mod calendar;
pub mod caseload;
pub mod config;
pub mod release;

pub use calendar::{BankHolidayCalendar, CalendarError, SharedCalendar, WorkingDayCalendar};
pub use config::{AppConfig, ConfigError, PolicyConfig};
pub use release::{
    CaseAssessment, CaseRecord, CaseTab, DateChangeSet, LicenceDateEngine, LicenceStatus,
    ReleaseKind, SentenceDateSet,
};
