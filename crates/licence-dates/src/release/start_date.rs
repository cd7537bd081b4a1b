use super::domain::{ReleaseKind, SentenceDateSet};
use crate::calendar::{CalendarError, WorkingDayCalendar, WorkingDays};
use chrono::NaiveDate;

/// Legal statuses whose releases follow the alternate licence start rule.
const ALTERNATE_OUTCOME_LEGAL_STATUSES: [&str; 3] =
    ["IMMIGRATION_DETAINEE", "REMAND", "CONVICTED_UNSENTENCED"];

/// Whether a case's release is governed by the alternate outcome rule:
/// immigration detainees, remand or unsentenced legal status, and IS91 cases.
pub fn is_alternate_outcome(legal_status: Option<&str>, is91_case: bool) -> bool {
    is91_case
        || legal_status.is_some_and(|status| {
            let status = status.trim();
            ALTERNATE_OUTCOME_LEGAL_STATUSES
                .iter()
                .any(|candidate| candidate.eq_ignore_ascii_case(status))
        })
}

/// Computes the authoritative licence start date, or `None` when the dates
/// the release kind depends on are missing.
pub fn calculate_licence_start_date<C: WorkingDayCalendar + ?Sized>(
    days: &WorkingDays<'_, C>,
    kind: ReleaseKind,
    dates: &SentenceDateSet,
    alternate_outcome: bool,
) -> Result<Option<NaiveDate>, CalendarError> {
    let start = match kind {
        ReleaseKind::Standard => match dates.conditional_release_date {
            None => None,
            Some(crd) if alternate_outcome => {
                Some(alternate_start_date(days, crd, dates.actual_release_date)?)
            }
            Some(crd) => Some(standard_start_date(days, crd, dates.actual_release_date)?),
        },
        ReleaseKind::PostRecall => match dates.post_recall_release_date {
            None => None,
            Some(prrd) => Some(post_recall_start_date(
                days,
                prrd,
                dates.conditional_release_date,
                dates.actual_release_date,
            )?),
        },
        ReleaseKind::HomeDetentionCurfew => dates.home_detention_curfew_actual_date,
    };

    tracing::debug!(
        ?kind,
        alternate_outcome,
        licence_start_date = ?start,
        "calculated licence start date"
    );
    Ok(start)
}

fn standard_start_date<C: WorkingDayCalendar + ?Sized>(
    days: &WorkingDays<'_, C>,
    crd: NaiveDate,
    ard: Option<NaiveDate>,
) -> Result<NaiveDate, CalendarError> {
    match ard {
        Some(ard) if ard <= crd => Ok(ard),
        _ => days.last_working_day(crd),
    }
}

fn alternate_start_date<C: WorkingDayCalendar + ?Sized>(
    days: &WorkingDays<'_, C>,
    crd: NaiveDate,
    ard: Option<NaiveDate>,
) -> Result<NaiveDate, CalendarError> {
    let rolled_back = days.last_working_day(crd)?;
    match ard {
        Some(ard) if ard <= crd && ard >= rolled_back => Ok(ard),
        _ => Ok(rolled_back),
    }
}

fn post_recall_start_date<C: WorkingDayCalendar + ?Sized>(
    days: &WorkingDays<'_, C>,
    prrd: NaiveDate,
    crd: Option<NaiveDate>,
    ard: Option<NaiveDate>,
) -> Result<NaiveDate, CalendarError> {
    match ard {
        Some(ard) if ard <= prrd && !crd.is_some_and(|crd| ard <= crd) => Ok(ard),
        _ => days.last_working_day(prrd),
    }
}
