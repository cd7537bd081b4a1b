use super::domain::{CaseTab, LicenceStatus};
use chrono::NaiveDate;

/// Places a case in a caseload tab. Rules apply in order; the first match wins.
pub fn classify_tab(
    due_within_two_working_days: bool,
    licence_start_date: Option<NaiveDate>,
    status: LicenceStatus,
    time_served: bool,
    today: NaiveDate,
) -> CaseTab {
    let Some(start) = licence_start_date else {
        if status.is_pre_release() {
            return CaseTab::AttentionNeeded;
        }
        return due_soon_or_future(due_within_two_working_days, time_served);
    };

    if status == LicenceStatus::Approved && start < today && !time_served {
        return CaseTab::AttentionNeeded;
    }

    due_soon_or_future(due_within_two_working_days, time_served)
}

fn due_soon_or_future(due_within_two_working_days: bool, time_served: bool) -> CaseTab {
    if due_within_two_working_days || time_served {
        CaseTab::ReleasesInNextTwoWorkingDays
    } else {
        CaseTab::FutureReleases
    }
}
