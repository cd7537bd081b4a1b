use super::common::*;
use crate::release::domain::{CaseTab, LicenceStatus};
use crate::release::tabs::classify_tab;

#[test]
fn pre_release_case_without_start_date_needs_attention() {
    let today = date(2024, 6, 5);
    for status in [
        LicenceStatus::NotStarted,
        LicenceStatus::InProgress,
        LicenceStatus::Submitted,
        LicenceStatus::Approved,
    ] {
        for due in [true, false] {
            assert_eq!(
                classify_tab(due, None, status, false, today),
                CaseTab::AttentionNeeded,
                "{status:?} due={due}"
            );
        }
    }
}

#[test]
fn other_statuses_without_start_date_fall_through() {
    let today = date(2024, 6, 5);
    assert_eq!(
        classify_tab(true, None, LicenceStatus::Active, false, today),
        CaseTab::ReleasesInNextTwoWorkingDays
    );
    assert_eq!(
        classify_tab(false, None, LicenceStatus::Active, false, today),
        CaseTab::FutureReleases
    );
}

#[test]
fn approved_licence_past_its_start_date_needs_attention() {
    let today = date(2024, 6, 5);
    assert_eq!(
        classify_tab(false, Some(date(2024, 6, 4)), LicenceStatus::Approved, false, today),
        CaseTab::AttentionNeeded
    );
}

#[test]
fn time_served_cases_are_always_due() {
    let today = date(2024, 6, 5);
    assert_eq!(
        classify_tab(false, Some(date(2024, 6, 4)), LicenceStatus::Approved, true, today),
        CaseTab::ReleasesInNextTwoWorkingDays
    );
    assert_eq!(
        classify_tab(false, Some(date(2024, 9, 4)), LicenceStatus::InProgress, true, today),
        CaseTab::ReleasesInNextTwoWorkingDays
    );
}

#[test]
fn only_approved_licences_are_overdue() {
    let today = date(2024, 6, 5);
    assert_eq!(
        classify_tab(false, Some(date(2024, 6, 4)), LicenceStatus::InProgress, false, today),
        CaseTab::FutureReleases
    );
}

#[test]
fn due_soon_and_future_releases() {
    let today = date(2024, 6, 5);
    assert_eq!(
        classify_tab(true, Some(date(2024, 6, 6)), LicenceStatus::Submitted, false, today),
        CaseTab::ReleasesInNextTwoWorkingDays
    );
    assert_eq!(
        classify_tab(false, Some(date(2024, 7, 1)), LicenceStatus::Submitted, false, today),
        CaseTab::FutureReleases
    );
}
