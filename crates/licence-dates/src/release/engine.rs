use super::changes::{detect_changes, DateChangeSet, DateSnapshot};
use super::domain::{CaseRecord, CaseTab, LicenceStatus, ReleaseKind, SentenceDateSet};
use super::early_release::{self, EarlyReleaseAssessment};
use super::hard_stop::{self, HardStopWindow};
use super::kind::resolve_kind;
use super::start_date::{calculate_licence_start_date, is_alternate_outcome};
use super::tabs::classify_tab;
use crate::calendar::{CalendarError, WorkingDayCalendar, WorkingDays};
use crate::config::PolicyConfig;
use chrono::NaiveDate;
use serde::Serialize;

/// Stateless engine applying the release date rules against one calendar.
///
/// Holds no mutable state, so a single instance can serve concurrent callers.
#[derive(Debug, Clone)]
pub struct LicenceDateEngine<C> {
    calendar: C,
    policy: PolicyConfig,
}

/// Everything the caseload views need to know about a case's dates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaseAssessment {
    pub case_id: String,
    pub status: LicenceStatus,
    pub kind: ReleaseKind,
    pub licence_start_date: Option<NaiveDate>,
    pub hard_stop: Option<HardStopWindow>,
    pub in_hard_stop_period: bool,
    pub due_within_two_working_days: bool,
    pub early_release: Option<EarlyReleaseAssessment>,
    pub allocation_warning_required: bool,
    pub tab: CaseTab,
}

impl<C: WorkingDayCalendar> LicenceDateEngine<C> {
    pub fn new(calendar: C, policy: PolicyConfig) -> Self {
        Self { calendar, policy }
    }

    pub fn policy(&self) -> &PolicyConfig {
        &self.policy
    }

    pub fn calendar(&self) -> &C {
        &self.calendar
    }

    fn working_days(&self) -> WorkingDays<'_, C> {
        WorkingDays::new(&self.calendar, self.policy.calendar_lookback_days)
    }

    pub fn resolve_kind(
        &self,
        dates: &SentenceDateSet,
        home_detention_curfew: bool,
        today: NaiveDate,
    ) -> ReleaseKind {
        resolve_kind(dates, home_detention_curfew, today)
    }

    pub fn licence_start_date(
        &self,
        kind: ReleaseKind,
        dates: &SentenceDateSet,
        alternate_outcome: bool,
    ) -> Result<Option<NaiveDate>, CalendarError> {
        calculate_licence_start_date(&self.working_days(), kind, dates, alternate_outcome)
    }

    pub fn hard_stop_window(
        &self,
        licence_start_date: Option<NaiveDate>,
    ) -> Result<Option<HardStopWindow>, CalendarError> {
        hard_stop::hard_stop_window(&self.working_days(), &self.policy, licence_start_date)
    }

    pub fn is_in_hard_stop_period(
        &self,
        licence_start_date: Option<NaiveDate>,
        today: NaiveDate,
    ) -> Result<bool, CalendarError> {
        hard_stop::is_in_hard_stop_period(
            &self.working_days(),
            &self.policy,
            licence_start_date,
            today,
        )
    }

    pub fn is_due_within_two_working_days(
        &self,
        licence_start_date: Option<NaiveDate>,
        today: NaiveDate,
    ) -> Result<bool, CalendarError> {
        hard_stop::is_due_within_working_days(
            &self.working_days(),
            &self.policy,
            licence_start_date,
            today,
        )
    }

    pub fn early_release_eligibility(
        &self,
        release_date: NaiveDate,
        home_detention_curfew_actual_date: Option<NaiveDate>,
    ) -> Result<EarlyReleaseAssessment, CalendarError> {
        early_release::early_release_eligibility(
            &self.working_days(),
            &self.policy,
            release_date,
            home_detention_curfew_actual_date,
        )
    }

    pub fn is_allocation_warning_required(
        &self,
        release_date: Option<NaiveDate>,
        today: NaiveDate,
    ) -> Result<bool, CalendarError> {
        early_release::is_allocation_warning_required(
            &self.working_days(),
            &self.policy,
            release_date,
            today,
        )
    }

    pub fn detect_changes(
        &self,
        previous: &DateSnapshot,
        next: &DateSnapshot,
        status: LicenceStatus,
        kind: ReleaseKind,
    ) -> DateChangeSet {
        detect_changes(previous, next, status, kind)
    }

    pub fn classify_tab(
        &self,
        due_within_two_working_days: bool,
        licence_start_date: Option<NaiveDate>,
        status: LicenceStatus,
        time_served: bool,
        today: NaiveDate,
    ) -> CaseTab {
        classify_tab(
            due_within_two_working_days,
            licence_start_date,
            status,
            time_served,
            today,
        )
    }

    /// Snapshot of the case's dates as stored for a later change comparison.
    pub fn snapshot(
        &self,
        case: &CaseRecord,
        today: NaiveDate,
    ) -> Result<DateSnapshot, CalendarError> {
        let kind = self.resolve_kind(&case.dates, case.home_detention_curfew, today);
        let alternate_outcome =
            is_alternate_outcome(case.legal_status.as_deref(), case.is91_case);
        Ok(DateSnapshot {
            licence_start_date: self.licence_start_date(kind, &case.dates, alternate_outcome)?,
            sentence: case.dates,
        })
    }

    /// Runs the full date flow for one case.
    pub fn assess(
        &self,
        case: &CaseRecord,
        today: NaiveDate,
    ) -> Result<CaseAssessment, CalendarError> {
        let kind = self.resolve_kind(&case.dates, case.home_detention_curfew, today);
        let alternate_outcome =
            is_alternate_outcome(case.legal_status.as_deref(), case.is91_case);
        let licence_start_date = self.licence_start_date(kind, &case.dates, alternate_outcome)?;

        let hard_stop = self.hard_stop_window(licence_start_date)?;
        let in_hard_stop_period = match (licence_start_date, hard_stop) {
            (Some(start), Some(window)) => window.hard_stop_date <= today && today <= start,
            _ => false,
        };
        let due_within_two_working_days =
            self.is_due_within_two_working_days(licence_start_date, today)?;
        let early_release = licence_start_date
            .map(|start| {
                self.early_release_eligibility(start, case.dates.home_detention_curfew_actual_date)
            })
            .transpose()?;
        let allocation_warning_required =
            self.is_allocation_warning_required(licence_start_date, today)?;
        let tab = self.classify_tab(
            due_within_two_working_days,
            licence_start_date,
            case.status,
            case.time_served,
            today,
        );

        tracing::debug!(
            case_id = %case.case_id,
            %kind,
            licence_start_date = ?licence_start_date,
            in_hard_stop_period,
            ?tab,
            "assessed case"
        );

        Ok(CaseAssessment {
            case_id: case.case_id.clone(),
            status: case.status,
            kind,
            licence_start_date,
            hard_stop,
            in_hard_stop_period,
            due_within_two_working_days,
            early_release,
            allocation_warning_required,
            tab,
        })
    }

    /// Compares a stored snapshot with a freshly fetched case.
    pub fn changes_since(
        &self,
        previous: &DateSnapshot,
        case: &CaseRecord,
        today: NaiveDate,
    ) -> Result<DateChangeSet, CalendarError> {
        let next = self.snapshot(case, today)?;
        let kind = self.resolve_kind(&case.dates, case.home_detention_curfew, today);
        Ok(self.detect_changes(previous, &next, case.status, kind))
    }
}
