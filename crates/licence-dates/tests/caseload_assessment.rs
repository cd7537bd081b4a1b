use chrono::NaiveDate;
use licence_dates::caseload::CaseloadImporter;
use licence_dates::release::{CaseRecord, CaseTab, LicenceStatus, ReleaseKind, SentenceDateSet};
use licence_dates::{
    BankHolidayCalendar, CalendarError, LicenceDateEngine, PolicyConfig, SharedCalendar,
    WorkingDayCalendar,
};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

fn england_and_wales_2024() -> BankHolidayCalendar {
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

fn engine() -> LicenceDateEngine<BankHolidayCalendar> {
    LicenceDateEngine::new(england_and_wales_2024(), PolicyConfig::default())
}

fn case(case_id: &str, status: LicenceStatus, dates: SentenceDateSet) -> CaseRecord {
    CaseRecord {
        case_id: case_id.to_string(),
        status,
        dates,
        home_detention_curfew: false,
        legal_status: None,
        is91_case: false,
        time_served: false,
    }
}

#[test]
fn weekend_release_lands_in_the_due_soon_tab() {
    let today = date(2024, 6, 5);
    let record = case(
        "A1234BC",
        LicenceStatus::NotStarted,
        SentenceDateSet {
            conditional_release_date: Some(date(2024, 6, 8)),
            ..SentenceDateSet::default()
        },
    );

    let assessment = engine().assess(&record, today).expect("assessment succeeds");

    assert_eq!(assessment.kind, ReleaseKind::Standard);
    assert_eq!(assessment.licence_start_date, Some(date(2024, 6, 7)));
    let window = assessment.hard_stop.expect("hard stop window");
    assert_eq!(window.hard_stop_date, date(2024, 6, 5));
    assert_eq!(window.warning_date, date(2024, 6, 3));
    assert!(assessment.in_hard_stop_period);
    assert!(assessment.due_within_two_working_days);
    let early = assessment.early_release.expect("early release assessed");
    assert!(early.eligible);
    assert_eq!(early.earliest_release_date, date(2024, 6, 4));
    assert!(assessment.allocation_warning_required);
    assert_eq!(assessment.tab, CaseTab::ReleasesInNextTwoWorkingDays);
}

#[test]
fn post_recall_case_uses_confirmed_release_date() {
    let today = date(2024, 6, 5);
    let record = case(
        "B2345CD",
        LicenceStatus::InProgress,
        SentenceDateSet {
            conditional_release_date: Some(date(2024, 6, 20)),
            actual_release_date: Some(date(2024, 6, 25)),
            post_recall_release_date: Some(date(2024, 7, 1)),
            ..SentenceDateSet::default()
        },
    );

    let assessment = engine().assess(&record, today).expect("assessment succeeds");

    assert_eq!(assessment.kind, ReleaseKind::PostRecall);
    assert_eq!(assessment.licence_start_date, Some(date(2024, 6, 25)));
    assert!(!assessment.in_hard_stop_period);
    assert!(!assessment.due_within_two_working_days);
    assert!(!assessment.allocation_warning_required);
    assert_eq!(assessment.tab, CaseTab::FutureReleases);
}

#[test]
fn curfew_release_is_never_early() {
    let today = date(2024, 6, 5);
    let mut record = case(
        "C3456DE",
        LicenceStatus::Approved,
        SentenceDateSet {
            conditional_release_date: Some(date(2024, 8, 1)),
            home_detention_curfew_actual_date: Some(date(2024, 6, 14)),
            ..SentenceDateSet::default()
        },
    );
    record.home_detention_curfew = true;

    let assessment = engine().assess(&record, today).expect("assessment succeeds");

    assert_eq!(assessment.kind, ReleaseKind::HomeDetentionCurfew);
    assert_eq!(assessment.licence_start_date, Some(date(2024, 6, 14)));
    let early = assessment.early_release.expect("early release assessed");
    assert!(!early.eligible);
    assert_eq!(early.earliest_release_date, date(2024, 6, 14));
}

#[test]
fn case_without_dates_needs_attention() {
    let today = date(2024, 6, 5);
    let record = case("D4567EF", LicenceStatus::Submitted, SentenceDateSet::default());

    let assessment = engine().assess(&record, today).expect("assessment succeeds");

    assert!(assessment.licence_start_date.is_none());
    assert!(assessment.hard_stop.is_none());
    assert!(assessment.early_release.is_none());
    assert!(!assessment.in_hard_stop_period);
    assert!(!assessment.allocation_warning_required);
    assert_eq!(assessment.tab, CaseTab::AttentionNeeded);
}

#[test]
fn approved_licence_past_release_needs_attention() {
    let today = date(2024, 6, 5);
    let record = case(
        "E5678FG",
        LicenceStatus::Approved,
        SentenceDateSet {
            conditional_release_date: Some(date(2024, 6, 3)),
            ..SentenceDateSet::default()
        },
    );

    let assessment = engine().assess(&record, today).expect("assessment succeeds");

    assert_eq!(assessment.licence_start_date, Some(date(2024, 6, 3)));
    assert_eq!(assessment.tab, CaseTab::AttentionNeeded);
}

#[test]
fn remand_case_follows_the_alternate_rule() {
    let today = date(2024, 6, 5);
    let mut record = case(
        "F6789GH",
        LicenceStatus::InProgress,
        SentenceDateSet {
            conditional_release_date: Some(date(2024, 6, 9)),
            actual_release_date: Some(date(2024, 6, 3)),
            ..SentenceDateSet::default()
        },
    );

    let standard = engine().assess(&record, today).expect("assessment succeeds");
    assert_eq!(standard.licence_start_date, Some(date(2024, 6, 3)));

    record.legal_status = Some("REMAND".to_string());
    let alternate = engine().assess(&record, today).expect("assessment succeeds");
    assert_eq!(alternate.licence_start_date, Some(date(2024, 6, 7)));
}

#[test]
fn imported_caseload_is_assessed_end_to_end() {
    let csv = "case_id,status,conditional_release_date,actual_release_date,post_recall_release_date,hdc_actual_date,hdc,legal_status,is91,time_served\n\
A1234BC,NOT_STARTED,2024-06-08,,,,,,,\n\
B2345CD,IN_PROGRESS,2024-06-20,2024-06-25,2024-07-01,,,,,\n\
G7890HI,SUBMITTED,2024-09-02,,,,,,,yes\n";

    let cases = CaseloadImporter::from_reader(csv.as_bytes()).expect("import succeeds");
    let engine = engine();
    let tabs: Vec<CaseTab> = cases
        .iter()
        .map(|case| {
            engine
                .assess(case, date(2024, 6, 5))
                .expect("assessment succeeds")
                .tab
        })
        .collect();

    assert_eq!(
        tabs,
        vec![
            CaseTab::ReleasesInNextTwoWorkingDays,
            CaseTab::FutureReleases,
            CaseTab::ReleasesInNextTwoWorkingDays,
        ]
    );
}

#[test]
fn engine_reads_a_shared_calendar_snapshot() {
    let shared = SharedCalendar::new(BankHolidayCalendar::weekends_only());
    let bank_holiday = date(2024, 5, 27);

    let before = LicenceDateEngine::new(shared.snapshot(), PolicyConfig::default());
    shared.replace(england_and_wales_2024());
    let after = LicenceDateEngine::new(shared.snapshot(), PolicyConfig::default());

    let dates = SentenceDateSet {
        conditional_release_date: Some(bank_holiday),
        ..SentenceDateSet::default()
    };
    assert_eq!(
        before.licence_start_date(ReleaseKind::Standard, &dates, false),
        Ok(Some(bank_holiday))
    );
    assert_eq!(
        after.licence_start_date(ReleaseKind::Standard, &dates, false),
        Ok(Some(date(2024, 5, 24)))
    );
}

struct NoWorkingDays;

impl WorkingDayCalendar for NoWorkingDays {
    fn is_non_working_day(&self, _date: NaiveDate) -> bool {
        true
    }
}

#[test]
fn exhausted_calendar_is_reported() {
    let policy = PolicyConfig {
        calendar_lookback_days: 14,
        ..PolicyConfig::default()
    };
    let engine = LicenceDateEngine::new(NoWorkingDays, policy);
    let record = case(
        "H8901IJ",
        LicenceStatus::NotStarted,
        SentenceDateSet {
            conditional_release_date: Some(date(2024, 6, 8)),
            ..SentenceDateSet::default()
        },
    );

    let error = engine
        .assess(&record, date(2024, 6, 5))
        .expect_err("calendar exhausted");

    assert_eq!(
        error,
        CalendarError::Exhausted {
            from: date(2024, 6, 8),
            lookback_days: 14,
        }
    );
}
