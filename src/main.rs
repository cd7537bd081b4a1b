mod error;
mod telemetry;

use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use error::AppError;
use licence_dates::caseload::CaseloadImporter;
use licence_dates::config::{AppConfig, CalendarConfig};
use licence_dates::release::{detect_changes, DateSnapshot};
use licence_dates::{
    BankHolidayCalendar, CaseAssessment, CaseTab, LicenceDateEngine, LicenceStatus, ReleaseKind,
};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(
    name = "licence-engine",
    about = "Work out licence start dates, hard stop windows and caseload tabs",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Assess every case in a caseload CSV export
    Assess(AssessArgs),
    /// Compare two stored date snapshots of one case
    Changes(ChangesArgs),
}

#[derive(Args, Debug)]
struct AssessArgs {
    /// Caseload CSV export, one row per case
    #[arg(long)]
    caseload: PathBuf,
    /// Evaluation date (defaults to today)
    #[arg(long, value_parser = parse_date)]
    today: Option<NaiveDate>,
    /// gov.uk bank-holidays.json, overriding LICENCE_BANK_HOLIDAYS_PATH
    #[arg(long)]
    bank_holidays: Option<PathBuf>,
    /// Print the assessments as JSON instead of the text report
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct ChangesArgs {
    /// Snapshot stored at the last refresh (JSON)
    #[arg(long)]
    previous: PathBuf,
    /// Snapshot from the current refresh (JSON)
    #[arg(long)]
    next: PathBuf,
    /// Current licence status, e.g. APPROVED
    #[arg(long, value_parser = parse_status)]
    status: LicenceStatus,
    /// Release kind the case resolved to, e.g. STANDARD or HDC
    #[arg(long, value_parser = parse_kind, default_value = "STANDARD")]
    kind: ReleaseKind,
}

fn main() {
    if let Err(err) = run_cli() {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    match cli.command {
        Command::Assess(args) => run_assess(&config, args),
        Command::Changes(args) => run_changes(args),
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

fn parse_status(raw: &str) -> Result<LicenceStatus, String> {
    raw.parse().map_err(|err| format!("{err}"))
}

fn parse_kind(raw: &str) -> Result<ReleaseKind, String> {
    raw.parse().map_err(|err| format!("{err}"))
}

fn load_calendar(
    config: &CalendarConfig,
    override_path: Option<PathBuf>,
) -> Result<BankHolidayCalendar, AppError> {
    match override_path.or_else(|| config.bank_holidays_path.clone()) {
        Some(path) => {
            let calendar = BankHolidayCalendar::from_gov_uk_path(&path, &config.division)?;
            info!(path = %path.display(), division = %config.division, "loaded bank holidays");
            Ok(calendar)
        }
        None => {
            warn!("no bank holiday source configured; only weekends are non-working days");
            Ok(BankHolidayCalendar::weekends_only())
        }
    }
}

fn run_assess(config: &AppConfig, args: AssessArgs) -> Result<(), AppError> {
    let AssessArgs {
        caseload,
        today,
        bank_holidays,
        json,
    } = args;

    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let calendar = load_calendar(&config.calendar, bank_holidays)?;
    let engine = LicenceDateEngine::new(calendar, config.policy);

    let cases = CaseloadImporter::from_path(&caseload)?;
    let assessments = cases
        .iter()
        .map(|case| engine.assess(case, today))
        .collect::<Result<Vec<_>, _>>()?;

    info!(
        ?config.environment,
        cases = assessments.len(),
        %today,
        "assessed caseload"
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&assessments)?);
    } else {
        render_assessments(&caseload, &assessments, today);
    }

    Ok(())
}

fn run_changes(args: ChangesArgs) -> Result<(), AppError> {
    let previous = read_snapshot(&args.previous)?;
    let next = read_snapshot(&args.next)?;

    let changes = detect_changes(&previous, &next, args.status, args.kind);
    println!("{}", serde_json::to_string_pretty(&changes)?);
    Ok(())
}

fn read_snapshot(path: &Path) -> Result<DateSnapshot, AppError> {
    let file = std::fs::File::open(path)?;
    Ok(serde_json::from_reader(std::io::BufReader::new(file))?)
}

fn render_assessments(caseload: &Path, assessments: &[CaseAssessment], today: NaiveDate) {
    println!("Licence caseload");
    println!("Source: {} (evaluated {})", caseload.display(), today);

    println!("\nCases");
    for assessment in assessments {
        println!("- {}", describe_assessment(assessment));
    }

    println!("\nTabs");
    for (tab, count) in tab_counts(assessments) {
        println!("- {}: {}", tab.label(), count);
    }
}

fn describe_assessment(assessment: &CaseAssessment) -> String {
    let start = match assessment.licence_start_date {
        Some(date) => date.to_string(),
        None => "no start date".to_string(),
    };

    let mut line = format!(
        "{} | {} | {} | starts {} | {}",
        assessment.case_id,
        assessment.kind.label(),
        assessment.status.label(),
        start,
        assessment.tab.label()
    );

    if let Some(window) = assessment.hard_stop {
        line.push_str(&format!(
            " | hard stop {} (warning {})",
            window.hard_stop_date, window.warning_date
        ));
    }
    if assessment.in_hard_stop_period {
        line.push_str(" | in hard stop");
    }
    if let Some(early) = assessment.early_release.filter(|early| early.eligible) {
        line.push_str(&format!(" | early release from {}", early.earliest_release_date));
    }
    if assessment.allocation_warning_required {
        line.push_str(" | allocation warning");
    }

    line
}

fn tab_counts(assessments: &[CaseAssessment]) -> Vec<(CaseTab, usize)> {
    CaseTab::ordered()
        .into_iter()
        .map(|tab| {
            let count = assessments
                .iter()
                .filter(|assessment| assessment.tab == tab)
                .count();
            (tab, count)
        })
        .collect()
}
