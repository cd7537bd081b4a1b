use crate::telemetry::TelemetryError;
use licence_dates::calendar::HolidaySourceError;
use licence_dates::caseload::CaseloadImportError;
use licence_dates::{CalendarError, ConfigError};
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Calendar(CalendarError),
    Holidays(HolidaySourceError),
    Caseload(CaseloadImportError),
    Snapshot(serde_json::Error),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Calendar(err) => write!(f, "date calculation failed: {}", err),
            AppError::Holidays(err) => write!(f, "bank holiday error: {}", err),
            AppError::Caseload(err) => write!(f, "caseload error: {}", err),
            AppError::Snapshot(err) => write!(f, "invalid date snapshot: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Calendar(err) => Some(err),
            AppError::Holidays(err) => Some(err),
            AppError::Caseload(err) => Some(err),
            AppError::Snapshot(err) => Some(err),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<CalendarError> for AppError {
    fn from(value: CalendarError) -> Self {
        Self::Calendar(value)
    }
}

impl From<HolidaySourceError> for AppError {
    fn from(value: HolidaySourceError) -> Self {
        Self::Holidays(value)
    }
}

impl From<CaseloadImportError> for AppError {
    fn from(value: CaseloadImportError) -> Self {
        Self::Caseload(value)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Snapshot(value)
    }
}
