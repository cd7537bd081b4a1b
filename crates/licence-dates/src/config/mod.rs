use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::path::PathBuf;

const DEFAULT_HARD_STOP_WORKING_DAYS: u32 = 2;
const DEFAULT_HARD_STOP_WARNING_WORKING_DAYS: u32 = 2;
const DEFAULT_DUE_SOON_WORKING_DAYS: u32 = 2;
const DEFAULT_EARLY_RELEASE_WORKING_DAYS: u32 = 3;
const DEFAULT_ALLOCATION_WARNING_WORKING_DAYS: u32 = 5;
const DEFAULT_CALENDAR_LOOKBACK_DAYS: u32 = 366;
const DEFAULT_BANK_HOLIDAY_DIVISION: &str = "england-and-wales";

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub policy: PolicyConfig,
    pub calendar: CalendarConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let policy = PolicyConfig::from_lookup(|key| env::var(key).ok())?;

        let calendar = CalendarConfig {
            bank_holidays_path: env::var("LICENCE_BANK_HOLIDAYS_PATH")
                .ok()
                .filter(|value| !value.trim().is_empty())
                .map(PathBuf::from),
            division: env::var("LICENCE_BANK_HOLIDAY_DIVISION")
                .unwrap_or_else(|_| DEFAULT_BANK_HOLIDAY_DIVISION.to_string()),
        };

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            policy,
            calendar,
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// Policy dials for the working-day lead times used by the release rules.
///
/// Every count is a number of working days; `calendar_lookback_days` bounds how
/// many consecutive skipped days a single step may walk over before the
/// calendar is considered exhausted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    pub hard_stop_working_days: u32,
    pub hard_stop_warning_working_days: u32,
    pub due_soon_working_days: u32,
    pub early_release_working_days: u32,
    pub allocation_warning_working_days: u32,
    pub calendar_lookback_days: u32,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            hard_stop_working_days: DEFAULT_HARD_STOP_WORKING_DAYS,
            hard_stop_warning_working_days: DEFAULT_HARD_STOP_WARNING_WORKING_DAYS,
            due_soon_working_days: DEFAULT_DUE_SOON_WORKING_DAYS,
            early_release_working_days: DEFAULT_EARLY_RELEASE_WORKING_DAYS,
            allocation_warning_working_days: DEFAULT_ALLOCATION_WARNING_WORKING_DAYS,
            calendar_lookback_days: DEFAULT_CALENDAR_LOOKBACK_DAYS,
        }
    }
}

impl PolicyConfig {
    /// Builds the policy from a key lookup, falling back to defaults for
    /// missing keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let read = |variable: &'static str, default: u32| -> Result<u32, ConfigError> {
            match lookup(variable) {
                Some(raw) if !raw.trim().is_empty() => {
                    raw.trim()
                        .parse::<u32>()
                        .map_err(|_| ConfigError::InvalidNumber {
                            variable,
                            value: raw.clone(),
                        })
                }
                _ => Ok(default),
            }
        };

        let policy = Self {
            hard_stop_working_days: read(
                "LICENCE_HARD_STOP_WORKING_DAYS",
                defaults.hard_stop_working_days,
            )?,
            hard_stop_warning_working_days: read(
                "LICENCE_HARD_STOP_WARNING_WORKING_DAYS",
                defaults.hard_stop_warning_working_days,
            )?,
            due_soon_working_days: read(
                "LICENCE_DUE_SOON_WORKING_DAYS",
                defaults.due_soon_working_days,
            )?,
            early_release_working_days: read(
                "LICENCE_EARLY_RELEASE_WORKING_DAYS",
                defaults.early_release_working_days,
            )?,
            allocation_warning_working_days: read(
                "LICENCE_ALLOCATION_WARNING_WORKING_DAYS",
                defaults.allocation_warning_working_days,
            )?,
            calendar_lookback_days: read(
                "LICENCE_CALENDAR_LOOKBACK_DAYS",
                defaults.calendar_lookback_days,
            )?,
        };

        policy.validate()?;
        Ok(policy)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.calendar_lookback_days == 0 {
            return Err(ConfigError::ZeroLookback);
        }
        Ok(())
    }
}

/// Where the working-day calendar sources its declared holidays.
#[derive(Debug, Clone)]
pub struct CalendarConfig {
    pub bank_holidays_path: Option<PathBuf>,
    pub division: String,
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidNumber {
        variable: &'static str,
        value: String,
    },
    ZeroLookback,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidNumber { variable, value } => write!(
                f,
                "{} must be a non-negative whole number of days, got '{}'",
                variable, value
            ),
            ConfigError::ZeroLookback => {
                write!(f, "LICENCE_CALENDAR_LOOKBACK_DAYS must be greater than zero")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
