use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sentence and release dates as held on the prison record for one snapshot.
///
/// A refresh replaces the whole set; nothing updates individual fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SentenceDateSet {
    pub conditional_release_date: Option<NaiveDate>,
    pub actual_release_date: Option<NaiveDate>,
    pub post_recall_release_date: Option<NaiveDate>,
    pub sentence_start_date: Option<NaiveDate>,
    pub sentence_end_date: Option<NaiveDate>,
    pub licence_expiry_date: Option<NaiveDate>,
    pub top_up_supervision_start_date: Option<NaiveDate>,
    pub top_up_supervision_expiry_date: Option<NaiveDate>,
    pub home_detention_curfew_actual_date: Option<NaiveDate>,
    pub home_detention_curfew_end_date: Option<NaiveDate>,
    pub home_detention_curfew_eligibility_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReleaseKind {
    Standard,
    PostRecall,
    HomeDetentionCurfew,
}

impl ReleaseKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Standard => "Conditional release",
            Self::PostRecall => "Post recall release",
            Self::HomeDetentionCurfew => "Home detention curfew",
        }
    }

    pub const fn code(self) -> &'static str {
        match self {
            Self::Standard => "STANDARD",
            Self::PostRecall => "POST_RECALL",
            Self::HomeDetentionCurfew => "HOME_DETENTION_CURFEW",
        }
    }
}

impl FromStr for ReleaseKind {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match normalize_code(value).as_str() {
            "STANDARD" | "CRD" => Ok(Self::Standard),
            "POST_RECALL" | "PRRD" => Ok(Self::PostRecall),
            "HOME_DETENTION_CURFEW" | "HDC" => Ok(Self::HomeDetentionCurfew),
            _ => Err(UnknownVariant::new("release kind", value)),
        }
    }
}

/// Licence lifecycle status, with `NotStarted` standing in for a case that
/// has no licence yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LicenceStatus {
    NotStarted,
    InProgress,
    Submitted,
    Approved,
    Active,
    Rejected,
    Inactive,
    Recalled,
    VariationInProgress,
    VariationSubmitted,
    VariationApproved,
    VariationRejected,
    TimedOut,
}

impl LicenceStatus {
    pub const fn ordered() -> [Self; 13] {
        [
            Self::NotStarted,
            Self::InProgress,
            Self::Submitted,
            Self::Approved,
            Self::Active,
            Self::Rejected,
            Self::Inactive,
            Self::Recalled,
            Self::VariationInProgress,
            Self::VariationSubmitted,
            Self::VariationApproved,
            Self::VariationRejected,
            Self::TimedOut,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::NotStarted => "Not Started",
            Self::InProgress => "In Progress",
            Self::Submitted => "Submitted",
            Self::Approved => "Approved",
            Self::Active => "Active",
            Self::Rejected => "Rejected",
            Self::Inactive => "Inactive",
            Self::Recalled => "Recalled",
            Self::VariationInProgress => "Variation In Progress",
            Self::VariationSubmitted => "Variation Submitted",
            Self::VariationApproved => "Variation Approved",
            Self::VariationRejected => "Variation Rejected",
            Self::TimedOut => "Timed Out",
        }
    }

    pub const fn code(self) -> &'static str {
        match self {
            Self::NotStarted => "NOT_STARTED",
            Self::InProgress => "IN_PROGRESS",
            Self::Submitted => "SUBMITTED",
            Self::Approved => "APPROVED",
            Self::Active => "ACTIVE",
            Self::Rejected => "REJECTED",
            Self::Inactive => "INACTIVE",
            Self::Recalled => "RECALLED",
            Self::VariationInProgress => "VARIATION_IN_PROGRESS",
            Self::VariationSubmitted => "VARIATION_SUBMITTED",
            Self::VariationApproved => "VARIATION_APPROVED",
            Self::VariationRejected => "VARIATION_REJECTED",
            Self::TimedOut => "TIMED_OUT",
        }
    }

    /// Statuses still being prepared before release.
    pub const fn is_pre_release(self) -> bool {
        matches!(
            self,
            Self::NotStarted | Self::InProgress | Self::Submitted | Self::Approved
        )
    }
}

impl FromStr for LicenceStatus {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let code = normalize_code(value);
        Self::ordered()
            .into_iter()
            .find(|status| status.code() == code)
            .ok_or_else(|| UnknownVariant::new("licence status", value))
    }
}

/// Caseload list bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CaseTab {
    AttentionNeeded,
    ReleasesInNextTwoWorkingDays,
    FutureReleases,
}

impl CaseTab {
    pub const fn ordered() -> [Self; 3] {
        [
            Self::AttentionNeeded,
            Self::ReleasesInNextTwoWorkingDays,
            Self::FutureReleases,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::AttentionNeeded => "Attention needed",
            Self::ReleasesInNextTwoWorkingDays => "Releases in next 2 working days",
            Self::FutureReleases => "Future releases",
        }
    }
}

/// A case as handed over by the prison and probation data sources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseRecord {
    pub case_id: String,
    pub status: LicenceStatus,
    pub dates: SentenceDateSet,
    /// Upstream flag marking the case as released on home detention curfew.
    #[serde(default)]
    pub home_detention_curfew: bool,
    #[serde(default)]
    pub legal_status: Option<String>,
    #[serde(default)]
    pub is91_case: bool,
    #[serde(default)]
    pub time_served: bool,
}

/// Raised when a status or kind code does not match any known variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownVariant {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

impl fmt::Display for ReleaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl fmt::Display for LicenceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

fn normalize_code(value: &str) -> String {
    value
        .trim()
        .chars()
        .map(|ch| match ch {
            '-' | ' ' => '_',
            other => other.to_ascii_uppercase(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parses_upstream_and_relaxed_codes() {
        assert_eq!("APPROVED".parse(), Ok(LicenceStatus::Approved));
        assert_eq!("in-progress".parse(), Ok(LicenceStatus::InProgress));
        assert_eq!(" variation submitted ".parse(), Ok(LicenceStatus::VariationSubmitted));
        assert!("PENDING".parse::<LicenceStatus>().is_err());
    }

    #[test]
    fn kind_accepts_short_codes() {
        assert_eq!("hdc".parse(), Ok(ReleaseKind::HomeDetentionCurfew));
        assert_eq!("PRRD".parse(), Ok(ReleaseKind::PostRecall));
        assert_eq!("standard".parse(), Ok(ReleaseKind::Standard));
    }

    #[test]
    fn status_codes_round_trip_through_serde() {
        for status in LicenceStatus::ordered() {
            let json = serde_json::to_string(&status).expect("serializes");
            assert_eq!(json, format!("\"{}\"", status.code()));
        }
    }

    #[test]
    fn sentence_dates_deserialize_with_missing_fields() {
        let dates: SentenceDateSet =
            serde_json::from_str(r#"{ "conditional_release_date": "2024-06-08" }"#)
                .expect("valid json");
        assert_eq!(
            dates.conditional_release_date,
            NaiveDate::from_ymd_opt(2024, 6, 8)
        );
        assert!(dates.actual_release_date.is_none());
    }
}
