use super::domain::{LicenceStatus, ReleaseKind, SentenceDateSet};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Dates of a case compared between two refreshes: the sentence dates from
/// the prison record plus the licence start date computed from them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateSnapshot {
    #[serde(default)]
    pub licence_start_date: Option<NaiveDate>,
    #[serde(default)]
    pub sentence: SentenceDateSet,
}

/// Date fields tracked for change notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DateField {
    LicenceStartDate,
    LicenceExpiryDate,
    SentenceEndDate,
    TopUpSupervisionStartDate,
    TopUpSupervisionExpiryDate,
    PostRecallReleaseDate,
    HomeDetentionCurfewActualDate,
    HomeDetentionCurfewEndDate,
    ConditionalReleaseDate,
    ActualReleaseDate,
    SentenceStartDate,
}

impl DateField {
    pub const fn ordered() -> [Self; 11] {
        [
            Self::LicenceStartDate,
            Self::LicenceExpiryDate,
            Self::SentenceEndDate,
            Self::TopUpSupervisionStartDate,
            Self::TopUpSupervisionExpiryDate,
            Self::PostRecallReleaseDate,
            Self::HomeDetentionCurfewActualDate,
            Self::HomeDetentionCurfewEndDate,
            Self::ConditionalReleaseDate,
            Self::ActualReleaseDate,
            Self::SentenceStartDate,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::LicenceStartDate => "Licence start date",
            Self::LicenceExpiryDate => "Licence end date",
            Self::SentenceEndDate => "Sentence end date",
            Self::TopUpSupervisionStartDate => "Top up supervision start date",
            Self::TopUpSupervisionExpiryDate => "Top up supervision end date",
            Self::PostRecallReleaseDate => "Post recall release date",
            Self::HomeDetentionCurfewActualDate => "HDC actual date",
            Self::HomeDetentionCurfewEndDate => "HDC end date",
            Self::ConditionalReleaseDate => "Conditional release date",
            Self::ActualReleaseDate => "Confirmed release date",
            Self::SentenceStartDate => "Sentence start date",
        }
    }

    /// Only compared and reported for home detention curfew cases.
    pub const fn hdc_only(self) -> bool {
        matches!(
            self,
            Self::HomeDetentionCurfewActualDate | Self::HomeDetentionCurfewEndDate
        )
    }

    pub const fn notify_on_change(self) -> bool {
        !matches!(
            self,
            Self::ConditionalReleaseDate | Self::ActualReleaseDate | Self::SentenceStartDate
        )
    }

    /// A change to this field alone makes the change set material. Sentence
    /// end date is material only for approved licences.
    pub const fn is_material_trigger(self) -> bool {
        matches!(
            self,
            Self::LicenceStartDate
                | Self::LicenceExpiryDate
                | Self::TopUpSupervisionStartDate
                | Self::TopUpSupervisionExpiryDate
                | Self::PostRecallReleaseDate
                | Self::HomeDetentionCurfewActualDate
                | Self::HomeDetentionCurfewEndDate
        )
    }

    pub fn value(self, snapshot: &DateSnapshot) -> Option<NaiveDate> {
        let dates = &snapshot.sentence;
        match self {
            Self::LicenceStartDate => snapshot.licence_start_date,
            Self::LicenceExpiryDate => dates.licence_expiry_date,
            Self::SentenceEndDate => dates.sentence_end_date,
            Self::TopUpSupervisionStartDate => dates.top_up_supervision_start_date,
            Self::TopUpSupervisionExpiryDate => dates.top_up_supervision_expiry_date,
            Self::PostRecallReleaseDate => dates.post_recall_release_date,
            Self::HomeDetentionCurfewActualDate => dates.home_detention_curfew_actual_date,
            Self::HomeDetentionCurfewEndDate => dates.home_detention_curfew_end_date,
            Self::ConditionalReleaseDate => dates.conditional_release_date,
            Self::ActualReleaseDate => dates.actual_release_date,
            Self::SentenceStartDate => dates.sentence_start_date,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateChangeRecord {
    pub field: DateField,
    pub previous: Option<NaiveDate>,
    pub new: Option<NaiveDate>,
    pub changed: bool,
}

impl DateChangeRecord {
    fn compare(field: DateField, previous: &DateSnapshot, next: &DateSnapshot) -> Self {
        let previous = field.value(previous);
        let new = field.value(next);
        Self {
            field,
            previous,
            new,
            changed: previous != new,
        }
    }

    pub fn describe(&self) -> String {
        format!(
            "{} changed from {} to {}",
            self.field.label(),
            describe_date(self.previous),
            describe_date(self.new)
        )
    }
}

/// Point-in-time comparison of two snapshots. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateChangeSet {
    records: Vec<DateChangeRecord>,
    is_material: bool,
}

impl DateChangeSet {
    pub fn records(&self) -> &[DateChangeRecord] {
        &self.records
    }

    pub fn is_material(&self) -> bool {
        self.is_material
    }

    pub fn record(&self, field: DateField) -> Option<&DateChangeRecord> {
        self.records.iter().find(|record| record.field == field)
    }

    pub fn has_changes(&self) -> bool {
        self.records.iter().any(|record| record.changed)
    }

    pub fn changed(&self) -> impl Iterator<Item = &DateChangeRecord> + '_ {
        self.records.iter().filter(|record| record.changed)
    }

    /// Changed fields that warrant a notification on their own.
    pub fn notifiable(&self) -> impl Iterator<Item = &DateChangeRecord> + '_ {
        self.changed().filter(|record| record.field.notify_on_change())
    }

    /// One line per changed field, for audit events.
    pub fn summary(&self) -> String {
        let lines: Vec<String> = self.changed().map(DateChangeRecord::describe).collect();
        if lines.is_empty() {
            "no date changes".to_string()
        } else {
            lines.join("; ")
        }
    }
}

pub fn detect_changes(
    previous: &DateSnapshot,
    next: &DateSnapshot,
    status: LicenceStatus,
    kind: ReleaseKind,
) -> DateChangeSet {
    let records: Vec<DateChangeRecord> = DateField::ordered()
        .into_iter()
        .filter(|field| !field.hdc_only() || kind == ReleaseKind::HomeDetentionCurfew)
        .map(|field| DateChangeRecord::compare(field, previous, next))
        .collect();

    let is_material = records.iter().any(|record| {
        record.changed
            && (record.field.is_material_trigger()
                || (record.field == DateField::SentenceEndDate
                    && status == LicenceStatus::Approved))
    });

    let change_set = DateChangeSet {
        records,
        is_material,
    };

    if change_set.is_material() {
        tracing::info!(
            %status,
            %kind,
            changes = %change_set.summary(),
            "material sentence date change"
        );
    } else if change_set.has_changes() {
        tracing::debug!(
            %status,
            %kind,
            changes = %change_set.summary(),
            "non-material sentence date change"
        );
    }

    change_set
}

fn describe_date(date: Option<NaiveDate>) -> String {
    match date {
        Some(date) => date.format("%d %B %Y").to_string(),
        None => "not set".to_string(),
    }
}
