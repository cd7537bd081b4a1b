//! Release date rules: kind resolution, licence start date, hard stop window,
//! early release, caseload tabs and date change detection.

pub mod changes;
pub mod domain;
pub mod early_release;
mod engine;
pub mod hard_stop;
pub mod kind;
pub mod start_date;
pub mod tabs;

#[cfg(test)]
mod tests;

pub use changes::{detect_changes, DateChangeRecord, DateChangeSet, DateField, DateSnapshot};
pub use domain::{
    CaseRecord, CaseTab, LicenceStatus, ReleaseKind, SentenceDateSet, UnknownVariant,
};
pub use early_release::EarlyReleaseAssessment;
pub use engine::{CaseAssessment, LicenceDateEngine};
pub use hard_stop::HardStopWindow;
pub use kind::resolve_kind;
pub use start_date::{calculate_licence_start_date, is_alternate_outcome};
pub use tabs::classify_tab;
