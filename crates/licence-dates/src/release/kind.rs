use super::domain::{ReleaseKind, SentenceDateSet};
use chrono::NaiveDate;

/// Decides which release kind governs a snapshot.
///
/// Home detention curfew comes from an upstream flag rather than the dates.
/// Otherwise a post recall release date wins when it is today or later and
/// falls after the conditional release date (or there is none).
pub fn resolve_kind(
    dates: &SentenceDateSet,
    home_detention_curfew: bool,
    today: NaiveDate,
) -> ReleaseKind {
    if home_detention_curfew {
        return ReleaseKind::HomeDetentionCurfew;
    }

    if is_post_recall_release(
        dates.post_recall_release_date,
        dates.conditional_release_date,
        today,
    ) {
        ReleaseKind::PostRecall
    } else {
        ReleaseKind::Standard
    }
}

pub fn is_post_recall_release(
    post_recall_release_date: Option<NaiveDate>,
    conditional_release_date: Option<NaiveDate>,
    today: NaiveDate,
) -> bool {
    match post_recall_release_date {
        Some(prrd) if prrd >= today => match conditional_release_date {
            Some(crd) => prrd > crd,
            None => true,
        },
        _ => false,
    }
}
