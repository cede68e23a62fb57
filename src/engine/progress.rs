//! Folding quiz results into cumulative course progress

use crate::domain::{AllCourseProgress, TenseProgress};

/// Minimum score for a tense to count as completed
pub const COMPLETION_THRESHOLD: f64 = 75.0;

/// Merge one lesson result into a copy of `existing`.
///
/// `completed` never goes back to false and `score` keeps the best attempt.
/// The stored score is rounded down so it never reads as passing when the
/// attempt fell short of the threshold.
pub fn merge_progress(
    existing: &AllCourseProgress,
    course_id: &str,
    tense_id: &str,
    score_percent: f64,
) -> AllCourseProgress {
    let mut merged = existing.clone();
    let entry = merged
        .entry(course_id.to_string())
        .or_default()
        .entry(tense_id.to_string())
        .or_insert_with(TenseProgress::default);

    let whole = score_percent.floor().clamp(0.0, 100.0) as u32;
    entry.completed = entry.completed || score_percent >= COMPLETION_THRESHOLD;
    entry.score = entry.score.max(whole);
    merged
}
