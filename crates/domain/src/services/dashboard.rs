//! Dashboard statistics computation.

use chrono::{DateTime, Utc};

use crate::models::{CourseProgress, DashboardStats};

/// Computes per-user learning statistics from the full course collection.
///
/// A course counts as completed only when its total duration is known and
/// fully watched; courses whose total is still zero stay in progress no
/// matter how much was watched. Watched hours are the rounded sum of all
/// course aggregates.
pub fn compute_dashboard_stats(courses: &[CourseProgress], at: DateTime<Utc>) -> DashboardStats {
    let total_courses = courses.len();
    let completed_courses = courses.iter().filter(|c| c.completed()).count();
    let watched_seconds: f64 = courses.iter().map(|c| c.watched_seconds).sum();

    DashboardStats {
        total_courses,
        completed_courses,
        in_progress_courses: total_courses - completed_courses,
        watched_hours: (watched_seconds / 3600.0).round() as u64,
        generated_at: at,
    }
}
