//! Dashboard statistics read model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Per-user learning statistics shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// Number of courses the user has started.
    pub total_courses: usize,
    /// Courses with a known total duration fully watched.
    pub completed_courses: usize,
    /// Started courses not yet completed.
    pub in_progress_courses: usize,
    /// Total watch time across all courses, rounded to whole hours.
    pub watched_hours: u64,
    pub generated_at: DateTime<Utc>,
}

impl DashboardStats {
    /// Stats for a user with no courses.
    pub fn empty(at: DateTime<Utc>) -> Self {
        Self {
            total_courses: 0,
            completed_courses: 0,
            in_progress_courses: 0,
            watched_hours: 0,
            generated_at: at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_stats() {
        let stats = DashboardStats::empty(Utc::now());
        assert_eq!(stats.total_courses, 0);
        assert_eq!(stats.completed_courses, 0);
        assert_eq!(stats.in_progress_courses, 0);
        assert_eq!(stats.watched_hours, 0);
    }

    #[test]
    fn test_dashboard_stats_serialization() {
        let stats = DashboardStats {
            total_courses: 5,
            completed_courses: 2,
            in_progress_courses: 3,
            watched_hours: 14,
            generated_at: Utc::now(),
        };
        let json = serde_json::to_string(&stats).unwrap();
        assert!(json.contains("\"totalCourses\":5"));
        assert!(json.contains("\"completedCourses\":2"));
        assert!(json.contains("\"inProgressCourses\":3"));
        assert!(json.contains("\"watchedHours\":14"));
    }
}
