//! Data-repair passes for legacy course progress collections.
//!
//! Older clients could write duplicate course entries for the same
//! `(course_id, channel_id)` key and aggregates that drifted from the video
//! records. These passes run outside the normal write path and collapse a
//! collection back into invariant-holding shape.

use std::collections::HashMap;

use crate::models::{CourseKey, CourseProgress};

/// What a repair pass changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RepairOutcome {
    /// Duplicate course entries dropped.
    pub duplicates_removed: usize,
    /// Courses whose derived fields had to be recomputed.
    pub courses_rebuilt: usize,
}

impl RepairOutcome {
    /// Whether the repaired collection differs from the input.
    pub fn changed(&self) -> bool {
        self.duplicates_removed > 0 || self.courses_rebuilt > 0
    }
}

/// Collapses duplicate course entries sharing an identity key.
///
/// Of the duplicates, the entry with the higher `watched_seconds` survives;
/// on equal watched time the later-iterated entry wins. Survivors keep the
/// position where their key first appeared. Applying the pass twice yields
/// the same result as applying it once.
pub fn deduplicate_course_progress(courses: Vec<CourseProgress>) -> Vec<CourseProgress> {
    let mut kept: Vec<CourseProgress> = Vec::with_capacity(courses.len());
    let mut index: HashMap<CourseKey, usize> = HashMap::new();

    for course in courses {
        match index.get(&course.key()) {
            Some(&slot) => {
                if course.watched_seconds >= kept[slot].watched_seconds {
                    kept[slot] = course;
                }
            }
            None => {
                index.insert(course.key(), kept.len());
                kept.push(course);
            }
        }
    }
    kept
}

/// Full repair pass: deduplicates the collection, then recomputes every
/// course's derived fields from its video records.
pub fn repair_course_progress(
    courses: Vec<CourseProgress>,
) -> (Vec<CourseProgress>, RepairOutcome) {
    let before = courses.len();
    let mut repaired = deduplicate_course_progress(courses);

    let mut courses_rebuilt = 0;
    for course in &mut repaired {
        if course.rebuild_derived() {
            courses_rebuilt += 1;
        }
    }

    let outcome = RepairOutcome {
        duplicates_removed: before - repaired.len(),
        courses_rebuilt,
    };
    (repaired, outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StartCourseInput;
    use chrono::Utc;

    fn create_test_course(course_id: &str, channel_id: &str, watched: f64) -> CourseProgress {
        let mut course = CourseProgress::start(
            StartCourseInput {
                course_id: course_id.to_string(),
                channel_id: channel_id.to_string(),
                title: format!("Course {}", course_id),
                channel_title: "Test Channel".to_string(),
                thumbnail_url: None,
            },
            Utc::now(),
        );
        if watched > 0.0 {
            course.record_video_progress("v1", watched, watched, Utc::now());
        }
        course
    }

    #[test]
    fn test_dedup_empty_collection() {
        assert!(deduplicate_course_progress(Vec::new()).is_empty());
    }

    #[test]
    fn test_dedup_keeps_unique_entries_untouched() {
        let courses = vec![
            create_test_course("c1", "ch1", 10.0),
            create_test_course("c2", "ch1", 20.0),
        ];
        let deduped = deduplicate_course_progress(courses.clone());
        assert_eq!(deduped, courses);
    }

    #[test]
    fn test_dedup_keeps_higher_watched() {
        let mut low = create_test_course("c1", "ch1", 10.0);
        low.title = "Low".to_string();
        let mut high = create_test_course("c1", "ch1", 50.0);
        high.title = "High".to_string();

        let deduped = deduplicate_course_progress(vec![low.clone(), high.clone()]);
        assert_eq!(deduped.len(), 1);
        assert_eq!(deduped[0].title, "High");

        // Same winner when the better entry comes first.
        let deduped = deduplicate_course_progress(vec![high, low]);
        assert_eq!(deduped[0].title, "High");
    }

    #[test]
    fn test_dedup_tie_keeps_later_entry() {
        let mut first = create_test_course("c1", "ch1", 10.0);
        first.title = "First".to_string();
        let mut second = create_test_course("c1", "ch1", 10.0);
        second.title = "Second".to_string();

        let deduped = deduplicate_course_progress(vec![first, second]);
        assert_eq!(deduped.len(), 1);
        assert_eq!(deduped[0].title, "Second");
    }

    #[test]
    fn test_dedup_preserves_first_occurrence_order() {
        let courses = vec![
            create_test_course("c1", "ch1", 10.0),
            create_test_course("c2", "ch1", 10.0),
            create_test_course("c1", "ch1", 90.0),
            create_test_course("c3", "ch1", 10.0),
        ];
        let deduped = deduplicate_course_progress(courses);
        let ids: Vec<&str> = deduped.iter().map(|c| c.course_id.as_str()).collect();
        assert_eq!(ids, vec!["c1", "c2", "c3"]);
        assert_eq!(deduped[0].watched_seconds, 90.0);
    }

    #[test]
    fn test_dedup_distinguishes_channels() {
        let courses = vec![
            create_test_course("c1", "ch1", 10.0),
            create_test_course("c1", "ch2", 20.0),
        ];
        assert_eq!(deduplicate_course_progress(courses).len(), 2);
    }

    #[test]
    fn test_dedup_is_idempotent() {
        let courses = vec![
            create_test_course("c1", "ch1", 10.0),
            create_test_course("c2", "ch1", 30.0),
            create_test_course("c1", "ch1", 50.0),
            create_test_course("c2", "ch1", 30.0),
        ];
        let once = deduplicate_course_progress(courses);
        let twice = deduplicate_course_progress(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_repair_reports_no_change_on_clean_input() {
        let courses = vec![create_test_course("c1", "ch1", 10.0)];
        let (repaired, outcome) = repair_course_progress(courses.clone());
        assert_eq!(repaired, courses);
        assert!(!outcome.changed());
    }

    #[test]
    fn test_repair_counts_duplicates_and_rebuilds() {
        let mut drifted = create_test_course("c2", "ch1", 40.0);
        drifted.watched_seconds = 999.0;

        let courses = vec![
            create_test_course("c1", "ch1", 10.0),
            create_test_course("c1", "ch1", 50.0),
            drifted,
        ];
        let (repaired, outcome) = repair_course_progress(courses);
        assert_eq!(repaired.len(), 2);
        assert_eq!(outcome.duplicates_removed, 1);
        assert_eq!(outcome.courses_rebuilt, 1);
        assert!(outcome.changed());
        assert_eq!(repaired[1].watched_seconds, 40.0);
    }
}
