//! Resume-target selection across a user's course collection.

use crate::models::{CourseProgress, ResumeTarget};

/// Finds the single most recently touched video across all courses.
///
/// Courses are scanned in collection order and videos in insertion order; a
/// later video wins only with a strictly newer `updated_at`, so equal
/// timestamps resolve to the first match deterministically. Returns `None`
/// when no course has any recorded video.
pub fn find_resume_target(courses: &[CourseProgress]) -> Option<ResumeTarget> {
    let mut best: Option<ResumeTarget> = None;
    for course in courses {
        for video in &course.videos {
            let newer = match &best {
                Some(current) => video.updated_at > current.updated_at,
                None => true,
            };
            if newer {
                best = Some(ResumeTarget {
                    course_id: course.course_id.clone(),
                    channel_id: course.channel_id.clone(),
                    video_id: video.video_id.clone(),
                    watched_seconds: video.watched_seconds,
                    duration_seconds: video.duration_seconds,
                    completed: video.completed,
                    updated_at: video.updated_at,
                });
            }
        }
    }
    best
}

/// Picks up to `limit` courses for a "continue watching" rail: courses with
/// some watch time that are not yet completed, most recently accessed first.
///
/// The sort is stable, so courses sharing a `last_accessed` timestamp keep
/// their collection order.
pub fn select_continue_watching(courses: &[CourseProgress], limit: usize) -> Vec<CourseProgress> {
    let mut candidates: Vec<CourseProgress> = courses
        .iter()
        .filter(|c| c.watched_seconds > 0.0 && !c.completed())
        .cloned()
        .collect();
    candidates.sort_by(|a, b| b.last_accessed.cmp(&a.last_accessed));
    candidates.truncate(limit);
    candidates
}
