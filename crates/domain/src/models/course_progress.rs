//! Course watch-progress domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::course_key::CourseKey;
use super::video_progress::VideoProgress;

// ============================================================================
// Core Model
// ============================================================================

/// Aggregate watch state for one (course, channel) pair for one user.
///
/// `watched_seconds` is derived from the video list and recomputed on every
/// video update; it is never incremented independently, which is what keeps
/// repeated watch events for the same video from double counting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseProgress {
    pub course_id: String,
    pub channel_id: String,
    pub title: String,
    pub channel_title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    /// Full playlist duration in seconds. Starts at zero and only ever
    /// increases once known.
    pub total_seconds: f64,
    /// Sum of `min(watched, duration)` across the video list.
    pub watched_seconds: f64,
    pub last_accessed: DateTime<Utc>,
    /// Per-video watch records in insertion order, `video_id` unique.
    pub videos: Vec<VideoProgress>,
}

impl CourseProgress {
    /// Creates the zeroed entry written when a learner starts a course.
    pub fn start(input: StartCourseInput, at: DateTime<Utc>) -> Self {
        Self {
            course_id: input.course_id,
            channel_id: input.channel_id,
            title: input.title,
            channel_title: input.channel_title,
            thumbnail_url: input.thumbnail_url,
            total_seconds: 0.0,
            watched_seconds: 0.0,
            last_accessed: at,
            videos: Vec::new(),
        }
    }

    /// The identity key of this entry.
    pub fn key(&self) -> CourseKey {
        CourseKey::new(self.course_id.clone(), self.channel_id.clone())
    }

    /// Whether this entry matches the given key.
    pub fn matches_key(&self, key: &CourseKey) -> bool {
        self.course_id == key.course_id && self.channel_id == key.channel_id
    }

    /// Looks up a video record by id.
    pub fn find_video(&self, video_id: &str) -> Option<&VideoProgress> {
        self.videos.iter().find(|v| v.video_id == video_id)
    }

    /// Applies one watch event to the named video and refreshes the derived
    /// course aggregate.
    ///
    /// The video record is created on its first event; thereafter the
    /// per-video monotonicity and clamping rules of
    /// [`VideoProgress::apply_watch_event`] apply. The course total is
    /// recomputed from scratch across all videos afterwards.
    pub fn record_video_progress(
        &mut self,
        video_id: &str,
        watched_seconds: f64,
        duration_seconds: f64,
        at: DateTime<Utc>,
    ) {
        let index = match self.videos.iter().position(|v| v.video_id == video_id) {
            Some(index) => index,
            None => {
                self.videos.push(VideoProgress::new(video_id, at));
                self.videos.len() - 1
            }
        };
        self.videos[index].apply_watch_event(watched_seconds, duration_seconds, at);

        self.watched_seconds = self.watched_sum();
        self.last_accessed = at;
    }

    /// Applies a total-duration correction. Returns whether the stored value
    /// changed.
    ///
    /// Once set, the total only ever increases: a smaller incoming value is
    /// ignored, an equal one skips the write.
    pub fn apply_total_seconds(&mut self, total_seconds: f64) -> bool {
        if total_seconds > self.total_seconds {
            self.total_seconds = total_seconds;
            true
        } else {
            false
        }
    }

    /// Whether the whole course counts as completed on the dashboard.
    ///
    /// A course whose total duration is still unknown (zero) is never
    /// completed, no matter how much was watched.
    pub fn completed(&self) -> bool {
        self.total_seconds > 0.0 && self.watched_seconds >= self.total_seconds
    }

    /// Watched share of the course as a percentage, capped at 100. Zero while
    /// the total duration is unknown.
    pub fn completion_percent(&self) -> f64 {
        if self.total_seconds <= 0.0 {
            return 0.0;
        }
        (self.watched_seconds / self.total_seconds * 100.0).min(100.0)
    }

    /// The most recently updated video in this course, or `None` when no
    /// watch event was recorded yet. Ties on equal timestamps keep the first
    /// video in insertion order.
    pub fn latest_video(&self) -> Option<&VideoProgress> {
        let mut latest: Option<&VideoProgress> = None;
        for video in &self.videos {
            let newer = match latest {
                Some(current) => video.updated_at > current.updated_at,
                None => true,
            };
            if newer {
                latest = Some(video);
            }
        }
        latest
    }

    /// Recomputes every derived field from the video list. Returns whether
    /// anything changed.
    ///
    /// Used by the repair pass over legacy documents whose stored aggregates
    /// drifted from the video records.
    pub fn rebuild_derived(&mut self) -> bool {
        let mut changed = false;
        for video in &mut self.videos {
            if video.recompute_completed() {
                changed = true;
            }
        }
        let watched = self.watched_sum();
        if watched != self.watched_seconds {
            self.watched_seconds = watched;
            changed = true;
        }
        changed
    }

    fn watched_sum(&self) -> f64 {
        self.videos.iter().map(VideoProgress::counted_seconds).sum()
    }
}

// ============================================================================
// Request DTOs
// ============================================================================

/// Request payload for starting a course.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct StartCourseInput {
    #[validate(custom(function = "shared::validation::validate_identity_id"))]
    pub course_id: String,

    #[validate(custom(function = "shared::validation::validate_identity_id"))]
    pub channel_id: String,

    #[validate(length(min = 1, message = "Course title must not be empty"))]
    pub title: String,

    #[validate(length(min = 1, message = "Channel title must not be empty"))]
    pub channel_title: String,

    pub thumbnail_url: Option<String>,
}

impl StartCourseInput {
    /// The identity key carried by this payload.
    pub fn key(&self) -> CourseKey {
        CourseKey::new(self.course_id.clone(), self.channel_id.clone())
    }
}
