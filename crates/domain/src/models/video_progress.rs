//! Video watch-progress domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Watch state for one video within a course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoProgress {
    pub video_id: String,
    /// Seconds of the video the learner has watched. Never decreases.
    pub watched_seconds: f64,
    /// Latest known video duration; may be corrected on any update.
    pub duration_seconds: f64,
    /// Derived from watched/duration at the completion threshold; never
    /// toggled independently.
    pub completed: bool,
    pub updated_at: DateTime<Utc>,
}

impl VideoProgress {
    /// Fraction of the duration that must be watched for a video to count
    /// as completed.
    pub const COMPLETION_THRESHOLD: f64 = 0.9;

    /// Creates a zeroed entry for a video that is about to receive its first
    /// watch event.
    pub fn new(video_id: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self {
            video_id: video_id.into(),
            watched_seconds: 0.0,
            duration_seconds: 0.0,
            completed: false,
            updated_at: at,
        }
    }

    /// Applies one watch event to this video.
    ///
    /// The incoming watched value is clamped to `[0, duration_seconds]` and
    /// then merged with `max()`, so the stored value never decreases. The
    /// duration is overwritten unconditionally with the latest value and the
    /// completion flag is recomputed from the merged pair.
    pub fn apply_watch_event(
        &mut self,
        watched_seconds: f64,
        duration_seconds: f64,
        at: DateTime<Utc>,
    ) {
        // A negative or NaN duration would panic `clamp`; bound it first.
        // Payload validation rejects such durations before they get here.
        let duration = duration_seconds.max(0.0);
        let clamped = watched_seconds.clamp(0.0, duration);
        self.watched_seconds = self.watched_seconds.max(clamped);
        self.duration_seconds = duration;
        self.completed = Self::meets_threshold(self.watched_seconds, self.duration_seconds);
        self.updated_at = at;
    }

    /// Recomputes the derived completion flag. Returns whether it changed.
    ///
    /// Used by the repair pass over legacy documents whose flags drifted.
    pub fn recompute_completed(&mut self) -> bool {
        let completed = Self::meets_threshold(self.watched_seconds, self.duration_seconds);
        let changed = completed != self.completed;
        self.completed = completed;
        changed
    }

    /// The seconds this video contributes to the course aggregate: the
    /// watched value capped at the duration, so a stale watched value larger
    /// than a since-lowered duration can never inflate the course total.
    pub fn counted_seconds(&self) -> f64 {
        self.watched_seconds.min(self.duration_seconds)
    }

    fn meets_threshold(watched_seconds: f64, duration_seconds: f64) -> bool {
        watched_seconds >= Self::COMPLETION_THRESHOLD * duration_seconds
    }
}

/// Request payload for recording a watch event.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RecordProgressInput {
    #[validate(custom(function = "shared::validation::validate_identity_id"))]
    pub video_id: String,

    #[validate(custom(function = "shared::validation::validate_watched_seconds"))]
    pub watched_seconds: f64,

    #[validate(custom(function = "shared::validation::validate_duration_seconds"))]
    pub duration_seconds: f64,
}
