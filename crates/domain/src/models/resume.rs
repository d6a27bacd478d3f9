//! Resume-playback read model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::course_key::CourseKey;

/// Where playback should resume for a course: the most recently updated
/// video together with its saved position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeTarget {
    pub course_id: String,
    pub channel_id: String,
    pub video_id: String,
    /// Saved playback position in seconds.
    pub watched_seconds: f64,
    pub duration_seconds: f64,
    pub completed: bool,
    pub updated_at: DateTime<Utc>,
}

impl ResumeTarget {
    /// The course this target belongs to.
    pub fn key(&self) -> CourseKey {
        CourseKey::new(self.course_id.clone(), self.channel_id.clone())
    }
}
