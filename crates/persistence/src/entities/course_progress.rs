//! Course progress entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::VideoProgress;

/// Database row mapping for the course_progress table.
///
/// Per-video records are stored as a JSONB array so one row carries the full
/// course entry and every write replaces it atomically.
#[derive(Debug, Clone, FromRow)]
pub struct CourseProgressEntity {
    pub id: i64,
    pub user_id: Uuid,
    pub course_id: String,
    pub channel_id: String,
    pub title: String,
    pub channel_title: String,
    pub thumbnail_url: Option<String>,
    pub total_seconds: f64,
    pub watched_seconds: f64,
    pub last_accessed: DateTime<Utc>,
    pub videos: Json<Vec<VideoProgress>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CourseProgressEntity> for domain::models::CourseProgress {
    fn from(entity: CourseProgressEntity) -> Self {
        Self {
            course_id: entity.course_id,
            channel_id: entity.channel_id,
            title: entity.title,
            channel_title: entity.channel_title,
            thumbnail_url: entity.thumbnail_url,
            total_seconds: entity.total_seconds,
            watched_seconds: entity.watched_seconds,
            last_accessed: entity.last_accessed,
            videos: entity.videos.0,
        }
    }
}
