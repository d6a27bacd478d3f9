//! Course progress repository.

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use domain::error::ProgressError;
use domain::models::{CourseKey, CourseProgress};
use domain::repository::ProgressRepository;

use crate::entities::CourseProgressEntity;
use crate::metrics::QueryTimer;

/// PostgreSQL-backed [`ProgressRepository`].
///
/// One row per `(user_id, course_id, channel_id)`, enforced by a unique
/// constraint; collection order is insertion order via the serial id.
#[derive(Debug, Clone)]
pub struct PgProgressRepository {
    pool: PgPool,
}

impl PgProgressRepository {
    /// Create a new repository instance.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl ProgressRepository for PgProgressRepository {
    async fn load_all(&self, user_id: Uuid) -> Result<Vec<CourseProgress>, ProgressError> {
        let timer = QueryTimer::new("load_all_course_progress");
        let rows = sqlx::query_as::<_, CourseProgressEntity>(
            r#"
            SELECT
                id, user_id, course_id, channel_id, title, channel_title,
                thumbnail_url, total_seconds, watched_seconds, last_accessed,
                videos, created_at, updated_at
            FROM course_progress
            WHERE user_id = $1
            ORDER BY id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(ProgressError::storage)?;
        timer.record();

        Ok(rows.into_iter().map(CourseProgress::from).collect())
    }

    async fn find_course(
        &self,
        user_id: Uuid,
        key: &CourseKey,
    ) -> Result<Option<CourseProgress>, ProgressError> {
        let timer = QueryTimer::new("find_course_progress");
        let row = sqlx::query_as::<_, CourseProgressEntity>(
            r#"
            SELECT
                id, user_id, course_id, channel_id, title, channel_title,
                thumbnail_url, total_seconds, watched_seconds, last_accessed,
                videos, created_at, updated_at
            FROM course_progress
            WHERE user_id = $1 AND course_id = $2 AND channel_id = $3
            "#,
        )
        .bind(user_id)
        .bind(&key.course_id)
        .bind(&key.channel_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(ProgressError::storage)?;
        timer.record();

        Ok(row.map(CourseProgress::from))
    }

    async fn upsert_course(
        &self,
        user_id: Uuid,
        course: &CourseProgress,
    ) -> Result<(), ProgressError> {
        let timer = QueryTimer::new("upsert_course_progress");
        sqlx::query(
            r#"
            INSERT INTO course_progress (
                user_id, course_id, channel_id, title, channel_title,
                thumbnail_url, total_seconds, watched_seconds, last_accessed, videos
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (user_id, course_id, channel_id)
            DO UPDATE SET
                title = EXCLUDED.title,
                channel_title = EXCLUDED.channel_title,
                thumbnail_url = EXCLUDED.thumbnail_url,
                total_seconds = EXCLUDED.total_seconds,
                watched_seconds = EXCLUDED.watched_seconds,
                last_accessed = EXCLUDED.last_accessed,
                videos = EXCLUDED.videos,
                updated_at = NOW()
            "#,
        )
        .bind(user_id)
        .bind(&course.course_id)
        .bind(&course.channel_id)
        .bind(&course.title)
        .bind(&course.channel_title)
        .bind(&course.thumbnail_url)
        .bind(course.total_seconds)
        .bind(course.watched_seconds)
        .bind(course.last_accessed)
        .bind(Json(&course.videos))
        .execute(&self.pool)
        .await
        .map_err(ProgressError::storage)?;
        timer.record();

        Ok(())
    }

    async fn delete_course(
        &self,
        user_id: Uuid,
        key: &CourseKey,
    ) -> Result<bool, ProgressError> {
        let timer = QueryTimer::new("delete_course_progress");
        let result = sqlx::query(
            r#"
            DELETE FROM course_progress
            WHERE user_id = $1 AND course_id = $2 AND channel_id = $3
            "#,
        )
        .bind(user_id)
        .bind(&key.course_id)
        .bind(&key.channel_id)
        .execute(&self.pool)
        .await
        .map_err(ProgressError::storage)?;
        timer.record();

        Ok(result.rows_affected() > 0)
    }

    async fn replace_all(
        &self,
        user_id: Uuid,
        courses: &[CourseProgress],
    ) -> Result<(), ProgressError> {
        let timer = QueryTimer::new("replace_all_course_progress");
        let mut tx = self.pool.begin().await.map_err(ProgressError::storage)?;

        sqlx::query("DELETE FROM course_progress WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await
            .map_err(ProgressError::storage)?;

        for course in courses {
            sqlx::query(
                r#"
                INSERT INTO course_progress (
                    user_id, course_id, channel_id, title, channel_title,
                    thumbnail_url, total_seconds, watched_seconds, last_accessed, videos
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
                "#,
            )
            .bind(user_id)
            .bind(&course.course_id)
            .bind(&course.channel_id)
            .bind(&course.title)
            .bind(&course.channel_title)
            .bind(&course.thumbnail_url)
            .bind(course.total_seconds)
            .bind(course.watched_seconds)
            .bind(course.last_accessed)
            .bind(Json(&course.videos))
            .execute(&mut *tx)
            .await
            .map_err(ProgressError::storage)?;
        }

        tx.commit().await.map_err(ProgressError::storage)?;
        timer.record();

        Ok(())
    }
}
