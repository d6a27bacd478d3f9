//! Watch-progress aggregation service.
//!
//! Orchestrates all progress mutations and queries for one user. Every
//! mutation is a single-entry read-modify-write: load the course, apply the
//! change through the model, write the full entry back. The storage port is
//! injected, never reached through ambient state.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;
use validator::Validate;

use crate::error::ProgressError;
use crate::models::{
    CourseKey, CourseProgress, DashboardStats, RecordProgressInput, ResumeTarget,
    StartCourseInput,
};
use crate::repository::ProgressRepository;
use crate::services::dedup::{self, RepairOutcome};
use crate::services::{dashboard, resume};

/// Aggregates per-video watch events into per-course progress for one user
/// at a time.
#[derive(Clone)]
pub struct ProgressAggregator {
    repository: Arc<dyn ProgressRepository>,
}

impl ProgressAggregator {
    pub fn new(repository: Arc<dyn ProgressRepository>) -> Self {
        Self { repository }
    }

    /// Creates a zeroed progress entry for the course, or returns the
    /// existing one unchanged. Safe to call repeatedly.
    pub async fn start_course(
        &self,
        user_id: Uuid,
        input: StartCourseInput,
    ) -> Result<CourseProgress, ProgressError> {
        input.validate()?;
        let key = input.key();

        if let Some(existing) = self.repository.find_course(user_id, &key).await? {
            debug!(user_id = %user_id, course = %key, "course already started");
            return Ok(existing);
        }

        let course = CourseProgress::start(input, Utc::now());
        self.repository.upsert_course(user_id, &course).await?;
        info!(user_id = %user_id, course = %key, "course started");
        Ok(course)
    }

    /// Records one watch event for a video of a started course and returns
    /// the updated course entry.
    ///
    /// Fails with [`ProgressError::CourseNotFound`] when the course was never
    /// started. Watched time is clamped to the video duration and never
    /// decreases; the course aggregate is recomputed from all videos.
    pub async fn record_video_progress(
        &self,
        user_id: Uuid,
        key: &CourseKey,
        input: RecordProgressInput,
    ) -> Result<CourseProgress, ProgressError> {
        key.validate()?;
        input.validate()?;

        let mut course = self.require_course(user_id, key).await?;
        course.record_video_progress(
            &input.video_id,
            input.watched_seconds,
            input.duration_seconds,
            Utc::now(),
        );
        self.repository.upsert_course(user_id, &course).await?;

        debug!(
            user_id = %user_id,
            course = %key,
            video_id = %input.video_id,
            watched_seconds = course.watched_seconds,
            "video progress recorded"
        );
        Ok(course)
    }

    /// Applies a total-duration correction to a started course and returns
    /// the updated entry.
    ///
    /// The stored total only ever increases. A smaller incoming value is
    /// ignored and logged; an equal value skips the write entirely.
    pub async fn set_course_total(
        &self,
        user_id: Uuid,
        key: &CourseKey,
        total_seconds: f64,
    ) -> Result<CourseProgress, ProgressError> {
        key.validate()?;
        shared::validation::validate_total_seconds(total_seconds)?;

        let mut course = self.require_course(user_id, key).await?;
        if course.apply_total_seconds(total_seconds) {
            self.repository.upsert_course(user_id, &course).await?;
            info!(user_id = %user_id, course = %key, total_seconds, "course total updated");
        } else {
            debug!(
                user_id = %user_id,
                course = %key,
                total_seconds,
                stored = course.total_seconds,
                "ignored non-increasing course total"
            );
        }
        Ok(course)
    }

    /// Deletes the course entry with all its video records. Returns whether
    /// an entry existed. Safe to call repeatedly.
    pub async fn reset_course(
        &self,
        user_id: Uuid,
        key: &CourseKey,
    ) -> Result<bool, ProgressError> {
        key.validate()?;
        let removed = self.repository.delete_course(user_id, key).await?;
        if removed {
            info!(user_id = %user_id, course = %key, "course progress reset");
        }
        Ok(removed)
    }

    /// Loads a single started course.
    pub async fn get_course(
        &self,
        user_id: Uuid,
        key: &CourseKey,
    ) -> Result<CourseProgress, ProgressError> {
        self.require_course(user_id, key).await
    }

    /// Loads the user's full collection in storage order.
    pub async fn list_courses(&self, user_id: Uuid) -> Result<Vec<CourseProgress>, ProgressError> {
        self.repository.load_all(user_id).await
    }

    /// The single most recently touched video across all of the user's
    /// courses, or `None` when nothing was watched yet.
    pub async fn resume_target(
        &self,
        user_id: Uuid,
    ) -> Result<Option<ResumeTarget>, ProgressError> {
        let courses = self.repository.load_all(user_id).await?;
        Ok(resume::find_resume_target(&courses))
    }

    /// Up to `limit` in-progress courses, most recently accessed first.
    pub async fn continue_watching(
        &self,
        user_id: Uuid,
        limit: usize,
    ) -> Result<Vec<CourseProgress>, ProgressError> {
        let courses = self.repository.load_all(user_id).await?;
        Ok(resume::select_continue_watching(&courses, limit))
    }

    /// Learning statistics across the user's whole collection.
    pub async fn dashboard_stats(&self, user_id: Uuid) -> Result<DashboardStats, ProgressError> {
        let courses = self.repository.load_all(user_id).await?;
        Ok(dashboard::compute_dashboard_stats(&courses, Utc::now()))
    }

    /// Runs the repair pass over the user's collection and persists the
    /// result when anything changed.
    pub async fn repair_user_progress(
        &self,
        user_id: Uuid,
    ) -> Result<RepairOutcome, ProgressError> {
        let courses = self.repository.load_all(user_id).await?;
        let (repaired, outcome) = dedup::repair_course_progress(courses);

        if outcome.changed() {
            self.repository.replace_all(user_id, &repaired).await?;
            info!(
                user_id = %user_id,
                duplicates_removed = outcome.duplicates_removed,
                courses_rebuilt = outcome.courses_rebuilt,
                "user progress repaired"
            );
        }
        Ok(outcome)
    }

    async fn require_course(
        &self,
        user_id: Uuid,
        key: &CourseKey,
    ) -> Result<CourseProgress, ProgressError> {
        self.repository
            .find_course(user_id, key)
            .await?
            .ok_or_else(|| ProgressError::course_not_found(key))
    }
}
