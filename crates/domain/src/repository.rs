//! Storage port for course progress collections.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::ProgressError;
use crate::models::{CourseKey, CourseProgress};

/// Storage abstraction for per-user course progress.
///
/// A user's collection is an ordered list of course entries, at most one per
/// `(course_id, channel_id)` pair. Implementations must preserve insertion
/// order across loads.
#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// Loads the user's full collection, empty when the user has no entries.
    async fn load_all(&self, user_id: Uuid) -> Result<Vec<CourseProgress>, ProgressError>;

    /// Loads a single course entry by key.
    async fn find_course(
        &self,
        user_id: Uuid,
        key: &CourseKey,
    ) -> Result<Option<CourseProgress>, ProgressError>;

    /// Inserts the entry or overwrites the existing one with the same key.
    async fn upsert_course(
        &self,
        user_id: Uuid,
        course: &CourseProgress,
    ) -> Result<(), ProgressError>;

    /// Removes the entry with the given key. Returns whether one existed.
    async fn delete_course(
        &self,
        user_id: Uuid,
        key: &CourseKey,
    ) -> Result<bool, ProgressError>;

    /// Replaces the user's whole collection with the given entries.
    async fn replace_all(
        &self,
        user_id: Uuid,
        courses: &[CourseProgress],
    ) -> Result<(), ProgressError>;
}

/// In-memory repository for tests and single-process setups.
#[derive(Debug, Default)]
pub struct InMemoryProgressRepository {
    collections: RwLock<HashMap<Uuid, Vec<CourseProgress>>>,
}

impl InMemoryProgressRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProgressRepository for InMemoryProgressRepository {
    async fn load_all(&self, user_id: Uuid) -> Result<Vec<CourseProgress>, ProgressError> {
        let collections = self.collections.read().await;
        Ok(collections.get(&user_id).cloned().unwrap_or_default())
    }

    async fn find_course(
        &self,
        user_id: Uuid,
        key: &CourseKey,
    ) -> Result<Option<CourseProgress>, ProgressError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(&user_id)
            .and_then(|courses| courses.iter().find(|c| c.matches_key(key)).cloned()))
    }

    async fn upsert_course(
        &self,
        user_id: Uuid,
        course: &CourseProgress,
    ) -> Result<(), ProgressError> {
        let mut collections = self.collections.write().await;
        let courses = collections.entry(user_id).or_default();
        let key = course.key();
        match courses.iter().position(|c| c.matches_key(&key)) {
            Some(index) => courses[index] = course.clone(),
            None => courses.push(course.clone()),
        }
        Ok(())
    }

    async fn delete_course(
        &self,
        user_id: Uuid,
        key: &CourseKey,
    ) -> Result<bool, ProgressError> {
        let mut collections = self.collections.write().await;
        let Some(courses) = collections.get_mut(&user_id) else {
            return Ok(false);
        };
        match courses.iter().position(|c| c.matches_key(key)) {
            Some(index) => {
                courses.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn replace_all(
        &self,
        user_id: Uuid,
        courses: &[CourseProgress],
    ) -> Result<(), ProgressError> {
        let mut collections = self.collections.write().await;
        collections.insert(user_id, courses.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StartCourseInput;
    use chrono::Utc;

    fn create_test_course(course_id: &str, channel_id: &str) -> CourseProgress {
        CourseProgress::start(
            StartCourseInput {
                course_id: course_id.to_string(),
                channel_id: channel_id.to_string(),
                title: format!("Course {}", course_id),
                channel_title: "Test Channel".to_string(),
                thumbnail_url: None,
            },
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn test_load_all_empty_for_unknown_user() {
        let repo = InMemoryProgressRepository::new();
        let courses = repo.load_all(Uuid::new_v4()).await.unwrap();
        assert!(courses.is_empty());
    }

    #[tokio::test]
    async fn test_upsert_inserts_then_replaces_in_place() {
        let repo = InMemoryProgressRepository::new();
        let user_id = Uuid::new_v4();

        repo.upsert_course(user_id, &create_test_course("c1", "ch1"))
            .await
            .unwrap();
        repo.upsert_course(user_id, &create_test_course("c2", "ch1"))
            .await
            .unwrap();

        let mut updated = create_test_course("c1", "ch1");
        updated.record_video_progress("v1", 30.0, 60.0, Utc::now());
        repo.upsert_course(user_id, &updated).await.unwrap();

        let courses = repo.load_all(user_id).await.unwrap();
        assert_eq!(courses.len(), 2);
        // Replacement keeps the original position.
        assert_eq!(courses[0].course_id, "c1");
        assert_eq!(courses[0].watched_seconds, 30.0);
        assert_eq!(courses[1].course_id, "c2");
    }

    #[tokio::test]
    async fn test_find_course_by_key() {
        let repo = InMemoryProgressRepository::new();
        let user_id = Uuid::new_v4();
        repo.upsert_course(user_id, &create_test_course("c1", "ch1"))
            .await
            .unwrap();

        let found = repo
            .find_course(user_id, &CourseKey::new("c1", "ch1"))
            .await
            .unwrap();
        assert!(found.is_some());

        let missing = repo
            .find_course(user_id, &CourseKey::new("c1", "ch2"))
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_collections_are_isolated_per_user() {
        let repo = InMemoryProgressRepository::new();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        repo.upsert_course(alice, &create_test_course("c1", "ch1"))
            .await
            .unwrap();

        assert_eq!(repo.load_all(alice).await.unwrap().len(), 1);
        assert!(repo.load_all(bob).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_course_reports_existence() {
        let repo = InMemoryProgressRepository::new();
        let user_id = Uuid::new_v4();
        let key = CourseKey::new("c1", "ch1");

        repo.upsert_course(user_id, &create_test_course("c1", "ch1"))
            .await
            .unwrap();

        assert!(repo.delete_course(user_id, &key).await.unwrap());
        assert!(!repo.delete_course(user_id, &key).await.unwrap());
        assert!(repo.load_all(user_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_replace_all_swaps_collection() {
        let repo = InMemoryProgressRepository::new();
        let user_id = Uuid::new_v4();

        repo.upsert_course(user_id, &create_test_course("c1", "ch1"))
            .await
            .unwrap();
        repo.upsert_course(user_id, &create_test_course("c2", "ch1"))
            .await
            .unwrap();

        let replacement = vec![create_test_course("c3", "ch2")];
        repo.replace_all(user_id, &replacement).await.unwrap();

        let courses = repo.load_all(user_id).await.unwrap();
        assert_eq!(courses.len(), 1);
        assert_eq!(courses[0].course_id, "c3");
    }
}
