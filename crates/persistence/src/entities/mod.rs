//! Database entity definitions.
//!
//! Entities are direct mappings to database rows.

pub mod course_progress;

pub use course_progress::CourseProgressEntity;
