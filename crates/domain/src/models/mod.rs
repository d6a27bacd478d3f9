//! Domain models for course watch progress.

pub mod course_key;
pub mod course_progress;
pub mod dashboard;
pub mod resume;
pub mod video_progress;

pub use course_key::CourseKey;
pub use course_progress::{CourseProgress, StartCourseInput};
pub use dashboard::DashboardStats;
pub use resume::ResumeTarget;
pub use video_progress::{RecordProgressInput, VideoProgress};
