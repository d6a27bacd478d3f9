//! Course identity key.

use std::fmt;

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Identifies one course-progress entry for a user.
///
/// A course is keyed by the upstream course id together with the channel it
/// was published on; the pair is unique within a user's collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CourseKey {
    #[validate(custom(function = "shared::validation::validate_identity_id"))]
    pub course_id: String,

    #[validate(custom(function = "shared::validation::validate_identity_id"))]
    pub channel_id: String,
}

impl CourseKey {
    /// Creates a new course key.
    pub fn new(course_id: impl Into<String>, channel_id: impl Into<String>) -> Self {
        Self {
            course_id: course_id.into(),
            channel_id: channel_id.into(),
        }
    }
}

impl fmt::Display for CourseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.course_id, self.channel_id)
    }
}
