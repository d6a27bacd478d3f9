//! Domain error types for the progress service.

use thiserror::Error;

use crate::models::CourseKey;

/// Errors surfaced by progress operations.
///
/// Every mutation either fully applies or applies nothing, so no variant
/// describes a partially-written state.
#[derive(Debug, Error)]
pub enum ProgressError {
    /// A required identity field is missing/empty or a numeric field fails
    /// its constraint. Caller-recoverable; no state change.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The operation references a course that was never started.
    #[error("Course not found: {course_id} ({channel_id})")]
    CourseNotFound {
        course_id: String,
        channel_id: String,
    },

    /// The backing store failed before or during the write.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl ProgressError {
    /// Builds a `CourseNotFound` error for the given key.
    pub fn course_not_found(key: &CourseKey) -> Self {
        ProgressError::CourseNotFound {
            course_id: key.course_id.clone(),
            channel_id: key.channel_id.clone(),
        }
    }

    /// Wraps a storage-layer failure.
    pub fn storage(err: impl std::fmt::Display) -> Self {
        ProgressError::Storage(err.to_string())
    }
}

impl From<validator::ValidationErrors> for ProgressError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let details: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |e| {
                    let message = e
                        .message
                        .clone()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string());
                    format!("{}: {}", field, message)
                })
            })
            .collect();

        let message = if details.len() == 1 {
            details[0].clone()
        } else {
            details.join("; ")
        };

        ProgressError::Validation(message)
    }
}

impl From<validator::ValidationError> for ProgressError {
    fn from(error: validator::ValidationError) -> Self {
        let message = error
            .message
            .clone()
            .map(|m| m.to_string())
            .unwrap_or_else(|| error.code.to_string());
        ProgressError::Validation(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_not_found_display() {
        let key = CourseKey::new("c1", "ch1");
        let error = ProgressError::course_not_found(&key);
        assert_eq!(format!("{}", error), "Course not found: c1 (ch1)");
    }

    #[test]
    fn test_validation_display() {
        let error = ProgressError::Validation("duration must be positive".to_string());
        assert_eq!(
            format!("{}", error),
            "Validation error: duration must be positive"
        );
    }

    #[test]
    fn test_storage_display() {
        let error = ProgressError::storage("connection refused");
        assert_eq!(format!("{}", error), "Storage error: connection refused");
    }

    #[test]
    fn test_from_single_validation_error() {
        let err = shared::validation::validate_duration_seconds(0.0).unwrap_err();
        let error: ProgressError = err.into();
        match error {
            ProgressError::Validation(msg) => {
                assert_eq!(msg, "Duration seconds must be greater than zero")
            }
            _ => panic!("Expected Validation error"),
        }
    }

    #[test]
    fn test_from_validation_errors_flattens_fields() {
        use validator::Validate;

        #[derive(Validate)]
        struct Probe {
            #[validate(custom(function = "shared::validation::validate_identity_id"))]
            course_id: String,
        }

        let probe = Probe {
            course_id: String::new(),
        };
        let error: ProgressError = probe.validate().unwrap_err().into();
        match error {
            ProgressError::Validation(msg) => {
                assert_eq!(msg, "course_id: Identifier must not be empty")
            }
            _ => panic!("Expected Validation error"),
        }
    }
}
