//! Common validation utilities for watch-progress payloads.

use validator::ValidationError;

/// Validates that an upstream identifier (course, channel or video id) is
/// non-empty and not just whitespace.
pub fn validate_identity_id(id: &str) -> Result<(), ValidationError> {
    if id.trim().is_empty() {
        let mut err = ValidationError::new("identity_empty");
        err.message = Some("Identifier must not be empty".into());
        return Err(err);
    }
    Ok(())
}

/// Validates that a watched-seconds value is a real number.
///
/// Negative values are accepted here; the aggregator clamps them to zero
/// before use.
pub fn validate_watched_seconds(seconds: f64) -> Result<(), ValidationError> {
    if seconds.is_finite() {
        Ok(())
    } else {
        let mut err = ValidationError::new("watched_seconds_not_finite");
        err.message = Some("Watched seconds must be a finite number".into());
        Err(err)
    }
}

/// Validates that a video duration is a real number greater than zero.
pub fn validate_duration_seconds(seconds: f64) -> Result<(), ValidationError> {
    if seconds.is_finite() && seconds > 0.0 {
        Ok(())
    } else {
        let mut err = ValidationError::new("duration_seconds_range");
        err.message = Some("Duration seconds must be greater than zero".into());
        Err(err)
    }
}

/// Validates that a course total duration is a real number greater than zero.
pub fn validate_total_seconds(seconds: f64) -> Result<(), ValidationError> {
    if seconds.is_finite() && seconds > 0.0 {
        Ok(())
    } else {
        let mut err = ValidationError::new("total_seconds_range");
        err.message = Some("Total seconds must be greater than zero".into());
        Err(err)
    }
}
