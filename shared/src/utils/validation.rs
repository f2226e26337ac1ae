//! Validation utilities for composite key segments
//!
//! Token records are addressed by keys of the form
//! `app:{app}|type:{type}|owner:{owner}|token:{token}`. A segment that
//! contains the separator or one of the field markers would make the key
//! ambiguous, so such values are rejected before a key is built.

use serde::Serialize;

/// Substrings that may not appear inside any key segment
pub const RESERVED_MARKERS: [&str; 5] = ["|", "app:", "type:", "owner:", "token:"];

/// Validation error with field-level details
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    pub code: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            code: code.into(),
        }
    }
}

/// Collection of validation errors
#[derive(Debug, Default)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// First recorded error, if any
    pub fn first(&self) -> Option<&ValidationError> {
        self.errors.first()
    }

    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

/// Error codes reported by segment validation
pub mod codes {
    pub const REQUIRED: &str = "REQUIRED";
    pub const RESERVED_MARKER: &str = "RESERVED_MARKER";
}

/// Common validation functions
pub mod validators {
    use super::RESERVED_MARKERS;

    /// Check if a string is not empty
    pub fn not_empty(value: &str) -> bool {
        !value.trim().is_empty()
    }

    /// Return the first reserved marker contained in `value`
    pub fn reserved_marker(value: &str) -> Option<&'static str> {
        RESERVED_MARKERS
            .iter()
            .copied()
            .find(|marker| value.contains(marker))
    }
}

/// Validate a single key segment
pub fn validate_segment(field: &str, value: &str) -> Result<(), ValidationError> {
    if !validators::not_empty(value) {
        return Err(ValidationError::new(
            field,
            format!("{} must not be empty", field),
            codes::REQUIRED,
        ));
    }

    if let Some(marker) = validators::reserved_marker(value) {
        return Err(ValidationError::new(
            field,
            format!("{} must not contain '{}'", field, marker),
            codes::RESERVED_MARKER,
        ));
    }

    Ok(())
}

/// Validate several `(field, value)` segments, collecting every failure
pub fn validate_segments<'a, I>(segments: I) -> Result<(), ValidationErrors>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut errors = ValidationErrors::new();
    for (field, value) in segments {
        if let Err(error) = validate_segment(field, value) {
            errors.add(error);
        }
    }
    errors.into_result()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_segment() {
        assert!(validate_segment("app", "billing").is_ok());
        assert!(validate_segment("owner", "user-42@example.com").is_ok());
    }

    #[test]
    fn test_empty_segment() {
        let err = validate_segment("owner", "  ").unwrap_err();
        assert_eq!(err.field, "owner");
        assert_eq!(err.code, codes::REQUIRED);
    }

    #[test]
    fn test_reserved_markers() {
        let err = validate_segment("app", "a|b").unwrap_err();
        assert_eq!(err.code, codes::RESERVED_MARKER);
        assert!(err.message.contains('|'));

        let err = validate_segment("type", "owner:x").unwrap_err();
        assert!(err.message.contains("owner:"));

        // Marker words without the colon are fine
        assert!(validate_segment("type", "token").is_ok());
    }

    #[test]
    fn test_validate_segments_collects_all() {
        let result = validate_segments([("app", ""), ("type", "ok"), ("owner", "x|y")]);
        let errors = result.unwrap_err();
        assert_eq!(errors.errors().len(), 2);
        assert_eq!(errors.first().unwrap().field, "app");
        assert_eq!(errors.errors()[1].field, "owner");
    }
}
