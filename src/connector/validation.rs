//! Input shape checks shared by every front end.
//!
//! The domain service trusts its callers for the shape of a title or id, so
//! each adapter runs these before calling it.

use thiserror::Error;

use crate::domain::MAX_TITLE_LENGTH;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} must not be null")]
    Missing { field: &'static str },

    #[error("{field} size must be between {min} and {max}")]
    Length {
        field: &'static str,
        min: usize,
        max: usize,
    },
}

pub fn validate_title(title: Option<&str>) -> Result<&str, ValidationError> {
    let title = title.ok_or(ValidationError::Missing { field: "todoTitle" })?;
    let length = title.chars().count();
    if length < 1 || length > MAX_TITLE_LENGTH {
        return Err(ValidationError::Length {
            field: "todoTitle",
            min: 1,
            max: MAX_TITLE_LENGTH,
        });
    }
    Ok(title)
}

pub fn validate_todo_id(id: Option<&str>) -> Result<&str, ValidationError> {
    match id {
        Some(id) if !id.is_empty() => Ok(id),
        _ => Err(ValidationError::Missing { field: "todoId" }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_bounds() {
        assert_eq!(validate_title(Some("a")), Ok("a"));
        assert!(validate_title(Some("x".repeat(30).as_str())).is_ok());
        assert!(matches!(
            validate_title(Some("x".repeat(31).as_str())),
            Err(ValidationError::Length { .. })
        ));
        assert!(matches!(
            validate_title(Some("")),
            Err(ValidationError::Length { .. })
        ));
    }

    #[test]
    fn test_title_length_counts_characters() {
        let title = "é".repeat(30);
        assert!(validate_title(Some(title.as_str())).is_ok());
    }

    #[test]
    fn test_missing_fields() {
        assert_eq!(
            validate_title(None),
            Err(ValidationError::Missing { field: "todoTitle" })
        );
        assert!(validate_todo_id(None).is_err());
        assert!(validate_todo_id(Some("")).is_err());
        assert_eq!(validate_todo_id(Some("abc")), Ok("abc"));
    }
}
