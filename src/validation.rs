//! Validation of manually entered sheets, menu cycles and seasonality entries.

use thiserror::Error;

/// Longest accepted name
pub const MAX_NAME_LENGTH: usize = 255;

/// Serving counts offered for sheets and menu cycle days
pub const PORTION_OPTIONS: [u32; 3] = [1, 5, 10];

/// Rejected user input
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{field} must not be empty")]
    Empty { field: &'static str },
    #[error("{field} is longer than 255 characters")]
    TooLong { field: &'static str },
    #[error("unknown meal type '{0}'")]
    UnknownMealType(String),
    #[error("portion size {0} is not one of 1, 5, 10")]
    InvalidPortion(u32),
    #[error("ingredient '{name}' has a negative {field}")]
    NegativeValue { name: String, field: &'static str },
    #[error("week {0} is outside 1-5")]
    InvalidWeek(u32),
    #[error("duration must be at least one week")]
    InvalidDuration,
    #[error("{0} appears more than once in the cycle")]
    DuplicateDay(String),
    #[error("unknown {kind} '{value}'")]
    UnknownValue { kind: &'static str, value: String },
}

/// Trim a required name and check its length
pub fn validate_name(field: &'static str, name: &str) -> Result<String, ValidationError> {
    let trimmed = name.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field });
    }

    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::TooLong { field });
    }

    Ok(trimmed.to_string())
}

/// Check a serving count against [`PORTION_OPTIONS`]
pub fn validate_portion(size: u32) -> Result<u32, ValidationError> {
    if PORTION_OPTIONS.contains(&size) {
        Ok(size)
    } else {
        Err(ValidationError::InvalidPortion(size))
    }
}
