use crate::error::ApiError;

pub fn require_non_blank(field: &str, value: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::validation(format!("{field} must not be empty")));
    }
    Ok(())
}

pub fn require_finite(field: &str, value: f64) -> Result<(), ApiError> {
    if !value.is_finite() {
        return Err(ApiError::validation(format!("{field} must be a finite number")));
    }
    Ok(())
}

pub fn require_non_negative(field: &str, value: Option<i64>) -> Result<(), ApiError> {
    if value.is_some_and(|v| v < 0) {
        return Err(ApiError::validation(format!("{field} must not be negative")));
    }
    Ok(())
}

/// Trimmed value, or `None` when blank.
pub fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
