//! Field validation helpers shared by the domain constructors

use crate::error::DomainError;

/// Reject empty or whitespace-only text, naming the offending field
pub fn require_not_blank<'a>(value: &'a str, field: &str) -> Result<&'a str, DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::Validation(format!("{} is required", field)));
    }
    Ok(value)
}

/// Turn an optional text value into `None` when it is blank, trimming otherwise
pub fn trim_optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
