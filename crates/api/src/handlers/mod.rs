//! Request handlers, one module per resource.

pub mod milestone;
pub mod todo;

use opsdash_core::error::CoreError;

/// Require a non-empty (after trimming) text field, returning its value.
fn require_text<'a>(value: &'a Option<String>, field: &str) -> Result<&'a str, CoreError> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(CoreError::Validation(format!("{field} is required"))),
    }
}

/// Reject a supplied-but-empty text field in a partial update.
fn reject_empty(value: &Option<String>, field: &str) -> Result<(), CoreError> {
    match value.as_deref().map(str::trim) {
        Some("") => Err(CoreError::Validation(format!("{field} must not be empty"))),
        _ => Ok(()),
    }
}
