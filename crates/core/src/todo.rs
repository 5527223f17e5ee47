//! Todo status and priority vocabulary.
//!
//! Statuses and priorities are stored as TEXT in the `todos` table; these
//! constants are the canonical values shared by the repository layer, the
//! API handlers, and the UI.

use crate::error::CoreError;

/// Not started yet. Default status for new todos.
pub const STATUS_TODO: &str = "TODO";

/// Actively being worked on.
pub const STATUS_IN_PROGRESS: &str = "IN_PROGRESS";

/// Finished. The only status with a non-null `completed_at`.
pub const STATUS_DONE: &str = "DONE";

/// Abandoned. Remains editable; not terminal.
pub const STATUS_CANCELLED: &str = "CANCELLED";

/// All valid status values. Every status is reachable from every other;
/// the only implicit behaviour is the `completed_at` side effect on
/// entering or leaving [`STATUS_DONE`].
pub const STATUSES: [&str; 4] = [
    STATUS_TODO,
    STATUS_IN_PROGRESS,
    STATUS_DONE,
    STATUS_CANCELLED,
];

pub const PRIORITY_URGENT: &str = "URGENT";
pub const PRIORITY_HIGH: &str = "HIGH";
/// Default priority for new todos.
pub const PRIORITY_MEDIUM: &str = "MEDIUM";
pub const PRIORITY_LOW: &str = "LOW";

/// All valid priority values.
pub const PRIORITIES: [&str; 4] = [
    PRIORITY_URGENT,
    PRIORITY_HIGH,
    PRIORITY_MEDIUM,
    PRIORITY_LOW,
];

/// Check whether `value` is a known status.
pub fn is_valid_status(value: &str) -> bool {
    STATUSES.contains(&value)
}

/// Check whether `value` is a known priority.
pub fn is_valid_priority(value: &str) -> bool {
    PRIORITIES.contains(&value)
}

/// Validate a status value supplied by a client.
pub fn validate_status(value: &str) -> Result<(), CoreError> {
    if is_valid_status(value) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid status '{value}', expected one of: {}",
            STATUSES.join(", ")
        )))
    }
}

/// Validate a priority value supplied by a client.
pub fn validate_priority(value: &str) -> Result<(), CoreError> {
    if is_valid_priority(value) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid priority '{value}', expected one of: {}",
            PRIORITIES.join(", ")
        )))
    }
}
