//! Milestone constants.
//!
//! `event_type` is a free-form tag; the UI currently uses `recruiting`,
//! `interview`, `ot`, `mt`, `session`, `demo-day`, and `deadline`, but the
//! store accepts any non-empty string.

/// Default display color for milestones created without an explicit one.
pub const DEFAULT_COLOR: &str = "#14b8a6";
