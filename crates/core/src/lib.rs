//! Shared domain types for the opsdash backend.
//!
//! This crate has zero internal dependencies so it can be used by the
//! repository layer, the API layer, and any future CLI tooling.

pub mod calendar;
pub mod error;
pub mod milestone;
pub mod todo;
pub mod types;
