//! Partial-update field semantics.
//!
//! A `PUT` body may omit a field (leave it unchanged), supply a value, or
//! supply an explicit `null` (clear it). Plain `Option<T>` collapses the
//! first and last case, so clearable fields are modelled as
//! `Option<Option<T>>`:
//!
//! - `None` — field absent, do not touch the column
//! - `Some(None)` — explicit `null`, set the column to NULL
//! - `Some(Some(v))` — set the column to `v`

use serde::{Deserialize, Deserializer};

/// Deserializer for `Option<Option<T>>` fields.
///
/// Must be paired with `#[serde(default)]` so an absent field stays
/// `None`; a present field (null or value) becomes `Some(...)`.
pub fn explicit_null<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
