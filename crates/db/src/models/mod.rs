//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for partial updates
//!
//! Wire field names are camelCase; update DTOs use `Option<Option<T>>`
//! (see [`patch`]) for fields where an explicit null must be
//! distinguished from an absent field.

pub mod milestone;
pub mod patch;
pub mod todo;
