//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` + `Validate` create DTO for inserts
//!
//! Partial updates are not typed: they arrive as an ordered
//! [`UpdatePayload`](jobly_core::sql::UpdatePayload) checked against the
//! entity's schema.

pub mod company;
pub mod job;
