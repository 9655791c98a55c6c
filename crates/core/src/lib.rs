//! Domain primitives shared by the database and API crates.
//!
//! Nothing in here touches the database: the SQL fragment builders and the
//! entity schema descriptors are pure functions over their inputs.

pub mod error;
pub mod schema;
pub mod sql;
pub mod types;
