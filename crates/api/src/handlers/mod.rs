//! Request handlers, one module per resource.

pub mod companies;
pub mod jobs;
