//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod company_repo;
pub mod job_repo;

pub use company_repo::CompanyRepo;
pub use job_repo::JobRepo;
