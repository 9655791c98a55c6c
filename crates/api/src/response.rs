//! Response envelope types for API handlers.
//!
//! Every payload is wrapped in an object keyed by the resource name, e.g.
//! `{ "job": {...} }` or `{ "companies": [...] }`.

use jobly_db::models::company::Company;
use jobly_db::models::job::Job;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct JobBody {
    pub job: Job,
}

#[derive(Debug, Serialize)]
pub struct JobsBody {
    pub jobs: Vec<Job>,
}

/// `{ "company": T }` where `T` is a bare [`Company`] or a company with its jobs.
#[derive(Debug, Serialize)]
pub struct CompanyBody<T: Serialize> {
    pub company: T,
}

#[derive(Debug, Serialize)]
pub struct CompaniesBody {
    pub companies: Vec<Company>,
}

/// `{ "deleted": "<what was removed>" }`.
#[derive(Debug, Serialize)]
pub struct DeletedBody {
    pub deleted: String,
}
