//! Repository for the `jobs` table.

use jobly_core::schema::JOB_SCHEMA;
use jobly_core::sql::{FilterPayload, UpdatePayload};
use jobly_core::types::DbId;
use sqlx::PgPool;

use crate::crud::{self, InsertValues};
use crate::error::RepoResult;
use crate::models::company::CompanyJob;
use crate::models::job::{Job, NewJob};

/// Provides CRUD operations for jobs.
pub struct JobRepo;

impl JobRepo {
    /// Insert a new job, returning the created row with its generated id.
    ///
    /// Fails with `InvalidInput` when `company_handle` names no company.
    pub async fn create(pool: &PgPool, input: &NewJob) -> RepoResult<Job> {
        crud::insert(pool, &JOB_SCHEMA, &input.insert_values()).await
    }

    /// List jobs ordered by title, narrowed by `title`, `minSalary` and
    /// `hasEquity` when present.
    pub async fn find_all(pool: &PgPool, filter: &FilterPayload) -> RepoResult<Vec<Job>> {
        crud::find_all(pool, &JOB_SCHEMA, filter).await
    }

    pub async fn get(pool: &PgPool, id: DbId) -> RepoResult<Job> {
        crud::find_one(pool, &JOB_SCHEMA, &id).await
    }

    /// Update `title`, `salary` and/or `equity`.
    ///
    /// The payload is trusted to hold only mutable fields.
    pub async fn update(pool: &PgPool, id: DbId, payload: &UpdatePayload) -> RepoResult<Job> {
        crud::update(pool, &JOB_SCHEMA, &id, payload).await
    }

    pub async fn remove(pool: &PgPool, id: DbId) -> RepoResult<()> {
        crud::remove(pool, &JOB_SCHEMA, &id).await
    }

    /// Jobs posted by one company, oldest first.
    pub async fn list_for_company(pool: &PgPool, handle: &str) -> RepoResult<Vec<CompanyJob>> {
        let jobs = sqlx::query_as::<_, CompanyJob>(
            "SELECT id, title, salary, equity FROM jobs WHERE company_handle = $1 ORDER BY id",
        )
        .bind(handle)
        .fetch_all(pool)
        .await?;
        Ok(jobs)
    }
}
