//! Repository for the `companies` table.

use jobly_core::error::CoreError;
use jobly_core::schema::COMPANY_SCHEMA;
use jobly_core::sql::{FilterPayload, UpdatePayload};
use sqlx::PgPool;

use crate::crud::{self, InsertValues};
use crate::error::RepoResult;
use crate::models::company::{Company, CompanyDetail, NewCompany};
use crate::repositories::JobRepo;

/// Provides CRUD operations for companies, keyed by `handle`.
pub struct CompanyRepo;

impl CompanyRepo {
    /// Insert a new company.
    ///
    /// Fails with `InvalidInput` when the handle is already taken.
    pub async fn create(pool: &PgPool, input: &NewCompany) -> RepoResult<Company> {
        let existing: Option<Company> =
            crud::find_optional(pool, &COMPANY_SCHEMA, &input.handle).await?;
        if existing.is_some() {
            return Err(CoreError::InvalidInput(format!("Duplicate company: {}", input.handle)).into());
        }

        crud::insert(pool, &COMPANY_SCHEMA, &input.insert_values()).await
    }

    /// List companies ordered by name, narrowed by `name`, `minEmployees`
    /// and `maxEmployees` when present.
    pub async fn find_all(pool: &PgPool, filter: &FilterPayload) -> RepoResult<Vec<Company>> {
        crud::find_all(pool, &COMPANY_SCHEMA, filter).await
    }

    /// Fetch a company with the jobs it posts.
    pub async fn get(pool: &PgPool, handle: &str) -> RepoResult<CompanyDetail> {
        let company: Company = crud::find_one(pool, &COMPANY_SCHEMA, &handle.to_string()).await?;
        let jobs = JobRepo::list_for_company(pool, &company.handle).await?;
        Ok(CompanyDetail { company, jobs })
    }

    /// Update `name`, `description`, `numEmployees` and/or `logoUrl`.
    pub async fn update(
        pool: &PgPool,
        handle: &str,
        payload: &UpdatePayload,
    ) -> RepoResult<Company> {
        crud::update(pool, &COMPANY_SCHEMA, &handle.to_string(), payload).await
    }

    /// Delete a company; its jobs go with it (`ON DELETE CASCADE`).
    pub async fn remove(pool: &PgPool, handle: &str) -> RepoResult<()> {
        crud::remove(pool, &COMPANY_SCHEMA, &handle.to_string()).await
    }
}
