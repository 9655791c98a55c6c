//! Handlers for job postings.
//!
//! Reads are public; creating, updating and deleting a job require an
//! admin token via [`RequireAdmin`].

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use indexmap::IndexMap;
use jobly_core::schema::JOB_SCHEMA;
use jobly_core::types::DbId;
use jobly_db::models::job::NewJob;
use jobly_db::repositories::JobRepo;
use serde_json::Value;

use crate::error::AppResult;
use crate::extract::{ApiJson, ApiPath, ValidatedJson};
use crate::middleware::rbac::RequireAdmin;
use crate::response::{DeletedBody, JobBody, JobsBody};
use crate::state::AppState;
use crate::validation;

/// POST /api/v1/jobs
pub async fn create_job(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<NewJob>,
) -> AppResult<impl IntoResponse> {
    let job = JobRepo::create(&state.pool, &input).await?;

    tracing::info!(
        job_id = job.id,
        company = %job.company_handle,
        user = %admin.username,
        "Job created",
    );

    Ok((StatusCode::CREATED, Json(JobBody { job })))
}

/// GET /api/v1/jobs
///
/// Accepts `title`, `minSalary` and `hasEquity` query parameters.
pub async fn list_jobs(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> AppResult<impl IntoResponse> {
    let filter = validation::filter_payload(&JOB_SCHEMA, params)?;
    let jobs = JobRepo::find_all(&state.pool, &filter).await?;

    Ok(Json(JobsBody { jobs }))
}

/// GET /api/v1/jobs/{id}
pub async fn get_job(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let job = JobRepo::get(&state.pool, id).await?;
    Ok(Json(JobBody { job }))
}

/// PATCH /api/v1/jobs/{id}
///
/// Partial update of `title`, `salary` and/or `equity`.
pub async fn update_job(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
    ApiJson(body): ApiJson<IndexMap<String, Value>>,
) -> AppResult<impl IntoResponse> {
    let payload = validation::update_payload(&JOB_SCHEMA, body)?;
    let job = JobRepo::update(&state.pool, id, &payload).await?;

    tracing::info!(job_id = id, user = %admin.username, "Job updated");

    Ok(Json(JobBody { job }))
}

/// DELETE /api/v1/jobs/{id}
pub async fn delete_job(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<impl IntoResponse> {
    JobRepo::remove(&state.pool, id).await?;

    tracing::info!(job_id = id, user = %admin.username, "Job deleted");

    Ok(Json(DeletedBody {
        deleted: format!("Job {id}"),
    }))
}
