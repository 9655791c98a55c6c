//! Handlers for companies, addressed by their `handle`.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use indexmap::IndexMap;
use jobly_core::schema::COMPANY_SCHEMA;
use jobly_db::models::company::NewCompany;
use jobly_db::repositories::CompanyRepo;
use serde_json::Value;

use crate::error::AppResult;
use crate::extract::{ApiJson, ApiPath, ValidatedJson};
use crate::middleware::rbac::RequireAdmin;
use crate::response::{CompaniesBody, CompanyBody, DeletedBody};
use crate::state::AppState;
use crate::validation;

/// POST /api/v1/companies
pub async fn create_company(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<NewCompany>,
) -> AppResult<impl IntoResponse> {
    let company = CompanyRepo::create(&state.pool, &input).await?;

    tracing::info!(handle = %company.handle, user = %admin.username, "Company created");

    Ok((StatusCode::CREATED, Json(CompanyBody { company })))
}

/// GET /api/v1/companies
///
/// Accepts `name`, `minEmployees` and `maxEmployees` query parameters.
pub async fn list_companies(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> AppResult<impl IntoResponse> {
    let filter = validation::filter_payload(&COMPANY_SCHEMA, params)?;
    let companies = CompanyRepo::find_all(&state.pool, &filter).await?;

    Ok(Json(CompaniesBody { companies }))
}

/// GET /api/v1/companies/{handle}
///
/// The company together with its jobs.
pub async fn get_company(
    State(state): State<AppState>,
    ApiPath(handle): ApiPath<String>,
) -> AppResult<impl IntoResponse> {
    let company = CompanyRepo::get(&state.pool, &handle).await?;
    Ok(Json(CompanyBody { company }))
}

/// PATCH /api/v1/companies/{handle}
pub async fn update_company(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    ApiPath(handle): ApiPath<String>,
    ApiJson(body): ApiJson<IndexMap<String, Value>>,
) -> AppResult<impl IntoResponse> {
    let payload = validation::update_payload(&COMPANY_SCHEMA, body)?;
    let company = CompanyRepo::update(&state.pool, &handle, &payload).await?;

    tracing::info!(handle = %handle, user = %admin.username, "Company updated");

    Ok(Json(CompanyBody { company }))
}

/// DELETE /api/v1/companies/{handle}
pub async fn delete_company(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    ApiPath(handle): ApiPath<String>,
) -> AppResult<impl IntoResponse> {
    CompanyRepo::remove(&state.pool, &handle).await?;

    tracing::info!(handle = %handle, user = %admin.username, "Company deleted");

    Ok(Json(DeletedBody { deleted: handle }))
}
