//! Route definitions for job postings, mounted at `/jobs`.

use axum::routing::get;
use axum::Router;

use crate::handlers::jobs;
use crate::state::AppState;

/// ```text
/// GET    /          -> list_jobs
/// POST   /          -> create_job (admin only)
/// GET    /{id}      -> get_job
/// PATCH  /{id}      -> update_job (admin only)
/// DELETE /{id}      -> delete_job (admin only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(jobs::list_jobs).post(jobs::create_job))
        .route(
            "/{id}",
            get(jobs::get_job)
                .patch(jobs::update_job)
                .delete(jobs::delete_job),
        )
}
