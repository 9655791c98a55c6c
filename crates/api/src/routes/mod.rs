pub mod companies;
pub mod health;
pub mod jobs;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /companies                   list (public), create (admin)
/// /companies/{handle}          get (public), update, delete (admin)
///
/// /jobs                        list (public), create (admin)
/// /jobs/{id}                   get (public), update, delete (admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/companies", companies::router())
        .nest("/jobs", jobs::router())
}
