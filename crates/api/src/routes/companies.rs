//! Route definitions for companies, mounted at `/companies`.

use axum::routing::get;
use axum::Router;

use crate::handlers::companies;
use crate::state::AppState;

/// ```text
/// GET    /             -> list_companies
/// POST   /             -> create_company (admin only)
/// GET    /{handle}     -> get_company
/// PATCH  /{handle}     -> update_company (admin only)
/// DELETE /{handle}     -> delete_company (admin only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(companies::list_companies).post(companies::create_company),
        )
        .route(
            "/{handle}",
            get(companies::get_company)
                .patch(companies::update_company)
                .delete(companies::delete_company),
        )
}
