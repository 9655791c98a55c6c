#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use jobly_api::auth::jwt::{generate_access_token, JwtConfig};
use jobly_api::config::ServerConfig;
use jobly_api::router::build_app_router;
use jobly_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults and a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        db_max_connections: 5,
        jwt: JwtConfig {
            secret: "test-secret-not-for-production".to_string(),
            access_token_expiry_mins: 5,
        },
    }
}

/// The production router and middleware stack over the given pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

pub fn admin_token() -> String {
    generate_access_token("admin", true, &test_config().jwt).unwrap()
}

pub fn user_token() -> String {
    generate_access_token("u1", false, &test_config().jwt).unwrap()
}

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<String>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn post_json(
    app: Router,
    uri: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::POST, uri, token, Some(body.to_string())).await
}

/// PATCH with a raw JSON text body, so key order reaches the server as written.
pub async fn patch_json(app: Router, uri: &str, token: Option<&str>, body: &str) -> Response<Body> {
    send(app, Method::PATCH, uri, token, Some(body.to_string())).await
}

pub async fn delete(app: Router, uri: &str, token: Option<&str>) -> Response<Body> {
    send(app, Method::DELETE, uri, token, None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Insert a company directly, bypassing the API.
pub async fn seed_company(pool: &PgPool, handle: &str, name: &str, num_employees: Option<i32>) {
    sqlx::query(
        "INSERT INTO companies (handle, name, description, num_employees) VALUES ($1, $2, $3, $4)",
    )
    .bind(handle)
    .bind(name)
    .bind(format!("About {name}"))
    .bind(num_employees)
    .execute(pool)
    .await
    .unwrap();
}

/// Insert a job directly and return its id.
pub async fn seed_job(
    pool: &PgPool,
    title: &str,
    salary: Option<i32>,
    equity: Option<&str>,
    handle: &str,
) -> i64 {
    sqlx::query_scalar::<_, i64>(
        "INSERT INTO jobs (title, salary, equity, company_handle) \
         VALUES ($1, $2, $3::NUMERIC, $4) RETURNING id",
    )
    .bind(title)
    .bind(salary)
    .bind(equity)
    .bind(handle)
    .fetch_one(pool)
    .await
    .unwrap()
}
