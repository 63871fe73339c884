//! JSON API: storefront under `/api`, back-office under `/admin/api`.

pub mod auth;
pub mod error;
mod routes;
pub mod state;

use std::sync::Arc;

use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;

pub use auth::{AdminUser, CurrentUser};
pub use error::{ApiError, ApiResult};
pub use state::AppState;

/// Creates the application router.
pub fn router(state: AppState) -> Router {
    let storefront = Router::new()
        .merge(routes::accounts::routes())
        .merge(routes::catalog::routes())
        .merge(routes::campaigns::routes())
        .merge(routes::orders::routes());

    let admin = Router::new()
        .merge(routes::admin_campaigns::routes())
        .merge(routes::admin::routes());

    Router::new()
        .route("/healthz", get(healthz))
        .nest("/api", storefront)
        .nest("/admin/api", admin)
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

async fn healthz() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn not_found() -> ApiError {
    ApiError::not_found("no such route")
}

#[cfg(test)]
mod tests;
