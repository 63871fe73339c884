//! Back-office catalog, submission review and payouts.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use serde::Deserialize;

use crate::domain::{
    DesignSubmission, Product, ProductCreate, ProductPatch, SubmissionStatus, Withdrawal,
};
use crate::http::{AdminUser, ApiResult, AppState};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/products", post(create_product).get(list_products))
        .route("/products/{id}", patch(update_product))
        .route("/design-submissions", get(list_submissions))
        .route("/design-submissions/{id}/review", post(review_submission))
        .route("/withdrawals", get(list_withdrawals))
        .route("/withdrawals/{id}/review", post(review_withdrawal))
}

async fn create_product(
    State(state): State<Arc<AppState>>,
    AdminUser(_): AdminUser,
    Json(params): Json<ProductCreate>,
) -> ApiResult<(StatusCode, Json<Product>)> {
    let product = state.products.create_product(params).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Includes inactive products.
async fn list_products(
    State(state): State<Arc<AppState>>,
    AdminUser(_): AdminUser,
) -> ApiResult<Json<Vec<Product>>> {
    let mut products = state.products.list_products().await?;
    products.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(Json(products))
}

async fn update_product(
    State(state): State<Arc<AppState>>,
    AdminUser(_): AdminUser,
    Path(id): Path<String>,
    Json(patch): Json<ProductPatch>,
) -> ApiResult<Json<Product>> {
    Ok(Json(state.products.update_product(id, patch).await?))
}

#[derive(Debug, Deserialize)]
pub struct SubmissionQuery {
    pub status: Option<SubmissionStatus>,
}

async fn list_submissions(
    State(state): State<Arc<AppState>>,
    AdminUser(_): AdminUser,
    Query(query): Query<SubmissionQuery>,
) -> ApiResult<Json<Vec<DesignSubmission>>> {
    Ok(Json(state.designs.list_submissions(query.status, None).await?))
}

#[derive(Debug, Deserialize)]
pub struct ReviewRequest {
    pub approve: bool,
    #[serde(default)]
    pub note: Option<String>,
}

async fn review_submission(
    State(state): State<Arc<AppState>>,
    AdminUser(_): AdminUser,
    Path(id): Path<String>,
    Json(body): Json<ReviewRequest>,
) -> ApiResult<Json<DesignSubmission>> {
    Ok(Json(state.designs.review_submission(id, body.approve).await?))
}

async fn list_withdrawals(
    State(state): State<Arc<AppState>>,
    AdminUser(_): AdminUser,
) -> ApiResult<Json<Vec<Withdrawal>>> {
    let mut withdrawals = state.withdrawals.list_withdrawals().await?;
    withdrawals.sort_by(|a, b| a.created_at.cmp(&b.created_at));
    Ok(Json(withdrawals))
}

async fn review_withdrawal(
    State(state): State<Arc<AppState>>,
    AdminUser(_): AdminUser,
    Path(id): Path<String>,
    Json(body): Json<ReviewRequest>,
) -> ApiResult<Json<Withdrawal>> {
    let withdrawal = state
        .withdrawals
        .review_withdrawal(id, body.approve, body.note)
        .await?;
    Ok(Json(withdrawal))
}
