//! Regular storefront orders.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;

use super::campaigns::VerifyPaymentRequest;
use crate::domain::{Order, OrderLine};
use crate::http::{ApiError, ApiResult, AppState, CurrentUser};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/orders", post(create_order).get(list_my_orders))
        .route("/orders/{id}", get(get_order))
        .route("/orders/{id}/verify-payment", post(verify_payment))
        .route("/orders/{id}/cancel", post(cancel_order))
}

#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub items: Vec<OrderLine>,
}

/// `POST /api/orders`
async fn create_order(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Json(body): Json<CreateOrderRequest>,
) -> ApiResult<(StatusCode, Json<Order>)> {
    let order = state.orders.create_order(user.id, body.items).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// `GET /api/orders`
async fn list_my_orders(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<Json<Vec<Order>>> {
    Ok(Json(state.orders.list_orders_for(user.id).await?))
}

/// `GET /api/orders/{id}`
async fn get_order(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
) -> ApiResult<Json<Order>> {
    let order = state.orders.require_order(id.clone()).await?;
    if order.user_id != user.id && !user.is_admin() {
        return Err(ApiError::not_found(format!("Order not found: {id}")));
    }
    Ok(Json(order))
}

/// `POST /api/orders/{id}/verify-payment`
async fn verify_payment(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
    Json(body): Json<VerifyPaymentRequest>,
) -> ApiResult<Json<Order>> {
    let order = state
        .orders
        .verify_payment(id, user.id, body.payment_id, body.signature)
        .await?;
    Ok(Json(order))
}

/// `POST /api/orders/{id}/cancel`
async fn cancel_order(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
) -> ApiResult<Json<Order>> {
    Ok(Json(state.orders.cancel_order(id, user.id).await?))
}
