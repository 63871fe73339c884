//! Registration, profile and royalty withdrawals.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::domain::{User, UserPatch, Withdrawal};
use crate::http::{ApiResult, AppState, CurrentUser};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users", post(register))
        .route("/me", get(me).patch(update_me))
        .route("/withdrawals", post(request_withdrawal).get(list_my_withdrawals))
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
}

/// `POST /api/users`
async fn register(
    State(state): State<Arc<AppState>>,
    Json(body): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<User>)> {
    let user = state.users.register_user(body.name, body.email).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// `GET /api/me`
async fn me(CurrentUser(user): CurrentUser) -> Json<User> {
    Json(user)
}

/// `PATCH /api/me`
async fn update_me(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Json(patch): Json<UserPatch>,
) -> ApiResult<Json<User>> {
    Ok(Json(state.users.update_user(user.id, patch).await?))
}

#[derive(Debug, Deserialize)]
pub struct WithdrawalRequest {
    pub amount: Decimal,
    pub payout_destination: String,
}

/// `POST /api/withdrawals`
async fn request_withdrawal(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Json(body): Json<WithdrawalRequest>,
) -> ApiResult<(StatusCode, Json<Withdrawal>)> {
    let withdrawal = state
        .withdrawals
        .request_withdrawal(user.id, body.amount, body.payout_destination)
        .await?;
    Ok((StatusCode::CREATED, Json(withdrawal)))
}

/// `GET /api/withdrawals`
async fn list_my_withdrawals(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<Json<Vec<Withdrawal>>> {
    Ok(Json(state.withdrawals.list_withdrawals_for(user.id).await?))
}
