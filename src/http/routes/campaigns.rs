//! Storefront campaigns and pre-orders.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;

use crate::campaign_actor::PreOrderFilter;
use crate::domain::{
    Campaign, CampaignStatus, PreOrderEntry, PreOrderLine, PreOrderRequest, ShippingAddress,
};
use crate::http::{ApiError, ApiResult, AppState, CurrentUser};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/campaigns", get(list_active_campaigns))
        .route("/campaigns/{id}", get(get_campaign))
        .route("/pre-orders", post(place_pre_order).get(list_my_pre_orders))
        .route("/pre-orders/{id}", get(get_pre_order))
        .route("/pre-orders/{id}/cancel", post(cancel_pre_order))
        .route("/pre-orders/{id}/verify-payment", post(verify_payment))
}

/// `GET /api/campaigns`
async fn list_active_campaigns(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Campaign>>> {
    Ok(Json(state.campaigns.list_campaigns(Some(CampaignStatus::Active)).await?))
}

/// `GET /api/campaigns/{id}`; drafts are not public.
async fn get_campaign(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Campaign>> {
    match state.campaigns.get_campaign(id.clone()).await? {
        Some(campaign) if campaign.status != CampaignStatus::Draft => Ok(Json(campaign)),
        _ => Err(ApiError::not_found(format!("Campaign not found: {id}"))),
    }
}

#[derive(Debug, Deserialize)]
pub struct PlacePreOrderRequest {
    pub campaign_id: String,
    pub items: Vec<PreOrderLine>,
    pub shipping_address: ShippingAddress,
}

/// `POST /api/pre-orders`
async fn place_pre_order(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Json(body): Json<PlacePreOrderRequest>,
) -> ApiResult<(StatusCode, Json<PreOrderEntry>)> {
    let entry = state
        .campaigns
        .place_pre_order(PreOrderRequest {
            campaign_id: body.campaign_id,
            user_id: user.id,
            items: body.items,
            shipping_address: body.shipping_address,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// `GET /api/pre-orders`
async fn list_my_pre_orders(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<Json<Vec<PreOrderEntry>>> {
    let filter = PreOrderFilter { user_id: Some(user.id), ..Default::default() };
    Ok(Json(state.campaigns.list_pre_orders(filter).await?))
}

/// `GET /api/pre-orders/{id}`; other buyers' entries look missing.
async fn get_pre_order(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
) -> ApiResult<Json<PreOrderEntry>> {
    let entry = state.campaigns.require_pre_order(id.clone()).await?;
    if entry.user_id != user.id && !user.is_admin() {
        return Err(ApiError::not_found(format!("Pre-order not found: {id}")));
    }
    Ok(Json(entry))
}

/// `POST /api/pre-orders/{id}/cancel`
async fn cancel_pre_order(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
) -> ApiResult<Json<PreOrderEntry>> {
    Ok(Json(state.campaigns.cancel_pre_order(id, user.id).await?))
}

#[derive(Debug, Deserialize)]
pub struct VerifyPaymentRequest {
    pub payment_id: String,
    pub signature: String,
}

/// `POST /api/pre-orders/{id}/verify-payment`
async fn verify_payment(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
    Json(body): Json<VerifyPaymentRequest>,
) -> ApiResult<Json<PreOrderEntry>> {
    let entry = state
        .campaigns
        .verify_pre_order_payment(id, user.id, body.payment_id, body.signature)
        .await?;
    Ok(Json(entry))
}
