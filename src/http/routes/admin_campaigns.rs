//! Back-office campaign registry, lifecycle and fulfillment.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;

use crate::campaign_actor::PreOrderFilter;
use crate::domain::{Campaign, CampaignCreate, CampaignPatch, CampaignStatus, PreOrderEntry};
use crate::http::{AdminUser, ApiResult, AppState};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/campaigns", post(create_campaign).get(list_campaigns))
        .route(
            "/campaigns/{id}",
            get(get_campaign).patch(update_campaign).delete(delete_campaign),
        )
        .route("/campaigns/{id}/activate", post(activate_campaign))
        .route("/campaigns/{id}/close", post(close_campaign))
        .route("/campaigns/{id}/cancel", post(cancel_campaign))
        .route("/campaigns/{id}/start-production", post(start_production))
        .route("/campaigns/{id}/fulfill", post(fulfill_campaign))
        .route("/campaigns/{id}/pre-orders", get(list_campaign_pre_orders))
        .route("/pre-orders/{id}/ship", post(ship_pre_order))
        .route("/pre-orders/{id}/deliver", post(deliver_pre_order))
}

#[derive(Debug, Deserialize)]
pub struct StatusQuery {
    pub status: Option<CampaignStatus>,
}

async fn create_campaign(
    State(state): State<Arc<AppState>>,
    AdminUser(_): AdminUser,
    Json(params): Json<CampaignCreate>,
) -> ApiResult<(StatusCode, Json<Campaign>)> {
    let campaign = state.campaigns.create_campaign(params).await?;
    Ok((StatusCode::CREATED, Json(campaign)))
}

async fn list_campaigns(
    State(state): State<Arc<AppState>>,
    AdminUser(_): AdminUser,
    Query(query): Query<StatusQuery>,
) -> ApiResult<Json<Vec<Campaign>>> {
    Ok(Json(state.campaigns.list_campaigns(query.status).await?))
}

async fn get_campaign(
    State(state): State<Arc<AppState>>,
    AdminUser(_): AdminUser,
    Path(id): Path<String>,
) -> ApiResult<Json<Campaign>> {
    Ok(Json(state.campaigns.require_campaign(id).await?))
}

async fn update_campaign(
    State(state): State<Arc<AppState>>,
    AdminUser(_): AdminUser,
    Path(id): Path<String>,
    Json(patch): Json<CampaignPatch>,
) -> ApiResult<Json<Campaign>> {
    Ok(Json(state.campaigns.update_campaign(id, patch).await?))
}

async fn delete_campaign(
    State(state): State<Arc<AppState>>,
    AdminUser(_): AdminUser,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state.campaigns.delete_campaign(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn activate_campaign(
    State(state): State<Arc<AppState>>,
    AdminUser(_): AdminUser,
    Path(id): Path<String>,
) -> ApiResult<Json<Campaign>> {
    Ok(Json(state.campaigns.activate_campaign(id).await?))
}

/// `POST /admin/api/campaigns/{id}/close`: confirm or refund by threshold.
async fn close_campaign(
    State(state): State<Arc<AppState>>,
    AdminUser(admin): AdminUser,
    Path(id): Path<String>,
) -> ApiResult<Json<Campaign>> {
    tracing::info!(admin_id = %admin.id, campaign_id = %id, "Close requested");
    Ok(Json(state.campaigns.close_campaign(id).await?))
}

async fn cancel_campaign(
    State(state): State<Arc<AppState>>,
    AdminUser(admin): AdminUser,
    Path(id): Path<String>,
) -> ApiResult<Json<Campaign>> {
    tracing::info!(admin_id = %admin.id, campaign_id = %id, "Cancel requested");
    Ok(Json(state.campaigns.cancel_campaign(id).await?))
}

async fn start_production(
    State(state): State<Arc<AppState>>,
    AdminUser(_): AdminUser,
    Path(id): Path<String>,
) -> ApiResult<Json<Campaign>> {
    Ok(Json(state.campaigns.start_production(id).await?))
}

async fn fulfill_campaign(
    State(state): State<Arc<AppState>>,
    AdminUser(_): AdminUser,
    Path(id): Path<String>,
) -> ApiResult<Json<Campaign>> {
    Ok(Json(state.campaigns.fulfill_campaign(id).await?))
}

async fn list_campaign_pre_orders(
    State(state): State<Arc<AppState>>,
    AdminUser(_): AdminUser,
    Path(id): Path<String>,
) -> ApiResult<Json<Vec<PreOrderEntry>>> {
    let campaign = state.campaigns.require_campaign(id).await?;
    let filter = PreOrderFilter { campaign_id: Some(campaign.id), ..Default::default() };
    Ok(Json(state.campaigns.list_pre_orders(filter).await?))
}

#[derive(Debug, Deserialize)]
pub struct ShipRequest {
    pub tracking_number: String,
}

async fn ship_pre_order(
    State(state): State<Arc<AppState>>,
    AdminUser(_): AdminUser,
    Path(id): Path<String>,
    Json(body): Json<ShipRequest>,
) -> ApiResult<Json<PreOrderEntry>> {
    Ok(Json(state.campaigns.ship_pre_order(id, body.tracking_number).await?))
}

async fn deliver_pre_order(
    State(state): State<Arc<AppState>>,
    AdminUser(_): AdminUser,
    Path(id): Path<String>,
) -> ApiResult<Json<PreOrderEntry>> {
    Ok(Json(state.campaigns.deliver_pre_order(id).await?))
}
