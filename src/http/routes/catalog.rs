//! Products, designer-tool designs and marketplace submissions.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;

use crate::design_actor::CustomDesignPatch;
use crate::domain::{CustomDesign, CustomDesignCreate, DesignSubmission, Product, SubmissionCreate};
use crate::http::{ApiError, ApiResult, AppState, CurrentUser};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/products", get(list_products))
        .route("/products/{id}", get(get_product))
        .route("/designs", post(create_design).get(list_my_designs))
        .route("/designs/{id}", get(get_design).patch(update_design))
        .route("/design-submissions", post(submit_design).get(list_my_submissions))
}

/// `GET /api/products`, active products only.
async fn list_products(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Product>>> {
    let mut products: Vec<_> = state
        .products
        .list_products()
        .await?
        .into_iter()
        .filter(|p| p.active)
        .collect();
    products.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(Json(products))
}

/// `GET /api/products/{id}`
async fn get_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Product>> {
    match state.products.get_product(id.clone()).await? {
        Some(product) if product.active => Ok(Json(product)),
        _ => Err(ApiError::not_found(format!("Product not found: {id}"))),
    }
}

#[derive(Debug, Deserialize)]
pub struct DesignRequest {
    pub name: String,
    pub product_id: String,
    #[serde(default)]
    pub front_image_url: Option<String>,
    #[serde(default)]
    pub back_image_url: Option<String>,
}

/// `POST /api/designs`
async fn create_design(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Json(body): Json<DesignRequest>,
) -> ApiResult<(StatusCode, Json<CustomDesign>)> {
    let design = state
        .designs
        .create_custom_design(CustomDesignCreate {
            creator_id: user.id,
            name: body.name,
            product_id: body.product_id,
            front_image_url: body.front_image_url,
            back_image_url: body.back_image_url,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(design)))
}

/// `GET /api/designs`
async fn list_my_designs(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<Json<Vec<CustomDesign>>> {
    Ok(Json(state.designs.list_custom_designs_by(user.id).await?))
}

/// `GET /api/designs/{id}`
async fn get_design(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
) -> ApiResult<Json<CustomDesign>> {
    let design = state.designs.require_custom_design(id.clone()).await?;
    if design.creator_id != user.id && !user.is_admin() {
        return Err(ApiError::not_found(format!("Design not found: {id}")));
    }
    Ok(Json(design))
}

/// `PATCH /api/designs/{id}`
async fn update_design(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
    Json(patch): Json<CustomDesignPatch>,
) -> ApiResult<Json<CustomDesign>> {
    Ok(Json(state.designs.update_custom_design(id, user.id, patch).await?))
}

#[derive(Debug, Deserialize)]
pub struct SubmissionRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub image_url: String,
}

/// `POST /api/design-submissions`
async fn submit_design(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Json(body): Json<SubmissionRequest>,
) -> ApiResult<(StatusCode, Json<DesignSubmission>)> {
    let submission = state
        .designs
        .submit_design(SubmissionCreate {
            creator_id: user.id,
            title: body.title,
            description: body.description,
            image_url: body.image_url,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(submission)))
}

/// `GET /api/design-submissions`
async fn list_my_submissions(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<Json<Vec<DesignSubmission>>> {
    Ok(Json(state.designs.list_submissions(None, Some(user.id)).await?))
}
