use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use chrono::{Duration, Utc};
use serde_json::{json, Value};
use tower::ServiceExt;

use super::{auth::USER_ID_HEADER, router};
use crate::app_system::ShopSystem;
use crate::config::ShopConfig;
use crate::notify::RecordingMailer;

fn test_router() -> (Router, ShopSystem) {
    let config = ShopConfig {
        payment_key_secret: "test-secret".to_string(),
        admin_emails: vec!["admin@example.com".to_string()],
        ..Default::default()
    };
    let system = ShopSystem::with_mailer(&config, Arc::new(RecordingMailer::default()));
    (router(system.app_state()), system)
}

async fn call(
    router: &Router,
    method: Method,
    uri: &str,
    user_id: Option<&str>,
    body: Option<Value>,
) -> Result<(StatusCode, Value), String> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(user_id) = user_id {
        builder = builder.header(USER_ID_HEADER, user_id);
    }

    let req = if let Some(payload) = body {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
        let bytes =
            serde_json::to_vec(&payload).map_err(|err| format!("serialize request body: {err}"))?;
        builder
            .body(Body::from(bytes))
            .map_err(|err| format!("build request: {err}"))?
    } else {
        builder
            .body(Body::empty())
            .map_err(|err| format!("build request: {err}"))?
    };

    let response = router
        .clone()
        .oneshot(req)
        .await
        .map_err(|err| format!("route request: {err}"))?;
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .map_err(|err| format!("read response body: {err}"))?;

    let parsed = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).map_err(|err| format!("parse response body: {err}"))?
    };
    Ok((status, parsed))
}

async fn register(router: &Router, name: &str, email: &str) -> Result<String, String> {
    let (status, user) = call(
        router,
        Method::POST,
        "/api/users",
        None,
        Some(json!({ "name": name, "email": email })),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED, "{user}");
    user["id"].as_str().map(str::to_string).ok_or_else(|| "missing id".to_string())
}

/// Creates a product and an active campaign around it; returns the campaign id.
async fn active_campaign(router: &Router, admin: &str, min_quantity: u32) -> Result<String, String> {
    let (status, product) = call(
        router,
        Method::POST,
        "/admin/api/products",
        Some(admin),
        Some(json!({ "name": "Boxy Tee", "price": "25.00" })),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED, "{product}");

    let now = Utc::now();
    let (status, campaign) = call(
        router,
        Method::POST,
        "/admin/api/campaigns",
        Some(admin),
        Some(json!({
            "product_id": product["id"],
            "name": "Autumn Drop",
            "start_date": (now - Duration::hours(1)).to_rfc3339(),
            "end_date": (now + Duration::days(3)).to_rfc3339(),
            "unit_price": "39.99",
            "min_quantity": min_quantity,
            "max_quantity": null,
            "delivery_days": 14
        })),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED, "{campaign}");
    assert_eq!(campaign["status"], "draft");
    let id = campaign["id"].as_str().ok_or("missing id")?.to_string();

    let (status, activated) = call(
        router,
        Method::POST,
        &format!("/admin/api/campaigns/{id}/activate"),
        Some(admin),
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::OK, "{activated}");
    Ok(id)
}

fn pre_order_body(campaign_id: &str, quantity: u32) -> Value {
    json!({
        "campaign_id": campaign_id,
        "items": [{ "size": "M", "quantity": quantity }],
        "shipping_address": {
            "full_name": "Ana Buyer",
            "phone": "+15550100",
            "line1": "1 Main St",
            "city": "Springfield",
            "state": "IL",
            "postal_code": "62701",
            "country": "US"
        }
    })
}

#[tokio::test]
async fn healthz_is_open() -> Result<(), String> {
    let (router, _system) = test_router();
    let (status, body) = call(&router, Method::GET, "/healthz", None, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn identity_is_enforced() -> Result<(), String> {
    let (router, _system) = test_router();
    let buyer = register(&router, "Ana", "ana@example.com").await?;

    let (status, body) = call(&router, Method::GET, "/api/me", None, None).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHORIZED");

    let (status, _) = call(&router, Method::GET, "/api/me", Some("usr_unknown"), None).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, me) = call(&router, Method::GET, "/api/me", Some(buyer.as_str()), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["role"], "customer");

    let (status, body) = call(&router, Method::GET, "/admin/api/campaigns", Some(buyer.as_str()), None).await?;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "FORBIDDEN");
    Ok(())
}

#[tokio::test]
async fn pre_order_and_close_over_http() -> Result<(), String> {
    let (router, _system) = test_router();
    let admin = register(&router, "Admin", "admin@example.com").await?;
    let buyer = register(&router, "Ana", "ana@example.com").await?;
    let campaign_id = active_campaign(&router, &admin, 3).await?;

    let (status, listed) = call(&router, Method::GET, "/api/campaigns", None, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().map(Vec::len), Some(1));

    let (status, entry) = call(
        &router,
        Method::POST,
        "/api/pre-orders",
        Some(buyer.as_str()),
        Some(pre_order_body(&campaign_id, 3)),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED, "{entry}");
    assert_eq!(entry["status"], "pending");
    assert_eq!(entry["total_amount"], "119.97");

    let (status, campaign) = call(
        &router,
        Method::POST,
        &format!("/admin/api/campaigns/{campaign_id}/close"),
        Some(admin.as_str()),
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::OK, "{campaign}");
    assert_eq!(campaign["status"], "closed");
    assert_eq!(campaign["total_quantity"], 3);

    let (status, mine) = call(&router, Method::GET, "/api/pre-orders", Some(buyer.as_str()), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(mine[0]["status"], "confirmed");

    // Closing twice is an illegal transition
    let (status, body) = call(
        &router,
        Method::POST,
        &format!("/admin/api/campaigns/{campaign_id}/close"),
        Some(admin.as_str()),
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "INVALID_STATE");
    Ok(())
}

#[tokio::test]
async fn invalid_pre_orders_are_rejected() -> Result<(), String> {
    let (router, _system) = test_router();
    let admin = register(&router, "Admin", "admin@example.com").await?;
    let buyer = register(&router, "Ana", "ana@example.com").await?;
    let campaign_id = active_campaign(&router, &admin, 1).await?;

    let (status, _) = call(
        &router,
        Method::POST,
        "/api/pre-orders",
        Some(buyer.as_str()),
        Some(pre_order_body(&campaign_id, 0)),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = call(
        &router,
        Method::POST,
        "/api/pre-orders",
        Some(buyer.as_str()),
        Some(pre_order_body("cmp_missing", 1)),
    )
    .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = call(
        &router,
        Method::POST,
        &format!("/admin/api/campaigns/{campaign_id}/cancel"),
        Some(admin.as_str()),
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::OK, "{body}");

    let (status, body) = call(
        &router,
        Method::POST,
        "/api/pre-orders",
        Some(buyer.as_str()),
        Some(pre_order_body(&campaign_id, 1)),
    )
    .await?;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "CAMPAIGN_NOT_ACTIVE");
    Ok(())
}
