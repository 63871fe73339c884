use std::sync::Arc;

use chrono::{Duration, Utc};
use rust_decimal::Decimal;

use crate::actor_framework::{Entity, FrameworkError, ResourceRequest};
use crate::app_system::ShopSystem;
use crate::campaign_actor::PreOrderFilter;
use crate::clients::{DesignClient, OrderClient, ProductClient, UserClient};
use crate::config::ShopConfig;
use crate::domain::{
    Campaign, CampaignCreate, CampaignStatus, CustomDesign, CustomDesignCreate, DesignSubmission,
    Order, OrderCreate, OrderItem, OrderLine, OrderStatus, PreOrderLine, PreOrderRequest,
    PreOrderStatus, Product, ProductCreate, ShippingAddress, Size, SubmissionCreate, User,
    WithdrawalStatus,
};
use crate::mock_framework::{self, create_mock_client, expect_action, expect_create, expect_get};
use crate::notify::{NotificationService, RecordingMailer};
use crate::order_actor::{OrderAction, OrderError};
use crate::payment::PaymentVerifier;
use crate::product_actor::{ProductAction, ProductActionResult, ProductError};
use crate::royalty::RoyaltyLedger;
use crate::user_actor::{UserAction, UserError};
use crate::withdrawal_actor::WithdrawalError;

const SECRET: &str = "test-secret";

// -----------------------------------------------------------------------------
// Client orchestration against mocked actors
// -----------------------------------------------------------------------------

struct MockedOrders {
    order_client: OrderClient,
    user_rx: tokio::sync::mpsc::Receiver<ResourceRequest<User>>,
    product_rx: tokio::sync::mpsc::Receiver<ResourceRequest<Product>>,
    order_rx: tokio::sync::mpsc::Receiver<ResourceRequest<Order>>,
    design_rx: tokio::sync::mpsc::Receiver<ResourceRequest<CustomDesign>>,
    submission_rx: tokio::sync::mpsc::Receiver<ResourceRequest<DesignSubmission>>,
}

fn mocked_orders() -> MockedOrders {
    let (user_client_inner, user_rx) = create_mock_client::<User>(10);
    let (product_client_inner, product_rx) = create_mock_client::<Product>(10);
    let (order_client_inner, order_rx) = create_mock_client::<Order>(10);
    let (design_inner, design_rx) = create_mock_client::<CustomDesign>(10);
    let (submission_inner, submission_rx) = create_mock_client::<DesignSubmission>(10);

    let user_client = UserClient::new(user_client_inner, Vec::<String>::new());
    let product_client = ProductClient::new(product_client_inner);
    let design_client = DesignClient::new(design_inner, submission_inner, product_client.clone());
    let ledger = RoyaltyLedger::new(design_client, user_client.clone(), Decimal::new(10, 2));
    let (_service, notifier) = NotificationService::new(8, Arc::new(RecordingMailer::default()));

    let order_client = OrderClient::new(
        order_client_inner,
        user_client,
        product_client,
        ledger,
        Arc::new(PaymentVerifier::new(SECRET)),
        notifier,
    );
    MockedOrders { order_client, user_rx, product_rx, order_rx, design_rx, submission_rx }
}

fn line(product_id: &str, quantity: u32) -> OrderLine {
    OrderLine { product_id: product_id.to_string(), design_id: None, size: Size::M, quantity }
}

#[tokio::test]
async fn test_order_creation_flow() {
    let MockedOrders { order_client, mut user_rx, mut product_rx, mut order_rx, .. } = mocked_orders();

    let order_task = tokio::spawn(async move {
        order_client.create_order("usr_1".to_string(), vec![line("prd_1", 5)]).await
    });

    // Expect User Get
    let (user_id, responder) = expect_get(&mut user_rx).await.expect("Expected User Get");
    assert_eq!(user_id, "usr_1");
    responder.send(Ok(Some(mock_framework::user("usr_1", "test@example.com")))).unwrap();

    // Expect Product Get
    let (product_id, responder) = expect_get(&mut product_rx).await.expect("Expected Product Get");
    assert_eq!(product_id, "prd_1");
    let price = Decimal::new(2000, 2);
    responder.send(Ok(Some(mock_framework::product("prd_1", price, 100)))).unwrap();

    // Expect Stock Reservation (Action)
    let (product_id, action, responder) = expect_action(&mut product_rx).await.expect("Expected Product Action");
    assert_eq!(product_id, "prd_1");
    match action {
        ProductAction::ReserveStock(qty) => assert_eq!(qty, 5),
        _ => panic!("Unexpected action: {:?}", action),
    }
    responder.send(Ok(ProductActionResult::Reserved)).unwrap();

    // Expect Order Create, priced from the catalog
    let (payload, responder) = expect_create(&mut order_rx).await.expect("Expected Order Create");
    assert_eq!(payload.user_id, "usr_1");
    assert_eq!(payload.items.len(), 1);
    assert_eq!(payload.items[0].unit_price, price);
    let order = <Order as Entity>::from_create("ord_1".to_string(), payload).unwrap();
    responder.send(Ok(order)).unwrap();

    let result: Order = order_task.await.unwrap().unwrap();
    assert_eq!(result.id, "ord_1");
    assert_eq!(result.total, Decimal::new(10000, 2));
}

#[tokio::test]
async fn failed_reservation_releases_earlier_lines() {
    let MockedOrders { order_client, mut user_rx, mut product_rx, mut order_rx, .. } = mocked_orders();

    let order_task = tokio::spawn(async move {
        order_client
            .create_order("usr_1".to_string(), vec![line("prd_1", 2), line("prd_2", 9)])
            .await
    });

    let (_, responder) = expect_get(&mut user_rx).await.unwrap();
    responder.send(Ok(Some(mock_framework::user("usr_1", "test@example.com")))).unwrap();

    let (_, responder) = expect_get(&mut product_rx).await.unwrap();
    responder.send(Ok(Some(mock_framework::product("prd_1", Decimal::TEN, 10)))).unwrap();
    let (_, _, responder) = expect_action(&mut product_rx).await.unwrap();
    responder.send(Ok(ProductActionResult::Reserved)).unwrap();

    let (_, responder) = expect_get(&mut product_rx).await.unwrap();
    responder.send(Ok(Some(mock_framework::product("prd_2", Decimal::TEN, 3)))).unwrap();
    let (_, _, responder) = expect_action(&mut product_rx).await.unwrap();
    responder
        .send(Err(FrameworkError::Entity(ProductError::InsufficientStock { requested: 9, available: 3 })))
        .unwrap();

    // The first line's stock goes back
    let (product_id, action, responder) = expect_action(&mut product_rx).await.unwrap();
    assert_eq!(product_id, "prd_1");
    assert!(matches!(action, ProductAction::ReleaseStock(2)));
    responder.send(Ok(ProductActionResult::Released)).unwrap();

    let result = order_task.await.unwrap();
    assert!(matches!(result, Err(OrderError::InsufficientStock(_))));
    assert!(order_rx.try_recv().is_err(), "no order should be created");
}

#[tokio::test]
async fn unknown_buyer_is_rejected_before_any_reservation() {
    let MockedOrders { order_client, mut user_rx, mut product_rx, .. } = mocked_orders();

    let order_task = tokio::spawn(async move {
        order_client.create_order("usr_404".to_string(), vec![line("prd_1", 1)]).await
    });

    let (_, responder) = expect_get(&mut user_rx).await.unwrap();
    responder.send(Ok(None)).unwrap();

    assert_eq!(order_task.await.unwrap(), Err(OrderError::InvalidUser("usr_404".to_string())));
    assert!(product_rx.try_recv().is_err());
}

#[tokio::test]
async fn royalty_failures_leave_the_order_paid() {
    let MockedOrders { order_client, mut user_rx, mut order_rx, mut design_rx, mut submission_rx, .. } =
        mocked_orders();

    let pending = <Order as Entity>::from_create(
        "ord_1".to_string(),
        OrderCreate {
            user_id: "usr_1".to_string(),
            items: vec![
                OrderItem {
                    product_id: "prd_1".to_string(),
                    design_id: Some("dsg_gone".to_string()),
                    size: Size::M,
                    quantity: 1,
                    unit_price: Decimal::TEN,
                },
                OrderItem {
                    product_id: "prd_1".to_string(),
                    design_id: Some("dsg_1".to_string()),
                    size: Size::L,
                    quantity: 1,
                    unit_price: Decimal::TEN,
                },
            ],
        },
    )
    .unwrap();
    let signature = PaymentVerifier::new(SECRET).sign("ord_1", "pay_1");

    let payment_task = tokio::spawn(async move {
        order_client
            .verify_payment("ord_1".to_string(), "usr_1".to_string(), "pay_1".to_string(), signature)
            .await
    });

    let (_, responder) = expect_get(&mut order_rx).await.expect("Expected Order Get");
    responder.send(Ok(Some(pending.clone()))).unwrap();

    let (order_id, action, responder) = expect_action(&mut order_rx).await.expect("Expected Order Action");
    assert_eq!(order_id, "ord_1");
    assert!(matches!(action, OrderAction::MarkPaid { .. }));
    let mut paid = pending;
    paid.handle_action(action).unwrap();
    responder.send(Ok(paid)).unwrap();

    // First line: no design source knows it
    let (_, responder) = expect_get(&mut design_rx).await.expect("Expected CustomDesign Get");
    responder.send(Ok(None)).unwrap();
    let (_, responder) = expect_get(&mut submission_rx).await.expect("Expected Submission Get");
    responder.send(Ok(None)).unwrap();

    // Second line: the creator's credit fails
    let (_, responder) = expect_get(&mut design_rx).await.expect("Expected CustomDesign Get");
    responder
        .send(Ok(Some(CustomDesign {
            id: "dsg_1".to_string(),
            creator_id: "usr_c".to_string(),
            name: "Sunset".to_string(),
            product_id: "prd_1".to_string(),
            front_image_url: None,
            back_image_url: None,
            created_at: Utc::now(),
        })))
        .unwrap();
    let (user_id, action, responder) = expect_action(&mut user_rx).await.expect("Expected User Action");
    assert_eq!(user_id, "usr_c");
    assert!(matches!(action, UserAction::CreditRoyalty(_)));
    responder
        .send(Err(FrameworkError::ActorDropped))
        .unwrap();

    // Buyer lookup for the confirmation email
    let (_, responder) = expect_get(&mut user_rx).await.expect("Expected User Get");
    responder.send(Ok(Some(mock_framework::user("usr_1", "ana@example.com")))).unwrap();

    let order = payment_task.await.unwrap().unwrap();
    assert_eq!(order.status, OrderStatus::Paid);
    assert_eq!(order.payment_status, crate::domain::PaymentStatus::Paid);
    assert!(user_rx.try_recv().is_err(), "no balance should change");
}

// -----------------------------------------------------------------------------
// Full actor system
// -----------------------------------------------------------------------------

struct Shop {
    system: ShopSystem,
    mailer: RecordingMailer,
    admin: User,
}

async fn start_shop() -> Shop {
    let config = ShopConfig {
        payment_key_secret: SECRET.to_string(),
        admin_emails: vec!["admin@example.com".to_string()],
        ..Default::default()
    };
    let mailer = RecordingMailer::default();
    let system = ShopSystem::with_mailer(&config, Arc::new(mailer.clone()));
    let admin = system
        .user_client
        .register_user("Admin".to_string(), "admin@example.com".to_string())
        .await
        .unwrap();
    Shop { system, mailer, admin }
}

impl Shop {
    async fn buyer(&self, name: &str) -> User {
        self.system
            .user_client
            .register_user(name.to_string(), format!("{}@example.com", name.to_lowercase()))
            .await
            .unwrap()
    }

    async fn product(&self, stock: u32) -> Product {
        self.system
            .product_client
            .create_product(ProductCreate {
                name: "Heavyweight Tee".to_string(),
                description: String::new(),
                price: Decimal::new(2500, 2),
                stock,
            })
            .await
            .unwrap()
    }

    async fn active_campaign(&self, min_quantity: u32) -> Campaign {
        let product = self.product(0).await;
        let now = Utc::now();
        let campaign = self
            .system
            .campaign_client
            .create_campaign(CampaignCreate {
                product_id: product.id,
                name: "Spring Drop".to_string(),
                description: String::new(),
                start_date: now - Duration::hours(1),
                end_date: now + Duration::days(7),
                unit_price: Decimal::new(3999, 2),
                min_quantity,
                max_quantity: None,
                delivery_days: 21,
            })
            .await
            .unwrap();
        self.system.campaign_client.activate_campaign(campaign.id).await.unwrap()
    }

    async fn pre_order(&self, campaign: &Campaign, buyer: &User, quantity: u32) -> String {
        self.system
            .campaign_client
            .place_pre_order(PreOrderRequest {
                campaign_id: campaign.id.clone(),
                user_id: buyer.id.clone(),
                items: vec![PreOrderLine { size: Size::L, quantity }],
                shipping_address: address(),
            })
            .await
            .unwrap()
            .id
    }

    async fn subjects_to(&self, email: &str) -> Vec<String> {
        self.system.notifier.flush().await;
        self.mailer
            .sent()
            .into_iter()
            .filter(|e| e.to == email)
            .map(|e| e.subject)
            .collect()
    }
}

fn address() -> ShippingAddress {
    ShippingAddress {
        full_name: "Ana Buyer".to_string(),
        phone: "+15550100".to_string(),
        line1: "1 Main St".to_string(),
        line2: None,
        city: "Springfield".to_string(),
        state: "IL".to_string(),
        postal_code: "62701".to_string(),
        country: "US".to_string(),
    }
}

#[tokio::test]
async fn campaign_reaching_minimum_confirms_every_entry() {
    let shop = start_shop().await;
    assert!(shop.admin.is_admin());
    let campaign = shop.active_campaign(5).await;
    let ana = shop.buyer("Ana").await;
    let ben = shop.buyer("Ben").await;
    shop.pre_order(&campaign, &ana, 3).await;
    shop.pre_order(&campaign, &ben, 2).await;

    let closed = shop.system.campaign_client.close_campaign(campaign.id.clone()).await.unwrap();
    assert_eq!(closed.status, CampaignStatus::Closed);
    assert_eq!(closed.total_quantity, 5);

    let filter = PreOrderFilter { campaign_id: Some(campaign.id.clone()), ..Default::default() };
    let entries = shop.system.campaign_client.list_pre_orders(filter).await.unwrap();
    assert_eq!(entries.len(), 2);
    assert!(entries.iter().all(|e| e.status == PreOrderStatus::Confirmed));
    assert!(entries.iter().all(|e| e.estimated_delivery.is_some()));

    assert_eq!(
        shop.subjects_to("ana@example.com").await,
        vec!["Pre-order received: Spring Drop", "Spring Drop is going into production"]
    );
    shop.system.shutdown().await.unwrap();
}

#[tokio::test]
async fn campaign_missing_minimum_refunds_every_entry() {
    let shop = start_shop().await;
    let campaign = shop.active_campaign(10).await;
    let ana = shop.buyer("Ana").await;
    let entry_id = shop.pre_order(&campaign, &ana, 4).await;

    let verifier = PaymentVerifier::new(SECRET);
    let signature = verifier.sign(&entry_id, "pay_1");
    shop.system
        .campaign_client
        .verify_pre_order_payment(entry_id.clone(), ana.id.clone(), "pay_1".to_string(), signature)
        .await
        .unwrap();

    let cancelled = shop.system.campaign_client.close_campaign(campaign.id.clone()).await.unwrap();
    assert_eq!(cancelled.status, CampaignStatus::Cancelled);

    let entry = shop.system.campaign_client.require_pre_order(entry_id).await.unwrap();
    assert_eq!(entry.status, PreOrderStatus::Refunded);
    assert_eq!(
        entry.refund_reason.as_deref(),
        Some("Campaign did not reach minimum quantity (4/10)")
    );
    assert_eq!(entry.payment_status, crate::domain::PaymentStatus::Refunded);
    assert!(shop
        .subjects_to("ana@example.com")
        .await
        .contains(&"Refund for Spring Drop".to_string()));
}

#[tokio::test]
async fn forged_payment_signature_is_rejected() {
    let shop = start_shop().await;
    let campaign = shop.active_campaign(1).await;
    let ana = shop.buyer("Ana").await;
    let entry_id = shop.pre_order(&campaign, &ana, 1).await;

    let forged = PaymentVerifier::new("other-secret").sign(&entry_id, "pay_1");
    let result = shop
        .system
        .campaign_client
        .verify_pre_order_payment(entry_id, ana.id, "pay_1".to_string(), forged)
        .await;
    assert_eq!(result, Err(crate::campaign_actor::CampaignError::InvalidSignature));
}

#[tokio::test]
async fn royalties_credit_other_creators_only() {
    let shop = start_shop().await;
    let tee = shop.product(50).await;
    let creator = shop.buyer("Cleo").await;
    let ana = shop.buyer("Ana").await;

    let design = shop
        .system
        .design_client
        .create_custom_design(CustomDesignCreate {
            creator_id: creator.id.clone(),
            name: "Sunset".to_string(),
            product_id: tee.id.clone(),
            front_image_url: None,
            back_image_url: None,
        })
        .await
        .unwrap();
    let submission = shop
        .system
        .design_client
        .submit_design(SubmissionCreate {
            creator_id: creator.id.clone(),
            title: "Waves".to_string(),
            description: String::new(),
            image_url: "https://cdn.example.com/waves.png".to_string(),
        })
        .await
        .unwrap();

    let with_design = |design_id: &str, quantity| OrderLine {
        product_id: tee.id.clone(),
        design_id: Some(design_id.to_string()),
        size: Size::M,
        quantity,
    };
    let orders = &shop.system.order_client;
    let verifier = PaymentVerifier::new(SECRET);

    // Ana buys both designs: 10% of 2 x 25.00 and 10% of 1 x 25.00.
    let order = orders
        .create_order(ana.id.clone(), vec![with_design(&design.id, 2), with_design(&submission.id, 1)])
        .await
        .unwrap();
    let signature = verifier.sign(&order.id, "pay_a");
    orders
        .verify_payment(order.id.clone(), ana.id.clone(), "pay_a".to_string(), signature)
        .await
        .unwrap();

    // The creator buys their own design: no royalty.
    let own = orders
        .create_order(creator.id.clone(), vec![with_design(&design.id, 4)])
        .await
        .unwrap();
    let signature = verifier.sign(&own.id, "pay_c");
    orders
        .verify_payment(own.id.clone(), creator.id.clone(), "pay_c".to_string(), signature)
        .await
        .unwrap();

    let creator = shop.system.user_client.require_user(creator.id).await.unwrap();
    assert_eq!(creator.royalty_points, Decimal::new(750, 2));
    assert_eq!(creator.total_earnings, Decimal::new(750, 2));

    let stock = shop.system.product_client.check_stock(tee.id).await.unwrap();
    assert_eq!(stock, 50 - 3 - 4);
    assert!(shop
        .subjects_to("ana@example.com")
        .await
        .contains(&format!("Order {} confirmed", order.id)));
}

#[tokio::test]
async fn rejected_withdrawal_returns_points() {
    let shop = start_shop().await;
    let cleo = shop.buyer("Cleo").await;
    let users = &shop.system.user_client;
    users.credit_royalty(cleo.id.clone(), Decimal::from(150)).await.unwrap();

    let withdrawals = &shop.system.withdrawal_client;
    assert_eq!(
        withdrawals
            .request_withdrawal(cleo.id.clone(), Decimal::from(50), "acct-1".to_string())
            .await,
        Err(WithdrawalError::BelowMinimum(Decimal::from(100)))
    );
    assert!(matches!(
        withdrawals
            .request_withdrawal(cleo.id.clone(), Decimal::from(200), "acct-1".to_string())
            .await,
        Err(WithdrawalError::InsufficientBalance { .. })
    ));

    let withdrawal = withdrawals
        .request_withdrawal(cleo.id.clone(), Decimal::from(120), "acct-1".to_string())
        .await
        .unwrap();
    assert_eq!(users.require_user(cleo.id.clone()).await.unwrap().royalty_points, Decimal::from(30));

    let reviewed = withdrawals
        .review_withdrawal(withdrawal.id.clone(), false, Some("bank details invalid".to_string()))
        .await
        .unwrap();
    assert_eq!(reviewed.status, WithdrawalStatus::Rejected);

    let cleo_after = users.require_user(cleo.id).await.unwrap();
    assert_eq!(cleo_after.royalty_points, Decimal::from(150));
    assert_eq!(cleo_after.total_earnings, Decimal::from(150));

    assert!(matches!(
        withdrawals.review_withdrawal(withdrawal.id, true, None).await,
        Err(WithdrawalError::AlreadyReviewed(WithdrawalStatus::Rejected))
    ));
    assert!(shop
        .subjects_to("cleo@example.com")
        .await
        .contains(&"Withdrawal rejected".to_string()));
}

#[tokio::test]
async fn duplicate_email_registration_is_rejected() {
    let shop = start_shop().await;
    shop.buyer("Ana").await;
    let result = shop
        .system
        .user_client
        .register_user("Ana Again".to_string(), "ANA@example.com".to_string())
        .await;
    assert_eq!(result, Err(UserError::AlreadyExists("ana@example.com".to_string())));
}
