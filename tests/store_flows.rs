//! Store-backed flow tests
//!
//! Exercises the multi-document write paths against a real mongod: the
//! duplicate-insert guards on users and orders, the checkout finalization
//! fan-out, and its retry path. Each test boots a disposable MongoDB
//! container and calls the handlers directly, the same way the gate tests
//! drive the router.

use axum::extract::{Json, State};
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::Client;
use testcontainers::{core::WaitFor, runners::AsyncRunner, ContainerAsync, GenericImage};

use resale_market::middleware::auth::AuthUser;
use resale_market::middleware::roles::{RequireBuyer, RequireSeller};
use resale_market::orders::{self, Order};
use resale_market::payments::{self, Payment};
use resale_market::products::{self, Product};
use resale_market::users::{self, Role, User};
use resale_market::AppState;

/// Boot a mongod container and build state around it
///
/// The container handle must stay alive for the duration of the test;
/// dropping it tears the container down.
async fn test_state() -> (ContainerAsync<GenericImage>, AppState) {
    let container = GenericImage::new("mongo", "6.0")
        .with_wait_for(WaitFor::message_on_stdout("Waiting for connections"))
        .start()
        .await;
    let port = container.get_host_port_ipv4(27017).await;
    let client = Client::with_uri_str(format!("mongodb://127.0.0.1:{port}"))
        .await
        .expect("client options should parse");
    let state = AppState::new(client.database("resale_market_test"));
    (container, state)
}

fn buyer(email: &str) -> RequireBuyer {
    RequireBuyer(AuthUser {
        email: email.to_string(),
    })
}

fn sample_user(email: &str, role: Role, verified: bool) -> User {
    User {
        id: None,
        name: Some("Test Account".to_string()),
        email: email.to_string(),
        role: Some(role),
        verified,
    }
}

fn sample_product(seller_email: &str) -> Product {
    Product {
        id: None,
        name: "Thinkpad X220".to_string(),
        category_id: "63a1b2c3d4e5f6a7b8c9d0e1".to_string(),
        seller_email: seller_email.to_string(),
        price: 220.0,
        original_price: Some(900.0),
        condition: Some("good".to_string()),
        location: None,
        image: None,
        description: None,
        posted_at: None,
        sold: false,
        advertised: None,
        reported: None,
        verified: None,
        transaction_id: None,
    }
}

fn sample_order(product_id: &str, buyer_email: &str) -> Order {
    Order {
        id: None,
        product_id: product_id.to_string(),
        product_name: Some("Thinkpad X220".to_string()),
        buyer_email: buyer_email.to_string(),
        price: Some(220.0),
        phone: None,
        meeting_location: None,
        sold: false,
    }
}

fn sample_payment(product_id: &str, transaction_id: &str) -> Payment {
    Payment {
        id: None,
        product_id: product_id.to_string(),
        buyer_email: Some("buyer@x.com".to_string()),
        transaction_id: transaction_id.to_string(),
        price: Some(220.0),
    }
}

/// Insert a listing and return its hex id
async fn seed_product(state: &AppState, seller_email: &str) -> String {
    let result = products::db::insert(&state.db, &sample_product(seller_email))
        .await
        .expect("insert succeeds");
    result
        .inserted_id
        .as_object_id()
        .expect("inserted id is an ObjectId")
        .to_hex()
}

#[tokio::test]
async fn duplicate_user_insert_keeps_one_account() {
    let (_container, state) = test_state().await;
    let user = sample_user("ada@x.com", Role::Buyer, false);

    let Json(first) = users::handlers::create_user(State(state.clone()), Json(user.clone()))
        .await
        .expect("first insert succeeds");
    assert_eq!(first["acknowledged"], true);
    assert!(first.get("found").is_none());

    let Json(second) = users::handlers::create_user(State(state.clone()), Json(user))
        .await
        .expect("second call succeeds");
    assert_eq!(second["found"], true);
    assert_eq!(second["email"], "ada@x.com");

    let count = state
        .db
        .collection::<User>("users")
        .count_documents(doc! { "email": "ada@x.com" })
        .await
        .expect("count succeeds");
    assert_eq!(count, 1);
}

#[tokio::test]
async fn duplicate_order_insert_returns_found() {
    let (_container, state) = test_state().await;
    let product_id = seed_product(&state, "seller@x.com").await;
    let order = sample_order(&product_id, "buyer@x.com");

    let Json(first) = orders::handlers::create_order(
        buyer("buyer@x.com"),
        State(state.clone()),
        Json(order.clone()),
    )
    .await
    .expect("first order succeeds");
    assert_eq!(first["acknowledged"], true);

    let Json(second) =
        orders::handlers::create_order(buyer("buyer@x.com"), State(state.clone()), Json(order))
            .await
            .expect("second call succeeds");
    assert_eq!(second["found"], true);

    let count = state
        .db
        .collection::<Order>("orders")
        .count_documents(doc! { "productID": &product_id, "buyerEmail": "buyer@x.com" })
        .await
        .expect("count succeeds");
    assert_eq!(count, 1);
}

#[tokio::test]
async fn checkout_fanout_converges_product_and_orders() {
    let (_container, state) = test_state().await;
    let product_id = seed_product(&state, "seller@x.com").await;

    for buyer_email in ["buyer@x.com", "rival@x.com"] {
        orders::db::find_or_insert(&state.db, &sample_order(&product_id, buyer_email))
            .await
            .expect("order seed succeeds");
    }

    let Json(body) = payments::handlers::record_payment(
        State(state.clone()),
        Json(sample_payment(&product_id, "txn_1")),
    )
    .await
    .expect("payment succeeds");
    assert_eq!(body["paymentResult"]["acknowledged"], true);
    assert_eq!(body["ordersResult"]["modifiedCount"], 2);

    let oid = ObjectId::parse_str(&product_id).expect("hex id parses");
    let product = state
        .db
        .collection::<Product>("products")
        .find_one(doc! { "_id": oid })
        .await
        .expect("lookup succeeds")
        .expect("product exists");
    assert!(product.sold);
    assert_eq!(product.transaction_id.as_deref(), Some("txn_1"));

    let orders = orders::db::find_by_buyer(&state.db, "buyer@x.com")
        .await
        .expect("lookup succeeds");
    assert!(orders.iter().all(|o| o.sold));
    let orders = orders::db::find_by_buyer(&state.db, "rival@x.com")
        .await
        .expect("lookup succeeds");
    assert!(orders.iter().all(|o| o.sold));
}

#[tokio::test]
async fn checkout_retry_does_not_duplicate_and_reconverges() {
    let (_container, state) = test_state().await;
    let product_id = seed_product(&state, "seller@x.com").await;
    orders::db::find_or_insert(&state.db, &sample_order(&product_id, "buyer@x.com"))
        .await
        .expect("order seed succeeds");

    let payment = sample_payment(&product_id, "txn_retry");
    payments::handlers::record_payment(State(state.clone()), Json(payment.clone()))
        .await
        .expect("first payment succeeds");

    // Simulate a partial failure after the payment landed: the fan-out
    // flags are knocked back out before the request is retried.
    state
        .db
        .collection::<Order>("orders")
        .update_many(doc! { "productID": &product_id }, doc! { "$set": { "sold": false } })
        .await
        .expect("reset succeeds");

    let Json(second) =
        payments::handlers::record_payment(State(state.clone()), Json(payment))
            .await
            .expect("retry succeeds");
    assert!(second["paymentResult"]["insertedId"].is_null());

    let count = state
        .db
        .collection::<Payment>("payments")
        .count_documents(doc! { "transactionID": "txn_retry" })
        .await
        .expect("count succeeds");
    assert_eq!(count, 1);

    let orders = orders::db::find_by_buyer(&state.db, "buyer@x.com")
        .await
        .expect("lookup succeeds");
    assert!(!orders.is_empty());
    assert!(orders.iter().all(|o| o.sold));
}

#[tokio::test]
async fn listing_carries_verified_only_for_verified_sellers() {
    let (_container, state) = test_state().await;
    for (email, verified) in [("trusted@x.com", true), ("fresh@x.com", false)] {
        users::db::find_or_insert(&state.db, &sample_user(email, Role::Seller, verified))
            .await
            .expect("seller seed succeeds");
    }

    for email in ["trusted@x.com", "fresh@x.com"] {
        products::handlers::create_product(
            RequireSeller(AuthUser {
                email: email.to_string(),
            }),
            State(state.clone()),
            Json(sample_product(email)),
        )
        .await
        .expect("listing succeeds");
    }

    let trusted = products::db::find_by_seller(&state.db, "trusted@x.com")
        .await
        .expect("lookup succeeds");
    assert_eq!(trusted.len(), 1);
    assert_eq!(trusted[0].verified, Some(true));

    let fresh = products::db::find_by_seller(&state.db, "fresh@x.com")
        .await
        .expect("lookup succeeds");
    assert_eq!(fresh.len(), 1);
    assert_eq!(fresh[0].verified, None);
}
