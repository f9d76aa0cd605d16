//! Integration tests for the API server.

use std::sync::OnceLock;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use metrics_exporter_prometheus::PrometheusHandle;
use tower::ServiceExt;

static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

fn get_metrics_handle() -> PrometheusHandle {
    METRICS_HANDLE
        .get_or_init(|| {
            metrics_exporter_prometheus::PrometheusBuilder::new()
                .install_recorder()
                .expect("failed to install Prometheus recorder")
        })
        .clone()
}

fn setup() -> Router {
    api::create_app(api::create_default_state(), get_metrics_handle())
}

fn get(uri: &str, user_id: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(user_id) = user_id {
        builder = builder.header("user-id", user_id);
    }
    builder.body(Body::empty()).unwrap()
}

fn with_json(
    method: &str,
    uri: &str,
    user_id: Option<&str>,
    body: &serde_json::Value,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(user_id) = user_id {
        builder = builder.header("user-id", user_id);
    }
    builder
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn address_body() -> serde_json::Value {
    serde_json::json!({
        "street": "123 Main St",
        "city": "New York",
        "state": "NY",
        "zip_code": "10001",
        "country": "USA"
    })
}

fn checkout_body() -> serde_json::Value {
    serde_json::json!({
        "shipping_address": address_body(),
        "payment_method": "credit_card"
    })
}

async fn add_to_cart(app: &Router, user_id: Option<&str>, product_id: &str, quantity: u32) {
    let response = app
        .clone()
        .oneshot(with_json(
            "POST",
            "/cart/add",
            user_id,
            &serde_json::json!({ "product_id": product_id, "quantity": quantity }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

async fn place_order(app: &Router, user_id: Option<&str>, product_id: &str) -> serde_json::Value {
    add_to_cart(app, user_id, product_id, 1).await;
    let response = app
        .clone()
        .oneshot(with_json("POST", "/orders", user_id, &checkout_body()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

#[tokio::test]
async fn health_check() {
    let app = setup();
    let response = app.oneshot(get("/health", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn add_to_cart_and_read_it_back() {
    let app = setup();
    let user = uuid::Uuid::new_v4().to_string();

    add_to_cart(&app, Some(&user), "PRF-002", 2).await;

    let response = app.oneshot(get("/cart", Some(&user))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;

    assert_eq!(json["items"].as_array().unwrap().len(), 1);
    assert_eq!(json["items"][0]["product_id"], "PRF-002");
    assert_eq!(json["items"][0]["quantity"], 2);
    assert_eq!(json["total_cents"], 37800);
}

#[tokio::test]
async fn carts_are_scoped_to_the_caller() {
    let app = setup();
    let alice = uuid::Uuid::new_v4().to_string();
    let bob = uuid::Uuid::new_v4().to_string();

    add_to_cart(&app, Some(&alice), "PRF-001", 1).await;

    let response = app.oneshot(get("/cart", Some(&bob))).await.unwrap();
    let json = body_json(response).await;
    assert!(json["items"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn add_with_zero_quantity_is_rejected() {
    let app = setup();
    let response = app
        .oneshot(with_json(
            "POST",
            "/cart/add",
            None,
            &serde_json::json!({ "product_id": "PRF-001", "quantity": 0 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn add_unknown_product_is_not_found() {
    let app = setup();
    let response = app
        .oneshot(with_json(
            "POST",
            "/cart/add",
            None,
            &serde_json::json!({ "product_id": "PRF-999", "quantity": 1 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_user_id_header_is_rejected() {
    let app = setup();
    let response = app
        .oneshot(get("/cart", Some("not-a-uuid")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_to_zero_removes_and_second_removal_fails() {
    let app = setup();
    let user = uuid::Uuid::new_v4().to_string();
    add_to_cart(&app, Some(&user), "PRF-003", 2).await;

    let response = app
        .clone()
        .oneshot(with_json(
            "PUT",
            "/cart/update",
            Some(&user),
            &serde_json::json!({ "product_id": "PRF-003", "quantity": 0 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["items"].as_array().unwrap().is_empty());

    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/cart/remove/PRF-003")
                .header("user-id", &user)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn checkout_creates_a_pending_order_and_empties_the_cart() {
    let app = setup();
    let user = uuid::Uuid::new_v4().to_string();

    add_to_cart(&app, Some(&user), "PRF-002", 2).await;
    add_to_cart(&app, Some(&user), "PRF-005", 1).await;

    let response = app
        .clone()
        .oneshot(with_json("POST", "/orders", Some(&user), &checkout_body()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let order = body_json(response).await;

    assert_eq!(order["status"], "pending");
    assert_eq!(order["total_cents"], 2 * 18900 + 16500);
    assert_eq!(order["items"].as_array().unwrap().len(), 2);
    assert_eq!(order["items"][0]["line_total_cents"], 37800);
    assert_eq!(order["payment_method"], "credit_card");
    assert_eq!(order["customer_id"], user.as_str());

    // Cart is empty immediately after checkout.
    let response = app.clone().oneshot(get("/cart", Some(&user))).await.unwrap();
    let cart = body_json(response).await;
    assert!(cart["items"].as_array().unwrap().is_empty());

    // And the order is readable by ID.
    let id = order["id"].as_u64().unwrap();
    let response = app
        .oneshot(get(&format!("/orders/{id}"), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn checkout_with_an_empty_cart_is_rejected() {
    let app = setup();
    let response = app
        .oneshot(with_json("POST", "/orders", None, &checkout_body()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn checkout_with_unknown_payment_method_is_rejected() {
    let app = setup();
    let user = uuid::Uuid::new_v4().to_string();
    add_to_cart(&app, Some(&user), "PRF-001", 1).await;

    let response = app
        .oneshot(with_json(
            "POST",
            "/orders",
            Some(&user),
            &serde_json::json!({
                "shipping_address": address_body(),
                "payment_method": "cash"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn checkout_with_blank_address_field_is_rejected() {
    let app = setup();
    let user = uuid::Uuid::new_v4().to_string();
    add_to_cart(&app, Some(&user), "PRF-001", 1).await;

    let mut body = checkout_body();
    body["shipping_address"]["street"] = serde_json::json!("  ");
    let response = app
        .oneshot(with_json("POST", "/orders", Some(&user), &body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn anonymous_checkout_has_no_customer() {
    let app = setup();
    let order = place_order(&app, None, "PRF-001").await;
    assert!(order["customer_id"].is_null());
}

#[tokio::test]
async fn status_can_be_overwritten_and_is_reflected_in_stats() {
    let app = setup();
    let order = place_order(&app, None, "PRF-002").await;
    let id = order["id"].as_u64().unwrap();

    let response = app
        .clone()
        .oneshot(with_json(
            "PATCH",
            &format!("/orders/{id}/status"),
            None,
            &serde_json::json!({ "status": "delivered" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["status"], "delivered");

    let response = app
        .oneshot(get("/orders/stats/overview", None))
        .await
        .unwrap();
    let stats = body_json(response).await;
    assert_eq!(stats["total_orders"], 1);
    assert_eq!(stats["delivered_orders"], 1);
    assert_eq!(stats["pending_orders"], 0);
    assert_eq!(stats["total_revenue_cents"], 18900);
    assert_eq!(stats["average_order_value_cents"], 18900);
}

#[tokio::test]
async fn unknown_status_is_rejected() {
    let app = setup();
    let order = place_order(&app, None, "PRF-001").await;
    let id = order["id"].as_u64().unwrap();

    let response = app
        .oneshot(with_json(
            "PATCH",
            &format!("/orders/{id}/status"),
            None,
            &serde_json::json!({ "status": "returned" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn status_update_for_a_missing_order_is_not_found() {
    let app = setup();
    let response = app
        .oneshot(with_json(
            "PATCH",
            "/orders/999/status",
            None,
            &serde_json::json!({ "status": "shipped" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn get_missing_order_is_not_found() {
    let app = setup();
    let response = app.oneshot(get("/orders/42", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn listing_scopes_to_the_identified_caller() {
    let app = setup();
    let alice = uuid::Uuid::new_v4().to_string();

    place_order(&app, Some(&alice), "PRF-001").await;
    place_order(&app, Some(&alice), "PRF-002").await;
    place_order(&app, None, "PRF-005").await;

    // Alice sees only her orders.
    let response = app
        .clone()
        .oneshot(get("/orders", Some(&alice)))
        .await
        .unwrap();
    let json = body_json(response).await;
    assert_eq!(json["orders"].as_array().unwrap().len(), 2);
    assert_eq!(json["pagination"]["total_items"], 2);

    // An unidentified caller sees everything, newest first.
    let response = app.oneshot(get("/orders", None)).await.unwrap();
    let json = body_json(response).await;
    let orders = json["orders"].as_array().unwrap();
    assert_eq!(orders.len(), 3);
    assert!(orders[0]["id"].as_u64() > orders[2]["id"].as_u64());
}

#[tokio::test]
async fn listing_paginates_and_filters_by_status() {
    let app = setup();
    for _ in 0..3 {
        place_order(&app, None, "PRF-001").await;
    }

    let response = app
        .clone()
        .oneshot(get("/orders?page=2&limit=2", None))
        .await
        .unwrap();
    let json = body_json(response).await;
    assert_eq!(json["orders"].as_array().unwrap().len(), 1);
    assert_eq!(json["pagination"]["total_pages"], 2);

    // Out-of-range pages are an empty slice, not an error.
    let response = app
        .clone()
        .oneshot(get("/orders?page=9&limit=2", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["orders"].as_array().unwrap().is_empty());

    let response = app
        .clone()
        .oneshot(get("/orders?status=shipped", None))
        .await
        .unwrap();
    let json = body_json(response).await;
    assert!(json["orders"].as_array().unwrap().is_empty());

    // Zero pagination inputs are a client error.
    let response = app.oneshot(get("/orders?page=0", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn products_can_be_listed_and_filtered() {
    let app = setup();

    let response = app
        .clone()
        .oneshot(get("/products?category=men", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let products = json["products"].as_array().unwrap();
    assert_eq!(products.len(), 2);
    assert!(products.iter().all(|p| p["category"] == "men"));

    let response = app
        .clone()
        .oneshot(get("/products?sort_by=price&sort_order=desc&limit=3", None))
        .await
        .unwrap();
    let json = body_json(response).await;
    assert_eq!(json["products"][0]["id"], "PRF-004");

    let response = app
        .oneshot(get("/products?category=kids", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn product_detail_featured_and_enumerations() {
    let app = setup();

    let response = app
        .clone()
        .oneshot(get("/products/PRF-001", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["price_cents"], 29900);

    let response = app
        .clone()
        .oneshot(get("/products/PRF-999", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .clone()
        .oneshot(get("/products/featured", None))
        .await
        .unwrap();
    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 4);

    let response = app
        .clone()
        .oneshot(get("/products/categories/list", None))
        .await
        .unwrap();
    let json = body_json(response).await;
    assert_eq!(json["categories"].as_array().unwrap().len(), 3);

    let response = app
        .oneshot(get("/products/brands/list", None))
        .await
        .unwrap();
    let json = body_json(response).await;
    assert_eq!(json["brands"].as_array().unwrap().len(), 8);
}

#[tokio::test]
async fn metrics_endpoint_renders() {
    let app = setup();
    let response = app.oneshot(get("/metrics", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
