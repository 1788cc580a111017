//! HTTP-level tests: drive the router with `oneshot` against an in-memory
//! database.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use stockpile_api::{build_router, AppState};
use stockpile_db::{Database, DbConfig};

const UNKNOWN_ID: &str = "00000000-0000-4000-8000-000000000000";

async fn app() -> Router {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    build_router(AppState::new(db), None)
}

async fn send(router: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = router.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), 1024 * 1024)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        json!(null)
    } else {
        serde_json::from_slice(&bytes).unwrap_or(json!(null))
    };
    (status, json)
}

async fn api(router: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if body.is_some() {
        builder = builder.header("content-type", "application/json");
    }
    let body = match body {
        Some(v) => Body::from(serde_json::to_string(&v).unwrap()),
        None => Body::empty(),
    };
    send(router, builder.body(body).unwrap()).await
}

async fn create_product(router: &Router, name: &str, price: f64, stock: i64, min_stock: i64) -> Value {
    let (status, product) = api(
        router,
        "POST",
        "/api/products",
        Some(json!({
            "name": name,
            "category": "Energy Drink",
            "price": price,
            "minStock": min_stock,
            "stock": stock,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", product);
    product
}

async fn stock_of(router: &Router, id: &str) -> i64 {
    let (status, product) = api(router, "GET", &format!("/api/products/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    product["stock"].as_i64().unwrap()
}

// =============================================================================
// Health & routing
// =============================================================================

#[tokio::test]
async fn health_reports_ok() {
    let router = app().await;
    let (status, body) = api(&router, "GET", "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "OK");
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn unknown_route_is_json_404() {
    let router = app().await;
    let (status, body) = api(&router, "GET", "/api/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

// =============================================================================
// Products
// =============================================================================

#[tokio::test]
async fn product_crud() {
    let router = app().await;

    let created = create_product(&router, "Red Bull 250ml", 4.5, 10, 5).await;
    let id = created["id"].as_str().unwrap().to_string();
    assert_eq!(created["price"], 4.5);
    assert_eq!(created["minStock"], 5);
    assert_eq!(created["stock"], 10);
    assert!(created["createdAt"].is_string());

    let (status, list) = api(&router, "GET", "/api/products", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);

    let (status, updated) = api(
        &router,
        "PUT",
        &format!("/api/products/{}", id),
        Some(json!({
            "name": "Red Bull 250ml Can",
            "category": "Energy Drink",
            "price": 4.99,
            "minStock": 8,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "Red Bull 250ml Can");
    assert_eq!(updated["price"], 4.99);
    assert_eq!(updated["minStock"], 8);
    // Stock only changes through the ledger.
    assert_eq!(updated["stock"], 10);

    let (status, body) = api(&router, "DELETE", &format!("/api/products/{}", id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());

    let (status, body) = api(&router, "GET", &format!("/api/products/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn products_listed_by_name() {
    let router = app().await;
    create_product(&router, "Red Bull Zero", 4.5, 1, 0).await;
    create_product(&router, "Red Bull 250ml", 4.5, 1, 0).await;

    let (_, list) = api(&router, "GET", "/api/products", None).await;
    let names: Vec<&str> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Red Bull 250ml", "Red Bull Zero"]);
}

#[tokio::test]
async fn product_stock_defaults_to_zero() {
    let router = app().await;
    let (status, product) = api(
        &router,
        "POST",
        "/api/products",
        Some(json!({"name": "Red Bull 473ml", "category": "Energy Drink", "price": 6, "minStock": 2})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(product["stock"], 0);
}

#[tokio::test]
async fn product_validation_errors() {
    let router = app().await;

    let (status, body) = api(
        &router,
        "POST",
        "/api/products",
        Some(json!({"name": "  ", "category": "Energy Drink", "price": 4.5, "minStock": 5})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (status, body) = api(
        &router,
        "POST",
        "/api/products",
        Some(json!({"name": "Red Bull", "category": "Energy Drink", "price": -1, "minStock": 5})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    // Missing field
    let (status, body) = api(
        &router,
        "POST",
        "/api/products",
        Some(json!({"name": "Red Bull", "category": "Energy Drink"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn malformed_json_is_validation_error() {
    let router = app().await;
    let req = Request::builder()
        .method("POST")
        .uri("/api/products")
        .header("content-type", "application/json")
        .body(Body::from("{\"name\": "))
        .unwrap();

    let (status, body) = send(&router, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn update_missing_product_is_404() {
    let router = app().await;
    let (status, body) = api(
        &router,
        "PUT",
        &format!("/api/products/{}", UNKNOWN_ID),
        Some(json!({"name": "Red Bull", "category": "Energy Drink", "price": 4.5, "minStock": 5})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");

    let (status, _) = api(&router, "DELETE", &format!("/api/products/{}", UNKNOWN_ID), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deleting_sold_product_is_conflict() {
    let router = app().await;
    let product = create_product(&router, "Red Bull 250ml", 4.5, 10, 5).await;
    let id = product["id"].as_str().unwrap();

    let (status, _) = api(
        &router,
        "POST",
        "/api/sales",
        Some(json!({"productId": id, "quantity": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = api(&router, "DELETE", &format!("/api/products/{}", id), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "CONFLICT");
    assert_eq!(stock_of(&router, id).await, 9);
}

// =============================================================================
// Sales
// =============================================================================

#[tokio::test]
async fn sale_decrements_stock_and_snapshots_price() {
    let router = app().await;
    let product = create_product(&router, "Red Bull 250ml", 4.5, 10, 5).await;
    let id = product["id"].as_str().unwrap();

    let (status, sale) = api(
        &router,
        "POST",
        "/api/sales",
        Some(json!({"productId": id, "quantity": 3, "customerName": "Ana"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(sale["productId"], id);
    assert_eq!(sale["quantity"], 3);
    assert_eq!(sale["unitPrice"], 4.5);
    assert_eq!(sale["totalPrice"], 13.5);
    assert_eq!(sale["customerName"], "Ana");
    assert_eq!(stock_of(&router, id).await, 7);

    let (status, sales) = api(&router, "GET", "/api/sales", None).await;
    assert_eq!(status, StatusCode::OK);
    let sales = sales.as_array().unwrap();
    assert_eq!(sales.len(), 1);
    assert_eq!(sales[0]["productName"], "Red Bull 250ml");
    assert_eq!(sales[0]["id"], sale["id"]);

    // The sale is mirrored in the movement ledger.
    let (_, movements) = api(&router, "GET", "/api/stock/movements", None).await;
    let movements = movements.as_array().unwrap();
    assert_eq!(movements.len(), 1);
    assert_eq!(movements[0]["type"], "outbound");
    assert_eq!(movements[0]["quantity"], 3);
}

#[tokio::test]
async fn failed_sale_writes_nothing() {
    let router = app().await;
    let product = create_product(&router, "Red Bull 250ml", 4.5, 2, 5).await;
    let id = product["id"].as_str().unwrap();

    let (status, body) = api(
        &router,
        "POST",
        "/api/sales",
        Some(json!({"productId": id, "quantity": 3})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INSUFFICIENT_STOCK");

    assert_eq!(stock_of(&router, id).await, 2);
    let (_, sales) = api(&router, "GET", "/api/sales", None).await;
    assert!(sales.as_array().unwrap().is_empty());
    let (_, movements) = api(&router, "GET", "/api/stock/movements", None).await;
    assert!(movements.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn sale_errors() {
    let router = app().await;
    let product = create_product(&router, "Red Bull 250ml", 4.5, 10, 5).await;
    let id = product["id"].as_str().unwrap();

    let (status, body) = api(
        &router,
        "POST",
        "/api/sales",
        Some(json!({"productId": UNKNOWN_ID, "quantity": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");

    let (status, body) = api(
        &router,
        "POST",
        "/api/sales",
        Some(json!({"productId": id, "quantity": 0})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn non_uuid_product_id_is_not_found() {
    let router = app().await;
    create_product(&router, "Red Bull 250ml", 4.5, 10, 5).await;

    let (status, body) = api(
        &router,
        "POST",
        "/api/sales",
        Some(json!({"productId": "abc", "quantity": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");

    let (status, body) = api(
        &router,
        "POST",
        "/api/stock/movements",
        Some(json!({"productId": "abc", "type": "inbound", "quantity": 1, "reason": "Restock"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");

    let (status, _) = api(&router, "GET", "/api/products/abc", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, sales) = api(&router, "GET", "/api/sales", None).await;
    assert!(sales.as_array().unwrap().is_empty());
    let (_, movements) = api(&router, "GET", "/api/stock/movements", None).await;
    assert!(movements.as_array().unwrap().is_empty());
}

// =============================================================================
// Stock movements
// =============================================================================

#[tokio::test]
async fn outbound_movement_cannot_overdraw() {
    let router = app().await;
    let product = create_product(&router, "Red Bull 250ml", 4.5, 10, 5).await;
    let id = product["id"].as_str().unwrap();

    let (status, movement) = api(
        &router,
        "POST",
        "/api/stock/movements",
        Some(json!({"productId": id, "type": "outbound", "quantity": 10, "reason": "Damaged"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(movement["type"], "outbound");
    assert_eq!(stock_of(&router, id).await, 0);

    let (status, body) = api(
        &router,
        "POST",
        "/api/stock/movements",
        Some(json!({"productId": id, "type": "outbound", "quantity": 1, "reason": "Damaged"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INSUFFICIENT_STOCK");
    assert_eq!(stock_of(&router, id).await, 0);
}

#[tokio::test]
async fn legacy_movement_type_names() {
    let router = app().await;
    let product = create_product(&router, "Red Bull 250ml", 4.5, 5, 5).await;
    let id = product["id"].as_str().unwrap();

    let (status, movement) = api(
        &router,
        "POST",
        "/api/stock/movements",
        Some(json!({"productId": id, "type": "entrada", "quantity": 12, "reason": "Supplier delivery"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(movement["type"], "inbound");

    let (status, movement) = api(
        &router,
        "POST",
        "/api/stock/movements",
        Some(json!({"productId": id, "type": "saida", "quantity": 2, "reason": "Sample"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(movement["type"], "outbound");
    assert_eq!(stock_of(&router, id).await, 15);

    let (_, movements) = api(&router, "GET", "/api/stock/movements", None).await;
    let movements = movements.as_array().unwrap();
    assert_eq!(movements.len(), 2);
    assert_eq!(movements[0]["reason"], "Sample");
    assert_eq!(movements[0]["productName"], "Red Bull 250ml");
}

#[tokio::test]
async fn movement_validation() {
    let router = app().await;
    let product = create_product(&router, "Red Bull 250ml", 4.5, 5, 5).await;
    let id = product["id"].as_str().unwrap();

    let (status, body) = api(
        &router,
        "POST",
        "/api/stock/movements",
        Some(json!({"productId": id, "type": "sideways", "quantity": 1, "reason": "?"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (status, body) = api(
        &router,
        "POST",
        "/api/stock/movements",
        Some(json!({"productId": id, "type": "inbound", "quantity": 1, "reason": ""})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

// =============================================================================
// Dashboard
// =============================================================================

#[tokio::test]
async fn dashboard_stats() {
    let router = app().await;
    let red_bull = create_product(&router, "Red Bull 250ml", 4.5, 10, 5).await;
    create_product(&router, "Red Bull Zero", 4.5, 5, 5).await;
    create_product(&router, "Red Bull 473ml", 6.0, 30, 5).await;

    let (status, _) = api(
        &router,
        "POST",
        "/api/sales",
        Some(json!({"productId": red_bull["id"], "quantity": 2})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, stats) = api(&router, "GET", "/api/dashboard/stats", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["todaySales"], 9.0);
    assert_eq!(stats["monthSales"], 9.0);
    assert_eq!(stats["totalProducts"], 3);

    // stock == minStock counts as low
    assert_eq!(stats["lowStock"], 1);
    let low = stats["lowStockProducts"].as_array().unwrap();
    assert_eq!(low[0]["name"], "Red Bull Zero");
    assert_eq!(low[0]["stock"], 5);
    assert_eq!(low[0]["minStock"], 5);

    let recent = stats["recentSales"].as_array().unwrap();
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0]["productName"], "Red Bull 250ml");
}
