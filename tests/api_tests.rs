//! HTTP API tests
//!
//! Builds the real route table over a temporary SQLite database loaded through
//! the CSV loader.

use std::sync::Arc;

use actix_web::http::{Method, StatusCode};
use actix_web::test::{self, TestRequest};
use actix_web::{App, web};
use sea_orm::ConnectionTrait;
use serde_json::{Value, json};
use tempfile::TempDir;

use orderlens::api::configure_routes;
use orderlens::api::middleware::RequestIdMiddleware;
use orderlens::config::DatabaseConfig;
use orderlens::ingest::Loader;
use orderlens::services::RevenueService;
use orderlens::storage::{SeaOrmStorage, StorageFactory};

const HEADER: &str = "Product ID,Product Name,Category,Order ID,Region,DateOfSale,ShippingCost,PaymentMethod,Quantity Sold,Unit Price,Discount,Customer ID,Customer Name,Customer Email,Customer Address";

const ROWS: &[&str] = &[
    "P1,Running Shoes,Shoes,O1,West,2024-01-05,5,Card,2,10.0,0.1,C1,Ann,ann@example.com,1 Main St",
    "P2,Trail Socks,Apparel,O2,East,2024-03-02,0,Cash,1,4,0,C2,Bob,bob@example.com,2 Side Rd",
];

// =============================================================================
// Test Setup
// =============================================================================

async fn create_loaded_storage() -> (Arc<SeaOrmStorage>, TempDir) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let config = DatabaseConfig {
        url: Some(format!(
            "sqlite://{}?mode=rwc",
            dir.path().join("api.db").display()
        )),
        ..Default::default()
    };
    let storage = StorageFactory::create(&config)
        .await
        .expect("Failed to create storage");

    let csv = dir.path().join("orders.csv");
    std::fs::write(&csv, format!("{}\n{}\n", HEADER, ROWS.join("\n"))).unwrap();
    Loader::new(storage.clone())
        .run_once(&csv, b',')
        .await
        .expect("Failed to load CSV");

    (storage, dir)
}

macro_rules! init_app {
    ($storage:expr) => {{
        let storage: Arc<SeaOrmStorage> = $storage;
        let service = Arc::new(RevenueService::new(storage.clone()));
        test::init_service(
            App::new()
                .wrap(RequestIdMiddleware)
                .app_data(web::Data::new(storage))
                .app_data(web::Data::new(service))
                .configure(configure_routes),
        )
        .await
    }};
}

fn post(uri: &str, body: Value) -> TestRequest {
    TestRequest::post()
        .uri(uri)
        .insert_header(("Content-Type", "application/json"))
        .set_payload(body.to_string())
}

fn january() -> Value {
    json!({"fromDate": "2024-01-01", "toDate": "2024-01-31", "rangeType": ""})
}

// =============================================================================
// Revenue endpoints
// =============================================================================

#[actix_web::test]
async fn test_total_revenue_envelope() {
    let (storage, _dir) = create_loaded_storage().await;
    let app = init_app!(storage);

    let resp = test::call_service(&app, post("/orders/totalrevenue", january()).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body,
        json!({
            "respData": {"totalRevenueWithDis": "18", "totalRevenueWithoutDis": "20"},
            "status": "S",
            "errMsg": ""
        })
    );
}

#[actix_web::test]
async fn test_range_type_is_optional() {
    let (storage, _dir) = create_loaded_storage().await;
    let app = init_app!(storage);

    let resp = test::call_service(
        &app,
        post(
            "/orders/totalrevenue",
            json!({"fromDate": "2024-01-01", "toDate": "2024-12-31"}),
        )
        .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["respData"]["totalRevenueWithDis"], "22");
    assert_eq!(body["respData"]["totalRevenueWithoutDis"], "24");
}

#[actix_web::test]
async fn test_grouped_endpoints() {
    let (storage, _dir) = create_loaded_storage().await;
    let app = init_app!(storage);
    let year = json!({"fromDate": "2024-01-01", "toDate": "2024-12-31", "rangeType": "year"});

    let resp = test::call_service(&app, post("/orders/prodrevenue", year.clone()).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body["respData"],
        json!([
            {"productName": "Running Shoes", "revenue": {"totalRevenueWithDis": "18", "totalRevenueWithoutDis": "20"}},
            {"productName": "Trail Socks", "revenue": {"totalRevenueWithDis": "4", "totalRevenueWithoutDis": "4"}}
        ])
    );

    let resp = test::call_service(&app, post("/orders/categrevenue", year.clone()).to_request()).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "S");
    assert_eq!(body["respData"][0]["categoryName"], "Apparel");
    assert_eq!(body["respData"][1]["categoryName"], "Shoes");

    let resp = test::call_service(&app, post("/orders/regionrevenue", year).to_request()).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["respData"][0]["regionName"], "East");
    assert_eq!(body["respData"][1]["regionName"], "West");
    assert_eq!(body["respData"][1]["revenue"]["totalRevenueWithDis"], "18");
}

#[actix_web::test]
async fn test_empty_range_returns_zero_and_empty_lists() {
    let (storage, _dir) = create_loaded_storage().await;
    let app = init_app!(storage);
    let empty = json!({"fromDate": "2030-01-01", "toDate": "2030-01-31"});

    let resp = test::call_service(&app, post("/orders/totalrevenue", empty.clone()).to_request()).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["respData"]["totalRevenueWithDis"], "0");
    assert_eq!(body["respData"]["totalRevenueWithoutDis"], "0");

    let resp = test::call_service(&app, post("/orders/regionrevenue", empty).to_request()).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["respData"], json!([]));
}

#[actix_web::test]
async fn test_revenue_trend() {
    let (storage, _dir) = create_loaded_storage().await;
    let app = init_app!(storage);

    let resp = test::call_service(
        &app,
        post(
            "/orders/revenuetrend",
            json!({"fromDate": "2024-01-01", "toDate": "2024-12-31", "rangeType": "quarter"}),
        )
        .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body["respData"],
        json!([
            {"period": "2024-Q1", "revenue": {"totalRevenueWithDis": "22", "totalRevenueWithoutDis": "24"}}
        ])
    );

    let resp = test::call_service(
        &app,
        post(
            "/orders/revenuetrend",
            json!({"fromDate": "2024-01-01", "toDate": "2024-12-31"}),
        )
        .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["errMsg"].as_str().unwrap().contains("RangeType"));
}

// =============================================================================
// Error mapping
// =============================================================================

#[actix_web::test]
async fn test_malformed_json_is_400() {
    let (storage, _dir) = create_loaded_storage().await;
    let app = init_app!(storage);

    let req = TestRequest::post()
        .uri("/orders/totalrevenue")
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{\"fromDate\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body,
        json!({"respData": null, "status": "E", "errMsg": "Error In request Data"})
    );
}

#[actix_web::test]
async fn test_validation_errors_are_400() {
    let (storage, _dir) = create_loaded_storage().await;
    let app = init_app!(storage);

    let cases = [
        (
            json!({"fromDate": "2024-02-01", "toDate": "2024-01-01"}),
            "ToDate should be greater than FromDate",
        ),
        (
            json!({"fromDate": "2024/01/01", "toDate": "2024-01-31"}),
            "invalid FromDate format",
        ),
        (
            json!({"fromDate": "2024-01-01", "toDate": "31-01-2024"}),
            "invalid ToDate format",
        ),
    ];

    for (payload, message) in cases {
        let resp = test::call_service(&app, post("/orders/categrevenue", payload).to_request()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], "E");
        assert_eq!(body["errMsg"], message);
        assert!(body["respData"].is_null());
    }
}

#[actix_web::test]
async fn test_store_failure_is_500_and_redacted() {
    let (storage, _dir) = create_loaded_storage().await;
    storage
        .get_db()
        .execute_unprepared("DROP TABLE order_items")
        .await
        .unwrap();
    let app = init_app!(storage);

    let resp = test::call_service(&app, post("/orders/totalrevenue", january()).to_request()).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "E");
    let msg = body["errMsg"].as_str().unwrap();
    assert_eq!(msg, "Error while fetching revenue (E106)");
    assert!(!msg.contains("order_items"));
}

// =============================================================================
// Headers
// =============================================================================

#[actix_web::test]
async fn test_cors_headers_on_orders() {
    let (storage, _dir) = create_loaded_storage().await;
    let app = init_app!(storage);

    let resp = test::call_service(&app, post("/orders/totalrevenue", january()).to_request()).await;
    let headers = resp.headers();
    assert_eq!(headers.get("access-control-allow-origin").unwrap(), "*");
    assert_eq!(headers.get("access-control-allow-credentials").unwrap(), "true");
    assert_eq!(
        headers.get("access-control-allow-methods").unwrap(),
        "POST,OPTIONS"
    );
    assert_eq!(
        headers.get("access-control-allow-headers").unwrap(),
        "Accept,Content-Type,Content-Length,Accept-Encoding,X-CSRF-Token,Authorization"
    );

    // 错误响应同样带 CORS 头
    let req = TestRequest::post()
        .uri("/orders/prodrevenue")
        .set_payload("nope")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(resp.headers().get("access-control-allow-origin").unwrap(), "*");
}

#[actix_web::test]
async fn test_preflight() {
    let (storage, _dir) = create_loaded_storage().await;
    let app = init_app!(storage);

    let req = TestRequest::default()
        .method(Method::OPTIONS)
        .uri("/orders/regionrevenue")
        .insert_header(("Origin", "http://localhost:3000"))
        .insert_header(("Access-Control-Request-Method", "POST"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get("access-control-allow-methods").unwrap(),
        "POST,OPTIONS"
    );
}

#[actix_web::test]
async fn test_request_id_header() {
    let (storage, _dir) = create_loaded_storage().await;
    let app = init_app!(storage);

    let resp = test::call_service(&app, post("/orders/totalrevenue", january()).to_request()).await;
    let generated = resp.headers().get("x-request-id").unwrap().to_str().unwrap();
    assert_eq!(generated.len(), 36);

    let req = TestRequest::get()
        .uri("/ready")
        .insert_header(("X-Request-ID", "trace-42"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.headers().get("x-request-id").unwrap(), "trace-42");
}

// =============================================================================
// Probes
// =============================================================================

#[actix_web::test]
async fn test_ready_is_empty_200() {
    let (storage, _dir) = create_loaded_storage().await;
    let app = init_app!(storage);

    let resp = test::call_service(&app, TestRequest::get().uri("/ready").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers().get("access-control-allow-origin").unwrap(), "*");

    let body = test::read_body(resp).await;
    assert!(body.is_empty());
}

#[actix_web::test]
async fn test_health_pings_database() {
    let (storage, _dir) = create_loaded_storage().await;
    let app = init_app!(storage);

    let resp = test::call_service(&app, TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "S");
    assert_eq!(body["respData"]["database"], "sqlite");
}

#[actix_web::test]
async fn test_unknown_route_is_404() {
    let (storage, _dir) = create_loaded_storage().await;
    let app = init_app!(storage);

    let resp = test::call_service(
        &app,
        TestRequest::post().uri("/orders/everything").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
