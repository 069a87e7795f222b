use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::util::ServiceExt;

use insights::{
    config::{Config, parse_origins},
    create_router,
    state::State,
};

fn create_app() -> Router {
    create_router(State::in_memory())
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();

    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, body)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Request::builder().uri(uri).body(Body::empty()).unwrap()).await
}

async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(
        app,
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

async fn initialize(app: &Router) -> Value {
    let (status, body) = send(
        app,
        Request::builder()
            .method("POST")
            .uri("/api/initialize-data")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    body
}

#[tokio::test]
async fn test_empty_store_reads() {
    let app = create_app();

    let (status, body) = get(&app, "/api/customers").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let (status, body) = get(&app, "/api/retention-analysis").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["avg_delivery_time"], 0.0);
    assert_eq!(body["retention_by_segment"]["premium"], 0.0);
}

#[tokio::test]
async fn test_initialize_data() {
    let app = create_app();

    let body = initialize(&app).await;
    assert_eq!(body["message"], "Sample data initialized successfully");
    assert_eq!(body["customers"], 8);
    assert_eq!(body["orders"], 5);

    let (_, customers) = get(&app, "/api/customers").await;
    let (_, orders) = get(&app, "/api/orders").await;
    let (_, prices) = get(&app, "/api/competitor-prices").await;
    let (_, cities) = get(&app, "/api/city-analysis").await;

    assert_eq!(customers.as_array().unwrap().len(), 8);
    assert_eq!(orders.as_array().unwrap().len(), 5);
    assert_eq!(prices.as_array().unwrap().len(), 8);
    assert_eq!(cities.as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn test_reseed_is_repeatable() {
    let app = create_app();

    let first = initialize(&app).await;
    let (_, first_customers) = get(&app, "/api/customers").await;

    let second = initialize(&app).await;
    let (_, second_customers) = get(&app, "/api/customers").await;
    let (_, orders) = get(&app, "/api/orders").await;

    assert_eq!(first["customers"], second["customers"]);
    assert_eq!(first["orders"], second["orders"]);
    assert_eq!(second_customers.as_array().unwrap().len(), 8);
    assert_eq!(orders.as_array().unwrap().len(), 5);
    assert_ne!(first_customers[0]["id"], second_customers[0]["id"]);
}

#[tokio::test]
async fn test_record_shapes() {
    let app = create_app();
    initialize(&app).await;

    let (_, customers) = get(&app, "/api/customers").await;
    let rajesh = &customers[0];
    assert_eq!(rajesh["name"], "Rajesh Kumar");
    assert_eq!(rajesh["segment"], "premium");
    assert_eq!(rajesh["retention_rate"], 85.0);
    assert!(rajesh["id"].is_string());
    assert!(rajesh["created_at"].is_string());
    assert!(rajesh.get("_id").is_none());

    let (_, orders) = get(&app, "/api/orders").await;
    assert_eq!(orders[0]["customer_id"], rajesh["id"]);
    assert_eq!(orders[3]["status"], "cancelled");
    assert_eq!(orders[0]["items"], json!(["Milk", "Bread", "Eggs"]));

    let (_, cities) = get(&app, "/api/city-analysis").await;
    assert_eq!(cities[0]["tier"], "tier-1");
    assert_eq!(cities[5]["tier"], "tier-2");
    assert_eq!(cities[5]["city"], "Coimbatore");
}

#[tokio::test]
async fn test_customer_segments() {
    let app = create_app();
    initialize(&app).await;

    let (status, body) = get(&app, "/api/customer-segments").await;
    assert_eq!(status, StatusCode::OK);

    let summary = &body["summary"];
    let total: u64 = ["premium", "regular", "budget"]
        .iter()
        .map(|segment| summary[segment]["count"].as_u64().unwrap())
        .sum();
    assert_eq!(total, 8);

    assert_eq!(body["segments"]["budget"].as_array().unwrap().len(), 2);
    assert_eq!(summary["budget"]["avg_aov"], 400.0);
    assert_eq!(summary["budget"]["avg_retention"], 42.5);
}

#[tokio::test]
async fn test_retention_analysis() {
    let app = create_app();
    initialize(&app).await;

    let (status, body) = get(&app, "/api/retention-analysis").await;
    assert_eq!(status, StatusCode::OK);

    let bands = ["high_retention_count", "medium_retention_count", "low_retention_count"];
    let total: u64 = bands.iter().map(|band| body[band].as_u64().unwrap()).sum();
    assert_eq!(total, 8);

    assert_eq!(body["avg_delivery_time"], 18.75);
    assert_eq!(body["retention_by_segment"]["premium"], 83.67);
}

#[tokio::test]
async fn test_profitability_baseline() {
    let app = create_app();

    let (status, body) = post_json(
        &app,
        "/api/profitability-scenario",
        json!({ "discount_rate": 0, "delivery_cost": 0, "demand_multiplier": 1 }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["revenue"], 1_000_000.0);
    assert_eq!(body["orders"], 10_000.0);
    assert_eq!(body["total_costs"], 800_000.0);
    assert_eq!(body["profit"], 200_000.0);
    assert_eq!(body["margin_percent"], 20.0);
}

#[tokio::test]
async fn test_profitability_zero_demand() {
    let app = create_app();

    let (status, body) = post_json(
        &app,
        "/api/profitability-scenario",
        json!({ "discount_rate": 5, "delivery_cost": 40, "demand_multiplier": 0 }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["revenue"], 0.0);
    assert_eq!(body["margin_percent"], 0.0);
}

#[tokio::test]
async fn test_profitability_malformed() {
    let app = create_app();

    let (status, body) = post_json(
        &app,
        "/api/profitability-scenario",
        json!({ "discount_rate": 5, "delivery_cost": 40 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].as_str().unwrap().contains("demand_multiplier"));

    let (status, _) = post_json(
        &app,
        "/api/profitability-scenario",
        json!({ "discount_rate": "lots", "delivery_cost": 40, "demand_multiplier": 1 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        Request::builder()
            .method("POST")
            .uri("/api/profitability-scenario")
            .body(Body::from("not json"))
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_price_gaps_and_overview() {
    let app = create_app();
    initialize(&app).await;

    let (status, gaps) = get(&app, "/api/price-gaps").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(gaps["gaps"].as_array().unwrap().len(), 8);
    assert_eq!(gaps["gaps"][2]["product"], "Rice (5kg)");
    assert_eq!(gaps["gaps"][2]["difference"], 15.0);
    assert_eq!(gaps["avg_difference"], 8.12);

    let (status, overview) = get(&app, "/api/overview").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(overview["total_customers"], 8);
    assert_eq!(overview["completed_orders"], 4);
}

#[tokio::test]
async fn test_health() {
    let app = create_app();

    let (status, body) = get(&app, "/api/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_unprefixed_route_missing() {
    let app = create_app();

    let (status, _) = get(&app, "/customers").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_cors_any_origin() {
    let app = create_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/customers")
                .header("origin", "http://dashboard.test")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("access-control-allow-origin").unwrap(),
        "*"
    );
}

#[tokio::test]
async fn test_cors_origin_list() {
    let config = Config {
        cors_origins: parse_origins("http://a.test, bad\u{7f}origin"),
        ..Config::in_memory()
    };
    let app = create_router(State::in_memory_with(config));

    let from = |origin: &str| {
        Request::builder()
            .uri("/api/customers")
            .header("origin", origin)
            .body(Body::empty())
            .unwrap()
    };

    let allowed = app.clone().oneshot(from("http://a.test")).await.unwrap();
    assert_eq!(allowed.status(), StatusCode::OK);
    assert_eq!(
        allowed.headers().get("access-control-allow-origin").unwrap(),
        "http://a.test"
    );
    assert_eq!(
        allowed.headers().get("access-control-allow-credentials").unwrap(),
        "true"
    );

    let denied = app.oneshot(from("http://b.test")).await.unwrap();
    assert!(denied.headers().get("access-control-allow-origin").is_none());
}
