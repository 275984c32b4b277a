//! Tests de integración de los endpoints `/vehicle`
//!
//! El router se ejecuta con `oneshot` sobre el store en memoria, sin
//! necesidad de base de datos.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use vehicle_registry::config::EnvironmentConfig;
use vehicle_registry::create_app;
use vehicle_registry::repositories::InMemoryVehicleRepository;
use vehicle_registry::state::AppState;

fn test_app() -> Router {
    let store = Arc::new(InMemoryVehicleRepository::new());
    create_app(AppState::new(store, EnvironmentConfig::default()))
}

fn accord() -> Value {
    json!({
        "vin": "1HGCM82633A123456",
        "manufacturer_name": "Honda",
        "description": "A reliable sedan.",
        "horse_power": 150,
        "model_name": "Accord",
        "model_year": 2022,
        "purchase_price": 22000.00,
        "fuel_type": "Gasoline"
    })
}

fn with(mut payload: Value, field: &str, value: Value) -> Value {
    payload[field] = value;
    payload
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("failed to build request");

    let response = app.clone().oneshot(request).await.expect("request failed");
    let status = response.status();

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read body");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("failed to parse response")
    };

    (status, body)
}

/// App con el Accord ya guardado
async fn seeded_app() -> Router {
    let app = test_app();
    let (status, _) = send(&app, "POST", "/vehicle", Some(accord())).await;
    assert_eq!(status, StatusCode::CREATED);
    app
}

fn assert_field_error(status: StatusCode, body: &Value, field: &str) {
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "body: {}", body);
    assert!(
        body["errors"][field].is_array(),
        "expected errors for '{}', got: {}",
        field,
        body
    );
}

#[tokio::test]
async fn test_health_endpoint() {
    let (status, body) = send(&test_app(), "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_get_all_vehicles() {
    let app = seeded_app().await;
    let (status, body) = send(&app, "GET", "/vehicle", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(1));
    assert_eq!(body[0]["vin"], "1HGCM82633A123456");
}

#[tokio::test]
async fn test_get_all_vehicles_empty_database() {
    let (status, body) = send(&test_app(), "GET", "/vehicle", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_create_vehicle_returns_normalized_record() {
    let app = test_app();
    let payload = json!({
        "vin": "5npe24af3fh123457",
        "manufacturer_name": "Hyundai",
        "description": "A mid-size sedan.",
        "horse_power": 185,
        "model_name": "Sonata",
        "model_year": 2015,
        "purchase_price": 18000.00,
        "fuel_type": "Gasoline"
    });

    let (status, body) = send(&app, "POST", "/vehicle", Some(payload)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["vin"], "5NPE24AF3FH123457");
    assert_eq!(body["purchase_price"], "18000.00");
    assert_eq!(body["horse_power"], 185);
    assert!(body["id"].is_i64());
}

#[tokio::test]
async fn test_get_vehicle_by_vin_any_case() {
    let app = seeded_app().await;
    let (_, created) = send(&app, "GET", "/vehicle/1HGCM82633A123456", None).await;

    let (status, body) = send(&app, "GET", "/vehicle/1hgcm82633a123456", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, created);
}

#[tokio::test]
async fn test_get_vehicle_not_found() {
    let (status, body) = send(&test_app(), "GET", "/vehicle/1HGCM82633A000000", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_update_vehicle() {
    let app = seeded_app().await;
    let (status, body) = send(
        &app,
        "PUT",
        "/vehicle/1HGCM82633A123456",
        Some(json!({ "horse_power": 155 })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["horse_power"], 155);

    let (_, fetched) = send(&app, "GET", "/vehicle/1HGCM82633A123456", None).await;
    assert_eq!(fetched["horse_power"], 155);
    assert_eq!(fetched["description"], "A reliable sedan.");
}

#[tokio::test]
async fn test_update_vehicle_partial_data() {
    let app = seeded_app().await;
    let (status, body) = send(
        &app,
        "PUT",
        "/vehicle/1hgcm82633a123456",
        Some(json!({ "description": "Updated description only." })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["description"], "Updated description only.");
    assert_eq!(body["model_name"], "Accord");
}

#[tokio::test]
async fn test_update_vehicle_invalid_vin() {
    let app = seeded_app().await;
    let (status, body) = send(
        &app,
        "PUT",
        "/vehicle/1HGCM82633A123456",
        Some(json!({ "vin": "123" })),
    )
    .await;
    assert_field_error(status, &body, "vin");
}

#[tokio::test]
async fn test_update_vehicle_rejects_vin_of_other_record() {
    let app = seeded_app().await;
    let other = with(accord(), "vin", json!("5NPE24AF3FH123457"));
    send(&app, "POST", "/vehicle", Some(other)).await;

    let (status, body) = send(
        &app,
        "PUT",
        "/vehicle/5NPE24AF3FH123457",
        Some(json!({ "vin": "1hgcm82633a123456" })),
    )
    .await;
    assert_field_error(status, &body, "vin");
}

#[tokio::test]
async fn test_update_nonexistent_vehicle() {
    let (status, _) = send(
        &test_app(),
        "PUT",
        "/vehicle/1HGCM82633A000000",
        Some(json!({ "horse_power": 155 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_vehicle_confirm_nonexistence() {
    let app = seeded_app().await;

    let (status, body) = send(&app, "DELETE", "/vehicle/1hgcm82633a123456", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, _) = send(&app, "GET", "/vehicle/1HGCM82633A123456", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_nonexistent_vehicle() {
    let (status, _) = send(&test_app(), "DELETE", "/vehicle/1HGCM82633A000000", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_vehicle_invalid_vin() {
    let payload = with(accord(), "vin", json!("123"));
    let (status, body) = send(&test_app(), "POST", "/vehicle", Some(payload)).await;
    assert_field_error(status, &body, "vin");
    assert_eq!(body["errors"]["vin"][0], "VIN must be exactly 17 characters long.");
}

#[tokio::test]
async fn test_create_vehicle_missing_fields() {
    let payload = json!({
        "vin": "1HGCM82633A123457",
        "manufacturer_name": "Honda"
    });
    let (status, body) = send(&test_app(), "POST", "/vehicle", Some(payload)).await;

    assert_field_error(status, &body, "description");
    assert_field_error(status, &body, "horse_power");
    assert_eq!(body["errors"]["fuel_type"][0], "This field is required.");
}

#[tokio::test]
async fn test_create_vehicle_negative_purchase_price() {
    let payload = with(accord(), "purchase_price", json!(-10000.00));
    let (status, body) = send(&test_app(), "POST", "/vehicle", Some(payload)).await;
    assert_field_error(status, &body, "purchase_price");
}

#[tokio::test]
async fn test_create_vehicle_duplicate_vin() {
    let app = seeded_app().await;
    let duplicate = with(accord(), "vin", json!("1hgcm82633a123456"));

    let (status, body) = send(&app, "POST", "/vehicle", Some(duplicate)).await;
    assert_field_error(status, &body, "vin");
    assert_eq!(body["errors"]["vin"][0], "vehicle with this vin already exists.");
}

#[tokio::test]
async fn test_create_vehicle_invalid_horse_power() {
    let payload = with(accord(), "horse_power", json!("one-fifty"));
    let (status, body) = send(&test_app(), "POST", "/vehicle", Some(payload)).await;
    assert_field_error(status, &body, "horse_power");
}

#[tokio::test]
async fn test_create_vehicle_invalid_fuel_type() {
    let payload = with(accord(), "fuel_type", json!("Water"));
    let (status, body) = send(&test_app(), "POST", "/vehicle", Some(payload)).await;
    assert_field_error(status, &body, "fuel_type");
}

#[tokio::test]
async fn test_create_vehicle_future_model_year() {
    let payload = with(accord(), "model_year", json!(3000));
    let (status, body) = send(&test_app(), "POST", "/vehicle", Some(payload)).await;
    assert_field_error(status, &body, "model_year");
}

#[tokio::test]
async fn test_create_vehicle_long_description() {
    let long_description = "This is a very long description.".repeat(50);
    let payload = with(accord(), "description", json!(long_description));

    let (status, body) = send(&test_app(), "POST", "/vehicle", Some(payload)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["description"], long_description.as_str());
}

#[tokio::test]
async fn test_create_vehicle_edge_case_year() {
    let app = test_app();

    let oldest = json!({
        "vin": "1HGCM82633A123463",
        "manufacturer_name": "Benz",
        "description": "The oldest car ever made.",
        "horse_power": 2,
        "model_name": "Motorwagen",
        "model_year": 1886,
        "purchase_price": 5000.00,
        "fuel_type": "Gasoline"
    });
    let (status, _) = send(&app, "POST", "/vehicle", Some(oldest)).await;
    assert_eq!(status, StatusCode::CREATED);

    let latest = with(with(accord(), "vin", json!("1HGCM82633A123464")), "model_year", json!(2100));
    let (status, _) = send(&app, "POST", "/vehicle", Some(latest)).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_create_vehicle_reports_all_errors_together() {
    let mut payload = with(accord(), "vin", json!("123"));
    payload["model_year"] = json!(1800);
    payload["fuel_type"] = json!("Steam");
    payload["purchase_price"] = json!(0);

    let (status, body) = send(&test_app(), "POST", "/vehicle", Some(payload)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["errors"].as_object().map(|errors| errors.len()), Some(4));
}

#[tokio::test]
async fn test_create_vehicle_malformed_json() {
    let request = Request::builder()
        .method("POST")
        .uri("/vehicle")
        .header("content-type", "application/json")
        .body(Body::from("{\"vin\": "))
        .expect("failed to build request");

    let response = test_app().oneshot(request).await.expect("request failed");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
