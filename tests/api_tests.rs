use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

use waste_routing::config::environment::EnvironmentConfig;
use waste_routing::database::seed_demo_data;
use waste_routing::repositories::{
    InMemoryEmployeeStore, InMemoryPointStore, InMemoryRouteStore, InMemoryVehicleStore,
};
use waste_routing::routes::create_app;
use waste_routing::state::AppState;
use waste_routing::Stores;

fn empty_stores() -> Stores {
    Stores {
        points: Arc::new(InMemoryPointStore::new()),
        vehicles: Arc::new(InMemoryVehicleStore::new()),
        employees: Arc::new(InMemoryEmployeeStore::new()),
        routes: Arc::new(InMemoryRouteStore::new()),
    }
}

async fn create_test_app(seed: bool) -> Router {
    let stores = empty_stores();
    if seed {
        seed_demo_data(&stores).await.unwrap();
    }
    create_app(AppState::new(EnvironmentConfig::default(), stores))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

#[tokio::test]
async fn test_health_check() {
    let app = create_test_app(false).await;
    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_generate_with_demo_data() {
    let app = create_test_app(true).await;
    let (status, body) = send(&app, Method::POST, "/api/routes/generate", None).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "PLANNED");
    assert_eq!(body["cached_vehicle_capacity"], 8000.0);
    assert_eq!(body["employee_ids"].as_array().unwrap().len(), 3);

    let fills: Vec<&str> = body["points_to_collect"]
        .as_array()
        .unwrap()
        .iter()
        .map(|rp| rp["cached_address"].as_str().unwrap())
        .collect();
    assert_eq!(
        fills,
        vec!["123 Rue de Paris", "Lac 1", "Ariana Centre", "10 Rue de Marseille"]
    );
    assert_eq!(body["points_to_collect"][0]["priority"], "HIGH");
    assert_eq!(body["estimated_distance_km"], 10.0);
    assert_eq!(body["depot_location"]["address"], "Central Depot - Tunis");
}

#[tokio::test]
async fn test_generate_without_demand_is_bad_request() {
    let app = create_test_app(false).await;
    let (status, body) = send(&app, Method::POST, "/api/routes/generate", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "NO_CONTAINERS_NEED_COLLECTION");
}

#[tokio::test]
async fn test_status_lifecycle_over_http() {
    let app = create_test_app(true).await;
    let (_, route) = send(&app, Method::POST, "/api/routes/generate", None).await;
    let id = route["id"].as_str().unwrap().to_string();

    let (status, body) = send(&app, Method::PATCH, &format!("/api/routes/{}/status?status=IN_PROGRESS", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "IN_PROGRESS");

    let (status, body) = send(&app, Method::PATCH, &format!("/api/routes/{}/status?status=COMPLETED", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "COMPLETED");

    // Los contenedores recogidos ya no generan alerta
    let (status, alerts) = send(&app, Method::GET, "/api/points/alerts", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(alerts.as_array().unwrap().is_empty());

    let (_, listed) = send(&app, Method::GET, "/api/routes?status=COMPLETED", None).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_status_on_unknown_route_is_not_found() {
    let app = create_test_app(false).await;
    let uri = format!("/api/routes/{}/status?status=COMPLETED", uuid::Uuid::new_v4());
    let (status, body) = send(&app, Method::PATCH, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "ROUTE_NOT_FOUND");
}

#[tokio::test]
async fn test_alerts_with_demo_data() {
    let app = create_test_app(true).await;
    let (status, alerts) = send(&app, Method::GET, "/api/points/alerts", None).await;

    assert_eq!(status, StatusCode::OK);
    let alerts = alerts.as_array().unwrap();
    assert_eq!(alerts.len(), 2);
    assert_eq!(alerts[0]["priority"], "HIGH");
    assert_eq!(alerts[1]["priority"], "MEDIUM");
}

#[tokio::test]
async fn test_route_crud() {
    let app = create_test_app(false).await;
    let (status, created) = send(
        &app,
        Method::POST,
        "/api/routes",
        Some(serde_json::json!({ "date": "2025-03-14", "estimated_distance_km": 5.0 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["status"], "PLANNED");
    let id = created["id"].as_str().unwrap().to_string();

    let (status, fetched) = send(&app, Method::GET, &format!("/api/routes/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["date"], "2025-03-14");

    let (status, updated) = send(
        &app,
        Method::PUT,
        &format!("/api/routes/{}", id),
        Some(serde_json::json!({ "date": "2025-03-15", "status": "IN_PROGRESS" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], id.as_str());
    assert_eq!(updated["status"], "IN_PROGRESS");

    let (status, _) = send(&app, Method::DELETE, &format!("/api/routes/{}", id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, Method::GET, &format!("/api/routes/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_route_validation() {
    let app = create_test_app(false).await;
    let ids: Vec<String> = (0..4).map(|_| uuid::Uuid::new_v4().to_string()).collect();
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/routes",
        Some(serde_json::json!({ "employee_ids": ids })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_points_needing_collection() {
    let app = create_test_app(true).await;
    let (status, points) = send(&app, Method::GET, "/api/points/needing-collection", None).await;

    assert_eq!(status, StatusCode::OK);
    let fills: Vec<i64> = points
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["fill_level"].as_i64().unwrap())
        .collect();
    assert_eq!(fills, vec![95, 85, 92, 88]);
    assert_eq!(points[0]["location"]["address"], "123 Rue de Paris");
}
