//! Registry REST API workflow test
//!
//! Exercises the full router against an in-memory database: solution,
//! parameter and tag CRUD, assignment lifecycle including the delete
//! guard, tag filtering and error mapping.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use solhub_rest_api::{create_rest_app, AppConfig, AppContext};
use solhub_storage::testing::in_memory_factory;
use solhub_web::middleware::CorsConfig;

async fn test_app() -> Router {
    let factory = in_memory_factory().await;
    let context = AppContext::new(Arc::new(factory));
    create_rest_app(context, AppConfig::default())
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(payload) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn create_solution(app: &Router, name: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/api/solutions",
        Some(json!({"name": name})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create solution: {}", body);
    body["data"]["id"].as_str().unwrap().to_string()
}

async fn create_parameter(app: &Router, key: &str, value: &str, tags: &[&str]) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/api/parameters",
        Some(json!({"key": key, "value": value, "tags": tags})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create parameter: {}", body);
    body["data"]["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn configured_cors_origins_reach_the_response() {
    let factory = in_memory_factory().await;
    let context = AppContext::new(Arc::new(factory));
    let config = AppConfig {
        cors: CorsConfig {
            allowed_origins: vec!["https://console.example.net".to_string()],
            ..Default::default()
        },
        ..Default::default()
    };
    let app = create_rest_app(context, config);

    let request = Request::builder()
        .method("GET")
        .uri("/health")
        .header(header::ORIGIN, "https://console.example.net")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|value| value.to_str().ok()),
        Some("https://console.example.net")
    );

    // An origin outside the configured list gets no CORS grant
    let request = Request::builder()
        .method("GET")
        .uri("/health")
        .header(header::ORIGIN, "https://elsewhere.example.net")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert!(response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .is_none());
}

#[tokio::test]
async fn health_endpoint_reports_database_status() {
    let app = test_app().await;

    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "ok");
}

#[tokio::test]
async fn solution_crud_over_http() {
    let app = test_app().await;

    let id = create_solution(&app, "billing").await;

    let (status, body) = send(&app, "GET", &format!("/api/solutions/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "billing");
    assert_eq!(body["data"]["parameterCount"], 0);

    // Duplicate name is a conflict
    let (status, body) = send(
        &app,
        "POST",
        "/api/solutions",
        Some(json!({"name": "billing"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "CONFLICT");

    // Rename and describe
    let (status, body) = send(
        &app,
        "PATCH",
        &format!("/api/solutions/{}", id),
        Some(json!({"name": "billing-v2", "description": "invoices"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "billing-v2");
    assert_eq!(body["data"]["description"], "invoices");

    // Listing carries pagination metadata
    let (status, body) = send(&app, "GET", "/api/solutions", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["meta"]["pagination"]["total"], 1);

    let (status, _) = send(&app, "DELETE", &format!("/api/solutions/{}", id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, "GET", &format!("/api/solutions/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn blank_solution_name_is_rejected() {
    let app = test_app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/solutions",
        Some(json!({"name": "   "})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{}", body);
}

#[tokio::test]
async fn non_numeric_ids_are_bad_requests() {
    let app = test_app().await;

    let (status, _) = send(&app, "GET", "/api/solutions/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, "DELETE", "/api/parameters/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_guard_blocks_solutions_with_assignments() {
    let app = test_app().await;

    let sid = create_solution(&app, "billing").await;
    let pid = create_parameter(&app, "DB_HOST", "db.internal", &[]).await;

    let assign_uri = format!("/api/solutions/{}/parameters/{}", sid, pid);
    let (status, _) = send(&app, "POST", &assign_uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    // Re-assignment is a no-op
    let (status, _) = send(&app, "POST", &assign_uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, "GET", &format!("/api/solutions/{}", sid), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["parameterCount"], 1);

    let (status, body) = send(&app, "DELETE", &format!("/api/solutions/{}", sid), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "CONFLICT");

    let (status, _) = send(&app, "DELETE", &assign_uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, "DELETE", &format!("/api/solutions/{}", sid), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    // The shared parameter survives the unassignment
    let (status, _) = send(&app, "GET", &format!("/api/parameters/{}", pid), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn assigning_unknown_ids_is_not_found() {
    let app = test_app().await;

    let sid = create_solution(&app, "billing").await;

    let (status, _) = send(
        &app,
        "POST",
        &format!("/api/solutions/{}/parameters/999", sid),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "POST", "/api/solutions/999/parameters/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn parameters_carry_tags_through_create_and_update() {
    let app = test_app().await;

    let pid = create_parameter(&app, "DB_HOST", "db.internal", &["infra", "database"]).await;

    let (status, body) = send(&app, "GET", &format!("/api/parameters/{}", pid), None).await;
    assert_eq!(status, StatusCode::OK);
    let mut tag_names: Vec<&str> = body["data"]["tags"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    tag_names.sort();
    assert_eq!(tag_names, vec!["database", "infra"]);

    // Updating with a tag list replaces the whole set
    let (status, body) = send(
        &app,
        "PATCH",
        &format!("/api/parameters/{}", pid),
        Some(json!({"tags": ["network"]})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["tags"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"]["tags"][0]["name"], "network");

    // Tags created through the parameter appear in the tag catalogue
    let (status, body) = send(&app, "GET", "/api/tags", None).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["database", "infra", "network"]);
}

#[tokio::test]
async fn duplicate_parameter_key_is_a_conflict() {
    let app = test_app().await;

    create_parameter(&app, "DB_HOST", "a", &[]).await;
    let (status, _) = send(
        &app,
        "POST",
        "/api/parameters",
        Some(json!({"key": "DB_HOST", "value": "b"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn secret_values_are_masked_on_operator_payloads() {
    let app = test_app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/parameters",
        Some(json!({"key": "API_TOKEN", "value": "s3cr3t", "isSecret": true})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["value"], "*** HIDDEN ***");
    let pid = body["data"]["id"].as_str().unwrap().to_string();

    let (_, body) = send(&app, "GET", &format!("/api/parameters/{}", pid), None).await;
    assert_eq!(body["data"]["value"], "*** HIDDEN ***");

    let (_, body) = send(&app, "GET", "/api/parameters", None).await;
    assert_eq!(body["data"][0]["value"], "*** HIDDEN ***");
}

#[tokio::test]
async fn search_and_unassigned_filters() {
    let app = test_app().await;

    let sid = create_solution(&app, "billing").await;
    let db_host = create_parameter(&app, "DB_HOST", "db.internal", &["infra"]).await;
    create_parameter(&app, "DB_PORT", "5432", &["infra"]).await;
    create_parameter(&app, "GREETING", "hello", &["copy"]).await;

    let (status, _) = send(
        &app,
        "POST",
        &format!("/api/solutions/{}/parameters/{}", sid, db_host),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    // Filter by solution
    let (status, body) = send(
        &app,
        "POST",
        "/api/parameters/search",
        Some(json!({"solutionId": sid})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let keys: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["key"].as_str().unwrap())
        .collect();
    assert_eq!(keys, vec!["DB_HOST"]);

    // Tag and substring filters compose
    let (status, body) = send(
        &app,
        "POST",
        "/api/parameters/search",
        Some(json!({"tags": ["infra"], "keyContains": "PORT"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["key"], "DB_PORT");

    // Unassigned listing excludes the assigned parameter
    let (status, body) = send(&app, "GET", "/api/parameters/unassigned", None).await;
    assert_eq!(status, StatusCode::OK);
    let keys: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["key"].as_str().unwrap())
        .collect();
    assert_eq!(keys, vec!["DB_PORT", "GREETING"]);
}

#[tokio::test]
async fn bulk_operations_span_parameter_sets() {
    let app = test_app().await;

    let a = create_parameter(&app, "A", "1", &[]).await;
    let b = create_parameter(&app, "B", "2", &[]).await;
    let c = create_parameter(&app, "C", "3", &[]).await;

    // Tag two of the three
    let (status, body) = send(
        &app,
        "POST",
        "/api/parameters/bulk",
        Some(json!({"operation": "tag", "parameterIds": [a, b], "tags": ["review"]})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["data"]["affected"], 2);

    let (_, body) = send(&app, "GET", &format!("/api/parameters/{}", a), None).await;
    assert_eq!(body["data"]["tags"][0]["name"], "review");
    let (_, body) = send(&app, "GET", &format!("/api/parameters/{}", c), None).await;
    assert!(body["data"]["tags"].as_array().unwrap().is_empty());

    // Untag one again
    let (status, body) = send(
        &app,
        "POST",
        "/api/parameters/bulk",
        Some(json!({"operation": "untag", "parameterIds": [b], "tags": ["review"]})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["affected"], 1);
    let (_, body) = send(&app, "GET", &format!("/api/parameters/{}", b), None).await;
    assert!(body["data"]["tags"].as_array().unwrap().is_empty());

    // Tagging without tags is rejected
    let (status, _) = send(
        &app,
        "POST",
        "/api/parameters/bulk",
        Some(json!({"operation": "tag", "parameterIds": [a]})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Unknown operations are rejected
    let (status, body) = send(
        &app,
        "POST",
        "/api/parameters/bulk",
        Some(json!({"operation": "rename", "parameterIds": [a]})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = body["error"]["message"].as_str().unwrap();
    assert!(message.contains("delete, tag, untag"), "{}", message);

    // Delete the whole set; missing ids are skipped
    let (status, body) = send(
        &app,
        "POST",
        "/api/parameters/bulk",
        Some(json!({"operation": "delete", "parameterIds": [a, b, c, "999"]})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["affected"], 3);

    let (_, body) = send(&app, "GET", "/api/parameters", None).await;
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn tag_catalogue_crud() {
    let app = test_app().await;

    let (status, body) = send(&app, "POST", "/api/tags", Some(json!({"name": "infra"}))).await;
    assert_eq!(status, StatusCode::CREATED);
    let tag_id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, _) = send(&app, "POST", "/api/tags", Some(json!({"name": "infra"}))).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(&app, "DELETE", &format!("/api/tags/{}", tag_id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, "DELETE", &format!("/api/tags/{}", tag_id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
