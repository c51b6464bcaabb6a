use axum::http::StatusCode;
use axum_test::TestServer;
use std::sync::Arc;

use cinematch_api::{
    routes::{create_router, AppState},
    services::{CompareOptions, InMemoryReviewStore},
};

const REVIEWS: &str = r#"{
    "alice": {
        "603": {"rating": 5, "title": "The Matrix", "genre_ids": [28, 878]},
        "155": {"rating": 4.5, "title": "The Dark Knight", "genre_ids": [28, 80, 18]},
        "13": {"rating": 2, "title": "Forrest Gump", "genre_ids": [35, 18, 10749]}
    },
    "bob": {
        "603": {"rating": 3, "title": "The Matrix", "genre_ids": [28, 878]},
        "13": {"rating": 4.5, "title": "Forrest Gump", "genre_ids": [35, 18, 10749]},
        "2062": {"rating": 4, "title": "Ratatouille", "genre_ids": [16, 35, 10751]}
    },
    "carol": {}
}"#;

fn create_test_server() -> TestServer {
    let store = InMemoryReviewStore::from_json_str(REVIEWS).unwrap();
    let state = Arc::new(AppState::new(Arc::new(store), CompareOptions::default()));
    let app = create_router(state);
    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server();
    let response = server.get("/health").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_compare_users() {
    let server = create_test_server();

    let response = server.get("/api/v1/users/alice/compare/bob").await;

    response.assert_status_ok();
    let report: serde_json::Value = response.json();

    // 2 shared movies out of 4 distinct
    assert_eq!(report["overlapPct"], 0.5);
    assert!(report["absAvg"].as_f64().unwrap() >= 0.0);
    assert!(report["grade"].is_string());

    let overlap_max = report["overlap"]["max"].as_array().unwrap();
    assert!(!overlap_max.is_empty());
    assert!(overlap_max.iter().all(|d| d["sameMovie"] == true));

    // Alice liked The Matrix more than Bob did
    assert_eq!(overlap_max[0]["source"]["movie"]["title"], "The Matrix");

    for list in ["min", "max", "zero"] {
        let entries = report["diff"][list].as_array().unwrap();
        assert!(entries.len() <= 5);
        assert!(entries.iter().all(|d| d["sameMovie"] == false));
        assert!(entries.iter().all(|d| d["similarity"].as_f64().unwrap() >= 0.75));
    }
}

#[tokio::test]
async fn test_compare_respects_k() {
    let server = create_test_server();

    let response = server
        .get("/api/v1/users/alice/compare/bob")
        .add_query_param("k", 1)
        .add_query_param("sim_min", 0.5)
        .await;

    response.assert_status_ok();
    let report: serde_json::Value = response.json();
    assert!(report["diff"]["max"].as_array().unwrap().len() <= 1);
    // overlap lists keep room for every shared movie
    assert_eq!(report["overlap"]["max"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_compare_accepts_huge_k() {
    let server = create_test_server();

    let response = server
        .get("/api/v1/users/alice/compare/bob")
        .add_query_param("k", usize::MAX)
        .await;

    response.assert_status_ok();
    let report: serde_json::Value = response.json();
    assert!(report["diff"]["max"].as_array().unwrap().len() <= 3);
}

#[tokio::test]
async fn test_compare_is_idempotent() {
    let server = create_test_server();

    let first = server.get("/api/v1/users/alice/compare/bob").await.text();
    let second = server.get("/api/v1/users/alice/compare/bob").await.text();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_unknown_user_is_not_found() {
    let server = create_test_server();

    let response = server.get("/api/v1/users/alice/compare/mallory").await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body: serde_json::Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("mallory"));
}

#[tokio::test]
async fn test_user_without_reviews_is_not_found() {
    let server = create_test_server();

    let response = server.get("/api/v1/users/carol/compare/alice").await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_parameters() {
    let server = create_test_server();

    let response = server
        .get("/api/v1/users/alice/compare/bob")
        .add_query_param("k", 0)
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let response = server
        .get("/api/v1/users/alice/compare/bob")
        .add_query_param("sim_min", 1.5)
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let server = create_test_server();
    let request_id = "6f1c2a9e-3b4d-4c5e-8f70-1a2b3c4d5e6f";

    let response = server
        .get("/health")
        .add_header(
            axum::http::HeaderName::from_static("x-request-id"),
            axum::http::HeaderValue::from_static(request_id),
        )
        .await;

    assert_eq!(response.header("x-request-id"), request_id);
}

#[tokio::test]
async fn test_request_id_is_generated() {
    let server = create_test_server();

    let response = server.get("/health").await;

    let header = response.header("x-request-id");
    assert!(uuid::Uuid::parse_str(header.to_str().unwrap()).is_ok());
}
