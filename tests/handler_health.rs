mod common;

use axum::{Router, routing::get};
use axum_test::TestServer;
use common::{API_KEY, FakeUpstream, ManualClock};
use vehicle_lookup_proxy::api::handlers::health_handler;
use vehicle_lookup_proxy::routes::app_router;

#[tokio::test]
async fn test_health_endpoint_success() {
    let upstream = FakeUpstream::start(200, "{}").await;
    let state = common::create_test_state(&upstream.base_url, ManualClock::new());
    let app = Router::new()
        .route("/health", get(health_handler))
        .with_state(state);

    let server = TestServer::new(app).unwrap();

    let response = server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["cache"]["status"], "ok");
    assert_eq!(json["checks"]["cache"]["message"], "Entries: 0");
    assert!(json.get("version").is_some());
    assert_eq!(upstream.calls(), 0);
}

#[tokio::test]
async fn test_health_reports_cached_entries() {
    let upstream = FakeUpstream::start(200, r#"{"owner":"X"}"#).await;
    let state = common::create_test_state(&upstream.base_url, ManualClock::new());
    let server = TestServer::new(app_router(state)).unwrap();

    server
        .get("/api/lookup")
        .add_query_param("query", "CH01AC9090")
        .add_query_param("key", API_KEY)
        .await
        .assert_status_ok();

    let response = server.get("/health").await;

    response.assert_status_ok();
    assert_eq!(response.header("access-control-allow-origin"), "*");
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["checks"]["cache"]["message"], "Entries: 1");
}

#[tokio::test]
async fn test_health_rejects_post() {
    let upstream = FakeUpstream::start(200, "{}").await;
    let state = common::create_test_state(&upstream.base_url, ManualClock::new());
    let server = TestServer::new(app_router(state)).unwrap();

    let response = server.post("/health").await;

    assert_eq!(response.status_code(), 405);
}
