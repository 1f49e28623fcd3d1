use axum::{body::Body, http::Request};
use marketplace_api::{config::AppConfig, routes::app_router, state::AppState, store::Store};
use tower::ServiceExt;

fn test_config() -> AppConfig {
    AppConfig::from_lookup(|key| match key {
        "JWT_SECRET" => Some("test-secret".to_string()),
        _ => None,
    })
    .expect("config")
}

#[tokio::test]
async fn health_check_returns_ok() {
    let app = app_router(AppState::new(Store::mock(), test_config()));

    let response = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    assert!(response.headers().contains_key("x-request-id"));

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["message"], "Health check");
    assert_eq!(body["data"]["status"], "ok");
    assert_eq!(body["data"]["backend"], "mock");
}

#[tokio::test]
async fn unknown_path_uses_envelope() {
    let app = app_router(AppState::new(Store::mock(), test_config()));

    let response = app
        .oneshot(Request::get("/nope").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), 404);
}
