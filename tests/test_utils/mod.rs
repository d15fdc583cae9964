//! Test utilities for integration tests
use std::sync::{Arc, RwLock};

use axum::{Router, body::Body};

use hkplanner::api::AppState;
use hkplanner::api::app;
use hkplanner::core::AppConfig;

/// Creates a test application router that sends completion requests
/// to `api_hostname`, usually a `mockito` server.
pub fn test_app(api_hostname: &str) -> Router {
    test_app_with_config(AppConfig::new(api_hostname, "test-api-key", "test-model"))
}

pub fn test_app_with_config(app_config: AppConfig) -> Router {
    let app_state = AppState::new(app_config).expect("Failed to create app state");
    app(Arc::new(RwLock::new(app_state)))
}

/// Mocks a successful completion that replies with `content`.
pub async fn mock_completion(
    server: &mut mockito::ServerGuard,
    content: &str,
) -> mockito::Mock {
    let body = serde_json::json!({
        "id": "chatcmpl-123",
        "object": "chat.completion",
        "created": 1694268190,
        "model": "test-model",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }]
    });
    server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create_async()
        .await
}

pub async fn body_to_string(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Failed to read body");
    String::from_utf8(bytes.to_vec()).expect("Body is not valid UTF-8")
}

pub async fn body_to_json(body: Body) -> serde_json::Value {
    serde_json::from_str(&body_to_string(body).await).expect("Body is not valid JSON")
}
