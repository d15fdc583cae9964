//! Integration tests for the info API endpoint

mod test_utils;

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::util::ServiceExt;

    use crate::test_utils::{body_to_json, test_app};

    /// Tests the info endpoint reports the model and example prompts
    #[tokio::test]
    async fn it_gets_info() {
        let app = test_app("http://localhost:1");

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/info")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = body_to_json(response.into_body()).await;
        assert_eq!(body["model"], "test-model");
        let examples = body["examples"].as_array().unwrap();
        assert_eq!(examples.len(), 4);
        assert_eq!(
            examples[0],
            "Plan a 3-day trip for elderly parents with wheelchairs"
        );
    }
}
