pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/modes", get(handlers::handle_list_modes))
        .route("/api/v1/analyses", post(handlers::handle_analyze))
        .route(
            "/api/v1/analyses/upload",
            post(handlers::handle_analyze_upload),
        )
        .route(
            "/api/v1/analyses/simulate",
            post(handlers::handle_simulate),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::analysis::analyzer::GapAnalyzer;
    use crate::config::Config;
    use crate::errors::AppError;
    use crate::llm_client::retry::RetryPolicy;
    use crate::llm_client::LlmError;
    use crate::models::analysis::{sample_response, AnalysisResponse};
    use crate::models::survey::{AnalysisRequest, UserMode};

    /// Canned analyzer that records every request it receives.
    struct StubAnalyzer {
        fail_with_rate_limit: bool,
        seen: Mutex<Vec<AnalysisRequest>>,
    }

    impl StubAnalyzer {
        fn new(fail_with_rate_limit: bool) -> Arc<Self> {
            Arc::new(Self {
                fail_with_rate_limit,
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl GapAnalyzer for StubAnalyzer {
        async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResponse, AppError> {
            self.seen.lock().unwrap().push(request.clone());
            if self.fail_with_rate_limit {
                return Err(AppError::Llm(LlmError::RetriesExhausted {
                    retries: 4,
                    last_error: "quota".to_string(),
                }));
            }
            Ok(sample_response())
        }
    }

    fn test_config() -> Config {
        Config {
            gemini_api_key: None,
            analysis_language: "Korean".to_string(),
            retry: RetryPolicy::default(),
            max_upload_bytes: 1024 * 1024,
            port: 0,
            rust_log: "info".to_string(),
        }
    }

    fn app(analyzer: Arc<StubAnalyzer>) -> Router {
        build_router(AppState {
            analyzer,
            config: test_config(),
        })
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn multipart(boundary: &str, fields: &[(&str, Option<(&str, &str)>, &str)]) -> Body {
        let mut body = String::new();
        for (name, file, value) in fields {
            body.push_str(&format!("--{boundary}\r\n"));
            match file {
                Some((filename, content_type)) => body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
                )),
                None => body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{name}\"\r\n\r\n"
                )),
            }
            body.push_str(value);
            body.push_str("\r\n");
        }
        body.push_str(&format!("--{boundary}--\r\n"));
        Body::from(body)
    }

    #[tokio::test]
    async fn test_health_reports_ok() {
        let request = Request::get("/health").body(Body::empty()).unwrap();
        let (status, body) = send(app(StubAnalyzer::new(false)), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_modes_lists_three_profiles() {
        let request = Request::get("/api/v1/modes").body(Body::empty()).unwrap();
        let (status, body) = send(app(StubAnalyzer::new(false)), request).await;
        assert_eq!(status, StatusCode::OK);
        let labels: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["label"].as_str().unwrap())
            .collect();
        assert_eq!(labels, vec!["Dream Seed", "Career Builder", "Pro Navigator"]);
    }

    #[tokio::test]
    async fn test_analyze_returns_saved_report() {
        let stub = StubAnalyzer::new(false);
        let request = post_json(
            "/api/v1/analyses",
            json!({
                "text": "I want to move into platform engineering",
                "mode": "Career Builder",
                "survey_context": {
                    "name": "Minji",
                    "age_group": "Career Builder",
                    "field": "infrastructure",
                    "budget_level": "low",
                    "available_time": "high",
                    "ultimate_goal": "platform team lead"
                }
            }),
        );

        let (status, body) = send(app(stub.clone()), request).await;

        assert_eq!(status, StatusCode::OK);
        assert!(body["id"].is_string());
        assert!(body["timestamp"].is_string());
        assert_eq!(body["gap_report"]["similarity_score"], 60.0);

        let seen = stub.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].mode, Some(UserMode::CareerBuilder));
        assert_eq!(seen[0].survey_context.as_ref().unwrap().name, "Minji");
    }

    #[tokio::test]
    async fn test_exhausted_retries_surface_as_503() {
        let request = post_json("/api/v1/analyses", json!({ "text": "hello" }));
        let (status, body) = send(app(StubAnalyzer::new(true)), request).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"]["code"], "MAX_RETRIES_EXCEEDED");
    }

    #[tokio::test]
    async fn test_upload_encodes_image_and_reads_fields() {
        let stub = StubAnalyzer::new(false);
        let boundary = "northstar-boundary";
        let body = multipart(
            boundary,
            &[
                ("text", None, "my latest drawing"),
                ("mode", None, "dream seed"),
                ("image", Some(("drawing.png", "image/png")), "ABC"),
            ],
        );
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/analyses/upload")
            .header(
                "content-type",
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(body)
            .unwrap();

        let (status, _) = send(app(stub.clone()), request).await;

        assert_eq!(status, StatusCode::OK);
        let seen = stub.seen.lock().unwrap();
        assert_eq!(seen[0].text, "my latest drawing");
        assert_eq!(seen[0].mode, Some(UserMode::DreamSeed));
        assert_eq!(seen[0].image.as_deref(), Some("QUJD"));
    }

    #[tokio::test]
    async fn test_upload_rejects_non_image_file() {
        let stub = StubAnalyzer::new(false);
        let boundary = "northstar-boundary";
        let body = multipart(
            boundary,
            &[("image", Some(("notes.txt", "text/plain")), "hello")],
        );
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/analyses/upload")
            .header(
                "content-type",
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(body)
            .unwrap();

        let (status, body) = send(app(stub.clone()), request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert!(stub.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_simulate_boosts_without_calling_analyzer() {
        let stub = StubAnalyzer::new(false);
        let gap_report = serde_json::to_value(sample_response().gap_report).unwrap();
        let request = post_json(
            "/api/v1/analyses/simulate",
            json!({ "gap_report": gap_report, "fulfilled": ["Kubernetes", "Go"] }),
        );

        let (status, body) = send(app(stub.clone()), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["fulfillment_ratio"], 0.5);
        assert_eq!(body["similarity_score"], 80);
        assert_eq!(body["attributes"][0]["current"], 65);
        assert_eq!(body["attributes"].as_array().unwrap().len(), 5);
        assert!(stub.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_simulate_clamps_out_of_range_scores() {
        let mut gap_report = sample_response().gap_report;
        gap_report.similarity_score = 150.0;
        gap_report.attributes[0].current = -40.0;
        let request = post_json(
            "/api/v1/analyses/simulate",
            json!({ "gap_report": gap_report, "fulfilled": [] }),
        );

        let (status, body) = send(app(StubAnalyzer::new(false)), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["similarity_score"], 100);
        assert_eq!(body["attributes"][0]["current"], 0);
    }

    #[tokio::test]
    async fn test_simulate_rejects_short_pentagon() {
        let mut gap_report = sample_response().gap_report;
        gap_report.attributes.truncate(2);
        let request = post_json(
            "/api/v1/analyses/simulate",
            json!({ "gap_report": gap_report, "fulfilled": ["Go"] }),
        );

        let (status, body) = send(app(StubAnalyzer::new(false)), request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }
}
