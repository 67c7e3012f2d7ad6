//! Gap analysis: pluggable, trait-based analyzer behind the analysis endpoints.
//!
//! Default: `GeminiGapAnalyzer` (validate → compose → call with retry → contract check).
//! `AppState` holds an `Arc<dyn GapAnalyzer>`; tests swap in a canned analyzer.

use async_trait::async_trait;
use tracing::info;

use crate::analysis::composer::{compose, validate_request};
use crate::analysis::contract::enforce_contract;
use crate::errors::AppError;
use crate::llm_client::retry::RetryPolicy;
use crate::llm_client::{parse_json_reply, LlmClient};
use crate::models::analysis::AnalysisResponse;
use crate::models::survey::AnalysisRequest;

#[async_trait]
pub trait GapAnalyzer: Send + Sync {
    /// Produces one full analysis or fails. Never returns partial results.
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResponse, AppError>;
}

pub struct GeminiGapAnalyzer {
    llm: LlmClient,
    retry: RetryPolicy,
    language: String,
}

impl GeminiGapAnalyzer {
    pub fn new(llm: LlmClient, retry: RetryPolicy, language: impl Into<String>) -> Self {
        Self {
            llm,
            retry,
            language: language.into(),
        }
    }
}

#[async_trait]
impl GapAnalyzer for GeminiGapAnalyzer {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResponse, AppError> {
        validate_request(request)?;

        let payload = compose(request, &self.language);
        info!(
            "Requesting gap analysis (mode={:?}, survey={}, image={})",
            request.mode,
            request.survey_context.is_some(),
            request.image.is_some()
        );

        let text = self.llm.generate_text(&payload, &self.retry).await?;
        let response = read_analysis(&text)?;

        info!(
            "Gap analysis complete: mode={}, similarity={}, missing_elements={}",
            response.mode(),
            response.gap_report.similarity_score,
            response.gap_report.missing_elements.len()
        );

        Ok(response)
    }
}

/// Parses the model's reply text and holds it to the five-attribute contract.
pub fn read_analysis(text: &str) -> Result<AnalysisResponse, AppError> {
    let response: AnalysisResponse = parse_json_reply(text)?;
    Ok(enforce_contract(response)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::LlmError;
    use crate::models::analysis::sample_response;
    use tokio::time::Instant;

    fn fenced(response: &AnalysisResponse) -> String {
        format!("```json\n{}\n```", serde_json::to_string(response).unwrap())
    }

    #[test]
    fn test_read_analysis_accepts_fenced_reply() {
        let response = read_analysis(&fenced(&sample_response())).unwrap();
        assert_eq!(response, sample_response());
    }

    #[test]
    fn test_read_analysis_applies_contract() {
        let mut reply = sample_response();
        reply.gap_report.similarity_score = 130.0;
        assert_eq!(
            read_analysis(&fenced(&reply)).unwrap().gap_report.similarity_score,
            100.0
        );

        reply.gap_report.attributes.truncate(3);
        let err = read_analysis(&fenced(&reply)).unwrap_err();
        assert!(matches!(err, AppError::Llm(LlmError::InvalidResponse(_))));
    }

    #[test]
    fn test_read_analysis_rejects_malformed_reply() {
        let err = read_analysis("{\"user_mode\": \"Dream Seed\"").unwrap_err();
        assert!(matches!(err, AppError::Llm(LlmError::Parse(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_missing_key_fails_fast() {
        let llm = LlmClient::new(None).unwrap().with_key_source(|| None);
        let analyzer = GeminiGapAnalyzer::new(llm, RetryPolicy::default(), "Korean");
        let request = AnalysisRequest {
            text: "I want to become a game designer".to_string(),
            ..Default::default()
        };
        let start = Instant::now();

        let err = analyzer.analyze(&request).await.unwrap_err();

        assert!(matches!(err, AppError::Llm(LlmError::MissingApiKey)));
        assert_eq!(start.elapsed().as_millis(), 0);
    }

    #[tokio::test]
    async fn test_empty_request_fails_before_any_call() {
        // Validation runs before the client is touched, so nothing leaves the process.
        let llm = LlmClient::new(Some("unused".to_string())).unwrap();
        let analyzer = GeminiGapAnalyzer::new(llm, RetryPolicy::default(), "Korean");

        let err = analyzer
            .analyze(&AnalysisRequest::default())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
    }
}
