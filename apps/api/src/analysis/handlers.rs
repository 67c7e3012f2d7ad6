//! Axum route handlers for the Analysis API.

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    Json,
};
use base64::{engine::general_purpose::STANDARD, Engine};
use bytes::Bytes;
use serde::Deserialize;
use tracing::debug;

use crate::analysis::contract::normalize_gap_report;
use crate::analysis::simulation::{FulfillmentSet, GapProjection, GapView};
use crate::errors::AppError;
use crate::models::analysis::{GapReport, SavedReport};
use crate::models::mode::{mode_catalog, ModeProfile};
use crate::models::survey::AnalysisRequest;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SimulateRequest {
    pub gap_report: GapReport,
    /// Missing-element items marked as done.
    #[serde(default)]
    pub fulfilled: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/modes
pub async fn handle_list_modes() -> Json<Vec<ModeProfile>> {
    Json(mode_catalog())
}

/// POST /api/v1/analyses
///
/// Runs one gap analysis from a JSON body. The image, if any, is base64 or a data URL.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalysisRequest>,
) -> Result<Json<SavedReport>, AppError> {
    run_analysis(&state, request).await
}

/// POST /api/v1/analyses/upload
///
/// Multipart variant: `text`, `mode`, `survey` (JSON) and an `image` file.
pub async fn handle_analyze_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<SavedReport>, AppError> {
    let request = read_upload(&mut multipart).await?;
    run_analysis(&state, request).await
}

/// POST /api/v1/analyses/simulate
///
/// Projects the radar and similarity score for a set of fulfilled elements.
/// Stateless: the caller owns the fulfilled set and sends it every time.
/// The report goes through the same attribute and score checks as a fresh analysis.
pub async fn handle_simulate(
    Json(request): Json<SimulateRequest>,
) -> Result<Json<GapProjection>, AppError> {
    let gap_report = normalize_gap_report(request.gap_report).map_err(AppError::Validation)?;
    let fulfilled: FulfillmentSet = request.fulfilled.into_iter().collect();
    Ok(Json(GapView::with_fulfilled(gap_report, fulfilled).projection()))
}

async fn run_analysis(
    state: &AppState,
    request: AnalysisRequest,
) -> Result<Json<SavedReport>, AppError> {
    let report = state.analyzer.analyze(&request).await?;
    Ok(Json(SavedReport::new(report)))
}

async fn read_upload(multipart: &mut Multipart) -> Result<AnalysisRequest, AppError> {
    let mut request = AnalysisRequest::default();

    while let Some(field) = multipart.next_field().await.map_err(bad_multipart)? {
        let name = field.name().unwrap_or_default().to_string();

        match name.as_str() {
            "text" => request.text = field.text().await.map_err(bad_multipart)?,
            "mode" => {
                let raw = field.text().await.map_err(bad_multipart)?;
                if !raw.trim().is_empty() {
                    request.mode = Some(raw.parse().map_err(AppError::Validation)?);
                }
            }
            "survey" => {
                let raw = field.text().await.map_err(bad_multipart)?;
                if !raw.trim().is_empty() {
                    let survey = serde_json::from_str(&raw).map_err(|e| {
                        AppError::Validation(format!("survey is not valid JSON: {e}"))
                    })?;
                    request.survey_context = Some(survey);
                }
            }
            "image" => {
                let content_type = field.content_type().map(str::to_string);
                if let Some(ct) = content_type.filter(|ct| !ct.starts_with("image/")) {
                    return Err(AppError::Validation(format!(
                        "image must be an image file, got {ct}"
                    )));
                }
                let data = field.bytes().await.map_err(bad_multipart)?;
                if !data.is_empty() {
                    request.image = Some(encode_image(&data));
                }
            }
            other => debug!("Ignoring unknown multipart field '{other}'"),
        }
    }

    Ok(request)
}

fn encode_image(data: &Bytes) -> String {
    STANDARD.encode(data)
}

fn bad_multipart(err: MultipartError) -> AppError {
    AppError::Validation(format!("Malformed upload: {err}"))
}
