//! Request composer: turns an `AnalysisRequest` into a generateContent payload.

use base64::{engine::general_purpose::STANDARD, Engine};

use crate::analysis::prompts::{analysis_system_instruction, SURVEY_CONTEXT_TEMPLATE};
use crate::analysis::schema::analysis_response_schema;
use crate::errors::AppError;
use crate::llm_client::{Content, GenerateContentRequest, GenerationConfig, InlineData, Part};
use crate::models::survey::{AnalysisRequest, SurveyData};

/// Images are always declared as JPEG to the model.
pub const IMAGE_MIME_TYPE: &str = "image/jpeg";

/// Rejects submissions the form would not have sent: no text and no image,
/// or an image that is not base64.
pub fn validate_request(request: &AnalysisRequest) -> Result<(), AppError> {
    let image = request
        .image
        .as_deref()
        .map(strip_data_url_prefix)
        .filter(|data| !data.is_empty());

    if request.text.trim().is_empty() && image.is_none() {
        return Err(AppError::Validation(
            "Provide some text or an image to analyze".to_string(),
        ));
    }

    if let Some(data) = image {
        STANDARD
            .decode(data)
            .map_err(|e| AppError::Validation(format!("image is not valid base64: {e}")))?;
    }

    Ok(())
}

/// Drops a `data:<mime>;base64,` prefix, leaving bare base64.
pub fn strip_data_url_prefix(image: &str) -> &str {
    let image = image.trim();
    match image.split_once(',') {
        Some((_, data)) if !data.is_empty() => data,
        _ => image,
    }
}

pub fn render_survey_context(survey: &SurveyData) -> String {
    SURVEY_CONTEXT_TEMPLATE
        .replace("{name}", &survey.name)
        .replace("{age_group}", survey.age_group.label())
        .replace("{field}", &survey.field)
        .replace("{budget_level}", survey.budget_level.as_str())
        .replace("{available_time}", survey.available_time.as_str())
        .replace("{ultimate_goal}", &survey.ultimate_goal)
}

/// Survey block (if any), then the user's raw text, then the mode tag (if any).
pub fn build_user_prompt(request: &AnalysisRequest) -> String {
    let survey_block = request
        .survey_context
        .as_ref()
        .map(render_survey_context)
        .unwrap_or_default();

    let mode_tag = request
        .mode
        .map(|mode| format!(" (mode: {mode})"))
        .unwrap_or_default();

    format!("{survey_block}\n\nUser input: {}{mode_tag}", request.text)
}

/// Builds the full payload: system instruction, text part, optional image part, schema.
pub fn compose(request: &AnalysisRequest, language: &str) -> GenerateContentRequest {
    let mut parts = vec![Part::Text(build_user_prompt(request))];

    if let Some(image) = request.image.as_deref() {
        let data = strip_data_url_prefix(image);
        if !data.is_empty() {
            parts.push(Part::InlineData(InlineData {
                mime_type: IMAGE_MIME_TYPE.to_string(),
                data: data.to_string(),
            }));
        }
    }

    GenerateContentRequest {
        system_instruction: Content::system(analysis_system_instruction(language)),
        contents: vec![Content::user(parts)],
        generation_config: GenerationConfig::json(analysis_response_schema()),
    }
}
