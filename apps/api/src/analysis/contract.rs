//! Post-parse checks on the model's reply.
//!
//! The five-attribute pentagon is only requested in the prompt, so it is
//! enforced here: extras are dropped, a short pentagon fails the analysis.

use tracing::warn;

use crate::llm_client::LlmError;
use crate::models::analysis::{AnalysisResponse, GapReport};

/// Number of axes on the attribute radar.
pub const PENTAGON_SIZE: usize = 5;

const SCORE_MIN: f64 = 0.0;
const SCORE_MAX: f64 = 100.0;

pub fn enforce_contract(mut response: AnalysisResponse) -> Result<AnalysisResponse, LlmError> {
    response.gap_report =
        normalize_gap_report(response.gap_report).map_err(LlmError::InvalidResponse)?;
    Ok(response)
}

/// Keeps the first five attributes and clamps every score to 0-100.
/// Fails when fewer than five attributes are present.
pub fn normalize_gap_report(mut gap: GapReport) -> Result<GapReport, String> {
    if gap.attributes.len() < PENTAGON_SIZE {
        return Err(format!(
            "expected {PENTAGON_SIZE} attributes, got {}",
            gap.attributes.len()
        ));
    }

    if gap.attributes.len() > PENTAGON_SIZE {
        warn!(
            "Gap report has {} attributes, keeping the first {PENTAGON_SIZE}",
            gap.attributes.len()
        );
        gap.attributes.truncate(PENTAGON_SIZE);
    }

    gap.similarity_score = clamp_score(gap.similarity_score);
    for attribute in &mut gap.attributes {
        attribute.current = clamp_score(attribute.current);
        attribute.target = clamp_score(attribute.target);
    }

    Ok(gap)
}

fn clamp_score(value: f64) -> f64 {
    if value.is_nan() {
        SCORE_MIN
    } else {
        value.clamp(SCORE_MIN, SCORE_MAX)
    }
}
