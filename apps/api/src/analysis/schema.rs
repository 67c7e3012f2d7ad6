//! Response schema sent with every analysis call, in Gemini's OpenAPI-subset dialect.
//!
//! Must stay in lockstep with `models::analysis::AnalysisResponse`.

use serde_json::{json, Value};

fn string() -> Value {
    json!({ "type": "STRING" })
}

fn number() -> Value {
    json!({ "type": "NUMBER" })
}

fn object(properties: Value, required: &[&str]) -> Value {
    json!({ "type": "OBJECT", "properties": properties, "required": required })
}

fn array_of(items: Value) -> Value {
    json!({ "type": "ARRAY", "items": items })
}

pub fn analysis_response_schema() -> Value {
    let input_analysis = object(
        json!({
            "data_type": string(),
            "vision_summary": string(),
            "current_vector": string(),
            "target_vector": string(),
        }),
        &["data_type", "vision_summary", "current_vector", "target_vector"],
    );

    let missing_element = object(
        json!({ "item": string(), "impact": string() }),
        &["item", "impact"],
    );

    let attribute = object(
        json!({ "subject": string(), "current": number(), "target": number() }),
        &["subject", "current", "target"],
    );

    let gap_report = object(
        json!({
            "similarity_score": number(),
            "gap_summary": string(),
            "missing_elements": array_of(missing_element),
            "attributes": array_of(attribute),
        }),
        &["similarity_score", "gap_summary", "missing_elements", "attributes"],
    );

    let roadmap_step = object(
        json!({
            "title": string(),
            "description": string(),
            "detail": string(),
            "status": { "type": "STRING", "enum": ["completed", "current", "upcoming"] },
            "icon_type": string(),
        }),
        &["title", "description", "detail", "status", "icon_type"],
    );

    let solution_card = object(
        json!({
            "title": string(),
            "action_type": string(),
            "quest": string(),
            "expected_result": string(),
            "roadmap": array_of(roadmap_step),
        }),
        &["title", "action_type", "quest", "expected_result", "roadmap"],
    );

    let target_requirement = object(
        json!({ "item": string(), "cost_or_condition": string(), "category": string() }),
        &["item", "cost_or_condition", "category"],
    );

    object(
        json!({
            "user_mode": string(),
            "input_analysis": input_analysis,
            "gap_report": gap_report,
            "solution_card": solution_card,
            "target_requirements": array_of(target_requirement),
            "persona_message": string(),
            "required_info_guide": array_of(string()),
        }),
        &[
            "user_mode",
            "input_analysis",
            "gap_report",
            "solution_card",
            "target_requirements",
            "persona_message",
            "required_info_guide",
        ],
    )
}
