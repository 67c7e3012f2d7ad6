// Shared prompt fragments.
// Each service that needs model calls defines its own prompts.rs alongside it.
// This file contains cross-cutting pieces every system instruction ends with.

/// Output rules appended to every system instruction that expects JSON back.
/// `{language}` is replaced with the configured output language.
pub const JSON_OUTPUT_RULES: &str = "\
    [OUTPUT RULES]\n\
    - Follow the declared response schema exactly. Do not add or drop fields.\n\
    - Respond with a single JSON object only. No markdown code fences, no commentary.\n\
    - Every human-readable string value MUST be written in {language}.";

/// Renders `JSON_OUTPUT_RULES` for a concrete output language.
pub fn json_output_rules(language: &str) -> String {
    JSON_OUTPUT_RULES.replace("{language}", language)
}
