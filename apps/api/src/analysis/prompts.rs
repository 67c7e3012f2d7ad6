// Prompt templates for the gap analysis call.

use crate::llm_client::prompts::json_output_rules;
use crate::models::survey::UserMode;

/// Fixed system instruction. Placeholders: `{language}`, `{mode_guides}`, `{output_rules}`.
pub const ANALYSIS_SYSTEM_TEMPLATE: &str = "\
You are the main AI engine of 'North Star Universe'. You analyze the user's situation \
and lay out a concrete growth path toward their goal. Write every response in {language}.

---
[CORE PRINCIPLES]
1. Register: use a polite, respectful register throughout.
2. Substance: prefer realistic, immediately actionable steps and data-driven analysis \
over abstract encouragement.
3. Pentagon chart (attributes): gap_report.attributes MUST contain EXACTLY 5 entries, \
each scored 0-100 for current and target (e.g. technical skill, networking, funding, \
experience, academic depth; pick the five that fit the mode).
4. Target requirements: produce 4-5 concrete resources the final goal needs \
(tuition, certification fees, time required, tools, and so on).
5. Gap impact: for every entry in missing_elements, explain in the impact field \
why that element matters for reaching the goal.
6. Context first: the supplied user background context (name, interest, budget, time) \
takes priority over everything else.

---
{mode_guides}
---
{output_rules}";

/// Labelled survey block prepended to the user's text.
pub const SURVEY_CONTEXT_TEMPLATE: &str = "\
[User background context]
- Name: {name}
- Life stage: {age_group}
- Main interest: {field}
- Budget level: {budget_level}
- Available time: {available_time}
- Ultimate goal: {ultimate_goal}";

/// Renders the system instruction for one output language.
pub fn analysis_system_instruction(language: &str) -> String {
    ANALYSIS_SYSTEM_TEMPLATE
        .replace("{mode_guides}", &mode_guides())
        .replace("{output_rules}", &json_output_rules(language))
        .replace("{language}", language)
}

fn mode_guides() -> String {
    UserMode::ALL
        .iter()
        .zip(['A', 'B', 'C'])
        .map(|(mode, letter)| {
            let profile = mode.profile();
            format!(
                "### MODE {letter}: {} (ages {})\n* Persona: {}\n* Tone: {}\n",
                profile.label, profile.target_ages, profile.persona, profile.focus
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
