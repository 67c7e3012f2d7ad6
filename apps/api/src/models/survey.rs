use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Life stage the analysis is tuned for. Doubles as the survey's age-group bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserMode {
    #[serde(rename = "Dream Seed")]
    DreamSeed,
    #[serde(rename = "Career Builder")]
    CareerBuilder,
    #[serde(rename = "Pro Navigator")]
    ProNavigator,
}

impl UserMode {
    pub const ALL: [UserMode; 3] = [
        UserMode::DreamSeed,
        UserMode::CareerBuilder,
        UserMode::ProNavigator,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            UserMode::DreamSeed => "Dream Seed",
            UserMode::CareerBuilder => "Career Builder",
            UserMode::ProNavigator => "Pro Navigator",
        }
    }
}

impl fmt::Display for UserMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for UserMode {
    type Err = String;

    /// Accepts the display label in any case, with spaces, dashes or underscores.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();

        match normalized.as_str() {
            "dreamseed" => Ok(UserMode::DreamSeed),
            "careerbuilder" => Ok(UserMode::CareerBuilder),
            "pronavigator" => Ok(UserMode::ProNavigator),
            _ => Err(format!("Unknown mode '{s}'")),
        }
    }
}

/// Coarse low/mid/high scale used for budget and available time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Low,
    #[default]
    Mid,
    High,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Low => "low",
            Level::Mid => "mid",
            Level::High => "high",
        }
    }
}

/// Onboarding answers. Held by the caller for the session, never stored here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveyData {
    pub name: String,
    pub age_group: UserMode,
    pub field: String,
    #[serde(default)]
    pub budget_level: Level,
    #[serde(default)]
    pub available_time: Level,
    pub ultimate_goal: String,
}

/// One submission. Created per request and dropped after the model call.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalysisRequest {
    #[serde(default)]
    pub text: String,
    /// Base64 image data, optionally with a `data:image/...;base64,` prefix.
    pub image: Option<String>,
    pub mode: Option<UserMode>,
    pub survey_context: Option<SurveyData>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_mode_serializes_as_display_label() {
        assert_eq!(
            serde_json::to_value(UserMode::CareerBuilder).unwrap(),
            json!("Career Builder")
        );
        let mode: UserMode = serde_json::from_value(json!("Dream Seed")).unwrap();
        assert_eq!(mode, UserMode::DreamSeed);
    }

    #[test]
    fn test_mode_from_str_is_lenient() {
        assert_eq!("pro navigator".parse::<UserMode>(), Ok(UserMode::ProNavigator));
        assert_eq!("career_builder".parse::<UserMode>(), Ok(UserMode::CareerBuilder));
        assert_eq!("Dream-Seed".parse::<UserMode>(), Ok(UserMode::DreamSeed));
        assert!("astronaut".parse::<UserMode>().is_err());
    }

    #[test]
    fn test_survey_levels_default_to_mid() {
        let survey: SurveyData = serde_json::from_value(json!({
            "name": "Minji",
            "age_group": "Career Builder",
            "field": "data engineering",
            "ultimate_goal": "join a platform team"
        }))
        .unwrap();
        assert_eq!(survey.budget_level, Level::Mid);
        assert_eq!(survey.available_time, Level::Mid);
    }

    #[test]
    fn test_request_allows_image_only() {
        let request: AnalysisRequest = serde_json::from_value(json!({
            "image": "data:image/png;base64,AAAA"
        }))
        .unwrap();
        assert!(request.text.is_empty());
        assert!(request.mode.is_none());
        assert!(request.survey_context.is_none());
    }
}
