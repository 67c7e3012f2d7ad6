use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::survey::UserMode;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputAnalysis {
    pub data_type: String,
    pub vision_summary: String,
    pub current_vector: String,
    pub target_vector: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissingElement {
    pub item: String,
    /// Why closing this gap matters for the goal.
    pub impact: String,
}

/// One axis of the attribute pentagon. Values are on a 0-100 scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub subject: String,
    pub current: f64,
    pub target: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GapReport {
    pub similarity_score: f64,
    pub gap_summary: String,
    pub missing_elements: Vec<MissingElement>,
    pub attributes: Vec<Attribute>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoadmapStatus {
    Completed,
    Current,
    Upcoming,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadmapStep {
    pub title: String,
    pub description: String,
    pub detail: String,
    pub status: RoadmapStatus,
    pub icon_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolutionCard {
    pub title: String,
    pub action_type: String,
    pub quest: String,
    pub expected_result: String,
    pub roadmap: Vec<RoadmapStep>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetRequirement {
    pub item: String,
    pub cost_or_condition: String,
    pub category: String,
}

/// The model's structured verdict, exactly as the response schema declares it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    /// Kept as the raw string the model chose; see [`AnalysisResponse::mode`].
    pub user_mode: String,
    pub input_analysis: InputAnalysis,
    pub gap_report: GapReport,
    pub solution_card: SolutionCard,
    pub target_requirements: Vec<TargetRequirement>,
    pub persona_message: String,
    pub required_info_guide: Vec<String>,
}

impl AnalysisResponse {
    /// The mode the model answered in. Unrecognized labels fall back to Pro Navigator.
    pub fn mode(&self) -> UserMode {
        self.user_mode.parse().unwrap_or(UserMode::ProNavigator)
    }
}

/// An analysis stamped with an id and creation time for the caller to key on.
#[derive(Debug, Clone, Serialize)]
pub struct SavedReport {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub report: AnalysisResponse,
}

impl SavedReport {
    pub fn new(report: AnalysisResponse) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            report,
        }
    }
}

#[cfg(test)]
pub(crate) fn sample_response() -> AnalysisResponse {
    let attribute = |subject: &str, current: f64, target: f64| Attribute {
        subject: subject.to_string(),
        current,
        target,
    };

    AnalysisResponse {
        user_mode: "Career Builder".to_string(),
        input_analysis: InputAnalysis {
            data_type: "text".to_string(),
            vision_summary: "No image provided".to_string(),
            current_vector: "Junior backend developer with two years of Java".to_string(),
            target_vector: "Platform engineer at a cloud provider".to_string(),
        },
        gap_report: GapReport {
            similarity_score: 60.0,
            gap_summary: "Strong fundamentals, little distributed systems exposure".to_string(),
            missing_elements: ["Kubernetes", "Go", "On-call experience", "Networking"]
                .iter()
                .map(|item| MissingElement {
                    item: item.to_string(),
                    impact: format!("{item} is screened for in platform interviews"),
                })
                .collect(),
            attributes: vec![
                attribute("Technical depth", 40.0, 90.0),
                attribute("Networking", 30.0, 70.0),
                attribute("Budget", 50.0, 60.0),
                attribute("Experience", 35.0, 80.0),
                attribute("Academics", 70.0, 75.0),
            ],
        },
        solution_card: SolutionCard {
            title: "Operator track".to_string(),
            action_type: "skill".to_string(),
            quest: "Run a three-node cluster for a month".to_string(),
            expected_result: "Credible platform portfolio".to_string(),
            roadmap: vec![
                RoadmapStep {
                    title: "Foundations".to_string(),
                    description: "Linux and networking basics".to_string(),
                    detail: "Finish a networking course".to_string(),
                    status: RoadmapStatus::Completed,
                    icon_type: "base".to_string(),
                },
                RoadmapStep {
                    title: "Cluster".to_string(),
                    description: "Operate Kubernetes".to_string(),
                    detail: "Self-host a cluster and break it on purpose".to_string(),
                    status: RoadmapStatus::Current,
                    icon_type: "skill".to_string(),
                },
                RoadmapStep {
                    title: "Apply".to_string(),
                    description: "Target platform roles".to_string(),
                    detail: "Apply to five teams".to_string(),
                    status: RoadmapStatus::Upcoming,
                    icon_type: "target".to_string(),
                },
            ],
        },
        target_requirements: vec![TargetRequirement {
            item: "CKA certification".to_string(),
            cost_or_condition: "$395 exam fee".to_string(),
            category: "cost".to_string(),
        }],
        persona_message: "You are closer than the numbers suggest.".to_string(),
        required_info_guide: vec!["Which cloud do you use at work?".to_string()],
    }
}
