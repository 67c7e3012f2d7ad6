use serde::Serialize;

use crate::models::survey::UserMode;

/// Presentation and persona metadata for one mode.
#[derive(Debug, Clone, Serialize)]
pub struct ModeProfile {
    pub mode: UserMode,
    pub label: &'static str,
    pub target_ages: &'static str,
    pub description: &'static str,
    /// Voice the persona message should carry.
    pub tone: &'static str,
    /// Persona the model adopts, used in the system instruction.
    pub persona: &'static str,
    /// What the advice should concentrate on, used in the system instruction.
    pub focus: &'static str,
}

impl UserMode {
    pub fn profile(&self) -> ModeProfile {
        match self {
            UserMode::DreamSeed => ModeProfile {
                mode: *self,
                label: self.label(),
                target_ages: "3-13",
                description: "Connects a child's boundless imagination to real-world dreams.",
                tone: "Iron Man / kindergarten teacher",
                persona: "A warm mentor who helps a child grow.",
                focus: "Concrete activities a child and parent can do together.",
            },
            UserMode::CareerBuilder => ModeProfile {
                mode: *self,
                label: self.label(),
                target_ages: "19-29",
                description: "Closes the practical skills gap with clear-eyed data analysis.",
                tone: "Steve Jobs / no-nonsense advisor",
                persona: "A cool-headed but courteous career coach.",
                focus: "Tech stacks, certifications, and hiring-market trends.",
            },
            UserMode::ProNavigator => ModeProfile {
                mode: *self,
                label: self.label(),
                target_ages: "30+",
                description: "Charts the path to a second peak with strategic insight.",
                tone: "McKinsey consultant / strategist",
                persona: "A business strategy consultant.",
                focus: "Professional vocabulary, networking, leadership, MBA-level strategy.",
            },
        }
    }
}

/// Every mode's profile, in display order.
pub fn mode_catalog() -> Vec<ModeProfile> {
    UserMode::ALL.iter().map(UserMode::profile).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_covers_every_mode_in_order() {
        let modes: Vec<UserMode> = mode_catalog().iter().map(|p| p.mode).collect();
        assert_eq!(modes, UserMode::ALL.to_vec());
    }

    #[test]
    fn test_profile_label_matches_mode() {
        for mode in UserMode::ALL {
            assert_eq!(mode.profile().label, mode.to_string());
        }
    }
}
