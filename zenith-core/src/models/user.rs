use serde::{Deserialize, Serialize};

/// Daily hydration goal (ml) used when none is set.
pub const DEFAULT_WATER_GOAL: u32 = 2000;

/// Display settings for the account owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    /// Daily goal in ml
    pub water_goal: u32,
    /// Opaque image reference (usually a data URL)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            name: "Explorador".to_string(),
            water_goal: DEFAULT_WATER_GOAL,
            avatar_url: None,
        }
    }
}

impl UserProfile {
    /// Goal used for progress and streaks; an unset (zero) goal falls back to the default.
    pub fn effective_water_goal(&self) -> u32 {
        if self.water_goal == 0 {
            DEFAULT_WATER_GOAL
        } else {
            self.water_goal
        }
    }
}
