use serde::{Deserialize, Serialize};

/// Imperative instruction attached to a profile update.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledAction {
    #[serde(rename = "Action")]
    pub action: String,
    #[serde(rename = "ProceedOnReboot")]
    pub proceed_on_reboot: bool,
}

impl ScheduledAction {
    pub fn deploy() -> Self {
        Self {
            action: "Deploy".to_string(),
            proceed_on_reboot: true,
        }
    }
}

/// Partial profile body carrying only the scheduled actions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProfileActionUpdate {
    #[serde(rename = "ScheduledActions")]
    pub scheduled_actions: Vec<ScheduledAction>,
}

impl ProfileActionUpdate {
    pub fn deploy() -> Self {
        Self {
            scheduled_actions: vec![ScheduledAction::deploy()],
        }
    }
}
