use serde::{Deserialize, Serialize};

/// CLI behavior flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorConfig {
    pub verbose: bool,
    /// Skip confirmation prompts on destructive operations.
    pub auto_confirm: bool,
    pub check_updates: bool,
    /// Monthly cost above which cost reports carry a warning, in USD.
    pub cost_alert_threshold: f64,
    pub deployment_timeout_secs: u64,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            auto_confirm: false,
            check_updates: true,
            cost_alert_threshold: 200.0,
            deployment_timeout_secs: 1800,
        }
    }
}
