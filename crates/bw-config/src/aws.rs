use serde::{Deserialize, Serialize};

/// AWS profile and region selection for deployments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AwsConfig {
    pub profile: String,
    pub region: String,
    /// Detected via `aws sts get-caller-identity` when absent.
    pub account_id: Option<String>,
}

impl Default for AwsConfig {
    fn default() -> Self {
        Self {
            profile: "default".to_string(),
            region: "us-east-1".to_string(),
            account_id: None,
        }
    }
}
