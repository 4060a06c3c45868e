use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::ClientStatus;

fn schema_url() -> String {
    "https://blackwell.dev/schemas/state.schema.json".to_string()
}

fn schema_version() -> String {
    "1.1".to_string()
}

/// Observed runtime record for a client. One-to-one with a [`ClientManifest`]
/// by client id; mutated by deployment commands and status updates.
///
/// [`ClientManifest`]: crate::ClientManifest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ClientState {
    #[serde(rename = "$schema", default = "schema_url")]
    pub schema: String,
    #[serde(default = "schema_version")]
    pub schema_version: String,

    #[serde(default)]
    pub status: ClientStatus,
    /// Generated CDK stack name.
    #[serde(default)]
    pub stack_name: Option<String>,
    #[serde(default)]
    pub last_deployed_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub estimated_monthly_cost: Option<f64>,
    #[serde(default)]
    pub actual_monthly_cost: Option<f64>,

    /// AWS CloudFormation stack ID once deployed.
    #[serde(default)]
    pub aws_stack_id: Option<String>,
    #[serde(default)]
    pub drift_detected: bool,

    pub updated_at: DateTime<Utc>,
}

impl ClientState {
    /// Fresh draft state carrying a pre-generated stack name.
    #[must_use]
    pub fn new_draft(stack_name: String) -> Self {
        Self {
            schema: schema_url(),
            schema_version: schema_version(),
            status: ClientStatus::Draft,
            stack_name: Some(stack_name),
            last_deployed_at: None,
            estimated_monthly_cost: None,
            actual_monthly_cost: None,
            aws_stack_id: None,
            drift_detected: false,
            updated_at: Utc::now(),
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Default for ClientState {
    fn default() -> Self {
        Self {
            schema: schema_url(),
            schema_version: schema_version(),
            status: ClientStatus::default(),
            stack_name: None,
            last_deployed_at: None,
            estimated_monthly_cost: None,
            actual_monthly_cost: None,
            aws_stack_id: None,
            drift_detected: false,
            updated_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn new_draft_starts_in_draft() {
        let state = ClientState::new_draft("AcmeCo-Prod-DecapCmsTier".to_string());
        assert_eq!(state.status, ClientStatus::Draft);
        assert_eq!(state.stack_name.as_deref(), Some("AcmeCo-Prod-DecapCmsTier"));
        assert!(state.last_deployed_at.is_none());
    }

    #[test]
    fn touch_advances_updated_at() {
        let mut state = ClientState::default();
        let before = state.updated_at;
        state.touch();
        assert!(state.updated_at >= before);
    }
}
