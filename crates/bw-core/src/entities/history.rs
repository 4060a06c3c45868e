use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

fn schema_url() -> String {
    "https://blackwell.dev/schemas/history.schema.json".to_string()
}

fn schema_version() -> String {
    "1.1".to_string()
}

/// Single timestamped event in a client's deployment history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct HistoryEvent {
    pub timestamp: DateTime<Utc>,
    /// Action performed (`create`, `update`, `status_change`, `delete`, ...).
    pub action: String,
    /// Resulting status.
    pub status: String,
    #[serde(default)]
    pub details: BTreeMap<String, Value>,
}

/// Append-only event log for a client. Grows monotonically; never mutated,
/// only appended and deleted together with the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ClientHistory {
    #[serde(rename = "$schema", default = "schema_url")]
    pub schema: String,
    #[serde(default = "schema_version")]
    pub schema_version: String,
    #[serde(default)]
    pub events: Vec<HistoryEvent>,
}

impl ClientHistory {
    /// Append an event stamped with the current time.
    pub fn record(
        &mut self,
        action: impl Into<String>,
        status: impl Into<String>,
        details: BTreeMap<String, Value>,
    ) {
        self.events.push(HistoryEvent {
            timestamp: Utc::now(),
            action: action.into(),
            status: status.into(),
            details,
        });
    }
}

impl Default for ClientHistory {
    fn default() -> Self {
        Self {
            schema: schema_url(),
            schema_version: schema_version(),
            events: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn record_appends_in_order() {
        let mut history = ClientHistory::default();
        history.record("create", "draft", BTreeMap::new());
        history.record(
            "status_change",
            "deployed",
            BTreeMap::from([("old_status".to_string(), json!("deploying"))]),
        );

        assert_eq!(history.events.len(), 2);
        assert_eq!(history.events[0].action, "create");
        assert_eq!(history.events[1].status, "deployed");
        assert!(history.events[0].timestamp <= history.events[1].timestamp);
    }
}
