//! Migration from the flat `clients.yml` layout that predates the
//! per-client registry directory.

use std::collections::BTreeMap;
use std::path::Path;
use std::str::FromStr;

use bw_core::{
    ClientHistory, ClientManifest, ClientState, ClientStatus, HistoryEvent, IntegrationMode,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::error::RegistryError;

/// Top-level shape of the legacy file: a `clients` mapping keyed by id.
#[derive(Debug, Deserialize)]
pub(crate) struct LegacyFile {
    #[serde(default)]
    pub clients: BTreeMap<String, LegacyRecord>,
}

/// One flat legacy client record, manifest and state fields interleaved.
#[derive(Debug, Deserialize)]
pub(crate) struct LegacyRecord {
    #[serde(default)]
    company_name: String,
    #[serde(default)]
    domain: String,
    #[serde(default)]
    contact_email: String,
    #[serde(default = "default_tier")]
    service_tier: String,
    #[serde(default = "default_management")]
    management_model: String,
    #[serde(default)]
    cms_provider: String,
    #[serde(default)]
    ecommerce_provider: Option<String>,
    #[serde(default)]
    ssg_engine: String,
    #[serde(default)]
    integration_mode: IntegrationMode,
    #[serde(default)]
    cms_settings: BTreeMap<String, Value>,
    #[serde(default)]
    ecommerce_settings: BTreeMap<String, Value>,
    #[serde(default = "default_region")]
    aws_region: String,
    #[serde(default)]
    notes: String,
    #[serde(default)]
    tags: BTreeMap<String, String>,
    #[serde(default = "Utc::now")]
    created_at: DateTime<Utc>,

    #[serde(default)]
    status: String,
    #[serde(default)]
    stack_name: Option<String>,
    #[serde(default)]
    last_deployed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    estimated_monthly_cost: Option<f64>,
    #[serde(default)]
    actual_monthly_cost: Option<f64>,
    #[serde(default = "Utc::now")]
    updated_at: DateTime<Utc>,
    #[serde(default)]
    deployment_history: Vec<LegacyEvent>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LegacyEvent {
    #[serde(default = "Utc::now")]
    timestamp: DateTime<Utc>,
    #[serde(default = "unknown")]
    action: String,
    #[serde(default = "unknown")]
    status: String,
    #[serde(default)]
    details: BTreeMap<String, Value>,
}

fn default_tier() -> String {
    "tier1".to_string()
}

fn default_management() -> String {
    "self_managed".to_string()
}

fn default_region() -> String {
    "us-east-1".to_string()
}

fn unknown() -> String {
    "unknown".to_string()
}

/// Parse the legacy file into (manifest, state, history) triples. Records
/// that cannot be converted are logged and skipped rather than failing the
/// whole migration.
pub(crate) fn parse(
    path: &Path,
) -> Result<Vec<(ClientManifest, ClientState, ClientHistory)>, RegistryError> {
    let raw = std::fs::read_to_string(path).map_err(|e| RegistryError::io(path, e))?;
    let file: LegacyFile = serde_yaml::from_str(&raw).map_err(|source| RegistryError::LegacyYaml {
        path: path.to_path_buf(),
        source,
    })?;

    let mut migrated = Vec::with_capacity(file.clients.len());
    for (client_id, record) in file.clients {
        match convert(&client_id, record) {
            Ok(triple) => migrated.push(triple),
            Err(reason) => {
                warn!(client_id, reason, "skipping unmigratable legacy client");
            }
        }
    }
    Ok(migrated)
}

fn convert(
    client_id: &str,
    record: LegacyRecord,
) -> Result<(ClientManifest, ClientState, ClientHistory), &'static str> {
    if client_id.trim().is_empty() {
        return Err("empty client id");
    }

    let manifest = ClientManifest {
        schema: manifest_schema_url(),
        schema_version: "1.1".to_string(),
        client_id: client_id.to_string(),
        company_name: record.company_name,
        domain: record.domain,
        contact_email: record.contact_email,
        service_tier: record.service_tier,
        management_model: record.management_model,
        cms_provider: record.cms_provider,
        ecommerce_provider: record.ecommerce_provider,
        ssg_engine: record.ssg_engine,
        integration_mode: record.integration_mode,
        cms_settings: record.cms_settings,
        ecommerce_settings: record.ecommerce_settings,
        aws_region: record.aws_region,
        notes: record.notes,
        tags: record.tags,
        created_at: record.created_at,
    };

    let mut state = ClientState::new_draft(
        record
            .stack_name
            .unwrap_or_else(|| manifest.stack_name()),
    );
    state.status = ClientStatus::from_str(&record.status).unwrap_or_default();
    state.last_deployed_at = record.last_deployed_at;
    state.estimated_monthly_cost = record.estimated_monthly_cost;
    state.actual_monthly_cost = record.actual_monthly_cost;
    state.updated_at = record.updated_at;

    let mut history = ClientHistory::default();
    for event in record.deployment_history {
        history.events.push(HistoryEvent {
            timestamp: event.timestamp,
            action: event.action,
            status: event.status,
            details: event.details,
        });
    }

    Ok((manifest, state, history))
}

fn manifest_schema_url() -> String {
    "https://blackwell.dev/schemas/manifest.schema.json".to_string()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const LEGACY_YAML: &str = r#"
clients:
  acme-co:
    company_name: Acme Co
    domain: acme.example
    contact_email: ops@acme.example
    cms_provider: decap
    ssg_engine: astro
    status: deployed
    stack_name: AcmeCo-Prod-DecapCmsTier
    estimated_monthly_cost: 70.3
    deployment_history:
      - action: create
        status: draft
      - action: status_change
        status: deployed
  broken-client: {}
"#;

    #[test]
    fn parses_and_converts_legacy_records() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("clients.yml");
        std::fs::write(&path, LEGACY_YAML).expect("write legacy file");

        let migrated = parse(&path).expect("parse");
        assert_eq!(migrated.len(), 2);

        let (manifest, state, history) = &migrated[0];
        assert_eq!(manifest.client_id, "acme-co");
        assert_eq!(manifest.cms_provider, "decap");
        assert_eq!(state.status, ClientStatus::Deployed);
        assert_eq!(state.stack_name.as_deref(), Some("AcmeCo-Prod-DecapCmsTier"));
        assert_eq!(state.estimated_monthly_cost, Some(70.3));
        assert_eq!(history.events.len(), 2);
        assert_eq!(history.events[1].status, "deployed");
    }

    #[test]
    fn empty_status_falls_back_to_draft() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("clients.yml");
        std::fs::write(&path, LEGACY_YAML).expect("write legacy file");

        let migrated = parse(&path).expect("parse");
        let (_, state, _) = &migrated[1];
        assert_eq!(state.status, ClientStatus::Draft);
    }
}
