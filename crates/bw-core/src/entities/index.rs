use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::manifest::ClientManifest;
use crate::entities::state::ClientState;
use crate::enums::ClientStatus;

fn schema_url() -> String {
    "https://blackwell.dev/schemas/index.schema.json".to_string()
}

fn index_version() -> String {
    "2.0".to_string()
}

/// Denormalized summary of one client for fast listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct IndexEntry {
    pub id: String,
    pub domain: String,
    pub status: ClientStatus,
    pub region: String,
    pub tier: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Registry index for fast client discovery. Rebuilt/updated whenever a
/// client is created, updated, or deleted; written after the per-client
/// files (no stronger consistency guarantee is provided).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RegistryIndex {
    #[serde(rename = "$schema", default = "schema_url")]
    pub schema: String,
    #[serde(default = "index_version")]
    pub version: String,
    pub last_updated: DateTime<Utc>,
    #[serde(default)]
    pub clients: Vec<IndexEntry>,
}

impl RegistryIndex {
    /// Add or replace the entry for a client.
    pub fn upsert(&mut self, manifest: &ClientManifest, state: &ClientState) {
        self.clients.retain(|entry| entry.id != manifest.client_id);
        self.clients.push(IndexEntry {
            id: manifest.client_id.clone(),
            domain: manifest.domain.clone(),
            status: state.status,
            region: manifest.aws_region.clone(),
            tier: manifest.service_tier.clone(),
            created_at: manifest.created_at,
            updated_at: state.updated_at,
        });
        self.last_updated = Utc::now();
    }

    /// Remove a client's entry. Returns whether anything was removed.
    pub fn remove(&mut self, client_id: &str) -> bool {
        let before = self.clients.len();
        self.clients.retain(|entry| entry.id != client_id);
        let removed = self.clients.len() != before;
        if removed {
            self.last_updated = Utc::now();
        }
        removed
    }

    #[must_use]
    pub fn contains(&self, client_id: &str) -> bool {
        self.clients.iter().any(|entry| entry.id == client_id)
    }
}

impl Default for RegistryIndex {
    fn default() -> Self {
        Self {
            schema: schema_url(),
            version: index_version(),
            last_updated: Utc::now(),
            clients: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::enums::IntegrationMode;

    fn manifest(id: &str) -> ClientManifest {
        ClientManifest {
            schema: String::new(),
            schema_version: "1.1".to_string(),
            client_id: id.to_string(),
            company_name: "Acme".to_string(),
            domain: format!("{id}.example"),
            contact_email: "ops@acme.example".to_string(),
            service_tier: "tier1".to_string(),
            management_model: "self_managed".to_string(),
            cms_provider: "decap".to_string(),
            ecommerce_provider: None,
            ssg_engine: "astro".to_string(),
            integration_mode: IntegrationMode::EventDriven,
            cms_settings: BTreeMap::new(),
            ecommerce_settings: BTreeMap::new(),
            aws_region: "us-east-1".to_string(),
            notes: String::new(),
            tags: BTreeMap::new(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn upsert_replaces_existing_entry() {
        let mut index = RegistryIndex::default();
        let m = manifest("acme-co");
        let mut state = ClientState::new_draft(m.stack_name());

        index.upsert(&m, &state);
        state.status = ClientStatus::Deployed;
        index.upsert(&m, &state);

        assert_eq!(index.clients.len(), 1);
        assert_eq!(index.clients[0].status, ClientStatus::Deployed);
    }

    #[test]
    fn remove_is_idempotent() {
        let mut index = RegistryIndex::default();
        let m = manifest("acme-co");
        index.upsert(&m, &ClientState::new_draft(m.stack_name()));

        assert!(index.remove("acme-co"));
        assert!(!index.remove("acme-co"));
        assert!(!index.contains("acme-co"));
    }
}
