//! Input and output value types for registry operations.

use std::collections::BTreeMap;

use bw_core::{ClientStatus, IntegrationMode};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

/// Everything needed to register a new client. Optional fields fall back to
/// the platform defaults.
#[derive(Debug, Clone)]
pub struct NewClient {
    pub client_id: String,
    pub company_name: String,
    pub domain: String,
    pub contact_email: String,
    pub cms_provider: String,
    pub ecommerce_provider: Option<String>,
    pub ssg_engine: String,
    pub integration_mode: IntegrationMode,
    pub service_tier: String,
    pub management_model: String,
    pub aws_region: String,
    pub cms_settings: BTreeMap<String, Value>,
    pub ecommerce_settings: BTreeMap<String, Value>,
    pub notes: String,
    pub tags: BTreeMap<String, String>,
}

/// Partial update for a client manifest. `None` means "leave unchanged";
/// `ecommerce_provider: Some(None)` clears the provider.
#[derive(Debug, Clone, Default)]
pub struct ManifestPatch {
    pub company_name: Option<String>,
    pub domain: Option<String>,
    pub contact_email: Option<String>,
    pub cms_provider: Option<String>,
    pub ecommerce_provider: Option<Option<String>>,
    pub ssg_engine: Option<String>,
    pub integration_mode: Option<IntegrationMode>,
    pub service_tier: Option<String>,
    pub management_model: Option<String>,
    pub aws_region: Option<String>,
    pub notes: Option<String>,
}

impl ManifestPatch {
    /// Whether the patch touches a field that feeds stack naming.
    #[must_use]
    pub const fn changes_providers(&self) -> bool {
        self.cms_provider.is_some()
            || self.ecommerce_provider.is_some()
            || self.ssg_engine.is_some()
    }
}

/// Partial update for a client's runtime state.
#[derive(Debug, Clone, Default)]
pub struct StatePatch {
    pub status: Option<ClientStatus>,
    pub estimated_monthly_cost: Option<f64>,
    pub actual_monthly_cost: Option<f64>,
    pub aws_stack_id: Option<Option<String>>,
    pub drift_detected: Option<bool>,
    pub last_deployed_at: Option<DateTime<Utc>>,
}

/// Aggregate view over every registered client.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RegistrySummary {
    pub total_clients: usize,
    pub by_status: BTreeMap<String, usize>,
    pub by_cms_provider: BTreeMap<String, usize>,
    pub by_ssg_engine: BTreeMap<String, usize>,
    pub total_estimated_monthly_cost: f64,
    pub total_actual_monthly_cost: f64,
}
