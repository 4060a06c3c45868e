use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::enums::{IntegrationMode, ServiceType};

fn schema_url() -> String {
    "https://blackwell.dev/schemas/manifest.schema.json".to_string()
}

fn schema_version() -> String {
    "1.1".to_string()
}

fn default_service_tier() -> String {
    "tier1".to_string()
}

fn default_management_model() -> String {
    "self_managed".to_string()
}

fn default_region() -> String {
    "us-east-1".to_string()
}

/// Desired-state record for a client. Immutable once created; updates go
/// through the registry's explicit update path, which re-validates the whole
/// record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ClientManifest {
    #[serde(rename = "$schema", default = "schema_url")]
    pub schema: String,
    #[serde(default = "schema_version")]
    pub schema_version: String,

    /// Client identifier (kebab-case), unique within the registry.
    pub client_id: String,
    pub company_name: String,
    /// Primary domain.
    pub domain: String,
    pub contact_email: String,

    #[serde(default = "default_service_tier")]
    pub service_tier: String,
    #[serde(default = "default_management_model")]
    pub management_model: String,
    pub cms_provider: String,
    #[serde(default)]
    pub ecommerce_provider: Option<String>,
    pub ssg_engine: String,
    #[serde(default)]
    pub integration_mode: IntegrationMode,

    /// Provider-specific settings, passed through to the platform untouched.
    #[serde(default)]
    pub cms_settings: BTreeMap<String, Value>,
    #[serde(default)]
    pub ecommerce_settings: BTreeMap<String, Value>,

    #[serde(default = "default_region")]
    pub aws_region: String,

    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
    pub created_at: DateTime<Utc>,
}

impl ClientManifest {
    /// Determine the stack shape from the selected providers.
    #[must_use]
    pub fn service_type(&self) -> ServiceType {
        let has_cms = !self.cms_provider.is_empty();
        let has_ecommerce = self
            .ecommerce_provider
            .as_deref()
            .is_some_and(|provider| !provider.is_empty());
        match (has_cms, has_ecommerce) {
            (true, true) => ServiceType::ComposedStack,
            (true, false) => ServiceType::CmsTier,
            (false, true) => ServiceType::EcommerceTier,
            (false, false) => ServiceType::StaticSite,
        }
    }

    /// Generate the CDK stack name using the platform-infrastructure naming
    /// convention. Deterministic: the same (client_id, providers, engine)
    /// always yields the same string.
    #[must_use]
    pub fn stack_name(&self) -> String {
        let client_pascal: String = self.client_id.split('-').map(capitalize).collect();

        // Environment is fixed to Prod until multi-env lands in the platform.
        let env = "Prod";

        let stack_type = match self.service_type() {
            ServiceType::ComposedStack => {
                let cms = capitalize(&self.cms_provider);
                let ecommerce = provider_pascal(self.ecommerce_provider.as_deref().unwrap_or(""));
                format!("{cms}{ecommerce}ComposedStack")
            }
            ServiceType::CmsTier => format!("{}CmsTier", capitalize(&self.cms_provider)),
            ServiceType::EcommerceTier => format!(
                "{}EcommerceTier",
                provider_pascal(self.ecommerce_provider.as_deref().unwrap_or(""))
            ),
            ServiceType::StaticSite => format!("{}StaticStack", capitalize(&self.ssg_engine)),
        };

        format!("{client_pascal}-{env}-{stack_type}")
    }

    /// Validate the manifest fields, returning every issue found.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if self.client_id.trim().is_empty() {
            issues.push("Client id is required".to_string());
        }
        if self.company_name.trim().is_empty() {
            issues.push("Company name is required".to_string());
        }
        if self.domain.trim().is_empty() {
            issues.push("Domain is required".to_string());
        }
        if !self.contact_email.contains('@') {
            issues.push("Valid contact email is required".to_string());
        }
        if self.integration_mode == IntegrationMode::Direct
            && self.service_type() == ServiceType::ComposedStack
        {
            issues.push("Direct integration mode not supported for composed stacks".to_string());
        }

        issues
    }
}

/// First character uppercased, the rest lowercased.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
    })
}

/// Capitalize a provider id, folding the `_basic`/`_advanced` plan suffixes
/// into PascalCase (`shopify_basic` → `ShopifyBasic`).
fn provider_pascal(provider: &str) -> String {
    provider.split('_').map(capitalize).collect()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    use super::*;

    fn manifest(cms: &str, ecommerce: Option<&str>, ssg: &str) -> ClientManifest {
        ClientManifest {
            schema: schema_url(),
            schema_version: schema_version(),
            client_id: "acme-co".to_string(),
            company_name: "Acme Co".to_string(),
            domain: "acme.example".to_string(),
            contact_email: "ops@acme.example".to_string(),
            service_tier: default_service_tier(),
            management_model: default_management_model(),
            cms_provider: cms.to_string(),
            ecommerce_provider: ecommerce.map(str::to_string),
            ssg_engine: ssg.to_string(),
            integration_mode: IntegrationMode::EventDriven,
            cms_settings: BTreeMap::new(),
            ecommerce_settings: BTreeMap::new(),
            aws_region: default_region(),
            notes: String::new(),
            tags: BTreeMap::new(),
            created_at: Utc.with_ymd_and_hms(2025, 1, 15, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn service_type_from_providers() {
        assert_eq!(
            manifest("decap", None, "astro").service_type(),
            ServiceType::CmsTier
        );
        assert_eq!(
            manifest("decap", Some("snipcart"), "astro").service_type(),
            ServiceType::ComposedStack
        );
        assert_eq!(
            manifest("", Some("snipcart"), "astro").service_type(),
            ServiceType::EcommerceTier
        );
        assert_eq!(
            manifest("", None, "astro").service_type(),
            ServiceType::StaticSite
        );
    }

    #[test]
    fn stack_name_is_deterministic() {
        let m = manifest("decap", None, "astro");
        assert_eq!(m.stack_name(), "AcmeCo-Prod-DecapCmsTier");
        assert_eq!(m.stack_name(), m.stack_name());
    }

    #[test]
    fn stack_name_composed_folds_plan_suffix() {
        let m = manifest("sanity", Some("shopify_basic"), "astro");
        assert_eq!(m.stack_name(), "AcmeCo-Prod-SanityShopifyBasicComposedStack");
    }

    #[test]
    fn stack_name_static_site_uses_engine() {
        let m = manifest("", None, "astro");
        assert_eq!(m.stack_name(), "AcmeCo-Prod-AstroStaticStack");
    }

    #[test]
    fn validate_flags_bad_email_and_direct_composed() {
        let mut m = manifest("decap", Some("snipcart"), "astro");
        m.contact_email = "not-an-email".to_string();
        m.integration_mode = IntegrationMode::Direct;
        let issues = m.validate();
        assert!(issues.iter().any(|i| i.contains("contact email")));
        assert!(issues.iter().any(|i| i.contains("composed stacks")));
    }

    #[test]
    fn manifest_json_uses_schema_alias() {
        let json = serde_json::to_value(manifest("decap", None, "astro")).unwrap();
        assert!(json.get("$schema").is_some());
        assert_eq!(json["schema_version"], "1.1");
    }
}
