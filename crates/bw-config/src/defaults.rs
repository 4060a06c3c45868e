use serde::{Deserialize, Serialize};

/// Defaults applied to new clients when command-line flags are omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    pub cms_provider: String,
    pub ecommerce_provider: String,
    pub ssg_engine: String,
    pub integration_mode: String,
    pub service_tier: String,
    pub management_model: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            cms_provider: "decap".to_string(),
            ecommerce_provider: "snipcart".to_string(),
            ssg_engine: "astro".to_string(),
            integration_mode: "event_driven".to_string(),
            service_tier: "tier1".to_string(),
            management_model: "self_managed".to_string(),
        }
    }
}
