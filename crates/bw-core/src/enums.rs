//! Status and mode enums for Blackwell.
//!
//! All enums use `snake_case` serialization via
//! `#[serde(rename_all = "snake_case")]` so the on-disk JSON matches the
//! registry document format.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// ClientStatus
// ---------------------------------------------------------------------------

/// Deployment status of a client through its lifecycle.
///
/// ```text
/// draft → ready → deploying → deployed
///                           → error
/// deployed → updating / destroying
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ClientStatus {
    #[default]
    Draft,
    Ready,
    Deploying,
    Deployed,
    Error,
    Updating,
    Destroying,
}

impl ClientStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Ready => "ready",
            Self::Deploying => "deploying",
            Self::Deployed => "deployed",
            Self::Error => "error",
            Self::Updating => "updating",
            Self::Destroying => "destroying",
        }
    }
}

impl fmt::Display for ClientStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClientStatus {
    type Err = crate::CoreError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "draft" => Ok(Self::Draft),
            "ready" => Ok(Self::Ready),
            "deploying" => Ok(Self::Deploying),
            "deployed" => Ok(Self::Deployed),
            "error" => Ok(Self::Error),
            "updating" => Ok(Self::Updating),
            "destroying" => Ok(Self::Destroying),
            other => Err(crate::CoreError::Validation(format!(
                "unknown client status '{other}'"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// IntegrationMode
// ---------------------------------------------------------------------------

/// Wiring between providers: simple API calls or event-bus composition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum IntegrationMode {
    Direct,
    #[default]
    EventDriven,
}

impl IntegrationMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Direct => "direct",
            Self::EventDriven => "event_driven",
        }
    }
}

impl fmt::Display for IntegrationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IntegrationMode {
    type Err = crate::CoreError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "direct" => Ok(Self::Direct),
            "event_driven" => Ok(Self::EventDriven),
            other => Err(crate::CoreError::Validation(format!(
                "unknown integration mode '{other}' (expected 'direct' or 'event_driven')"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// ServiceType
// ---------------------------------------------------------------------------

/// Stack shape derived from which providers a client selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ServiceType {
    ComposedStack,
    CmsTier,
    EcommerceTier,
    StaticSite,
}

impl ServiceType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ComposedStack => "composed_stack",
            Self::CmsTier => "cms_tier",
            Self::EcommerceTier => "ecommerce_tier",
            Self::StaticSite => "static_site",
        }
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn status_round_trips_through_str() {
        for status in [
            ClientStatus::Draft,
            ClientStatus::Ready,
            ClientStatus::Deploying,
            ClientStatus::Deployed,
            ClientStatus::Error,
            ClientStatus::Updating,
            ClientStatus::Destroying,
        ] {
            assert_eq!(status.as_str().parse::<ClientStatus>().unwrap(), status);
        }
    }

    #[test]
    fn status_serializes_snake_case() {
        let json = serde_json::to_string(&ClientStatus::Deploying).unwrap();
        assert_eq!(json, "\"deploying\"");
    }

    #[test]
    fn integration_mode_rejects_unknown() {
        assert!("webhooks".parse::<IntegrationMode>().is_err());
        assert_eq!(
            "event_driven".parse::<IntegrationMode>().unwrap(),
            IntegrationMode::EventDriven
        );
    }
}
