//! Platform-sourced catalog resolution.
//!
//! The platform-infrastructure project (an external CDK Python codebase)
//! carries the authoritative stack metadata in its `PlatformStackFactory`.
//! We dump that metadata as JSON through a short `python3 -c` script and
//! transform it into the same descriptor shapes the static tables use. The
//! resolution happens once at startup; any failure (no python, import error,
//! malformed JSON) falls back to the built-in tables.

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use serde_json::Value;

use crate::catalog::Catalog;
use crate::descriptors::{CmsProvider, Complexity, EcommerceProvider, SsgEngine};
use crate::error::ProviderError;

const DUMP_TIMEOUT: Duration = Duration::from_secs(15);

/// Which tables the active catalog was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogSource {
    Static,
    Platform,
}

impl CatalogSource {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Static => "static",
            Self::Platform => "platform",
        }
    }
}

/// A catalog plus provenance, for `platform status` diagnostics.
#[derive(Debug, Clone)]
pub struct ResolvedCatalog {
    pub catalog: Catalog,
    pub source: CatalogSource,
    /// Number of stack metadata entries the platform exported (0 for static).
    pub stack_count: usize,
}

impl ResolvedCatalog {
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            catalog: Catalog::builtin(),
            source: CatalogSource::Static,
            stack_count: 0,
        }
    }
}

/// Resolve the provider catalog, preferring platform metadata when a valid
/// platform path is configured and `force_static` is off.
pub async fn resolve(platform_path: Option<&Path>, force_static: bool) -> ResolvedCatalog {
    if force_static {
        return ResolvedCatalog::fallback();
    }
    let Some(path) = platform_path else {
        return ResolvedCatalog::fallback();
    };

    match dump_platform_metadata(path).await {
        Ok(metadata) => {
            let stack_count = metadata.len();
            if stack_count == 0 {
                tracing::debug!("platform metadata empty, using static catalog");
                return ResolvedCatalog::fallback();
            }
            let catalog = transform(&metadata);
            tracing::info!(stack_count, "provider catalog resolved from platform");
            ResolvedCatalog {
                catalog,
                source: CatalogSource::Platform,
                stack_count,
            }
        }
        Err(error) => {
            tracing::debug!(%error, "platform catalog unavailable, using static tables");
            ResolvedCatalog::fallback()
        }
    }
}

/// Run a python one-liner that imports the platform factory and prints its
/// stack metadata as JSON on stdout.
async fn dump_platform_metadata(
    platform_path: &Path,
) -> Result<serde_json::Map<String, Value>, ProviderError> {
    let script = format!(
        "import json, sys\n\
         sys.path.insert(0, {path:?})\n\
         from shared.factories.platform_stack_factory import PlatformStackFactory\n\
         print(json.dumps(PlatformStackFactory.STACK_METADATA))",
        path = platform_path.display().to_string()
    );

    let output = tokio::time::timeout(
        DUMP_TIMEOUT,
        tokio::process::Command::new("python3")
            .arg("-c")
            .arg(script)
            .current_dir(platform_path)
            .output(),
    )
    .await
    .map_err(|_| ProviderError::PlatformDump("metadata dump timed out".to_string()))??;

    if !output.status.success() {
        return Err(ProviderError::PlatformDump(
            String::from_utf8_lossy(&output.stderr).trim().to_string(),
        ));
    }

    let value: Value = serde_json::from_slice(&output.stdout)?;
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(ProviderError::PlatformDump(
            "metadata dump did not produce a JSON object".to_string(),
        )),
    }
}

/// Transform raw platform stack metadata into catalog descriptor tables.
/// Entries with unknown categories are skipped.
fn transform(metadata: &serde_json::Map<String, Value>) -> Catalog {
    let mut cms = BTreeMap::new();
    let mut ecommerce = BTreeMap::new();
    let mut ssg = BTreeMap::new();
    let builtin = Catalog::builtin();

    for entry in metadata.values() {
        match entry.get("category").and_then(Value::as_str) {
            Some("cms_tier_service") => {
                if let Some(id) = entry.get("cms_provider").and_then(Value::as_str) {
                    cms.insert(
                        id.to_string(),
                        CmsProvider {
                            name: tier_display_name(entry),
                            monthly_cost: max_monthly_cost(entry),
                            features: string_list(entry, "key_features"),
                            compatible_ssg: string_list(entry, "ssg_engine_options"),
                            complexity: complexity_of(entry),
                        },
                    );
                }
            }
            Some("ecommerce_tier_service") => {
                if let Some(id) = entry.get("ecommerce_provider").and_then(Value::as_str) {
                    ecommerce.insert(
                        id.to_string(),
                        EcommerceProvider {
                            name: tier_display_name(entry),
                            monthly_cost: max_monthly_cost(entry),
                            transaction_fee_rate: transaction_fee(id),
                            features: string_list(entry, "key_features"),
                            compatible_ssg: string_list(entry, "ssg_engine_options"),
                            complexity: complexity_of(entry),
                        },
                    );
                }
            }
            Some("ssg_template_business_service" | "foundation_ssg_service") => {
                if let Some(id) = entry.get("ssg_engine").and_then(Value::as_str) {
                    let defaults = builtin.ssg(id);
                    ssg.insert(
                        id.to_string(),
                        SsgEngine {
                            name: defaults.map_or_else(|| title_case(id), |e| e.name.clone()),
                            build_speed: defaults
                                .map_or_else(|| "medium".to_string(), |e| e.build_speed.clone()),
                            language: defaults
                                .map_or_else(|| "javascript".to_string(), |e| e.language.clone()),
                            features: string_list(entry, "key_features"),
                            complexity: complexity_of(entry),
                            ecosystem: defaults
                                .map_or_else(|| "javascript".to_string(), |e| e.ecosystem.clone()),
                            infra_cost_factor: defaults.map_or(1.0, |e| e.infra_cost_factor),
                        },
                    );
                }
            }
            _ => {}
        }
    }

    Catalog::from_tables(cms, ecommerce, ssg)
}

fn tier_display_name(entry: &Value) -> String {
    entry
        .get("tier_name")
        .and_then(Value::as_str)
        .map(|name| name.split(" - ").next().unwrap_or(name).to_string())
        .unwrap_or_default()
}

fn max_monthly_cost(entry: &Value) -> f64 {
    entry
        .get("monthly_cost_range")
        .and_then(Value::as_array)
        .and_then(|range| range.last())
        .and_then(Value::as_f64)
        .unwrap_or(0.0)
}

fn string_list(entry: &Value, key: &str) -> Vec<String> {
    entry
        .get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn complexity_of(entry: &Value) -> Complexity {
    match entry.get("complexity_level").and_then(Value::as_str) {
        Some("low_to_medium") => Complexity::Beginner,
        Some("high") => Complexity::Advanced,
        Some("enterprise") => Complexity::Enterprise,
        _ => Complexity::Intermediate,
    }
}

/// Transaction fee rates are not in the platform metadata; keyed by provider.
fn transaction_fee(provider: &str) -> f64 {
    match provider {
        "snipcart" => 0.02,
        "foxy" => 0.015,
        "shopify_basic" => 0.029,
        _ => 0.0,
    }
}

fn title_case(id: &str) -> String {
    let mut chars = id.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().collect::<String>() + chars.as_str()
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::catalog::ProviderKind;

    #[test]
    fn transform_routes_entries_by_category() {
        let metadata = json!({
            "sanity_cms_tier": {
                "category": "cms_tier_service",
                "cms_provider": "sanity",
                "tier_name": "Sanity CMS - Structured Content",
                "monthly_cost_range": [65.0, 120.0],
                "key_features": ["structured_content"],
                "ssg_engine_options": ["astro", "nextjs"],
                "complexity_level": "high"
            },
            "snipcart_ecommerce": {
                "category": "ecommerce_tier_service",
                "ecommerce_provider": "snipcart",
                "tier_name": "Snipcart - Simple Cart",
                "monthly_cost_range": [25.0, 50.0],
                "key_features": ["embed"],
                "ssg_engine_options": ["astro"],
                "complexity_level": "low_to_medium"
            },
            "hugo_template": {
                "category": "foundation_ssg_service",
                "ssg_engine": "hugo",
                "key_features": ["fast_builds"],
                "complexity_level": "medium_to_high"
            },
            "unrelated": {"category": "something_else"}
        });
        let Value::Object(map) = metadata else {
            unreachable!()
        };

        let catalog = transform(&map);
        let sanity = catalog.cms("sanity").expect("sanity transformed");
        assert_eq!(sanity.name, "Sanity CMS");
        assert_eq!(sanity.monthly_cost, 120.0);
        assert_eq!(sanity.complexity, Complexity::Advanced);

        let snipcart = catalog.ecommerce("snipcart").expect("snipcart transformed");
        assert_eq!(snipcart.transaction_fee_rate, 0.02);
        assert_eq!(snipcart.complexity, Complexity::Beginner);

        let hugo = catalog.ssg("hugo").expect("hugo transformed");
        assert_eq!(hugo.build_speed, "fastest");
        assert_eq!(catalog.ids(ProviderKind::Cms), vec!["sanity".to_string()]);
    }

    #[tokio::test]
    async fn resolve_falls_back_without_platform_path() {
        let resolved = resolve(None, false).await;
        assert_eq!(resolved.source, CatalogSource::Static);
        assert_eq!(resolved.stack_count, 0);
    }

    #[tokio::test]
    async fn resolve_honors_force_static() {
        let resolved = resolve(Some(Path::new("/nonexistent")), true).await;
        assert_eq!(resolved.source, CatalogSource::Static);
    }
}
