//! Helpers shared between command handlers.

use std::str::FromStr;

use bw_core::{ClientStatus, IntegrationMode};
use bw_providers::{Catalog, ProviderKind};

/// Parse an integration mode, listing the accepted values on failure.
pub fn parse_mode(value: &str) -> anyhow::Result<IntegrationMode> {
    IntegrationMode::from_str(value)
        .map_err(|_| anyhow::anyhow!("unknown integration mode '{value}' (expected: direct, event_driven)"))
}

/// Parse a client status filter.
pub fn parse_status(value: &str) -> anyhow::Result<ClientStatus> {
    ClientStatus::from_str(value).map_err(|_| {
        anyhow::anyhow!(
            "unknown status '{value}' (expected: draft, ready, deploying, deployed, error, updating, destroying)"
        )
    })
}

/// Validate provider ids and their mutual compatibility against the catalog.
pub fn validate_combination(
    catalog: &Catalog,
    cms: &str,
    ecommerce: Option<&str>,
    ssg: &str,
) -> anyhow::Result<()> {
    if !catalog.is_valid(ProviderKind::Cms, cms) {
        anyhow::bail!(
            "unknown CMS provider '{cms}' (available: {})",
            catalog.ids(ProviderKind::Cms).join(", ")
        );
    }
    if let Some(id) = ecommerce {
        if !catalog.is_valid(ProviderKind::Ecommerce, id) {
            anyhow::bail!(
                "unknown e-commerce provider '{id}' (available: {})",
                catalog.ids(ProviderKind::Ecommerce).join(", ")
            );
        }
    }
    if !catalog.is_valid(ProviderKind::Ssg, ssg) {
        anyhow::bail!(
            "unknown SSG engine '{ssg}' (available: {})",
            catalog.ids(ProviderKind::Ssg).join(", ")
        );
    }
    if !catalog.combination_compatible(cms, ecommerce, ssg) {
        let compatible = catalog.compatible_ssg_engines(cms, ecommerce);
        anyhow::bail!(
            "'{ssg}' is not compatible with the selected providers (compatible engines: {})",
            if compatible.is_empty() {
                "none".to_string()
            } else {
                compatible.join(", ")
            }
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_parse_accepts_both_modes() {
        assert_eq!(parse_mode("direct").unwrap(), IntegrationMode::Direct);
        assert_eq!(
            parse_mode("event_driven").unwrap(),
            IntegrationMode::EventDriven
        );
        assert!(parse_mode("webhooks").is_err());
    }

    #[test]
    fn combination_validation_names_the_problem() {
        let catalog = Catalog::builtin();
        let err = validate_combination(&catalog, "wordpress", None, "astro").unwrap_err();
        assert!(err.to_string().contains("unknown CMS provider"));

        let err = validate_combination(&catalog, "tina", None, "hugo").unwrap_err();
        assert!(err.to_string().contains("not compatible"));
    }
}
