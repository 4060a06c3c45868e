//! Built-in stack templates: named provider combinations for common site
//! shapes.

use bw_core::IntegrationMode;
use serde::Serialize;

/// A named, pre-validated provider combination.
#[derive(Debug, Clone, Serialize)]
pub struct StackTemplate {
    pub name: &'static str,
    pub description: &'static str,
    pub cms_provider: &'static str,
    pub ecommerce_provider: Option<&'static str>,
    pub ssg_engine: &'static str,
    pub integration_mode: IntegrationMode,
}

pub const TEMPLATES: &[StackTemplate] = &[
    StackTemplate {
        name: "simple-blog",
        description: "Git-backed blog with the fastest build times",
        cms_provider: "decap",
        ecommerce_provider: None,
        ssg_engine: "eleventy",
        integration_mode: IntegrationMode::Direct,
    },
    StackTemplate {
        name: "business-site",
        description: "Marketing site with visual editing",
        cms_provider: "tina",
        ecommerce_provider: None,
        ssg_engine: "astro",
        integration_mode: IntegrationMode::Direct,
    },
    StackTemplate {
        name: "e-commerce",
        description: "Structured content plus a storefront",
        cms_provider: "sanity",
        ecommerce_provider: Some("snipcart"),
        ssg_engine: "astro",
        integration_mode: IntegrationMode::EventDriven,
    },
    StackTemplate {
        name: "advanced-cms",
        description: "Enterprise content modeling on Gatsby",
        cms_provider: "contentful",
        ecommerce_provider: None,
        ssg_engine: "gatsby",
        integration_mode: IntegrationMode::EventDriven,
    },
    StackTemplate {
        name: "full-stack",
        description: "Enterprise CMS with Shopify checkout",
        cms_provider: "contentful",
        ecommerce_provider: Some("shopify_basic"),
        ssg_engine: "nextjs",
        integration_mode: IntegrationMode::EventDriven,
    },
];

/// Look up a template by name.
#[must_use]
pub fn find(name: &str) -> Option<&'static StackTemplate> {
    TEMPLATES.iter().find(|t| t.name == name)
}

/// All template names, for error messages.
#[must_use]
pub fn names() -> Vec<&'static str> {
    TEMPLATES.iter().map(|t| t.name).collect()
}

#[cfg(test)]
mod tests {
    use bw_providers::Catalog;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn find_is_exact_match() {
        assert!(find("simple-blog").is_some());
        assert!(find("simple").is_none());
    }

    #[test]
    fn every_template_is_a_compatible_combination() {
        let catalog = Catalog::builtin();
        for template in TEMPLATES {
            assert!(
                catalog.combination_compatible(
                    template.cms_provider,
                    template.ecommerce_provider,
                    template.ssg_engine,
                ),
                "template {} should be compatible",
                template.name
            );
        }
    }

    #[test]
    fn template_names_are_unique() {
        let mut seen = names();
        seen.sort_unstable();
        let len_before = seen.len();
        seen.dedup();
        assert_eq!(seen.len(), len_before);
    }
}
