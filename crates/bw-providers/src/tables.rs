//! Built-in provider tables.
//!
//! These mirror the platform-infrastructure defaults and serve as the
//! fallback when the platform catalog cannot be resolved.

use std::collections::BTreeMap;

use crate::descriptors::{CmsProvider, Complexity, EcommerceProvider, SsgEngine};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

pub fn cms_providers() -> BTreeMap<String, CmsProvider> {
    BTreeMap::from([
        (
            "decap".to_string(),
            CmsProvider {
                name: "Decap CMS".to_string(),
                monthly_cost: 0.0,
                features: strings(&["git_based", "free", "open_source"]),
                compatible_ssg: strings(&["hugo", "eleventy", "astro", "gatsby"]),
                complexity: Complexity::Intermediate,
            },
        ),
        (
            "tina".to_string(),
            CmsProvider {
                name: "Tina CMS".to_string(),
                monthly_cost: 29.0,
                features: strings(&["visual_editing", "git_based", "live_preview"]),
                compatible_ssg: strings(&["astro", "eleventy", "nextjs", "nuxt"]),
                complexity: Complexity::Beginner,
            },
        ),
        (
            "sanity".to_string(),
            CmsProvider {
                name: "Sanity CMS".to_string(),
                monthly_cost: 99.0,
                features: strings(&["structured_content", "real_time", "api_first"]),
                compatible_ssg: strings(&["astro", "gatsby", "nextjs", "nuxt"]),
                complexity: Complexity::Advanced,
            },
        ),
        (
            "contentful".to_string(),
            CmsProvider {
                name: "Contentful".to_string(),
                monthly_cost: 300.0,
                features: strings(&["enterprise", "cdn", "multi_env", "workflows"]),
                compatible_ssg: strings(&["gatsby", "astro", "nextjs", "nuxt"]),
                complexity: Complexity::Enterprise,
            },
        ),
    ])
}

pub fn ecommerce_providers() -> BTreeMap<String, EcommerceProvider> {
    BTreeMap::from([
        (
            "snipcart".to_string(),
            EcommerceProvider {
                name: "Snipcart".to_string(),
                monthly_cost: 29.0,
                transaction_fee_rate: 0.02,
                features: strings(&["simple", "embed", "quick_setup"]),
                compatible_ssg: strings(&["hugo", "eleventy", "astro", "gatsby"]),
                complexity: Complexity::Beginner,
            },
        ),
        (
            "foxy".to_string(),
            EcommerceProvider {
                name: "Foxy.io".to_string(),
                monthly_cost: 75.0,
                transaction_fee_rate: 0.015,
                features: strings(&["advanced", "customizable", "api_rich"]),
                compatible_ssg: strings(&["hugo", "eleventy", "astro", "gatsby"]),
                complexity: Complexity::Intermediate,
            },
        ),
        (
            "shopify_basic".to_string(),
            EcommerceProvider {
                name: "Shopify Basic".to_string(),
                monthly_cost: 29.0,
                transaction_fee_rate: 0.029,
                features: strings(&["full_platform", "inventory", "analytics"]),
                compatible_ssg: strings(&["eleventy", "astro", "nextjs", "nuxt"]),
                complexity: Complexity::Intermediate,
            },
        ),
    ])
}

pub fn ssg_engines() -> BTreeMap<String, SsgEngine> {
    BTreeMap::from([
        (
            "hugo".to_string(),
            SsgEngine {
                name: "Hugo".to_string(),
                build_speed: "fastest".to_string(),
                language: "go".to_string(),
                features: strings(&["blazing_fast", "simple", "powerful"]),
                complexity: Complexity::Intermediate,
                ecosystem: "go_templates".to_string(),
                infra_cost_factor: 0.8,
            },
        ),
        (
            "eleventy".to_string(),
            SsgEngine {
                name: "Eleventy".to_string(),
                build_speed: "fast".to_string(),
                language: "javascript".to_string(),
                features: strings(&["flexible", "simple", "zero_config"]),
                complexity: Complexity::Beginner,
                ecosystem: "javascript".to_string(),
                infra_cost_factor: 0.9,
            },
        ),
        (
            "astro".to_string(),
            SsgEngine {
                name: "Astro".to_string(),
                build_speed: "fast".to_string(),
                language: "javascript".to_string(),
                features: strings(&["component_islands", "framework_agnostic", "modern"]),
                complexity: Complexity::Intermediate,
                ecosystem: "multi_framework".to_string(),
                infra_cost_factor: 1.0,
            },
        ),
        (
            "gatsby".to_string(),
            SsgEngine {
                name: "Gatsby".to_string(),
                build_speed: "medium".to_string(),
                language: "javascript".to_string(),
                features: strings(&["react_based", "graphql", "plugin_ecosystem"]),
                complexity: Complexity::Advanced,
                ecosystem: "react".to_string(),
                infra_cost_factor: 1.2,
            },
        ),
        (
            "nextjs".to_string(),
            SsgEngine {
                name: "Next.js".to_string(),
                build_speed: "medium".to_string(),
                language: "javascript".to_string(),
                features: strings(&["react_framework", "ssr", "enterprise_ready"]),
                complexity: Complexity::Advanced,
                ecosystem: "react".to_string(),
                infra_cost_factor: 1.1,
            },
        ),
        (
            "nuxt".to_string(),
            SsgEngine {
                name: "Nuxt.js".to_string(),
                build_speed: "medium".to_string(),
                language: "javascript".to_string(),
                features: strings(&["vue_framework", "ssr", "modular"]),
                complexity: Complexity::Advanced,
                ecosystem: "vue".to_string(),
                infra_cost_factor: 1.1,
            },
        ),
    ])
}
