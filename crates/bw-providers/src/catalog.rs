//! The provider compatibility matrix.

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::descriptors::{CmsProvider, Complexity, EcommerceProvider, SsgEngine};
use crate::tables;

/// Which class of provider an id belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    Cms,
    Ecommerce,
    Ssg,
}

impl ProviderKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cms => "cms",
            Self::Ecommerce => "ecommerce",
            Self::Ssg => "ssg",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Providers that fit under a monthly budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BudgetProviders {
    pub cms: Vec<String>,
    pub ecommerce: Vec<String>,
}

/// One recommended provider combination with its fixed cost.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Combination {
    pub cms_provider: String,
    pub ecommerce_provider: Option<String>,
    pub ssg_engine: String,
    pub fixed_monthly_cost: f64,
    pub complexity: Complexity,
}

/// Provider compatibility and validation matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    cms: BTreeMap<String, CmsProvider>,
    ecommerce: BTreeMap<String, EcommerceProvider>,
    ssg: BTreeMap<String, SsgEngine>,
}

impl Catalog {
    /// The built-in static tables.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            cms: tables::cms_providers(),
            ecommerce: tables::ecommerce_providers(),
            ssg: tables::ssg_engines(),
        }
    }

    /// Assemble a catalog from externally sourced tables (platform metadata).
    #[must_use]
    pub const fn from_tables(
        cms: BTreeMap<String, CmsProvider>,
        ecommerce: BTreeMap<String, EcommerceProvider>,
        ssg: BTreeMap<String, SsgEngine>,
    ) -> Self {
        Self { cms, ecommerce, ssg }
    }

    #[must_use]
    pub fn cms(&self, id: &str) -> Option<&CmsProvider> {
        self.cms.get(id)
    }

    #[must_use]
    pub fn ecommerce(&self, id: &str) -> Option<&EcommerceProvider> {
        self.ecommerce.get(id)
    }

    #[must_use]
    pub fn ssg(&self, id: &str) -> Option<&SsgEngine> {
        self.ssg.get(id)
    }

    pub fn cms_providers(&self) -> impl Iterator<Item = (&String, &CmsProvider)> {
        self.cms.iter()
    }

    pub fn ecommerce_providers(&self) -> impl Iterator<Item = (&String, &EcommerceProvider)> {
        self.ecommerce.iter()
    }

    pub fn ssg_engines(&self) -> impl Iterator<Item = (&String, &SsgEngine)> {
        self.ssg.iter()
    }

    #[must_use]
    pub fn is_valid(&self, kind: ProviderKind, id: &str) -> bool {
        match kind {
            ProviderKind::Cms => self.cms.contains_key(id),
            ProviderKind::Ecommerce => self.ecommerce.contains_key(id),
            ProviderKind::Ssg => self.ssg.contains_key(id),
        }
    }

    /// All known ids for one provider kind, sorted.
    #[must_use]
    pub fn ids(&self, kind: ProviderKind) -> Vec<String> {
        match kind {
            ProviderKind::Cms => self.cms.keys().cloned().collect(),
            ProviderKind::Ecommerce => self.ecommerce.keys().cloned().collect(),
            ProviderKind::Ssg => self.ssg.keys().cloned().collect(),
        }
    }

    /// Check that every selected provider accepts the chosen SSG engine.
    #[must_use]
    pub fn combination_compatible(
        &self,
        cms_provider: &str,
        ecommerce_provider: Option<&str>,
        ssg_engine: &str,
    ) -> bool {
        if let Some(cms) = self.cms.get(cms_provider) {
            if !cms.compatible_ssg.iter().any(|e| e == ssg_engine) {
                return false;
            }
        }
        if let Some(id) = ecommerce_provider {
            if let Some(ecommerce) = self.ecommerce.get(id) {
                if !ecommerce.compatible_ssg.iter().any(|e| e == ssg_engine) {
                    return false;
                }
            }
        }
        true
    }

    /// SSG engines compatible with the given providers (set intersection
    /// when an e-commerce provider is present).
    #[must_use]
    pub fn compatible_ssg_engines(
        &self,
        cms_provider: &str,
        ecommerce_provider: Option<&str>,
    ) -> Vec<String> {
        let cms_set: BTreeSet<&str> = self
            .cms
            .get(cms_provider)
            .map(|cms| cms.compatible_ssg.iter().map(String::as_str).collect())
            .unwrap_or_default();

        let Some(ecommerce_id) = ecommerce_provider else {
            return cms_set.into_iter().map(str::to_string).collect();
        };

        let ecommerce_set: BTreeSet<&str> = self
            .ecommerce
            .get(ecommerce_id)
            .map(|e| e.compatible_ssg.iter().map(String::as_str).collect())
            .unwrap_or_default();

        cms_set
            .intersection(&ecommerce_set)
            .map(|s| (*s).to_string())
            .collect()
    }

    /// Highest complexity among the selected components. Unknown ids count
    /// as intermediate, matching the platform's default classification.
    #[must_use]
    pub fn complexity_for(
        &self,
        cms_provider: &str,
        ecommerce_provider: Option<&str>,
        ssg_engine: &str,
    ) -> Complexity {
        let cms = self
            .cms
            .get(cms_provider)
            .map_or(Complexity::Intermediate, |p| p.complexity);
        let ssg = self
            .ssg
            .get(ssg_engine)
            .map_or(Complexity::Intermediate, |e| e.complexity);
        let mut level = cms.max(ssg);
        if let Some(id) = ecommerce_provider {
            let ecommerce = self
                .ecommerce
                .get(id)
                .map_or(Complexity::Intermediate, |p| p.complexity);
            level = level.max(ecommerce);
        }
        level
    }

    /// Fixed monthly cost of the provider pair (no AWS infra component).
    #[must_use]
    pub fn fixed_provider_cost(&self, cms_provider: &str, ecommerce_provider: Option<&str>) -> f64 {
        let cms_cost = self.cms.get(cms_provider).map_or(0.0, |p| p.monthly_cost);
        let ecommerce_cost = ecommerce_provider
            .and_then(|id| self.ecommerce.get(id))
            .map_or(0.0, |p| p.monthly_cost);
        cms_cost + ecommerce_cost
    }

    /// Providers whose fixed monthly cost fits under the limit.
    #[must_use]
    pub fn providers_within_budget(&self, max_monthly_cost: f64) -> BudgetProviders {
        BudgetProviders {
            cms: self
                .cms
                .iter()
                .filter(|(_, p)| p.monthly_cost <= max_monthly_cost)
                .map(|(id, _)| id.clone())
                .collect(),
            ecommerce: self
                .ecommerce
                .iter()
                .filter(|(_, p)| p.monthly_cost <= max_monthly_cost)
                .map(|(id, _)| id.clone())
                .collect(),
        }
    }

    /// Every compatible combination (with and without e-commerce), optionally
    /// filtered by budget and complexity, sorted by fixed cost.
    #[must_use]
    pub fn recommended_combinations(
        &self,
        budget: Option<f64>,
        complexity: Option<Complexity>,
    ) -> Vec<Combination> {
        let mut combos = Vec::new();

        for cms_id in self.cms.keys() {
            for ssg_id in self.ssg.keys() {
                let mut candidates: Vec<Option<&str>> = vec![None];
                candidates.extend(self.ecommerce.keys().map(|id| Some(id.as_str())));

                for ecommerce_id in candidates {
                    if !self.combination_compatible(cms_id, ecommerce_id, ssg_id) {
                        continue;
                    }
                    let fixed = self.fixed_provider_cost(cms_id, ecommerce_id);
                    if budget.is_some_and(|limit| fixed > limit) {
                        continue;
                    }
                    let level = self.complexity_for(cms_id, ecommerce_id, ssg_id);
                    if complexity.is_some_and(|wanted| level != wanted) {
                        continue;
                    }
                    combos.push(Combination {
                        cms_provider: cms_id.clone(),
                        ecommerce_provider: ecommerce_id.map(str::to_string),
                        ssg_engine: ssg_id.clone(),
                        fixed_monthly_cost: fixed,
                        complexity: level,
                    });
                }
            }
        }

        combos.sort_by(|a, b| {
            a.fixed_monthly_cost
                .partial_cmp(&b.fixed_monthly_cost)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        combos
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn builtin_tables_are_populated() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.ids(ProviderKind::Cms).len(), 4);
        assert_eq!(catalog.ids(ProviderKind::Ecommerce).len(), 3);
        assert_eq!(catalog.ids(ProviderKind::Ssg).len(), 6);
        assert!(catalog.is_valid(ProviderKind::Cms, "decap"));
        assert!(!catalog.is_valid(ProviderKind::Cms, "wordpress"));
    }

    #[test]
    fn compatibility_requires_both_sides() {
        let catalog = Catalog::builtin();
        // decap supports hugo, shopify_basic does not.
        assert!(catalog.combination_compatible("decap", None, "hugo"));
        assert!(!catalog.combination_compatible("decap", Some("shopify_basic"), "hugo"));
        assert!(catalog.combination_compatible("decap", Some("snipcart"), "hugo"));
    }

    #[test]
    fn ssg_intersection_with_ecommerce() {
        let catalog = Catalog::builtin();
        let engines = catalog.compatible_ssg_engines("decap", Some("shopify_basic"));
        // decap: hugo/eleventy/astro/gatsby x shopify: eleventy/astro/nextjs/nuxt
        assert_eq!(engines, vec!["astro".to_string(), "eleventy".to_string()]);
    }

    #[test]
    fn complexity_takes_the_maximum() {
        let catalog = Catalog::builtin();
        assert_eq!(
            catalog.complexity_for("tina", None, "eleventy"),
            Complexity::Beginner
        );
        assert_eq!(
            catalog.complexity_for("contentful", Some("snipcart"), "astro"),
            Complexity::Enterprise
        );
    }

    #[test]
    fn budget_filter_keeps_free_and_cheap() {
        let catalog = Catalog::builtin();
        let budget = catalog.providers_within_budget(30.0);
        assert_eq!(budget.cms, vec!["decap".to_string(), "tina".to_string()]);
        assert_eq!(
            budget.ecommerce,
            vec!["shopify_basic".to_string(), "snipcart".to_string()]
        );
    }

    #[test]
    fn recommendations_sorted_by_cost() {
        let catalog = Catalog::builtin();
        let combos = catalog.recommended_combinations(Some(50.0), None);
        assert!(!combos.is_empty());
        assert!(combos.windows(2).all(|w| w[0].fixed_monthly_cost <= w[1].fixed_monthly_cost));
        assert!(combos.iter().all(|c| c.fixed_monthly_cost <= 50.0));
    }
}
