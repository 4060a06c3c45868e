//! Cost estimation, comparison, and optimization heuristics.

use bw_core::{ClientManifest, IntegrationMode};
use bw_providers::Catalog;
use serde::Serialize;

use crate::breakdown::{CostBreakdown, CostTier};
use crate::error::PricingError;

/// Base AWS services estimate (CloudFront, S3, Route53, CodeBuild floor).
const BASE_AWS_MONTHLY: f64 = 45.0;
/// EventBridge/SNS add-on when composition runs event-driven.
const EVENT_DRIVEN_ADDON: f64 = 15.0;
const DATA_TRANSFER_MONTHLY: f64 = 5.0;
const STORAGE_MONTHLY: f64 = 5.0;
const COST_PER_BUILD: f64 = 0.01;
pub const DEFAULT_MONTHLY_BUILDS: u32 = 30;

/// Inputs the cost model depends on. Pure function of these plus the
/// catalog; nothing else feeds the numbers.
#[derive(Debug, Clone, PartialEq)]
pub struct CostInputs {
    pub cms_provider: String,
    pub ecommerce_provider: Option<String>,
    pub ssg_engine: String,
    pub integration_mode: IntegrationMode,
}

impl From<&ClientManifest> for CostInputs {
    fn from(manifest: &ClientManifest) -> Self {
        Self {
            cms_provider: manifest.cms_provider.clone(),
            ecommerce_provider: manifest.ecommerce_provider.clone(),
            ssg_engine: manifest.ssg_engine.clone(),
            integration_mode: manifest.integration_mode,
        }
    }
}

/// One entry of a provider comparison, sorted by total cost.
#[derive(Debug, Clone, Serialize)]
pub struct Comparison {
    pub cms_provider: String,
    pub ecommerce_provider: Option<String>,
    pub ssg_engine: String,
    pub breakdown: CostBreakdown,
}

/// A cost optimization hint with its measured saving.
#[derive(Debug, Clone, Serialize)]
pub struct Suggestion {
    pub kind: &'static str,
    pub suggestion: String,
    pub reason: String,
    pub estimated_savings: f64,
    pub trade_offs: Vec<String>,
}

/// Produces [`CostBreakdown`]s for client configurations against a resolved
/// provider catalog.
pub struct CostCalculator<'a> {
    catalog: &'a Catalog,
}

impl<'a> CostCalculator<'a> {
    #[must_use]
    pub const fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// Calculate the monthly cost breakdown for a client configuration.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::UnknownProvider`] when any selected provider
    /// id is absent from the catalog.
    pub fn estimate(
        &self,
        inputs: &CostInputs,
        monthly_sales: f64,
        monthly_builds: u32,
    ) -> Result<CostBreakdown, PricingError> {
        let cms = self
            .catalog
            .cms(&inputs.cms_provider)
            .ok_or_else(|| PricingError::UnknownProvider {
                kind: "cms",
                id: inputs.cms_provider.clone(),
            })?;

        let ecommerce = inputs
            .ecommerce_provider
            .as_deref()
            .map(|id| {
                self.catalog
                    .ecommerce(id)
                    .ok_or_else(|| PricingError::UnknownProvider {
                        kind: "ecommerce",
                        id: id.to_string(),
                    })
            })
            .transpose()?;

        let ssg = self
            .catalog
            .ssg(&inputs.ssg_engine)
            .ok_or_else(|| PricingError::UnknownProvider {
                kind: "ssg",
                id: inputs.ssg_engine.clone(),
            })?;

        let cms_cost = cms.monthly_cost;
        let ecommerce_cost = ecommerce.map_or(0.0, |p| p.monthly_cost);
        let transaction_fee_rate = ecommerce.map_or(0.0, |p| p.transaction_fee_rate);

        let hosting_cost = BASE_AWS_MONTHLY * ssg.infra_cost_factor;
        let event_infrastructure_cost = match inputs.integration_mode {
            IntegrationMode::EventDriven => EVENT_DRIVEN_ADDON,
            IntegrationMode::Direct => 0.0,
        };
        let build_cost = COST_PER_BUILD * f64::from(monthly_builds);

        let fixed_monthly_cost = cms_cost
            + ecommerce_cost
            + hosting_cost
            + event_infrastructure_cost
            + DATA_TRANSFER_MONTHLY
            + STORAGE_MONTHLY
            + build_cost;
        let estimated_variable_cost = monthly_sales * transaction_fee_rate;
        let total_estimated_cost = fixed_monthly_cost + estimated_variable_cost;

        Ok(CostBreakdown {
            cms_cost,
            ecommerce_cost,
            hosting_cost,
            event_infrastructure_cost,
            data_transfer_cost: DATA_TRANSFER_MONTHLY,
            storage_cost: STORAGE_MONTHLY,
            build_cost,
            estimated_builds_per_month: monthly_builds,
            transaction_fee_rate,
            fixed_monthly_cost,
            estimated_variable_cost,
            total_estimated_cost,
            tier: CostTier::classify(total_estimated_cost),
            currency: "USD",
        })
    }

    /// Compare every compatible CMS x e-commerce pairing on the base SSG
    /// engine, optionally capped by a budget, sorted by total cost.
    #[must_use]
    pub fn compare(
        &self,
        base: &CostInputs,
        budget_limit: Option<f64>,
        monthly_sales: f64,
    ) -> Vec<Comparison> {
        let mut entries = Vec::new();

        for cms_id in self.catalog.ids(bw_providers::ProviderKind::Cms) {
            let mut candidates: Vec<Option<String>> = vec![None];
            candidates.extend(
                self.catalog
                    .ids(bw_providers::ProviderKind::Ecommerce)
                    .into_iter()
                    .map(Some),
            );

            for ecommerce_id in candidates {
                if !self.catalog.combination_compatible(
                    &cms_id,
                    ecommerce_id.as_deref(),
                    &base.ssg_engine,
                ) {
                    continue;
                }

                let inputs = CostInputs {
                    cms_provider: cms_id.clone(),
                    ecommerce_provider: ecommerce_id.clone(),
                    ssg_engine: base.ssg_engine.clone(),
                    integration_mode: base.integration_mode,
                };
                let Ok(breakdown) = self.estimate(&inputs, monthly_sales, DEFAULT_MONTHLY_BUILDS)
                else {
                    continue;
                };

                if budget_limit.is_some_and(|limit| breakdown.total_estimated_cost > limit) {
                    continue;
                }

                entries.push(Comparison {
                    cms_provider: cms_id.clone(),
                    ecommerce_provider: ecommerce_id,
                    ssg_engine: base.ssg_engine.clone(),
                    breakdown,
                });
            }
        }

        entries.sort_by(|a, b| {
            a.breakdown
                .total_estimated_cost
                .partial_cmp(&b.breakdown.total_estimated_cost)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        entries
    }

    /// Fixed heuristics, each re-running the estimate on the candidate
    /// configuration and reporting the measured delta.
    ///
    /// # Errors
    ///
    /// Propagates [`PricingError`] from pricing the current configuration.
    pub fn optimization_suggestions(
        &self,
        inputs: &CostInputs,
        monthly_sales: f64,
    ) -> Result<Vec<Suggestion>, PricingError> {
        let current = self.estimate(inputs, monthly_sales, DEFAULT_MONTHLY_BUILDS)?;
        let mut suggestions = Vec::new();

        // Event-driven wiring buys nothing without an e-commerce provider.
        if inputs.integration_mode == IntegrationMode::EventDriven
            && inputs.ecommerce_provider.is_none()
        {
            let direct = CostInputs {
                integration_mode: IntegrationMode::Direct,
                ..inputs.clone()
            };
            if let Ok(candidate) = self.estimate(&direct, monthly_sales, DEFAULT_MONTHLY_BUILDS) {
                suggestions.push(Suggestion {
                    kind: "integration_mode",
                    suggestion: "Switch to direct mode for CMS-only sites".to_string(),
                    reason: "Event-driven mode adds infrastructure cost for CMS-only setups"
                        .to_string(),
                    estimated_savings: current.total_estimated_cost
                        - candidate.total_estimated_cost,
                    trade_offs: vec![
                        "Simplified architecture".to_string(),
                        "Re-deploy needed to add e-commerce later".to_string(),
                    ],
                });
            }
        }

        // Heavy build pipelines on expensive stacks.
        if matches!(inputs.ssg_engine.as_str(), "gatsby" | "nextjs")
            && current.total_estimated_cost > 200.0
        {
            if let Some(lighter) = self.lighter_engine(inputs) {
                let candidate_inputs = CostInputs {
                    ssg_engine: lighter.clone(),
                    ..inputs.clone()
                };
                if let Ok(candidate) =
                    self.estimate(&candidate_inputs, monthly_sales, DEFAULT_MONTHLY_BUILDS)
                {
                    suggestions.push(Suggestion {
                        kind: "ssg_engine",
                        suggestion: format!("Consider {lighter} for lower costs"),
                        reason: "Faster builds mean lower infrastructure costs".to_string(),
                        estimated_savings: current.total_estimated_cost
                            - candidate.total_estimated_cost,
                        trade_offs: vec![
                            "Different framework".to_string(),
                            "Potentially faster builds".to_string(),
                        ],
                    });
                }
            }
        }

        Ok(suggestions)
    }

    /// Cheapest compatible engine among the lightweight options.
    fn lighter_engine(&self, inputs: &CostInputs) -> Option<String> {
        ["hugo", "eleventy"]
            .into_iter()
            .find(|engine| {
                self.catalog.combination_compatible(
                    &inputs.cms_provider,
                    inputs.ecommerce_provider.as_deref(),
                    engine,
                )
            })
            .map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn default_monthly_builds_is_visible_at_the_crate_root() {
        assert_eq!(crate::DEFAULT_MONTHLY_BUILDS, DEFAULT_MONTHLY_BUILDS);
    }

    fn inputs(cms: &str, ecommerce: Option<&str>, ssg: &str, mode: IntegrationMode) -> CostInputs {
        CostInputs {
            cms_provider: cms.to_string(),
            ecommerce_provider: ecommerce.map(str::to_string),
            ssg_engine: ssg.to_string(),
            integration_mode: mode,
        }
    }

    #[test]
    fn estimate_is_pure() {
        let catalog = Catalog::builtin();
        let calc = CostCalculator::new(&catalog);
        let input = inputs("sanity", Some("snipcart"), "astro", IntegrationMode::EventDriven);
        let a = calc.estimate(&input, 1000.0, 30).unwrap();
        let b = calc.estimate(&input, 1000.0, 30).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn total_is_fixed_plus_variable() {
        let catalog = Catalog::builtin();
        let calc = CostCalculator::new(&catalog);
        let input = inputs("decap", Some("snipcart"), "hugo", IntegrationMode::EventDriven);
        let breakdown = calc.estimate(&input, 5000.0, 30).unwrap();
        assert!(
            (breakdown.total_estimated_cost
                - (breakdown.fixed_monthly_cost + breakdown.estimated_variable_cost))
                .abs()
                < f64::EPSILON
        );
        assert!((breakdown.estimated_variable_cost - 100.0).abs() < 1e-9);
    }

    #[test]
    fn cms_only_event_driven_site_is_budget_tier() {
        // decap + astro, no e-commerce, no sales.
        let catalog = Catalog::builtin();
        let calc = CostCalculator::new(&catalog);
        let input = inputs("decap", None, "astro", IntegrationMode::EventDriven);
        let breakdown = calc.estimate(&input, 0.0, 30).unwrap();
        assert!((breakdown.cms_cost).abs() < f64::EPSILON);
        assert!((breakdown.ecommerce_cost).abs() < f64::EPSILON);
        assert_eq!(breakdown.tier, CostTier::Budget);
        // 45 hosting + 15 event + 5 + 5 + 0.30 builds
        assert!((breakdown.fixed_monthly_cost - 70.3).abs() < 1e-9);
    }

    #[test]
    fn unknown_provider_is_an_error_not_zero() {
        let catalog = Catalog::builtin();
        let calc = CostCalculator::new(&catalog);
        let input = inputs("wordpress", None, "astro", IntegrationMode::Direct);
        let error = calc.estimate(&input, 0.0, 30).unwrap_err();
        assert_eq!(
            error,
            PricingError::UnknownProvider {
                kind: "cms",
                id: "wordpress".to_string()
            }
        );

        let input = inputs("decap", Some("gumroad"), "astro", IntegrationMode::Direct);
        assert!(calc.estimate(&input, 0.0, 30).is_err());
    }

    #[test]
    fn ssg_factor_scales_hosting() {
        let catalog = Catalog::builtin();
        let calc = CostCalculator::new(&catalog);
        let hugo = calc
            .estimate(&inputs("decap", None, "hugo", IntegrationMode::Direct), 0.0, 30)
            .unwrap();
        let gatsby = calc
            .estimate(&inputs("decap", None, "gatsby", IntegrationMode::Direct), 0.0, 30)
            .unwrap();
        assert!((hugo.hosting_cost - 36.0).abs() < 1e-9);
        assert!((gatsby.hosting_cost - 54.0).abs() < 1e-9);
    }

    #[test]
    fn compare_sorts_by_total_and_honors_budget() {
        let catalog = Catalog::builtin();
        let calc = CostCalculator::new(&catalog);
        let base = inputs("decap", None, "astro", IntegrationMode::EventDriven);
        let entries = calc.compare(&base, Some(150.0), 0.0);
        assert!(!entries.is_empty());
        assert!(entries.windows(2).all(|w| {
            w[0].breakdown.total_estimated_cost <= w[1].breakdown.total_estimated_cost
        }));
        assert!(entries
            .iter()
            .all(|e| e.breakdown.total_estimated_cost <= 150.0));
    }

    #[test]
    fn direct_mode_suggested_for_cms_only_clients() {
        let catalog = Catalog::builtin();
        let calc = CostCalculator::new(&catalog);
        let input = inputs("decap", None, "astro", IntegrationMode::EventDriven);
        let suggestions = calc.optimization_suggestions(&input, 0.0).unwrap();
        let mode_hint = suggestions
            .iter()
            .find(|s| s.kind == "integration_mode")
            .expect("direct-mode suggestion");
        assert!((mode_hint.estimated_savings - 15.0).abs() < 1e-9);
    }

    #[test]
    fn lighter_engine_suggested_for_expensive_react_stacks() {
        let catalog = Catalog::builtin();
        let calc = CostCalculator::new(&catalog);
        // tina + shopify on nextjs with real sales volume sits above $200,
        // and eleventy is compatible with both providers.
        let input = inputs(
            "tina",
            Some("shopify_basic"),
            "nextjs",
            IntegrationMode::EventDriven,
        );
        let suggestions = calc.optimization_suggestions(&input, 5000.0).unwrap();
        let hint = suggestions
            .iter()
            .find(|s| s.kind == "ssg_engine")
            .expect("lighter-engine suggestion");
        assert!(hint.suggestion.contains("eleventy"));
        assert!(hint.estimated_savings > 0.0);
    }
}
