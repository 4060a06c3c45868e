//! The cost breakdown value object.

use serde::Serialize;
use std::fmt;

/// Cost tier classification by total monthly cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CostTier {
    /// Under $100/month.
    Budget,
    /// $100-250/month.
    Standard,
    /// $250-500/month.
    Professional,
    /// Over $500/month.
    Enterprise,
}

impl CostTier {
    /// Classify a total monthly cost. Boundaries are strict less-than:
    /// $99.99 is budget, $100.00 is standard.
    #[must_use]
    pub fn classify(total_monthly_cost: f64) -> Self {
        if total_monthly_cost < 100.0 {
            Self::Budget
        } else if total_monthly_cost < 250.0 {
            Self::Standard
        } else if total_monthly_cost < 500.0 {
            Self::Professional
        } else {
            Self::Enterprise
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Budget => "budget",
            Self::Standard => "standard",
            Self::Professional => "professional",
            Self::Enterprise => "enterprise",
        }
    }
}

impl fmt::Display for CostTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derived, non-persisted per-calculation result. `total_estimated_cost` is
/// always `fixed_monthly_cost + estimated_variable_cost` by construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostBreakdown {
    pub cms_cost: f64,
    pub ecommerce_cost: f64,
    pub hosting_cost: f64,
    pub event_infrastructure_cost: f64,
    pub data_transfer_cost: f64,
    pub storage_cost: f64,
    pub build_cost: f64,
    pub estimated_builds_per_month: u32,
    /// Fraction of monthly sales taken as transaction fees.
    pub transaction_fee_rate: f64,
    pub fixed_monthly_cost: f64,
    pub estimated_variable_cost: f64,
    pub total_estimated_cost: f64,
    pub tier: CostTier,
    pub currency: &'static str,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn tier_boundaries_are_strict() {
        assert_eq!(CostTier::classify(99.99), CostTier::Budget);
        assert_eq!(CostTier::classify(100.0), CostTier::Standard);
        assert_eq!(CostTier::classify(249.99), CostTier::Standard);
        assert_eq!(CostTier::classify(250.0), CostTier::Professional);
        assert_eq!(CostTier::classify(499.99), CostTier::Professional);
        assert_eq!(CostTier::classify(500.0), CostTier::Enterprise);
    }
}
