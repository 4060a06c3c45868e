//! Provider descriptor types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Operator skill level a provider or engine assumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Complexity {
    Beginner,
    Intermediate,
    Advanced,
    Enterprise,
}

impl Complexity {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
            Self::Enterprise => "enterprise",
        }
    }
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Complexity {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "beginner" => Ok(Self::Beginner),
            "intermediate" => Ok(Self::Intermediate),
            "advanced" => Ok(Self::Advanced),
            "enterprise" => Ok(Self::Enterprise),
            other => Err(format!("unknown complexity level '{other}'")),
        }
    }
}

/// A content-management backend a client site uses for editing content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CmsProvider {
    pub name: String,
    /// Fixed monthly cost in USD.
    pub monthly_cost: f64,
    pub features: Vec<String>,
    pub compatible_ssg: Vec<String>,
    pub complexity: Complexity,
}

/// An e-commerce backend, priced as fixed monthly cost plus a cut of sales.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EcommerceProvider {
    pub name: String,
    pub monthly_cost: f64,
    /// Fraction of monthly sales taken as transaction fees (0.02 = 2%).
    pub transaction_fee_rate: f64,
    pub features: Vec<String>,
    pub compatible_ssg: Vec<String>,
    pub complexity: Complexity,
}

/// A static-site generator that builds the client's site into static assets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SsgEngine {
    pub name: String,
    pub build_speed: String,
    pub language: String,
    pub features: Vec<String>,
    pub complexity: Complexity,
    pub ecosystem: String,
    /// Multiplier applied to the base AWS hosting estimate; heavier build
    /// pipelines cost proportionally more.
    pub infra_cost_factor: f64,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn complexity_orders_by_severity() {
        assert!(Complexity::Beginner < Complexity::Intermediate);
        assert!(Complexity::Advanced < Complexity::Enterprise);
    }

    #[test]
    fn complexity_round_trips() {
        for level in ["beginner", "intermediate", "advanced", "enterprise"] {
            assert_eq!(level.parse::<Complexity>().unwrap().as_str(), level);
        }
    }
}
