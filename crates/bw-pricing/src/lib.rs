//! # bw-pricing
//!
//! Deterministic monthly cost model for client stacks.
//!
//! Costs are pure arithmetic over the provider catalog plus fixed AWS
//! estimates: no pricing APIs, no caching, no time dependence. Calling the
//! calculator twice with identical inputs yields identical output.

pub mod breakdown;
pub mod calculator;
pub mod error;

pub use breakdown::{CostBreakdown, CostTier};
pub use calculator::{
    Comparison, CostCalculator, CostInputs, Suggestion, DEFAULT_MONTHLY_BUILDS,
};
pub use error::PricingError;
