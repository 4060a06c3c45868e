//! `blackwell cost` - estimate, compare, optimize.

use bw_pricing::{Comparison, CostCalculator, CostInputs, DEFAULT_MONTHLY_BUILDS};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::CostCommands;
use crate::context::AppContext;
use crate::output::emit;

pub fn handle(
    action: &CostCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let calculator = CostCalculator::new(&ctx.catalog.catalog);
    match action {
        CostCommands::Estimate {
            client_id,
            monthly_sales,
            monthly_builds,
        } => {
            let manifest = ctx.registry.get(client_id)?;
            let breakdown = calculator.estimate(
                &CostInputs::from(manifest),
                *monthly_sales,
                monthly_builds.unwrap_or(DEFAULT_MONTHLY_BUILDS),
            )?;

            let threshold = ctx.config.behavior.cost_alert_threshold;
            if breakdown.total_estimated_cost > threshold && !flags.quiet {
                eprintln!(
                    "warning: estimated ${:.2}/month exceeds the ${threshold:.2} alert threshold",
                    breakdown.total_estimated_cost
                );
            }
            emit(&breakdown, flags.format)
        }
        CostCommands::Compare {
            client_id,
            budget,
            monthly_sales,
        } => {
            let manifest = ctx.registry.get(client_id)?;
            let comparisons =
                calculator.compare(&CostInputs::from(manifest), *budget, *monthly_sales);
            let rows: Vec<ComparisonRow> = comparisons.iter().map(ComparisonRow::from).collect();
            emit(&rows, flags.format)
        }
        CostCommands::Optimize {
            client_id,
            monthly_sales,
        } => {
            let manifest = ctx.registry.get(client_id)?;
            let suggestions =
                calculator.optimization_suggestions(&CostInputs::from(manifest), *monthly_sales)?;
            emit(&suggestions, flags.format)
        }
    }
}

/// Flattened comparison for tabular output.
#[derive(Serialize)]
struct ComparisonRow {
    cms: String,
    ecommerce: Option<String>,
    ssg: String,
    fixed_monthly: f64,
    total_monthly: f64,
    tier: String,
}

impl From<&Comparison> for ComparisonRow {
    fn from(comparison: &Comparison) -> Self {
        Self {
            cms: comparison.cms_provider.clone(),
            ecommerce: comparison.ecommerce_provider.clone(),
            ssg: comparison.ssg_engine.clone(),
            fixed_monthly: comparison.breakdown.fixed_monthly_cost,
            total_monthly: comparison.breakdown.total_estimated_cost,
            tier: comparison.breakdown.tier.to_string(),
        }
    }
}
