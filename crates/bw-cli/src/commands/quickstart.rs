//! `blackwell quickstart` - recommended stacks plus the commands to run next.

use std::str::FromStr;

use bw_providers::{Combination, Complexity};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::QuickstartArgs;
use crate::context::AppContext;
use crate::output::emit;

#[derive(Serialize)]
struct QuickstartGuide {
    recommendations: Vec<Recommendation>,
    next_steps: Vec<String>,
}

#[derive(Serialize)]
struct Recommendation {
    cms: String,
    ecommerce: Option<String>,
    ssg: String,
    fixed_monthly_cost: f64,
    complexity: String,
}

impl From<Combination> for Recommendation {
    fn from(combo: Combination) -> Self {
        Self {
            cms: combo.cms_provider,
            ecommerce: combo.ecommerce_provider,
            ssg: combo.ssg_engine,
            fixed_monthly_cost: combo.fixed_monthly_cost,
            complexity: combo.complexity.to_string(),
        }
    }
}

pub fn handle(
    args: &QuickstartArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let complexity = args
        .complexity
        .as_deref()
        .map(Complexity::from_str)
        .transpose()
        .map_err(|e| anyhow::anyhow!(e))?;

    let recommendations: Vec<Recommendation> = ctx
        .catalog
        .catalog
        .recommended_combinations(args.budget, complexity)
        .into_iter()
        .map(Recommendation::from)
        .collect();

    let guide = QuickstartGuide {
        recommendations,
        next_steps: vec![
            "blackwell init workspace".to_string(),
            "blackwell doctor".to_string(),
            "blackwell create client <id> --company <name> --domain <domain> --email <email>"
                .to_string(),
            "blackwell cost estimate <id>".to_string(),
            "blackwell deploy client <id> --dry-run".to_string(),
            "blackwell deploy client <id> --approve".to_string(),
        ],
    };

    emit(&guide, flags.format)
}
