//! `blackwell migrate` - switch providers or integration mode with a cost
//! delta preview.

use bw_pricing::{CostBreakdown, CostCalculator, CostInputs, DEFAULT_MONTHLY_BUILDS};
use bw_registry::{ManifestPatch, StatePatch};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::{MigrateArgs, MigrateCommands};
use crate::commands::shared::{parse_mode, validate_combination};
use crate::context::AppContext;
use crate::output::emit;

pub fn handle(
    action: &MigrateCommands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let (args, patch) = match action {
        MigrateCommands::Cms(args) => (
            args,
            ManifestPatch {
                cms_provider: Some(args.to.clone()),
                ..ManifestPatch::default()
            },
        ),
        MigrateCommands::Ecommerce(args) => {
            let target = if args.to == "none" {
                None
            } else {
                Some(args.to.clone())
            };
            (
                args,
                ManifestPatch {
                    ecommerce_provider: Some(target),
                    ..ManifestPatch::default()
                },
            )
        }
        MigrateCommands::Mode(args) => (
            args,
            ManifestPatch {
                integration_mode: Some(parse_mode(&args.to)?),
                ..ManifestPatch::default()
            },
        ),
    };
    run(args, patch, ctx, flags)
}

#[derive(Serialize)]
struct MigrationPlan {
    client_id: String,
    applied: bool,
    current_monthly_cost: f64,
    projected_monthly_cost: f64,
    monthly_delta: f64,
    new_stack_name: String,
}

fn run(
    args: &MigrateArgs,
    patch: ManifestPatch,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let manifest = ctx.registry.get(&args.client_id)?.clone();

    // Build the post-migration manifest up front so compatibility and cost
    // can be previewed without touching the registry.
    let mut target = manifest.clone();
    if let Some(cms) = &patch.cms_provider {
        target.cms_provider = cms.clone();
    }
    if let Some(ecommerce) = &patch.ecommerce_provider {
        target.ecommerce_provider = ecommerce.clone();
    }
    if let Some(mode) = patch.integration_mode {
        target.integration_mode = mode;
    }

    validate_combination(
        &ctx.catalog.catalog,
        &target.cms_provider,
        target.ecommerce_provider.as_deref(),
        &target.ssg_engine,
    )?;

    let calculator = CostCalculator::new(&ctx.catalog.catalog);
    let current = estimate(&calculator, &manifest, args.monthly_sales)?;
    let projected = estimate(&calculator, &target, args.monthly_sales)?;

    if args.apply {
        let updated = ctx.registry.update_manifest(&args.client_id, patch)?;
        ctx.registry.update_state(
            &args.client_id,
            StatePatch {
                estimated_monthly_cost: Some(projected.fixed_monthly_cost),
                ..StatePatch::default()
            },
        )?;
        debug_assert_eq!(updated.client_id, args.client_id);
    }

    emit(
        &MigrationPlan {
            client_id: args.client_id.clone(),
            applied: args.apply,
            current_monthly_cost: current.total_estimated_cost,
            projected_monthly_cost: projected.total_estimated_cost,
            monthly_delta: projected.total_estimated_cost - current.total_estimated_cost,
            new_stack_name: target.stack_name(),
        },
        flags.format,
    )
}

fn estimate(
    calculator: &CostCalculator<'_>,
    manifest: &bw_core::ClientManifest,
    monthly_sales: f64,
) -> anyhow::Result<CostBreakdown> {
    Ok(calculator.estimate(
        &CostInputs::from(manifest),
        monthly_sales,
        DEFAULT_MONTHLY_BUILDS,
    )?)
}
