//! `blackwell create client` and `blackwell delete client`.

use std::collections::BTreeMap;

use bw_core::IntegrationMode;
use bw_pricing::{CostCalculator, CostInputs, DEFAULT_MONTHLY_BUILDS};
use bw_registry::{NewClient, StatePatch};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::CreateClientArgs;
use crate::commands::shared::{parse_mode, validate_combination};
use crate::context::AppContext;
use crate::output::emit;

/// Fully resolved inputs for registering a client, after defaults and
/// templates have been applied.
pub struct ClientSpec {
    pub client_id: String,
    pub company: String,
    pub domain: String,
    pub email: String,
    pub cms: String,
    pub ecommerce: Option<String>,
    pub ssg: String,
    pub mode: IntegrationMode,
    pub tier: Option<String>,
    pub region: Option<String>,
    pub notes: String,
}

#[derive(Serialize)]
struct CreatedClient {
    client_id: String,
    company_name: String,
    service_type: String,
    stack_name: String,
    cms_provider: String,
    ecommerce_provider: Option<String>,
    ssg_engine: String,
    integration_mode: String,
    estimated_monthly_cost: f64,
    cost_tier: String,
}

pub fn handle_create(
    args: &CreateClientArgs,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let defaults = ctx.config.defaults.clone();
    let spec = ClientSpec {
        client_id: args.client_id.clone(),
        company: args.company.clone(),
        domain: args.domain.clone(),
        email: args.email.clone(),
        cms: args.cms.clone().unwrap_or(defaults.cms_provider),
        ecommerce: args.ecommerce.clone(),
        ssg: args.ssg.clone().unwrap_or(defaults.ssg_engine),
        mode: match &args.mode {
            Some(mode) => parse_mode(mode)?,
            None => parse_mode(&defaults.integration_mode)?,
        },
        tier: args.tier.clone(),
        region: args.region.clone(),
        notes: args.notes.clone(),
    };
    create_client(spec, ctx, flags)
}

/// Shared creation path for `create client`, `init project`, and
/// `templates apply`.
pub fn create_client(
    spec: ClientSpec,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    validate_combination(
        &ctx.catalog.catalog,
        &spec.cms,
        spec.ecommerce.as_deref(),
        &spec.ssg,
    )?;

    let defaults = &ctx.config.defaults;
    let manifest = ctx.registry.create(NewClient {
        client_id: spec.client_id,
        company_name: spec.company,
        domain: spec.domain,
        contact_email: spec.email,
        cms_provider: spec.cms,
        ecommerce_provider: spec.ecommerce,
        ssg_engine: spec.ssg,
        integration_mode: spec.mode,
        service_tier: spec.tier.unwrap_or_else(|| defaults.service_tier.clone()),
        management_model: defaults.management_model.clone(),
        aws_region: spec.region.unwrap_or_else(|| ctx.config.aws.region.clone()),
        cms_settings: BTreeMap::new(),
        ecommerce_settings: BTreeMap::new(),
        notes: spec.notes,
        tags: BTreeMap::new(),
    })?;

    let calculator = CostCalculator::new(&ctx.catalog.catalog);
    let breakdown = calculator.estimate(&CostInputs::from(&manifest), 0.0, DEFAULT_MONTHLY_BUILDS)?;

    ctx.registry.update_state(
        &manifest.client_id,
        StatePatch {
            estimated_monthly_cost: Some(breakdown.fixed_monthly_cost),
            ..StatePatch::default()
        },
    )?;

    emit(
        &CreatedClient {
            client_id: manifest.client_id.clone(),
            company_name: manifest.company_name.clone(),
            service_type: manifest.service_type().to_string(),
            stack_name: manifest.stack_name(),
            cms_provider: manifest.cms_provider.clone(),
            ecommerce_provider: manifest.ecommerce_provider.clone(),
            ssg_engine: manifest.ssg_engine.clone(),
            integration_mode: manifest.integration_mode.to_string(),
            estimated_monthly_cost: breakdown.fixed_monthly_cost,
            cost_tier: breakdown.tier.to_string(),
        },
        flags.format,
    )
}

#[derive(Serialize)]
struct DeletedClient {
    client_id: String,
    deleted: bool,
}

pub fn handle_delete(
    client_id: &str,
    force: bool,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    if !force && !ctx.config.behavior.auto_confirm {
        anyhow::bail!("deleting '{client_id}' removes its registry records; re-run with --force");
    }

    let deleted = ctx.registry.delete(client_id)?;
    if !deleted {
        tracing::warn!(client_id, "client not found, nothing deleted");
    }
    emit(
        &DeletedClient {
            client_id: client_id.to_string(),
            deleted,
        },
        flags.format,
    )
}
