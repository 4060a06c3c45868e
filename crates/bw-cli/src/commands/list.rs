//! `blackwell list` - clients, providers, deployments, templates.

use bw_core::ClientStatus;
use bw_providers::Catalog;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ListCommands;
use crate::commands::shared::parse_status;
use crate::context::AppContext;
use crate::output::emit;
use crate::templates;

pub fn handle(
    action: &ListCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        ListCommands::Clients { status, provider } => {
            clients(status.as_deref(), provider.as_deref(), ctx, flags)
        }
        ListCommands::Providers => providers(&ctx.catalog.catalog, flags),
        ListCommands::Deployments => deployments(ctx, flags),
        ListCommands::Templates => emit(&templates::TEMPLATES, flags.format),
    }
}

#[derive(Serialize)]
struct ClientRow {
    client_id: String,
    company: String,
    status: String,
    stack: String,
    region: String,
    monthly_cost: Option<f64>,
}

fn clients(
    status: Option<&str>,
    provider: Option<&str>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let status = status.map(parse_status).transpose()?;

    let rows: Vec<ClientRow> = ctx
        .registry
        .list(status, provider)
        .into_iter()
        .map(|(manifest, state)| ClientRow {
            client_id: manifest.client_id.clone(),
            company: manifest.company_name.clone(),
            status: state.status.to_string(),
            stack: describe_stack(manifest),
            region: manifest.aws_region.clone(),
            monthly_cost: state.estimated_monthly_cost,
        })
        .collect();

    emit(&rows, flags.format)
}

fn describe_stack(manifest: &bw_core::ClientManifest) -> String {
    let mut parts = vec![manifest.cms_provider.as_str()];
    if let Some(ecommerce) = manifest.ecommerce_provider.as_deref() {
        parts.push(ecommerce);
    }
    parts.push(manifest.ssg_engine.as_str());
    parts.retain(|p| !p.is_empty());
    parts.join(" + ")
}

#[derive(Serialize)]
struct ProviderRow {
    kind: &'static str,
    id: String,
    name: String,
    monthly_cost: f64,
    transaction_fee: Option<String>,
    complexity: String,
    compatible_ssg: String,
}

fn providers(catalog: &Catalog, flags: &GlobalFlags) -> anyhow::Result<()> {
    let mut rows = Vec::new();

    for (id, cms) in catalog.cms_providers() {
        rows.push(ProviderRow {
            kind: "cms",
            id: id.clone(),
            name: cms.name.clone(),
            monthly_cost: cms.monthly_cost,
            transaction_fee: None,
            complexity: cms.complexity.to_string(),
            compatible_ssg: cms.compatible_ssg.join(", "),
        });
    }
    for (id, ecommerce) in catalog.ecommerce_providers() {
        rows.push(ProviderRow {
            kind: "ecommerce",
            id: id.clone(),
            name: ecommerce.name.clone(),
            monthly_cost: ecommerce.monthly_cost,
            transaction_fee: Some(format!("{:.1}%", ecommerce.transaction_fee_rate * 100.0)),
            complexity: ecommerce.complexity.to_string(),
            compatible_ssg: ecommerce.compatible_ssg.join(", "),
        });
    }
    for (id, ssg) in catalog.ssg_engines() {
        rows.push(ProviderRow {
            kind: "ssg",
            id: id.clone(),
            name: ssg.name.clone(),
            monthly_cost: 0.0,
            transaction_fee: None,
            complexity: ssg.complexity.to_string(),
            compatible_ssg: String::new(),
        });
    }

    emit(&rows, flags.format)
}

#[derive(Serialize)]
struct DeploymentRow {
    client_id: String,
    stack_name: String,
    region: String,
    last_deployed_at: Option<chrono::DateTime<chrono::Utc>>,
    drift_detected: bool,
}

fn deployments(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let rows: Vec<DeploymentRow> = ctx
        .registry
        .list(Some(ClientStatus::Deployed), None)
        .into_iter()
        .map(|(manifest, state)| DeploymentRow {
            client_id: manifest.client_id.clone(),
            stack_name: state
                .stack_name
                .clone()
                .unwrap_or_else(|| manifest.stack_name()),
            region: manifest.aws_region.clone(),
            last_deployed_at: state.last_deployed_at,
            drift_detected: state.drift_detected,
        })
        .collect();

    emit(&rows, flags.format)
}
