//! `blackwell init` - workspace bootstrap and guided project creation.

use std::path::PathBuf;

use bw_config::{discover_platform, CliConfig};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::{InitCommands, ProjectArgs};
use crate::commands::client::{self, ClientSpec};
use crate::commands::shared::parse_mode;
use crate::context::AppContext;
use crate::output::emit;
use crate::templates;

pub fn handle(
    action: &InitCommands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        InitCommands::Workspace { force } => workspace(*force, ctx, flags),
        InitCommands::Project(args) => project(args, ctx, flags),
    }
}

#[derive(Serialize)]
struct WorkspaceSummary {
    config_path: PathBuf,
    registry_dir: PathBuf,
    platform_path: Option<PathBuf>,
    catalog_source: String,
}

fn workspace(force: bool, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let config_path = match &flags.config {
        Some(explicit) => explicit.clone(),
        None => CliConfig::config_path()?,
    };
    if config_path.exists() && !force {
        anyhow::bail!(
            "config already exists at {}; use --force to overwrite",
            config_path.display()
        );
    }

    if let Some(found) = discover_platform() {
        tracing::info!(path = %found.display(), "discovered platform-infrastructure");
        ctx.config.platform_infrastructure.path = Some(found);
    }
    ctx.config.save_to(&config_path)?;

    emit(
        &WorkspaceSummary {
            config_path,
            registry_dir: CliConfig::registry_dir()?,
            platform_path: ctx.config.platform_infrastructure.path.clone(),
            catalog_source: ctx.catalog.source.as_str().to_string(),
        },
        flags.format,
    )
}

fn project(args: &ProjectArgs, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let defaults = ctx.config.defaults.clone();

    let (cms, ecommerce, ssg, mode) = if let Some(name) = &args.template {
        let template = templates::find(name).ok_or_else(|| {
            anyhow::anyhow!(
                "unknown template '{name}' (available: {})",
                templates::names().join(", ")
            )
        })?;
        (
            template.cms_provider.to_string(),
            template.ecommerce_provider.map(str::to_string),
            template.ssg_engine.to_string(),
            template.integration_mode,
        )
    } else {
        (
            args.cms.clone().unwrap_or(defaults.cms_provider),
            args.ecommerce.clone(),
            args.ssg.clone().unwrap_or(defaults.ssg_engine),
            match &args.mode {
                Some(mode) => parse_mode(mode)?,
                None => parse_mode(&defaults.integration_mode)?,
            },
        )
    };

    client::create_client(
        ClientSpec {
            client_id: args.client_id.clone(),
            company: args.company.clone(),
            domain: args.domain.clone(),
            email: args.email.clone(),
            cms,
            ecommerce,
            ssg,
            mode,
            tier: None,
            region: None,
            notes: String::new(),
        },
        ctx,
        flags,
    )
}
