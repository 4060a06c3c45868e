//! `blackwell platform` - inspect and control catalog resolution.

use std::path::PathBuf;

use bw_config::{is_valid_platform_path, CliConfig};
use bw_providers::platform;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::PlatformCommands;
use crate::context::AppContext;
use crate::output::emit;

#[derive(Serialize)]
struct PlatformStatus {
    source: String,
    stack_count: usize,
    path: Option<PathBuf>,
    auto_discover: bool,
    force_static_mode: bool,
}

pub async fn handle(
    action: &PlatformCommands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        PlatformCommands::Status => emit(&status(ctx), flags.format),
        PlatformCommands::Refresh => {
            let path = ctx.config.platform_path();
            let force_static = ctx.config.platform_infrastructure.force_static_mode;
            ctx.catalog = platform::resolve(path.as_deref(), force_static).await;
            emit(&status(ctx), flags.format)
        }
        PlatformCommands::Enable => {
            ctx.config.platform_infrastructure.force_static_mode = false;
            save(ctx, flags)?;
            let path = ctx.config.platform_path();
            ctx.catalog = platform::resolve(path.as_deref(), false).await;
            emit(&status(ctx), flags.format)
        }
        PlatformCommands::Disable => {
            ctx.config.platform_infrastructure.force_static_mode = true;
            save(ctx, flags)?;
            ctx.catalog = platform::resolve(None, true).await;
            emit(&status(ctx), flags.format)
        }
        PlatformCommands::Path { dir } => {
            if let Some(dir) = dir {
                if !is_valid_platform_path(dir) {
                    anyhow::bail!(
                        "{} is not a platform-infrastructure checkout (expected pyproject.toml, stacks/, shared/)",
                        dir.display()
                    );
                }
                ctx.config.platform_infrastructure.path = Some(dir.clone());
                save(ctx, flags)?;
                ctx.catalog = platform::resolve(
                    Some(dir.as_path()),
                    ctx.config.platform_infrastructure.force_static_mode,
                )
                .await;
            }
            emit(&status(ctx), flags.format)
        }
    }
}

fn status(ctx: &AppContext) -> PlatformStatus {
    PlatformStatus {
        source: ctx.catalog.source.as_str().to_string(),
        stack_count: ctx.catalog.stack_count,
        path: ctx.config.platform_infrastructure.path.clone(),
        auto_discover: ctx.config.platform_infrastructure.auto_discover,
        force_static_mode: ctx.config.platform_infrastructure.force_static_mode,
    }
}

fn save(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let path = match &flags.config {
        Some(explicit) => explicit.clone(),
        None => CliConfig::config_path()?,
    };
    ctx.config.save_to(&path)?;
    Ok(())
}
