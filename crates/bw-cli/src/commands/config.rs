//! `blackwell config` - show, set, unset, reset, path.

use std::path::PathBuf;

use bw_config::CliConfig;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ConfigCommands;
use crate::context::AppContext;
use crate::output::emit;

pub fn handle(
    action: &ConfigCommands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        ConfigCommands::Show => emit(&ctx.config, flags.format),
        ConfigCommands::Set { key, value } => {
            ctx.config.set(key, value)?;
            save(ctx, flags)?;
            emit(&KeyChange::new(key, Some(ctx.config.get(key)?)), flags.format)
        }
        ConfigCommands::Unset { key } => {
            ctx.config.unset(key)?;
            save(ctx, flags)?;
            emit(&KeyChange::new(key, Some(ctx.config.get(key)?)), flags.format)
        }
        ConfigCommands::Reset { yes } => {
            if !yes && !ctx.config.behavior.auto_confirm {
                anyhow::bail!("resetting discards every configured value; re-run with --yes");
            }
            ctx.config.reset();
            save(ctx, flags)?;
            emit(&ctx.config, flags.format)
        }
        ConfigCommands::Path => {
            let path = config_path(flags)?;
            emit(&PathReply { path }, flags.format)
        }
    }
}

fn config_path(flags: &GlobalFlags) -> anyhow::Result<PathBuf> {
    Ok(match &flags.config {
        Some(explicit) => explicit.clone(),
        None => CliConfig::config_path()?,
    })
}

fn save(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let path = config_path(flags)?;
    ctx.config.save_to(&path)?;
    Ok(())
}

#[derive(Serialize)]
struct KeyChange {
    key: String,
    value: Option<serde_json::Value>,
}

impl KeyChange {
    fn new(key: &str, value: Option<serde_json::Value>) -> Self {
        Self {
            key: key.to_string(),
            value,
        }
    }
}

#[derive(Serialize)]
struct PathReply {
    path: PathBuf,
}

#[cfg(test)]
mod tests {
    use bw_providers::ResolvedCatalog;
    use bw_registry::ClientRegistry;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::cli::OutputFormat;

    fn context(dir: &std::path::Path) -> AppContext {
        AppContext {
            config: CliConfig::default(),
            registry: ClientRegistry::open(&dir.join("registry")).expect("registry"),
            catalog: ResolvedCatalog::fallback(),
        }
    }

    fn flags(config_path: PathBuf) -> GlobalFlags {
        GlobalFlags {
            format: OutputFormat::Json,
            quiet: true,
            verbose: false,
            config: Some(config_path),
        }
    }

    #[test]
    fn set_persists_to_the_config_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config_path = dir.path().join("config.yml");
        let mut ctx = context(dir.path());
        let flags = flags(config_path.clone());

        handle(
            &ConfigCommands::Set {
                key: "aws.region".to_string(),
                value: "eu-west-1".to_string(),
            },
            &mut ctx,
            &flags,
        )
        .expect("set");

        assert_eq!(ctx.config.aws.region, "eu-west-1");
        let yaml = std::fs::read_to_string(&config_path).expect("read");
        assert!(yaml.contains("eu-west-1"));
    }

    #[test]
    fn platform_infrastructure_keys_round_trip_to_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config_path = dir.path().join("config.yml");
        let mut ctx = context(dir.path());
        let flags = flags(config_path.clone());

        handle(
            &ConfigCommands::Set {
                key: "platform_infrastructure.force_static_mode".to_string(),
                value: "true".to_string(),
            },
            &mut ctx,
            &flags,
        )
        .expect("set");

        assert!(ctx.config.platform_infrastructure.force_static_mode);
        let yaml = std::fs::read_to_string(&config_path).expect("read");
        assert!(yaml.contains("platform_infrastructure:"));
        assert!(yaml.contains("force_static_mode: true"));
    }

    #[test]
    fn unknown_keys_are_rejected_before_saving() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config_path = dir.path().join("config.yml");
        let mut ctx = context(dir.path());
        let flags = flags(config_path.clone());

        let result = handle(
            &ConfigCommands::Set {
                key: "platform.force_static_mode".to_string(),
                value: "true".to_string(),
            },
            &mut ctx,
            &flags,
        );

        assert!(result.is_err());
        assert!(!config_path.exists());
    }
}
