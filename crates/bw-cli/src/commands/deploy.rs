//! `blackwell deploy` - drive CDK from the platform-infrastructure checkout.
//!
//! All CDK invocations run with a sanitized environment: inherited `AWS_*`
//! variables are stripped so the selected profile and region always win,
//! then `AWS_PROFILE`, `AWS_DEFAULT_REGION`, and `AWS_SDK_LOAD_CONFIG` are
//! set explicitly.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use bw_core::ClientStatus;
use bw_doctor::{passed, BootstrapChecker, SystemDoctor};
use bw_registry::StatePatch;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::{BootstrapCommands, DeployClientArgs, DeployCommands, SharedArgs};
use crate::context::AppContext;
use crate::output::emit;
use crate::progress::Spinner;

/// Stack holding certificates, hosted zones, and the shared event bus.
const SHARED_STACK: &str = "WebServices-SharedInfra";

pub async fn handle(
    action: &DeployCommands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        DeployCommands::Client(args) => deploy_client(args, ctx, flags).await,
        DeployCommands::Shared(args) => deploy_shared(args, ctx, flags).await,
        DeployCommands::Destroy {
            client_id,
            force,
            profile,
        } => destroy(client_id, *force, profile.as_deref(), ctx, flags).await,
        DeployCommands::Diff {
            client_id,
            account,
            region,
            profile,
        } => {
            let args = DeployClientArgs {
                client_id: client_id.clone(),
                account: account.clone(),
                region: region.clone(),
                profile: profile.clone(),
                dry_run: true,
                approve: false,
            };
            deploy_client(&args, ctx, flags).await
        }
        DeployCommands::Bootstrap { action } => bootstrap(action, ctx, flags).await,
    }
}

/// What a deploy-family command did, for the final output line.
#[derive(Serialize)]
struct DeployReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    client_id: Option<String>,
    stack_name: String,
    action: String,
    region: String,
    profile: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<String>,
}

/// Resolved account/region/profile a CDK invocation targets.
struct CdkTarget {
    account: Option<String>,
    region: String,
    profile: String,
}

impl CdkTarget {
    fn resolve(
        ctx: &AppContext,
        account: Option<&str>,
        region: Option<&str>,
        profile: Option<&str>,
    ) -> Self {
        Self {
            account: account
                .map(str::to_string)
                .or_else(|| ctx.config.aws.account_id.clone()),
            region: region.unwrap_or(&ctx.config.aws.region).to_string(),
            profile: profile.unwrap_or(&ctx.config.aws.profile).to_string(),
        }
    }

    fn context_args(&self) -> Vec<String> {
        let mut args = vec!["--profile".to_string(), self.profile.clone()];
        if let Some(account) = &self.account {
            args.push("-c".to_string());
            args.push(format!("account={account}"));
        }
        args.push("-c".to_string());
        args.push(format!("region={}", self.region));
        args
    }
}

async fn deploy_client(
    args: &DeployClientArgs,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let manifest = ctx.registry.get(&args.client_id)?.clone();
    let state = ctx.registry.state(&args.client_id)?;
    let stack_name = state
        .stack_name
        .clone()
        .unwrap_or_else(|| manifest.stack_name());
    let previous_status = state.status;

    let target = CdkTarget::resolve(
        ctx,
        args.account.as_deref(),
        Some(args.region.as_deref().unwrap_or(&manifest.aws_region)),
        args.profile.as_deref(),
    );
    let platform_dir = platform_dir(ctx)?;

    if args.dry_run {
        let mut cdk_args = vec!["diff".to_string(), stack_name.clone()];
        cdk_args.extend(target.context_args());
        cdk_args.extend(client_context(&manifest));
        run_cdk(&platform_dir, &cdk_args, &target, deploy_timeout(ctx)).await?;
        return emit(
            &DeployReport {
                client_id: Some(args.client_id.clone()),
                stack_name,
                action: "diff".to_string(),
                region: target.region,
                profile: target.profile,
                status: None,
            },
            flags.format,
        );
    }

    gate_readiness(&target).await?;

    let next = if previous_status == ClientStatus::Deployed {
        ClientStatus::Updating
    } else {
        ClientStatus::Deploying
    };
    ctx.registry.set_status(
        &args.client_id,
        next,
        BTreeMap::from([("stack_name".to_string(), Value::String(stack_name.clone()))]),
    )?;

    let mut cdk_args = vec!["deploy".to_string(), stack_name.clone()];
    cdk_args.extend(target.context_args());
    cdk_args.extend(client_context(&manifest));
    if args.approve {
        cdk_args.push("--require-approval=never".to_string());
    }

    match run_cdk(&platform_dir, &cdk_args, &target, deploy_timeout(ctx)).await {
        Ok(()) => {
            ctx.registry.set_status(
                &args.client_id,
                ClientStatus::Deployed,
                BTreeMap::from([("region".to_string(), Value::String(target.region.clone()))]),
            )?;
            info!(client_id = %args.client_id, stack = %stack_name, "deploy complete");
            emit(
                &DeployReport {
                    client_id: Some(args.client_id.clone()),
                    stack_name,
                    action: "deploy".to_string(),
                    region: target.region,
                    profile: target.profile,
                    status: Some(ClientStatus::Deployed.to_string()),
                },
                flags.format,
            )
        }
        Err(err) => {
            ctx.registry.set_status(
                &args.client_id,
                ClientStatus::Error,
                BTreeMap::from([("error".to_string(), Value::String(err.to_string()))]),
            )?;
            Err(err)
        }
    }
}

async fn deploy_shared(
    args: &SharedArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let target = CdkTarget::resolve(
        ctx,
        args.account.as_deref(),
        args.region.as_deref(),
        args.profile.as_deref(),
    );
    let platform_dir = platform_dir(ctx)?;

    let verb = if args.dry_run { "diff" } else { "deploy" };
    if !args.dry_run {
        gate_readiness(&target).await?;
    }

    let mut cdk_args = vec![verb.to_string(), SHARED_STACK.to_string()];
    cdk_args.extend(target.context_args());
    if args.approve && !args.dry_run {
        cdk_args.push("--require-approval=never".to_string());
    }
    run_cdk(&platform_dir, &cdk_args, &target, deploy_timeout(ctx)).await?;

    emit(
        &DeployReport {
            client_id: None,
            stack_name: SHARED_STACK.to_string(),
            action: verb.to_string(),
            region: target.region,
            profile: target.profile,
            status: None,
        },
        flags.format,
    )
}

async fn destroy(
    client_id: &str,
    force: bool,
    profile: Option<&str>,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    if !force && !ctx.config.behavior.auto_confirm {
        anyhow::bail!("destroying tears down live infrastructure; re-run with --force");
    }

    let manifest = ctx.registry.get(client_id)?.clone();
    let state = ctx.registry.state(client_id)?;
    let stack_name = state
        .stack_name
        .clone()
        .unwrap_or_else(|| manifest.stack_name());

    let target = CdkTarget::resolve(ctx, None, Some(&manifest.aws_region), profile);
    let platform_dir = platform_dir(ctx)?;

    ctx.registry
        .set_status(client_id, ClientStatus::Destroying, BTreeMap::new())?;

    let mut cdk_args = vec![
        "destroy".to_string(),
        stack_name.clone(),
        "--force".to_string(),
    ];
    cdk_args.extend(target.context_args());

    match run_cdk(&platform_dir, &cdk_args, &target, deploy_timeout(ctx)).await {
        Ok(()) => {
            ctx.registry
                .set_status(client_id, ClientStatus::Ready, BTreeMap::new())?;
            ctx.registry.update_state(
                client_id,
                StatePatch {
                    aws_stack_id: Some(None),
                    ..StatePatch::default()
                },
            )?;
            emit(
                &DeployReport {
                    client_id: Some(client_id.to_string()),
                    stack_name,
                    action: "destroy".to_string(),
                    region: target.region,
                    profile: target.profile,
                    status: Some(ClientStatus::Ready.to_string()),
                },
                flags.format,
            )
        }
        Err(err) => {
            ctx.registry.set_status(
                client_id,
                ClientStatus::Error,
                BTreeMap::from([("error".to_string(), Value::String(err.to_string()))]),
            )?;
            Err(err)
        }
    }
}

async fn bootstrap(
    action: &BootstrapCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        BootstrapCommands::Status {
            account,
            region,
            profile,
        } => {
            let checker = checker(ctx, profile.as_deref());
            let status = checker
                .status(
                    account.as_deref(),
                    Some(region.as_deref().unwrap_or(&ctx.config.aws.region)),
                )
                .await;
            emit(&status, flags.format)
        }
        BootstrapCommands::Run {
            account,
            region,
            profile,
            trust,
            force,
        } => {
            let checker = checker(ctx, profile.as_deref());
            let outcome = checker
                .run_bootstrap(
                    account.as_deref(),
                    Some(region.as_deref().unwrap_or(&ctx.config.aws.region)),
                    trust,
                    *force,
                )
                .await?;
            emit(&outcome, flags.format)
        }
        BootstrapCommands::Validate {
            account,
            region,
            profile,
        } => {
            let doctor = SystemDoctor::new(Some(
                profile
                    .clone()
                    .unwrap_or_else(|| ctx.config.aws.profile.clone()),
            ));
            let diagnostics = doctor
                .deployment_readiness(
                    account.as_deref(),
                    Some(region.as_deref().unwrap_or(&ctx.config.aws.region)),
                )
                .await;
            let ok = passed(&diagnostics);
            emit(&diagnostics, flags.format)?;
            if ok {
                Ok(())
            } else {
                anyhow::bail!("environment is not ready for deployments")
            }
        }
        BootstrapCommands::Regions {
            regions,
            account,
            profile,
        } => {
            let checker = checker(ctx, profile.as_deref());
            let statuses = checker.statuses(account.as_deref(), regions).await;
            emit(&statuses, flags.format)
        }
    }
}

fn checker(ctx: &AppContext, profile: Option<&str>) -> BootstrapChecker {
    BootstrapChecker::new(Some(
        profile.unwrap_or(&ctx.config.aws.profile).to_string(),
    ))
}

fn deploy_timeout(ctx: &AppContext) -> Duration {
    Duration::from_secs(ctx.config.behavior.deployment_timeout_secs)
}

fn platform_dir(ctx: &AppContext) -> anyhow::Result<PathBuf> {
    ctx.config.platform_path().ok_or_else(|| {
        anyhow::anyhow!(
            "no platform-infrastructure checkout found; link one with 'blackwell platform path <dir>'"
        )
    })
}

/// Pre-deploy gate: abort before touching any stack when the target is not
/// ready.
async fn gate_readiness(target: &CdkTarget) -> anyhow::Result<()> {
    let doctor = SystemDoctor::new(Some(target.profile.clone()));
    let diagnostics = doctor
        .deployment_readiness(target.account.as_deref(), Some(&target.region))
        .await;
    if passed(&diagnostics) {
        return Ok(());
    }
    let problems: Vec<String> = diagnostics
        .iter()
        .filter(|d| d.fix.is_some())
        .map(|d| format!("{}: {}", d.name, d.message))
        .collect();
    anyhow::bail!("not ready to deploy: {}", problems.join("; "))
}

/// Client manifest details the platform stacks read out of CDK context.
fn client_context(manifest: &bw_core::ClientManifest) -> Vec<String> {
    let payload = json!({
        "client_id": manifest.client_id,
        "domain": manifest.domain,
        "cms_provider": manifest.cms_provider,
        "ecommerce_provider": manifest.ecommerce_provider,
        "ssg_engine": manifest.ssg_engine,
        "integration_mode": manifest.integration_mode.as_str(),
        "service_tier": manifest.service_tier,
    });
    vec!["-c".to_string(), format!("client={payload}")]
}

async fn run_cdk(
    platform_dir: &Path,
    args: &[String],
    target: &CdkTarget,
    timeout: Duration,
) -> anyhow::Result<()> {
    debug!(?args, dir = %platform_dir.display(), "running cdk");

    let mut command = tokio::process::Command::new("cdk");
    command
        .args(args)
        .current_dir(platform_dir)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());

    // Inherited AWS_* variables would override the profile passed on the
    // command line, so rebuild the environment without them.
    command.env_clear();
    for (key, value) in std::env::vars() {
        if !key.starts_with("AWS_") {
            command.env(key, value);
        }
    }
    command
        .env("AWS_PROFILE", &target.profile)
        .env("AWS_DEFAULT_REGION", &target.region)
        .env("AWS_SDK_LOAD_CONFIG", "1");

    let spinner = Spinner::start(&format!("cdk {}", args.join(" ")));
    let mut child = command
        .spawn()
        .map_err(|e| anyhow::anyhow!("failed to launch cdk: {e}"))?;

    let status = match tokio::time::timeout(timeout, child.wait()).await {
        Ok(result) => result?,
        Err(_) => {
            child.kill().await.ok();
            spinner.fail("cdk timed out");
            anyhow::bail!("cdk timed out after {}s", timeout.as_secs());
        }
    };
    spinner.clear();

    if status.success() {
        Ok(())
    } else {
        anyhow::bail!("cdk exited with {status}")
    }
}

#[cfg(test)]
mod tests {
    use bw_config::CliConfig;

    use super::*;

    fn target(account: Option<&str>) -> CdkTarget {
        CdkTarget {
            account: account.map(str::to_string),
            region: "eu-west-1".to_string(),
            profile: "staging".to_string(),
        }
    }

    #[test]
    fn context_args_without_account_skip_the_account_flag() {
        let args = target(None).context_args();
        assert_eq!(args, vec!["--profile", "staging", "-c", "region=eu-west-1"]);
    }

    #[test]
    fn context_args_carry_account_and_region() {
        let args = target(Some("123456789012")).context_args();
        assert_eq!(
            args,
            vec![
                "--profile",
                "staging",
                "-c",
                "account=123456789012",
                "-c",
                "region=eu-west-1",
            ]
        );
    }

    #[test]
    fn deploy_timeout_comes_from_behavior_config() {
        let config = CliConfig::default();
        assert_eq!(config.behavior.deployment_timeout_secs, 1800);
    }
}
