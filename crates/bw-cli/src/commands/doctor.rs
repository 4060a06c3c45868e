//! `blackwell doctor` - environment and AWS readiness checks.

use bw_doctor::{passed, SystemDoctor};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::DoctorArgs;
use crate::context::AppContext;
use crate::output::emit;

#[derive(Serialize)]
struct DoctorReport {
    passed: bool,
    diagnostics: Vec<bw_doctor::Diagnostic>,
}

pub async fn handle(
    args: &DoctorArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let profile = args
        .profile
        .clone()
        .unwrap_or_else(|| ctx.config.aws.profile.clone());
    let doctor = SystemDoctor::new(Some(profile));

    let mut diagnostics = doctor.diagnose(&ctx.config, &ctx.catalog.catalog).await;

    if args.deployment_check {
        let region = args.region.clone().unwrap_or_else(|| ctx.config.aws.region.clone());
        diagnostics.extend(
            doctor
                .deployment_readiness(args.account.as_deref(), Some(&region))
                .await,
        );
    }

    let ok = passed(&diagnostics);
    emit(
        &DoctorReport {
            passed: ok,
            diagnostics,
        },
        flags.format,
    )?;

    if ok {
        Ok(())
    } else {
        anyhow::bail!("one or more checks failed")
    }
}
