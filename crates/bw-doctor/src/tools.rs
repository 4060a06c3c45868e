//! Probes for external tooling and AWS credentials.

use std::time::Duration;

use serde::Deserialize;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;

use crate::error::DoctorError;

const VERSION_TIMEOUT: Duration = Duration::from_secs(10);

/// Identity reported by `aws sts get-caller-identity`.
#[derive(Debug, Clone, Deserialize)]
pub struct AwsIdentity {
    #[serde(rename = "Account")]
    pub account: String,
    #[serde(rename = "Arn")]
    pub arn: String,
    #[serde(rename = "UserId")]
    pub user_id: String,
}

/// Probe a tool by running `<cmd> --version` with a 10 second timeout.
/// Returns the first output line on success, `None` when the tool is
/// missing, broken, or hangs.
pub async fn check_command(cmd: &str) -> Option<String> {
    let result = timeout(
        VERSION_TIMEOUT,
        Command::new(cmd).arg("--version").output(),
    )
    .await;

    match result {
        Ok(Ok(output)) if output.status.success() => {
            let stdout = String::from_utf8_lossy(&output.stdout);
            stdout.lines().next().map(|line| line.trim().to_string())
        }
        Ok(Ok(output)) => {
            debug!(cmd, code = ?output.status.code(), "version probe failed");
            None
        }
        Ok(Err(err)) => {
            debug!(cmd, %err, "version probe could not launch");
            None
        }
        Err(_) => {
            debug!(cmd, "version probe timed out");
            None
        }
    }
}

/// Resolve the caller identity for the given AWS profile.
pub async fn aws_identity(profile: Option<&str>) -> Result<AwsIdentity, DoctorError> {
    let mut command = Command::new("aws");
    command.args(["sts", "get-caller-identity", "--output", "json"]);
    if let Some(profile) = profile {
        command.args(["--profile", profile]);
    }

    let described = "aws sts get-caller-identity".to_string();
    let output = timeout(VERSION_TIMEOUT, command.output())
        .await
        .map_err(|_| DoctorError::Timeout {
            command: described.clone(),
            secs: VERSION_TIMEOUT.as_secs(),
        })?
        .map_err(|source| DoctorError::Launch {
            command: described.clone(),
            source,
        })?;

    if !output.status.success() {
        return Err(DoctorError::Failed {
            command: described,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    serde_json::from_slice(&output.stdout).map_err(|source| DoctorError::Parse {
        command: described,
        source,
    })
}

/// The region configured for a profile, via `aws configure get region`.
/// `None` when unset or the CLI is unavailable.
pub async fn aws_region(profile: Option<&str>) -> Option<String> {
    let mut command = Command::new("aws");
    command.args(["configure", "get", "region"]);
    if let Some(profile) = profile {
        command.args(["--profile", profile]);
    }

    let output = timeout(VERSION_TIMEOUT, command.output()).await.ok()?.ok()?;
    if !output.status.success() {
        return None;
    }
    let region = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!region.is_empty()).then_some(region)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_tool_probes_to_none() {
        let version = check_command("definitely-not-a-real-tool-7f3a").await;
        assert!(version.is_none());
    }

    #[test]
    fn identity_parses_sts_payload() {
        let payload = r#"{
            "UserId": "AIDAEXAMPLE",
            "Account": "123456789012",
            "Arn": "arn:aws:iam::123456789012:user/deploy"
        }"#;
        let identity: AwsIdentity = serde_json::from_str(payload).expect("parse");
        assert_eq!(identity.account, "123456789012");
        assert!(identity.arn.ends_with("user/deploy"));
    }
}
