//! CDK bootstrap detection and execution.
//!
//! Bootstrap state is read from the `CDKToolkit` CloudFormation stack; the
//! `BootstrapVersion` output tells which bootstrap template version is live
//! in an account/region pair.

use std::process::Stdio;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, info};

use crate::error::DoctorError;
use crate::tools::{aws_identity, aws_region};

const TOOLKIT_STACK: &str = "CDKToolkit";
const DESCRIBE_TIMEOUT: Duration = Duration::from_secs(30);
const BOOTSTRAP_TIMEOUT: Duration = Duration::from_secs(300);
const HEALTHY_STACK_STATUSES: &[&str] = &["CREATE_COMPLETE", "UPDATE_COMPLETE"];

/// Bootstrap state of one account/region pair.
#[derive(Debug, Clone, Serialize)]
pub struct BootstrapStatus {
    pub account_id: Option<String>,
    pub region: String,
    pub profile: Option<String>,
    pub bootstrapped: bool,
    pub toolkit_stack_exists: bool,
    pub toolkit_version: Option<String>,
    pub errors: Vec<String>,
    pub checked_at: DateTime<Utc>,
}

/// Result of a bootstrap run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum BootstrapOutcome {
    /// Already bootstrapped and `force` was not set.
    Skipped { account_id: String, region: String },
    Completed { account_id: String, region: String },
}

#[derive(Debug, Deserialize)]
struct DescribeStacks {
    #[serde(rename = "Stacks", default)]
    stacks: Vec<StackDescription>,
}

#[derive(Debug, Deserialize)]
struct StackDescription {
    #[serde(rename = "StackStatus")]
    stack_status: String,
    #[serde(rename = "Outputs", default)]
    outputs: Vec<StackOutput>,
}

#[derive(Debug, Deserialize)]
struct StackOutput {
    #[serde(rename = "OutputKey")]
    key: String,
    #[serde(rename = "OutputValue")]
    value: String,
}

/// Checks and runs CDK bootstrap against a fixed profile.
#[derive(Debug, Clone, Default)]
pub struct BootstrapChecker {
    profile: Option<String>,
}

impl BootstrapChecker {
    #[must_use]
    pub fn new(profile: Option<String>) -> Self {
        Self { profile }
    }

    /// Detect the bootstrap state for an account/region. Missing account or
    /// region are resolved from the profile's credentials; failures are
    /// collected in `errors` rather than aborting the check.
    pub async fn status(
        &self,
        account: Option<&str>,
        region: Option<&str>,
    ) -> BootstrapStatus {
        let mut errors = Vec::new();

        let account_id = match account {
            Some(explicit) => Some(explicit.to_string()),
            None => match aws_identity(self.profile.as_deref()).await {
                Ok(identity) => Some(identity.account),
                Err(err) => {
                    errors.push(err.to_string());
                    None
                }
            },
        };

        let region = match region {
            Some(explicit) => explicit.to_string(),
            None => aws_region(self.profile.as_deref())
                .await
                .unwrap_or_else(|| "us-east-1".to_string()),
        };

        let mut status = BootstrapStatus {
            account_id,
            region: region.clone(),
            profile: self.profile.clone(),
            bootstrapped: false,
            toolkit_stack_exists: false,
            toolkit_version: None,
            errors,
            checked_at: Utc::now(),
        };

        match self.describe_toolkit(&region).await {
            Ok(Some(stack)) => {
                status.toolkit_stack_exists = true;
                status.toolkit_version = stack
                    .outputs
                    .iter()
                    .find(|o| o.key == "BootstrapVersion")
                    .map(|o| o.value.clone());
                status.bootstrapped =
                    HEALTHY_STACK_STATUSES.contains(&stack.stack_status.as_str());
                if !status.bootstrapped {
                    status
                        .errors
                        .push(format!("toolkit stack is {}", stack.stack_status));
                }
            }
            Ok(None) => debug!(region, "no CDKToolkit stack"),
            Err(err) => status.errors.push(err.to_string()),
        }

        status
    }

    /// Check several regions sequentially.
    pub async fn statuses(
        &self,
        account: Option<&str>,
        regions: &[String],
    ) -> Vec<BootstrapStatus> {
        let mut results = Vec::with_capacity(regions.len());
        for region in regions {
            results.push(self.status(account, Some(region)).await);
        }
        results
    }

    /// Run `cdk bootstrap` for an account/region, streaming its output to
    /// the terminal. Skipped when already bootstrapped, unless `force`.
    pub async fn run_bootstrap(
        &self,
        account: Option<&str>,
        region: Option<&str>,
        trust: &[String],
        force: bool,
    ) -> Result<BootstrapOutcome, DoctorError> {
        let status = self.status(account, region).await;
        let account_id = status.account_id.clone().ok_or_else(|| {
            DoctorError::NoAccount {
                profile: self.profile.clone().unwrap_or_else(|| "default".to_string()),
            }
        })?;
        let region = status.region.clone();

        if status.bootstrapped && !force {
            info!(account_id, region, "already bootstrapped, skipping");
            return Ok(BootstrapOutcome::Skipped { account_id, region });
        }

        let mut command = Command::new("cdk");
        command.arg("bootstrap");
        if let Some(profile) = &self.profile {
            command.args(["--profile", profile]);
        }
        if !trust.is_empty() {
            command.args(["--trust", &trust.join(",")]);
        }
        command.arg(format!("aws://{account_id}/{region}"));
        command.stdout(Stdio::inherit()).stderr(Stdio::inherit());

        let described = format!("cdk bootstrap aws://{account_id}/{region}");
        let mut child = command.spawn().map_err(|source| DoctorError::Launch {
            command: described.clone(),
            source,
        })?;

        let exit = timeout(BOOTSTRAP_TIMEOUT, child.wait())
            .await
            .map_err(|_| DoctorError::Timeout {
                command: described.clone(),
                secs: BOOTSTRAP_TIMEOUT.as_secs(),
            })?
            .map_err(|source| DoctorError::Launch {
                command: described.clone(),
                source,
            })?;

        if !exit.success() {
            return Err(DoctorError::Failed {
                command: described,
                stderr: format!("exit status {exit}"),
            });
        }

        Ok(BootstrapOutcome::Completed { account_id, region })
    }

    async fn describe_toolkit(
        &self,
        region: &str,
    ) -> Result<Option<StackDescription>, DoctorError> {
        let mut command = Command::new("aws");
        command.args([
            "cloudformation",
            "describe-stacks",
            "--stack-name",
            TOOLKIT_STACK,
            "--region",
            region,
            "--output",
            "json",
        ]);
        if let Some(profile) = &self.profile {
            command.args(["--profile", profile]);
        }

        let described = format!("aws cloudformation describe-stacks ({region})");
        let output = timeout(DESCRIBE_TIMEOUT, command.output())
            .await
            .map_err(|_| DoctorError::Timeout {
                command: described.clone(),
                secs: DESCRIBE_TIMEOUT.as_secs(),
            })?
            .map_err(|source| DoctorError::Launch {
                command: described.clone(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            // "does not exist" is a normal un-bootstrapped state, not an error.
            if stderr.contains("does not exist") {
                return Ok(None);
            }
            return Err(DoctorError::Failed {
                command: described,
                stderr: stderr.trim().to_string(),
            });
        }

        let parsed: DescribeStacks =
            serde_json::from_slice(&output.stdout).map_err(|source| DoctorError::Parse {
                command: described,
                source,
            })?;
        Ok(parsed.stacks.into_iter().next())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn describe_stacks_payload_parses() {
        let payload = r#"{
            "Stacks": [{
                "StackStatus": "CREATE_COMPLETE",
                "Outputs": [
                    {"OutputKey": "BucketName", "OutputValue": "cdk-assets"},
                    {"OutputKey": "BootstrapVersion", "OutputValue": "21"}
                ]
            }]
        }"#;
        let parsed: DescribeStacks = serde_json::from_str(payload).expect("parse");
        let stack = &parsed.stacks[0];
        assert_eq!(stack.stack_status, "CREATE_COMPLETE");
        let version = stack
            .outputs
            .iter()
            .find(|o| o.key == "BootstrapVersion")
            .map(|o| o.value.clone());
        assert_eq!(version.as_deref(), Some("21"));
    }

    #[test]
    fn healthy_statuses_cover_create_and_update() {
        assert!(HEALTHY_STACK_STATUSES.contains(&"CREATE_COMPLETE"));
        assert!(HEALTHY_STACK_STATUSES.contains(&"UPDATE_COMPLETE"));
        assert!(!HEALTHY_STACK_STATUSES.contains(&"ROLLBACK_COMPLETE"));
    }
}
