//! The fixed diagnostic checklist behind `blackwell doctor`.

use std::fmt;

use bw_config::{is_valid_platform_path, CliConfig};
use bw_providers::{Catalog, ProviderKind};
use serde::Serialize;

use crate::bootstrap::BootstrapChecker;
use crate::tools::{aws_identity, check_command};

/// Outcome level of a single diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Healthy,
    Info,
    Warning,
    Error,
}

impl Severity {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Healthy => "healthy",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One line of doctor output.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    pub name: String,
    pub severity: Severity,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fix: Option<String>,
}

impl Diagnostic {
    fn healthy(name: &str, message: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            severity: Severity::Healthy,
            message: message.into(),
            detail: None,
            fix: None,
        }
    }

    fn problem(
        name: &str,
        severity: Severity,
        message: impl Into<String>,
        fix: impl Into<String>,
    ) -> Self {
        Self {
            name: name.to_string(),
            severity,
            message: message.into(),
            detail: None,
            fix: Some(fix.into()),
        }
    }

    fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

/// True when no diagnostic reached `error`.
#[must_use]
pub fn passed(diagnostics: &[Diagnostic]) -> bool {
    diagnostics.iter().all(|d| d.severity != Severity::Error)
}

/// Runs the full system checklist.
#[derive(Debug, Default)]
pub struct SystemDoctor {
    checker: BootstrapChecker,
}

impl SystemDoctor {
    #[must_use]
    pub fn new(profile: Option<String>) -> Self {
        Self {
            checker: BootstrapChecker::new(profile),
        }
    }

    /// Full environment checklist: tooling, credentials, region, bootstrap,
    /// platform path, and configuration sanity.
    pub async fn diagnose(&self, config: &CliConfig, catalog: &Catalog) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        for (tool, severity, fix) in [
            ("node", Severity::Error, "install Node.js 18 or newer"),
            ("cdk", Severity::Error, "npm install -g aws-cdk"),
            ("aws", Severity::Error, "install the AWS CLI v2"),
            ("git", Severity::Warning, "install git"),
        ] {
            match check_command(tool).await {
                Some(version) => diagnostics
                    .push(Diagnostic::healthy(tool, format!("found ({version})"))),
                None => diagnostics.push(Diagnostic::problem(
                    tool,
                    severity,
                    "not found on PATH",
                    fix,
                )),
            }
        }

        match aws_identity(Some(&config.aws.profile)).await {
            Ok(identity) => diagnostics.push(
                Diagnostic::healthy(
                    "aws_credentials",
                    format!("authenticated as account {}", identity.account),
                )
                .with_detail(identity.arn),
            ),
            Err(err) => diagnostics.push(
                Diagnostic::problem(
                    "aws_credentials",
                    Severity::Error,
                    "could not resolve caller identity",
                    format!("run 'aws configure --profile {}'", config.aws.profile),
                )
                .with_detail(err.to_string()),
            ),
        }

        if config.aws.region.is_empty() {
            diagnostics.push(Diagnostic::problem(
                "aws_region",
                Severity::Warning,
                "no region configured",
                "blackwell config set aws.region <region>",
            ));
        } else {
            diagnostics.push(Diagnostic::healthy(
                "aws_region",
                format!("using {}", config.aws.region),
            ));
        }

        let bootstrap = self.checker.status(None, Some(&config.aws.region)).await;
        if bootstrap.bootstrapped {
            let version = bootstrap.toolkit_version.as_deref().unwrap_or("unknown");
            diagnostics.push(Diagnostic::healthy(
                "cdk_bootstrap",
                format!("bootstrapped in {} (version {version})", bootstrap.region),
            ));
        } else {
            diagnostics.push(
                Diagnostic::problem(
                    "cdk_bootstrap",
                    Severity::Warning,
                    format!("not bootstrapped in {}", bootstrap.region),
                    "blackwell deploy bootstrap run",
                )
                .with_detail(bootstrap.errors.join("; ")),
            );
        }

        diagnostics.push(platform_diagnostic(config));
        diagnostics.extend(config_diagnostics(config, catalog));

        diagnostics
    }

    /// Quick pre-deploy gate: cdk present, credentials valid, target
    /// account/region bootstrapped.
    pub async fn deployment_readiness(
        &self,
        account: Option<&str>,
        region: Option<&str>,
    ) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        match check_command("cdk").await {
            Some(version) => {
                diagnostics.push(Diagnostic::healthy("cdk", format!("found ({version})")));
            }
            None => diagnostics.push(Diagnostic::problem(
                "cdk",
                Severity::Error,
                "not found on PATH",
                "npm install -g aws-cdk",
            )),
        }

        match aws_identity(None).await {
            Ok(identity) => diagnostics.push(Diagnostic::healthy(
                "aws_credentials",
                format!("authenticated as account {}", identity.account),
            )),
            Err(err) => diagnostics.push(
                Diagnostic::problem(
                    "aws_credentials",
                    Severity::Error,
                    "could not resolve caller identity",
                    "check AWS credentials",
                )
                .with_detail(err.to_string()),
            ),
        }

        let bootstrap = self.checker.status(account, region).await;
        if bootstrap.bootstrapped {
            diagnostics.push(Diagnostic::healthy(
                "cdk_bootstrap",
                format!("bootstrapped in {}", bootstrap.region),
            ));
        } else {
            diagnostics.push(Diagnostic::problem(
                "cdk_bootstrap",
                Severity::Error,
                format!("not bootstrapped in {}", bootstrap.region),
                "blackwell deploy bootstrap run",
            ));
        }

        diagnostics
    }
}

fn platform_diagnostic(config: &CliConfig) -> Diagnostic {
    match config.platform_path() {
        Some(path) if is_valid_platform_path(&path) => Diagnostic::healthy(
            "platform",
            format!("platform-infrastructure at {}", path.display()),
        ),
        Some(path) => Diagnostic::problem(
            "platform",
            Severity::Warning,
            format!("{} is not a platform-infrastructure checkout", path.display()),
            "blackwell platform path <dir>",
        ),
        None => Diagnostic::problem(
            "platform",
            Severity::Info,
            "no platform-infrastructure linked; using built-in provider tables",
            "blackwell platform path <dir>",
        ),
    }
}

fn config_diagnostics(config: &CliConfig, catalog: &Catalog) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    let defaults = &config.defaults;
    let mut unknown = Vec::new();
    if !catalog.is_valid(ProviderKind::Cms, &defaults.cms_provider) {
        unknown.push(format!("cms '{}'", defaults.cms_provider));
    }
    if !catalog.is_valid(ProviderKind::Ecommerce, &defaults.ecommerce_provider) {
        unknown.push(format!("ecommerce '{}'", defaults.ecommerce_provider));
    }
    if !catalog.is_valid(ProviderKind::Ssg, &defaults.ssg_engine) {
        unknown.push(format!("ssg '{}'", defaults.ssg_engine));
    }

    if unknown.is_empty() {
        diagnostics.push(Diagnostic::healthy(
            "config_defaults",
            "default providers are all known",
        ));
    } else {
        diagnostics.push(Diagnostic::problem(
            "config_defaults",
            Severity::Warning,
            format!("unknown default providers: {}", unknown.join(", ")),
            "blackwell config set defaults.<key> <provider>",
        ));
    }

    if config.behavior.cost_alert_threshold <= 0.0 {
        diagnostics.push(Diagnostic::problem(
            "config_thresholds",
            Severity::Warning,
            "cost alert threshold must be positive",
            "blackwell config set behavior.cost_alert_threshold 200.0",
        ));
    } else {
        diagnostics.push(Diagnostic::healthy(
            "config_thresholds",
            format!(
                "cost alerts above ${:.2}/month",
                config.behavior.cost_alert_threshold
            ),
        ));
    }

    diagnostics
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn passed_requires_no_errors() {
        let healthy = vec![
            Diagnostic::healthy("a", "fine"),
            Diagnostic::problem("b", Severity::Warning, "meh", "fix b"),
        ];
        assert!(passed(&healthy));

        let failing = vec![Diagnostic::problem("c", Severity::Error, "bad", "fix c")];
        assert!(!passed(&failing));
    }

    #[test]
    fn default_config_defaults_are_known_providers() {
        let config = CliConfig::default();
        let catalog = Catalog::builtin();
        let diagnostics = config_diagnostics(&config, &catalog);
        assert_eq!(diagnostics[0].severity, Severity::Healthy);
        assert_eq!(diagnostics[1].severity, Severity::Healthy);
    }

    #[test]
    fn bad_threshold_is_flagged() {
        let mut config = CliConfig::default();
        config.behavior.cost_alert_threshold = -1.0;
        let catalog = Catalog::builtin();
        let diagnostics = config_diagnostics(&config, &catalog);
        assert_eq!(diagnostics[1].severity, Severity::Warning);
    }
}
