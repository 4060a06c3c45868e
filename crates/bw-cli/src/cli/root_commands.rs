use clap::{Args, Subcommand};

use crate::cli::subcommands::{
    ConfigCommands, CostCommands, CreateCommands, DeleteCommands, DeployCommands, InitCommands,
    ListCommands, MigrateCommands, PlatformCommands, TemplateCommands,
};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Initialize the workspace or a new client project.
    Init {
        #[command(subcommand)]
        action: InitCommands,
    },
    /// Create resources.
    Create {
        #[command(subcommand)]
        action: CreateCommands,
    },
    /// Delete resources.
    Delete {
        #[command(subcommand)]
        action: DeleteCommands,
    },
    /// Deploy stacks and manage CDK bootstrap.
    Deploy {
        #[command(subcommand)]
        action: DeployCommands,
    },
    /// Migrate a client between providers or integration modes.
    Migrate {
        #[command(subcommand)]
        action: MigrateCommands,
    },
    /// List clients, providers, deployments, or templates.
    List {
        #[command(subcommand)]
        action: ListCommands,
    },
    /// Cost estimation and optimization.
    Cost {
        #[command(subcommand)]
        action: CostCommands,
    },
    /// Configuration management.
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
    /// Stack templates.
    Templates {
        #[command(subcommand)]
        action: TemplateCommands,
    },
    /// Platform-infrastructure integration.
    Platform {
        #[command(subcommand)]
        action: PlatformCommands,
    },
    /// Diagnose the local environment and AWS setup.
    Doctor(DoctorArgs),
    /// Guided summary for getting a first client deployed.
    Quickstart(QuickstartArgs),
}

/// Arguments for `blackwell doctor`.
#[derive(Clone, Debug, Args)]
pub struct DoctorArgs {
    /// Also run the pre-deployment readiness gate.
    #[arg(long)]
    pub deployment_check: bool,
    #[arg(long)]
    pub account: Option<String>,
    #[arg(long)]
    pub region: Option<String>,
    #[arg(long)]
    pub profile: Option<String>,
}

/// Arguments for `blackwell quickstart`.
#[derive(Clone, Debug, Args)]
pub struct QuickstartArgs {
    /// Only show combinations with a fixed monthly cost under this budget.
    #[arg(long)]
    pub budget: Option<f64>,
    /// Cap recommendations at this complexity (beginner, intermediate,
    /// advanced, enterprise).
    #[arg(long)]
    pub complexity: Option<String>,
}
