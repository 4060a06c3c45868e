use clap::{Args, Subcommand};

/// `blackwell init` subcommands.
#[derive(Clone, Debug, Subcommand)]
pub enum InitCommands {
    /// Write a default config file and link the platform if discoverable.
    Workspace {
        /// Overwrite an existing config file.
        #[arg(long)]
        force: bool,
    },
    /// Register a new client project, from a template or explicit providers.
    Project(ProjectArgs),
}

/// Arguments for `blackwell init project`.
#[derive(Clone, Debug, Args)]
pub struct ProjectArgs {
    /// Client identifier (kebab-case).
    pub client_id: String,
    #[arg(long)]
    pub company: String,
    #[arg(long)]
    pub domain: String,
    #[arg(long)]
    pub email: String,
    /// Start from a built-in template (see `blackwell templates list`).
    #[arg(long, conflicts_with_all = ["cms", "ecommerce", "ssg", "mode"])]
    pub template: Option<String>,
    #[arg(long)]
    pub cms: Option<String>,
    #[arg(long)]
    pub ecommerce: Option<String>,
    #[arg(long)]
    pub ssg: Option<String>,
    /// Integration mode: direct or event_driven.
    #[arg(long)]
    pub mode: Option<String>,
}
