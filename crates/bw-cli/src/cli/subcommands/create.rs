use clap::{Args, Subcommand};

/// `blackwell create` subcommands.
#[derive(Clone, Debug, Subcommand)]
pub enum CreateCommands {
    /// Register a new client in the registry.
    Client(CreateClientArgs),
}

/// Arguments for `blackwell create client`.
#[derive(Clone, Debug, Args)]
pub struct CreateClientArgs {
    /// Client identifier (kebab-case).
    pub client_id: String,
    #[arg(long)]
    pub company: String,
    #[arg(long)]
    pub domain: String,
    #[arg(long)]
    pub email: String,
    /// CMS provider id (defaults from config).
    #[arg(long)]
    pub cms: Option<String>,
    /// E-commerce provider id; omit for a CMS-only stack.
    #[arg(long)]
    pub ecommerce: Option<String>,
    /// SSG engine id (defaults from config).
    #[arg(long)]
    pub ssg: Option<String>,
    /// Integration mode: direct or event_driven.
    #[arg(long)]
    pub mode: Option<String>,
    #[arg(long)]
    pub tier: Option<String>,
    #[arg(long)]
    pub region: Option<String>,
    #[arg(long, default_value = "")]
    pub notes: String,
}
