use clap::{Args, Subcommand};

/// `blackwell templates` subcommands.
#[derive(Clone, Debug, Subcommand)]
pub enum TemplateCommands {
    /// List built-in templates.
    List,
    /// Show one template's provider selection.
    Show { name: String },
    /// Create a client from a template.
    Apply(ApplyArgs),
}

/// Arguments for `blackwell templates apply`.
#[derive(Clone, Debug, Args)]
pub struct ApplyArgs {
    /// Template name.
    pub name: String,
    /// Client identifier (kebab-case).
    pub client_id: String,
    #[arg(long)]
    pub company: String,
    #[arg(long)]
    pub domain: String,
    #[arg(long)]
    pub email: String,
}
