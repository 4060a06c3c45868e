use clap::Subcommand;

/// `blackwell list` subcommands.
#[derive(Clone, Debug, Subcommand)]
pub enum ListCommands {
    /// Registered clients.
    Clients {
        /// Filter by status (draft, ready, deploying, deployed, error,
        /// updating, destroying).
        #[arg(long)]
        status: Option<String>,
        /// Filter by provider or engine id.
        #[arg(long)]
        provider: Option<String>,
    },
    /// Available CMS, e-commerce, and SSG providers.
    Providers,
    /// Clients that are currently deployed.
    Deployments,
    /// Built-in stack templates.
    Templates,
}
