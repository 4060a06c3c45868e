use clap::Subcommand;

/// `blackwell delete` subcommands.
#[derive(Clone, Debug, Subcommand)]
pub enum DeleteCommands {
    /// Remove a client from the registry.
    Client {
        client_id: String,
        /// Skip the confirmation requirement.
        #[arg(long)]
        force: bool,
    },
}
