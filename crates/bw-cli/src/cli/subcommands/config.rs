use clap::Subcommand;

/// `blackwell config` subcommands.
#[derive(Clone, Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration.
    Show,
    /// Set a value by dot-separated key (e.g. `aws.region us-west-2`).
    Set { key: String, value: String },
    /// Restore a key to its default.
    Unset { key: String },
    /// Restore every setting to defaults.
    Reset {
        /// Skip the confirmation requirement.
        #[arg(long)]
        yes: bool,
    },
    /// Print the config file path.
    Path,
}
