use std::path::PathBuf;

use clap::Subcommand;

/// `blackwell platform` subcommands.
#[derive(Clone, Debug, Subcommand)]
pub enum PlatformCommands {
    /// Show where the provider catalog came from.
    Status,
    /// Re-resolve the catalog from the platform checkout.
    Refresh,
    /// Turn platform metadata resolution back on.
    Enable,
    /// Force the built-in static tables.
    Disable,
    /// Show or set the platform-infrastructure path.
    Path { dir: Option<PathBuf> },
}
