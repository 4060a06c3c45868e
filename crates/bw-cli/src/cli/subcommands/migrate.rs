use clap::{Args, Subcommand};

/// `blackwell migrate` subcommands.
#[derive(Clone, Debug, Subcommand)]
pub enum MigrateCommands {
    /// Switch a client's CMS provider.
    Cms(MigrateArgs),
    /// Switch a client's e-commerce provider (`--to none` removes it).
    Ecommerce(MigrateArgs),
    /// Switch a client's integration mode.
    Mode(MigrateArgs),
}

/// Shared arguments for migration commands.
#[derive(Clone, Debug, Args)]
pub struct MigrateArgs {
    pub client_id: String,
    /// Migration target (provider id, mode, or `none`).
    #[arg(long)]
    pub to: String,
    /// Apply the migration instead of only previewing it.
    #[arg(long)]
    pub apply: bool,
    /// Monthly sales volume used for the cost delta preview.
    #[arg(long, default_value_t = 0.0)]
    pub monthly_sales: f64,
}
