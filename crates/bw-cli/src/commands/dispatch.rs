//! Routes a parsed command line to its handler.

use crate::cli::root_commands::Commands;
use crate::cli::subcommands::{CreateCommands, DeleteCommands};
use crate::cli::GlobalFlags;
use crate::commands;
use crate::context::AppContext;

pub async fn dispatch(
    command: &Commands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Init { action } => commands::init::handle(action, ctx, flags),
        Commands::Create { action } => match action {
            CreateCommands::Client(args) => commands::client::handle_create(args, ctx, flags),
        },
        Commands::Delete { action } => match action {
            DeleteCommands::Client { client_id, force } => {
                commands::client::handle_delete(client_id, *force, ctx, flags)
            }
        },
        Commands::Deploy { action } => commands::deploy::handle(action, ctx, flags).await,
        Commands::Migrate { action } => commands::migrate::handle(action, ctx, flags),
        Commands::List { action } => commands::list::handle(action, ctx, flags),
        Commands::Cost { action } => commands::cost::handle(action, ctx, flags),
        Commands::Config { action } => commands::config::handle(action, ctx, flags),
        Commands::Templates { action } => commands::templates::handle(action, ctx, flags),
        Commands::Platform { action } => commands::platform::handle(action, ctx, flags).await,
        Commands::Doctor(args) => commands::doctor::handle(args, ctx, flags).await,
        Commands::Quickstart(args) => commands::quickstart::handle(args, ctx, flags),
    }
}
