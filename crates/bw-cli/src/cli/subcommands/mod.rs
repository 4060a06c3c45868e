mod config;
mod cost;
mod create;
mod delete;
mod deploy;
mod init;
mod list;
mod migrate;
mod platform;
mod templates;

pub use config::ConfigCommands;
pub use cost::CostCommands;
pub use create::{CreateClientArgs, CreateCommands};
pub use delete::DeleteCommands;
pub use deploy::{BootstrapCommands, DeployClientArgs, DeployCommands, SharedArgs};
pub use init::{InitCommands, ProjectArgs};
pub use list::ListCommands;
pub use migrate::{MigrateArgs, MigrateCommands};
pub use platform::PlatformCommands;
pub use templates::{ApplyArgs, TemplateCommands};
