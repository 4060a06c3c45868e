pub mod client;
pub mod config;
pub mod cost;
pub mod deploy;
pub mod dispatch;
pub mod doctor;
pub mod init;
pub mod list;
pub mod migrate;
pub mod platform;
pub mod quickstart;
pub mod templates;

mod shared;
