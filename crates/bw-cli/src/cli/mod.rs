use std::path::PathBuf;

use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `blackwell` binary.
#[derive(Debug, Parser)]
#[command(
    name = "blackwell",
    version,
    about = "Blackwell - composable web stacks on AWS"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "table")]
    pub format: OutputFormat,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to an alternate config file (defaults to ~/.blackwell/config.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            verbose: self.verbose,
            config: self.config.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::{Cli, Commands, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from(["blackwell", "--format", "json", "--verbose", "quickstart"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Json);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Quickstart(_)));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["blackwell", "quickstart", "--format", "raw", "--quiet"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.quiet);
    }

    #[test]
    fn format_defaults_to_table() {
        let cli = Cli::try_parse_from(["blackwell", "quickstart"]).expect("cli should parse");
        assert_eq!(cli.format, OutputFormat::Table);
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        let parsed = Cli::try_parse_from(["blackwell", "--format", "xml", "quickstart"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn create_client_parses_full_flag_set() {
        let cli = Cli::try_parse_from([
            "blackwell",
            "create",
            "client",
            "acme-co",
            "--company",
            "Acme Co",
            "--domain",
            "acme.example",
            "--email",
            "ops@acme.example",
            "--cms",
            "sanity",
            "--ecommerce",
            "snipcart",
            "--ssg",
            "astro",
            "--mode",
            "event_driven",
        ])
        .expect("cli should parse");

        let Commands::Create { action } = cli.command else {
            panic!("expected create");
        };
        let super::subcommands::CreateCommands::Client(args) = action;
        assert_eq!(args.client_id, "acme-co");
        assert_eq!(args.cms.as_deref(), Some("sanity"));
        assert_eq!(args.ecommerce.as_deref(), Some("snipcart"));
    }

    #[test]
    fn deploy_bootstrap_status_parses() {
        let cli = Cli::try_parse_from([
            "blackwell",
            "deploy",
            "bootstrap",
            "status",
            "--region",
            "eu-west-1",
        ])
        .expect("cli should parse");
        assert!(matches!(cli.command, Commands::Deploy { .. }));
    }

    #[test]
    fn migrate_requires_target_provider() {
        let parsed = Cli::try_parse_from(["blackwell", "migrate", "cms", "acme-co"]);
        assert!(parsed.is_err());
    }
}
