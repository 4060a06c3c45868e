use clap::{Args, Subcommand};

/// `blackwell deploy` subcommands.
#[derive(Clone, Debug, Subcommand)]
pub enum DeployCommands {
    /// Deploy a client's stack via CDK.
    Client(DeployClientArgs),
    /// Deploy the shared infrastructure stack.
    Shared(SharedArgs),
    /// Tear down a client's stack.
    Destroy {
        client_id: String,
        #[arg(long)]
        force: bool,
        #[arg(long)]
        profile: Option<String>,
    },
    /// Show the CDK diff for a client without deploying.
    Diff {
        client_id: String,
        #[arg(long)]
        account: Option<String>,
        #[arg(long)]
        region: Option<String>,
        #[arg(long)]
        profile: Option<String>,
    },
    /// CDK bootstrap management.
    Bootstrap {
        #[command(subcommand)]
        action: BootstrapCommands,
    },
}

/// Arguments for `blackwell deploy client`.
#[derive(Clone, Debug, Args)]
pub struct DeployClientArgs {
    pub client_id: String,
    #[arg(long)]
    pub account: Option<String>,
    #[arg(long)]
    pub region: Option<String>,
    #[arg(long)]
    pub profile: Option<String>,
    /// Run `cdk diff` instead of deploying.
    #[arg(long)]
    pub dry_run: bool,
    /// Pass --require-approval=never to CDK.
    #[arg(long)]
    pub approve: bool,
}

/// Arguments for `blackwell deploy shared`.
#[derive(Clone, Debug, Args)]
pub struct SharedArgs {
    #[arg(long)]
    pub account: Option<String>,
    #[arg(long)]
    pub region: Option<String>,
    #[arg(long)]
    pub profile: Option<String>,
    #[arg(long)]
    pub dry_run: bool,
    #[arg(long)]
    pub approve: bool,
}

/// `blackwell deploy bootstrap` subcommands.
#[derive(Clone, Debug, Subcommand)]
pub enum BootstrapCommands {
    /// Show bootstrap state for the target account/region.
    Status {
        #[arg(long)]
        account: Option<String>,
        #[arg(long)]
        region: Option<String>,
        #[arg(long)]
        profile: Option<String>,
    },
    /// Run `cdk bootstrap`.
    Run {
        #[arg(long)]
        account: Option<String>,
        #[arg(long)]
        region: Option<String>,
        #[arg(long)]
        profile: Option<String>,
        /// Account ids to trust for cross-account deployments.
        #[arg(long)]
        trust: Vec<String>,
        /// Bootstrap again even when already bootstrapped.
        #[arg(long)]
        force: bool,
    },
    /// Verify the account/region is ready for deployments.
    Validate {
        #[arg(long)]
        account: Option<String>,
        #[arg(long)]
        region: Option<String>,
        #[arg(long)]
        profile: Option<String>,
    },
    /// Check bootstrap state across several regions.
    Regions {
        /// Regions to check.
        #[arg(required = true)]
        regions: Vec<String>,
        #[arg(long)]
        account: Option<String>,
        #[arg(long)]
        profile: Option<String>,
    },
}
