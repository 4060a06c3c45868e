use clap::Subcommand;

/// `blackwell cost` subcommands.
#[derive(Clone, Debug, Subcommand)]
pub enum CostCommands {
    /// Estimate the monthly cost for a client.
    Estimate {
        client_id: String,
        #[arg(long, default_value_t = 0.0)]
        monthly_sales: f64,
        #[arg(long)]
        monthly_builds: Option<u32>,
    },
    /// Compare provider combinations against a client's current stack.
    Compare {
        client_id: String,
        /// Only show combinations with a total under this budget.
        #[arg(long)]
        budget: Option<f64>,
        #[arg(long, default_value_t = 0.0)]
        monthly_sales: f64,
    },
    /// Suggest cheaper configurations for a client.
    Optimize {
        client_id: String,
        #[arg(long, default_value_t = 0.0)]
        monthly_sales: f64,
    },
}
