use anyhow::Context;
use bw_config::CliConfig;
use bw_providers::{platform, ResolvedCatalog};
use bw_registry::ClientRegistry;

use crate::cli::GlobalFlags;

/// Everything command handlers need: effective config, the open registry,
/// and the resolved provider catalog.
pub struct AppContext {
    pub config: CliConfig,
    pub registry: ClientRegistry,
    pub catalog: ResolvedCatalog,
}

impl AppContext {
    pub async fn init(flags: &GlobalFlags) -> anyhow::Result<Self> {
        let config = CliConfig::load_with_dotenv(flags.config.as_deref())
            .context("failed to load configuration")?;

        let registry_dir = CliConfig::registry_dir()?;
        let registry = ClientRegistry::open(&registry_dir)
            .with_context(|| format!("failed to open registry at {}", registry_dir.display()))?;

        let platform_path = config.platform_path();
        let catalog = platform::resolve(
            platform_path.as_deref(),
            config.platform_infrastructure.force_static_mode,
        )
        .await;

        Ok(Self {
            config,
            registry,
            catalog,
        })
    }
}
