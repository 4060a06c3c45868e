use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Platform-infrastructure integration settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformConfig {
    /// Path to the platform-infrastructure CDK project, if linked.
    pub path: Option<PathBuf>,
    pub auto_discover: bool,
    /// Skip platform metadata resolution and always use the built-in tables.
    pub force_static_mode: bool,
    pub required_version: String,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            path: None,
            auto_discover: true,
            force_static_mode: false,
            required_version: "1.0.0".to_string(),
        }
    }
}
