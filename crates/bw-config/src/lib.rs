//! # bw-config
//!
//! Layered configuration loading for Blackwell using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. `AWS_PROFILE` / `AWS_DEFAULT_REGION` environment variables
//! 2. Environment variables (`BLACKWELL_*` prefix, `__` as separator)
//! 3. `~/.blackwell/config.yml` (or an explicit path)
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `BLACKWELL_AWS__REGION` -> `aws.region`,
//! `BLACKWELL_DEFAULTS__SSG_ENGINE` -> `defaults.ssg_engine`, etc. The `__`
//! (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use bw_config::CliConfig;
//!
//! let config = CliConfig::load(None).expect("config");
//! println!("region: {}", config.aws.region);
//! ```

mod aws;
mod behavior;
mod defaults;
mod error;
mod platform;

pub use aws::AwsConfig;
pub use behavior::BehaviorConfig;
pub use defaults::DefaultsConfig;
pub use error::ConfigError;
pub use platform::PlatformConfig;

use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Directory name under the user's home holding all Blackwell state.
const CONFIG_DIR_NAME: &str = ".blackwell";

/// Keys editable through `config set`/`config unset`.
const KNOWN_KEYS: &[&str] = &[
    "aws.profile",
    "aws.region",
    "aws.account_id",
    "defaults.cms_provider",
    "defaults.ecommerce_provider",
    "defaults.ssg_engine",
    "defaults.integration_mode",
    "defaults.service_tier",
    "defaults.management_model",
    "platform_infrastructure.path",
    "platform_infrastructure.auto_discover",
    "platform_infrastructure.force_static_mode",
    "platform_infrastructure.required_version",
    "behavior.verbose",
    "behavior.auto_confirm",
    "behavior.check_updates",
    "behavior.cost_alert_threshold",
    "behavior.deployment_timeout_secs",
];

/// Marker files and directories that identify a platform-infrastructure
/// project root.
const PLATFORM_MARKERS: &[&str] = &["pyproject.toml", "stacks", "shared"];

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct CliConfig {
    #[serde(default)]
    pub aws: AwsConfig,
    #[serde(default)]
    pub defaults: DefaultsConfig,
    #[serde(default)]
    pub platform_infrastructure: PlatformConfig,
    #[serde(default)]
    pub behavior: BehaviorConfig,
}

impl CliConfig {
    /// Load configuration from all sources.
    ///
    /// When `path` is `None`, the user-level `~/.blackwell/config.yml` is
    /// used if it exists. `AWS_PROFILE` and `AWS_DEFAULT_REGION` are honored
    /// last so standard AWS tooling conventions win over the config file.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config: Self = Self::figment(path)?.extract()?;

        if let Ok(profile) = std::env::var("AWS_PROFILE") {
            if !profile.is_empty() {
                config.aws.profile = profile;
            }
        }
        if let Ok(region) = std::env::var("AWS_DEFAULT_REGION") {
            if !region.is_empty() {
                config.aws.region = region;
            }
        }

        Ok(config)
    }

    /// Load configuration with `.env` file support.
    ///
    /// Calls `dotenvy` before building the figment so a local `.env` can
    /// provide `BLACKWELL_*` overrides. This is the CLI entry point.
    pub fn load_with_dotenv(path: Option<&Path>) -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load(path)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add additional
    /// providers on top.
    pub fn figment(path: Option<&Path>) -> Result<Figment, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        let file = match path {
            Some(explicit) => explicit.to_path_buf(),
            None => Self::config_path()?,
        };
        if file.exists() {
            debug!(path = %file.display(), "merging config file");
            figment = figment.merge(Yaml::file(file));
        }

        Ok(figment.merge(Env::prefixed("BLACKWELL_").split("__")))
    }

    /// `~/.blackwell`, the root directory for config and registry state.
    pub fn config_dir() -> Result<PathBuf, ConfigError> {
        dirs::home_dir()
            .map(|home| home.join(CONFIG_DIR_NAME))
            .ok_or(ConfigError::NoHomeDir)
    }

    /// `~/.blackwell/config.yml`.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        Ok(Self::config_dir()?.join("config.yml"))
    }

    /// `~/.blackwell/registry`, where client records live.
    pub fn registry_dir() -> Result<PathBuf, ConfigError> {
        Ok(Self::config_dir()?.join("registry"))
    }

    /// Persist to the default config path, creating `~/.blackwell` if needed.
    pub fn save(&self) -> Result<PathBuf, ConfigError> {
        let path = Self::config_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Persist to an explicit path as YAML.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    /// Read a single value by dot-separated key, e.g. `aws.region`.
    pub fn get(&self, key: &str) -> Result<serde_json::Value, ConfigError> {
        if !KNOWN_KEYS.contains(&key) {
            return Err(ConfigError::UnknownKey(key.to_string()));
        }
        let tree = serde_json::to_value(self).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            reason: e.to_string(),
        })?;
        let mut node = &tree;
        for part in key.split('.') {
            node = node.get(part).unwrap_or(&serde_json::Value::Null);
        }
        Ok(node.clone())
    }

    /// Set a single value by dot-separated key.
    ///
    /// The raw string is first parsed as JSON so `true`, `200.0`, and quoted
    /// strings all round-trip; anything unparseable is treated as a bare
    /// string. The whole model is re-deserialized afterwards, so a value of
    /// the wrong type is rejected rather than persisted.
    pub fn set(&mut self, key: &str, raw: &str) -> Result<(), ConfigError> {
        let value = serde_json::from_str(raw)
            .unwrap_or_else(|_| serde_json::Value::String(raw.to_string()));
        self.apply(key, value)
    }

    /// Reset a key back to its built-in default.
    pub fn unset(&mut self, key: &str) -> Result<(), ConfigError> {
        let defaults = Self::default();
        let value = defaults.get(key)?;
        self.apply(key, value)
    }

    /// Reset the whole configuration to built-in defaults.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn apply(&mut self, key: &str, value: serde_json::Value) -> Result<(), ConfigError> {
        if !KNOWN_KEYS.contains(&key) {
            return Err(ConfigError::UnknownKey(key.to_string()));
        }
        let mut tree = serde_json::to_value(&*self).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            reason: e.to_string(),
        })?;

        let mut node = &mut tree;
        let parts: Vec<&str> = key.split('.').collect();
        for part in &parts[..parts.len() - 1] {
            node = node
                .get_mut(*part)
                .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
        }
        node[parts[parts.len() - 1]] = value;

        *self = serde_json::from_value(tree).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            reason: e.to_string(),
        })?;
        Ok(())
    }

    /// All editable keys, for `config show` and shell completion.
    #[must_use]
    pub fn known_keys() -> &'static [&'static str] {
        KNOWN_KEYS
    }

    /// Resolve the platform-infrastructure path: explicit config first, then
    /// auto-discovery if enabled.
    #[must_use]
    pub fn platform_path(&self) -> Option<PathBuf> {
        if let Some(path) = &self.platform_infrastructure.path {
            if is_valid_platform_path(path) {
                return Some(path.clone());
            }
            debug!(path = %path.display(), "configured platform path is not valid");
        }
        if self.platform_infrastructure.auto_discover {
            return discover_platform();
        }
        None
    }
}

/// Search for a platform-infrastructure checkout near the working directory.
///
/// Checks, in order: the current directory itself, `./platform-infrastructure`,
/// and the same two relative to the parent directory.
#[must_use]
pub fn discover_platform() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    let mut candidates = vec![cwd.clone(), cwd.join("platform-infrastructure")];
    if let Some(parent) = cwd.parent() {
        candidates.push(parent.to_path_buf());
        candidates.push(parent.join("platform-infrastructure"));
    }
    candidates.into_iter().find(|c| is_valid_platform_path(c))
}

/// A directory is a platform-infrastructure root when it carries all the
/// expected markers (`pyproject.toml`, `stacks/`, `shared/`).
#[must_use]
pub fn is_valid_platform_path(path: &Path) -> bool {
    path.is_dir() && PLATFORM_MARKERS.iter().all(|m| path.join(m).exists())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn default_config_has_expected_values() {
        let config = CliConfig::default();
        assert_eq!(config.aws.profile, "default");
        assert_eq!(config.aws.region, "us-east-1");
        assert_eq!(config.defaults.cms_provider, "decap");
        assert_eq!(config.defaults.ssg_engine, "astro");
        assert_eq!(config.defaults.integration_mode, "event_driven");
        assert!(config.platform_infrastructure.auto_discover);
        assert!(!config.behavior.auto_confirm);
    }

    #[test]
    fn platform_section_serializes_under_its_full_name() {
        let yaml = serde_yaml::to_string(&CliConfig::default()).expect("yaml");
        assert!(yaml.contains("platform_infrastructure:"));
        assert!(!yaml.contains("\nplatform:"));

        let mut config = CliConfig::default();
        config
            .set("platform_infrastructure.force_static_mode", "true")
            .expect("set");
        assert!(config.platform_infrastructure.force_static_mode);
        assert!(matches!(
            config.get("platform.force_static_mode").unwrap_err(),
            ConfigError::UnknownKey(_)
        ));
    }

    #[test]
    fn yaml_file_overrides_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.yml");
        std::fs::write(
            &path,
            "aws:\n  region: eu-west-1\ndefaults:\n  ssg_engine: hugo\n",
        )
        .expect("write config");

        let figment = CliConfig::figment(Some(&path)).expect("figment");
        let config: CliConfig = figment.extract().expect("extract");
        assert_eq!(config.aws.region, "eu-west-1");
        assert_eq!(config.defaults.ssg_engine, "hugo");
        // Untouched sections keep their defaults.
        assert_eq!(config.aws.profile, "default");
        assert_eq!(config.defaults.cms_provider, "decap");
    }

    #[test]
    fn env_vars_override_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("config.yml", "aws:\n  region: eu-west-1\n")?;
            jail.set_env("BLACKWELL_AWS__REGION", "ap-southeast-2");

            let figment = CliConfig::figment(Some(Path::new("config.yml")))
                .expect("figment");
            let config: CliConfig = figment.extract()?;
            assert_eq!(config.aws.region, "ap-southeast-2");
            Ok(())
        });
    }

    #[test]
    fn save_round_trips() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("config.yml");

        let mut config = CliConfig::default();
        config.aws.region = "us-west-2".to_string();
        config.behavior.cost_alert_threshold = 150.0;
        config.save_to(&path).expect("save");

        let figment = CliConfig::figment(Some(&path)).expect("figment");
        let loaded: CliConfig = figment.extract().expect("extract");
        assert_eq!(loaded.aws.region, "us-west-2");
        assert!((loaded.behavior.cost_alert_threshold - 150.0).abs() < f64::EPSILON);
    }

    #[test]
    fn get_reads_dotted_keys() {
        let config = CliConfig::default();
        assert_eq!(
            config.get("aws.region").expect("get"),
            serde_json::json!("us-east-1")
        );
        assert_eq!(
            config.get("behavior.check_updates").expect("get"),
            serde_json::json!(true)
        );
    }

    #[test]
    fn get_rejects_unknown_keys() {
        let config = CliConfig::default();
        let err = config.get("aws.secret_key").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownKey(_)));
    }

    #[test]
    fn set_parses_scalars() {
        let mut config = CliConfig::default();
        config.set("aws.region", "eu-central-1").expect("set string");
        config.set("behavior.auto_confirm", "true").expect("set bool");
        config
            .set("behavior.cost_alert_threshold", "350.5")
            .expect("set number");

        assert_eq!(config.aws.region, "eu-central-1");
        assert!(config.behavior.auto_confirm);
        assert!((config.behavior.cost_alert_threshold - 350.5).abs() < f64::EPSILON);
    }

    #[test]
    fn set_rejects_wrong_types() {
        let mut config = CliConfig::default();
        let err = config
            .set("behavior.deployment_timeout_secs", "\"soon\"")
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
        // Original value untouched on failure.
        assert_eq!(config.behavior.deployment_timeout_secs, 1800);
    }

    #[test]
    fn unset_restores_default() {
        let mut config = CliConfig::default();
        config.set("defaults.ssg_engine", "gatsby").expect("set");
        config.unset("defaults.ssg_engine").expect("unset");
        assert_eq!(config.defaults.ssg_engine, "astro");
    }

    #[test]
    fn platform_path_detection_requires_all_markers() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert!(!is_valid_platform_path(dir.path()));

        std::fs::write(dir.path().join("pyproject.toml"), "[project]\n").unwrap();
        std::fs::create_dir(dir.path().join("stacks")).unwrap();
        assert!(!is_valid_platform_path(dir.path()));

        std::fs::create_dir(dir.path().join("shared")).unwrap();
        assert!(is_valid_platform_path(dir.path()));
    }
}
