//! Configuration loading and management

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub ipfs: IpfsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Directory holding articles.json, collections.json, settings.json
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

/// Node overrides. When set, these take precedence over the persisted
/// settings record for the current invocation; `settings set` changes the
/// persisted record instead.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IpfsConfig {
    #[serde(default)]
    pub gateway: Option<String>,

    #[serde(default)]
    pub api_endpoint: Option<String>,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_log_level() -> String {
    "info".to_string()
}

impl AppConfig {
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();

        // Try default config path if none specified
        let default_path = PathBuf::from("./config.toml");
        let path = config_path.unwrap_or(&default_path);

        if path.exists() {
            builder = builder.add_source(config::File::from(path));
        } else if config_path.is_some() {
            // User specified a path that doesn't exist
            anyhow::bail!("Config file not found: {}", path.display());
        }

        // Add environment variable overrides
        builder = builder.add_source(
            config::Environment::with_prefix("PERMAPRESS")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Generate example configuration as TOML string
    pub fn example_toml() -> String {
        r#"# permapress configuration

[general]
data_dir = "./data"
log_level = "info"

[ipfs]
# Per-invocation overrides for the persisted settings record.
# gateway = "https://ipfs.io/ipfs/"
# api_endpoint = "http://127.0.0.1:5001"
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let config = AppConfig::default();
        assert_eq!(config.general.data_dir, PathBuf::from("./data"));
        assert_eq!(config.general.log_level, "info");
        assert!(config.ipfs.gateway.is_none());
    }

    #[test]
    fn example_toml_parses_back() {
        let parsed: AppConfig = toml_from_str(&AppConfig::example_toml());
        assert_eq!(parsed.general.data_dir, PathBuf::from("./data"));
    }

    fn toml_from_str(s: &str) -> AppConfig {
        config::Config::builder()
            .add_source(config::File::from_str(s, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }
}
