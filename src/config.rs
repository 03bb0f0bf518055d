// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::error::{Result, TtpError};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";
pub const DEFAULT_ATTACK_VERSION: &str = "17";
pub const DEFAULT_OUTPUT: &str = "attack_navigator_layer.json";
pub const DEFAULT_SCORE: i64 = 100;
pub const LAYER_SCHEMA_VERSION: &str = "4.5";
pub const NAVIGATOR_VERSION: &str = "4.9.1";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub taxonomy: TaxonomyConfig,
    pub layer: LayerConfig,
    pub fetch: FetchConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TaxonomyConfig {
    /// Dataset location; `{version}` is replaced with the expanded ATT&CK version.
    pub url_template: String,
    pub attack_version: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LayerConfig {
    pub score: i64,
    pub output: PathBuf,
    pub domain: String,
    pub navigator_version: String,
    pub layer_version: String,
    #[serde(default)]
    pub platforms: Vec<String>,
    #[serde(default)]
    pub gradient_colors: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FetchConfig {
    pub user_agent: String,
}

impl Config {
    /// Layers built-in defaults, then the config file, then `TTP_NAVIGATOR__*`
    /// environment variables. Without an explicit path the default file is
    /// optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        match path {
            Some(path) => Self::load_layered(path, true, Self::environment()),
            None => Self::load_layered(Path::new(DEFAULT_CONFIG_PATH), false, Self::environment()),
        }
    }

    fn environment() -> config::Environment {
        config::Environment::with_prefix("TTP_NAVIGATOR")
            .separator("__")
            .try_parsing(true)
    }

    fn load_layered(file: &Path, required: bool, environment: config::Environment) -> Result<Self> {
        let defaults = config::Config::try_from(&Self::default_config())
            .map_err(|e| TtpError::Configuration(e.to_string()))?;

        let settings = config::Config::builder()
            .add_source(defaults)
            .add_source(config::File::from(file).required(required))
            .add_source(environment)
            .build()
            .map_err(|e| TtpError::Configuration(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| TtpError::Configuration(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            taxonomy: TaxonomyConfig {
                url_template: "https://raw.githubusercontent.com/mitre/cti/ATT%26CK-v{version}/enterprise-attack/enterprise-attack.json".to_string(),
                attack_version: DEFAULT_ATTACK_VERSION.to_string(),
            },
            layer: LayerConfig {
                score: DEFAULT_SCORE,
                output: PathBuf::from(DEFAULT_OUTPUT),
                domain: "enterprise-attack".to_string(),
                navigator_version: NAVIGATOR_VERSION.to_string(),
                layer_version: LAYER_SCHEMA_VERSION.to_string(),
                platforms: [
                    "Linux",
                    "macOS",
                    "Windows",
                    "Azure AD",
                    "Office 365",
                    "SaaS",
                    "IaaS",
                    "Google Workspace",
                    "PRE",
                    "Network",
                    "Containers",
                    "Cloud",
                ]
                .iter()
                .map(|s| s.to_string())
                .collect(),
                gradient_colors: vec!["#ffffff".to_string(), "#ff6666".to_string()],
            },
            fetch: FetchConfig {
                user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36".to_string(),
            },
        }
    }

    fn validate(&self) -> Result<()> {
        if !self.taxonomy.url_template.contains("{version}") {
            return Err(TtpError::Configuration(
                "taxonomy.url_template must contain a {version} placeholder".to_string(),
            ));
        }

        if self.layer.domain.trim().is_empty() {
            return Err(TtpError::Configuration(
                "layer.domain must not be empty".to_string(),
            ));
        }

        if !(0..=100).contains(&self.layer.score) {
            return Err(TtpError::Configuration(format!(
                "layer.score must be between 0 and 100, got {}",
                self.layer.score
            )));
        }

        Ok(())
    }
}
