//! Configuration for the sales channel module

use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Feature flag enabling `list_and_count`
pub const FEATURE_LIST: &str = "sales_channel_list";

/// Feature flag enabling `delete`
pub const FEATURE_DELETE: &str = "sales_channel_delete";

/// Prefix for environment overrides, e.g. `SALES_CHANNEL_MAX_PAGE_SIZE=50`
pub const ENV_PREFIX: &str = "SALES_CHANNEL_";

/// Sales channel module configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Feature flags for the module
    #[serde(default)]
    pub feature_flags: Vec<String>,

    /// Page size used by `list_and_count` when the caller sets none
    #[serde(default = "default_page_size")]
    pub default_page_size: u64,

    /// Upper bound applied to any requested page size
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u64,

    /// Maximum sales channel name length in characters
    #[serde(default = "default_max_name_length")]
    pub max_name_length: usize,

    /// How often the outbox relay polls for staged events
    #[serde(default = "default_outbox_poll_interval", with = "humantime_serde")]
    pub outbox_poll_interval: Duration,

    /// Maximum number of staged events delivered per relay pass
    #[serde(default = "default_outbox_batch_size")]
    pub outbox_batch_size: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            feature_flags: Vec::new(),
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
            max_name_length: default_max_name_length(),
            outbox_poll_interval: default_outbox_poll_interval(),
            outbox_batch_size: default_outbox_batch_size(),
        }
    }
}

impl Config {
    /// Load configuration from defaults, a YAML file and `SALES_CHANNEL_*` env vars,
    /// later sources overriding earlier ones
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .with_context(|| format!("failed to load config from {}", path.display()))
    }

    /// Parse configuration from a YAML document
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).context("invalid sales channel config")
    }

    pub fn is_enabled(&self, flag: &str) -> bool {
        self.feature_flags.iter().any(|f| f == flag)
    }

    /// Config with every optional operation enabled
    pub fn with_all_features() -> Self {
        Self {
            feature_flags: vec![FEATURE_LIST.to_string(), FEATURE_DELETE.to_string()],
            ..Self::default()
        }
    }
}

fn default_page_size() -> u64 {
    10
}

fn default_max_page_size() -> u64 {
    100
}

fn default_max_name_length() -> usize {
    255
}

fn default_outbox_poll_interval() -> Duration {
    Duration::from_secs(1)
}

fn default_outbox_batch_size() -> u64 {
    100
}
