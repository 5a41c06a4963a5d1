use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::source::DEFAULT_BASE_URL;

/// Runtime settings for the recipe search
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SearchConfig {
    /// Base URL of the TheMealDB-compatible API
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// Maximum concurrent detail lookups while narrowing
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
    /// Fraction of failed detail lookups tolerated while narrowing (0.0-1.0)
    #[serde(default = "default_max_failure_ratio")]
    pub max_failure_ratio: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout: default_timeout(),
            concurrency: default_concurrency(),
            max_failure_ratio: default_max_failure_ratio(),
        }
    }
}

// Default value functions
fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout() -> u64 {
    10
}

fn default_concurrency() -> usize {
    6
}

fn default_max_failure_ratio() -> f64 {
    0.5
}

impl SearchConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with MEALFINDER__ prefix
    /// 2. mealfinder.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: MEALFINDER__BASE_URL
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }
}

/// Load configuration from file and environment variables
///
/// See [`SearchConfig::load`] for the lookup order.
pub fn load_config() -> Result<SearchConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("mealfinder").required(false))
        .add_source(
            Environment::with_prefix("MEALFINDER")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
