use std::path::Path;

use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use schemars::{schema_for, JsonSchema};
use serde::{Deserialize, Serialize};

use super::logging::LoggingConfig;
use super::metrics::{default_metrics, MetricSpec};
use crate::error::{RebaseError, Result};

/// Environment variables with this prefix override file values,
/// e.g. `COUNTER_REBASE_LOGGING__LEVEL=debug`.
pub const ENV_PREFIX: &str = "COUNTER_REBASE_";

/// A top-level enum for versioned configurations.
#[derive(Deserialize, Serialize, JsonSchema)]
#[serde(tag = "version")]
pub enum Config {
    #[serde(rename = "1.0.0")]
    ConfigV1(ConfigV1),
}

/// Main config for v1.0.0: logging, the group interval and the counters to rebase.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct ConfigV1 {
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Evaluation interval written on every rebase group. Empty to omit.
    #[serde(default = "default_interval")]
    pub interval: String,
    #[serde(default = "default_metrics")]
    pub metrics: Vec<MetricSpec>,
}

impl Default for ConfigV1 {
    fn default() -> Self {
        Self {
            logging: LoggingConfig::default(),
            interval: default_interval(),
            metrics: default_metrics(),
        }
    }
}

impl ConfigV1 {
    pub fn group_interval(&self) -> Option<String> {
        let interval = self.interval.trim();
        if interval.is_empty() {
            None
        } else {
            Some(interval.to_string())
        }
    }
}

fn default_interval() -> String {
    "15s".to_string()
}

/// Build the layered figment: defaults, then the YAML file, then environment.
pub fn layered_figment(path: Option<&Path>) -> Result<Figment> {
    let mut figment = Figment::from(Serialized::defaults(Config::ConfigV1(ConfigV1::default())));
    if let Some(path) = path {
        // figment silently skips missing files
        if !path.is_file() {
            return Err(RebaseError::Config(format!(
                "config file '{}' does not exist",
                path.display()
            )));
        }
        figment = figment.merge(Yaml::file(path));
    }
    Ok(figment.merge(Env::prefixed(ENV_PREFIX).split("__")))
}

/// Extract and validate a configuration from an already layered figment.
pub fn extract_config(figment: Figment) -> Result<ConfigV1> {
    let config = match figment.extract::<Config>()? {
        Config::ConfigV1(c) => c,
    };
    config.logging.level_filter()?;
    Ok(config)
}

/// Load the configuration, optionally from a YAML file.
pub fn load_config(path: Option<&Path>) -> Result<ConfigV1> {
    extract_config(layered_figment(path)?)
}

/// Print the JSON schema for the configuration to stdout.
pub fn print_schema() -> Result<()> {
    let schema = schema_for!(Config);
    let rendered = serde_json::to_string_pretty(&schema)
        .map_err(|e| RebaseError::Config(format!("failed to render schema: {}", e)))?;
    println!("{}", rendered);
    Ok(())
}
