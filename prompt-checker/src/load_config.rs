//! `load_config` module: reads the optional YAML configuration file into a typed [`Config`].
//!
//! Every section and field has a default, so an empty file (or no file at
//! all) is a valid configuration. Secrets never live in the file: the
//! download section only names the environment variable that holds the
//! bearer token.
//!
//! ```yaml
//! output:
//!   format: json
//! download:
//!   timeout_secs: 10
//!   token_env: PROMPT_CHECKER_TOKEN
//! logging:
//!   level: debug
//! ```

use anyhow::Result;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{error, info};

use crate::report::OutputFormat;

pub const DEFAULT_TOKEN_ENV: &str = "PROMPT_CHECKER_TOKEN";

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub output: OutputSection,
    pub download: DownloadSection,
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct OutputSection {
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DownloadSection {
    pub timeout_secs: u64,
    /// Name of the environment variable holding an optional bearer token.
    pub token_env: String,
}

impl Default for DownloadSection {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            token_env: DEFAULT_TOKEN_ENV.to_string(),
        }
    }
}

impl DownloadSection {
    /// The bearer token from the configured variable, if set and non-empty.
    pub fn bearer_token(&self) -> Option<String> {
        std::env::var(&self.token_env)
            .ok()
            .filter(|token| !token.trim().is_empty())
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingSection {
    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn trace_loaded(&self) {
        info!(
            format = ?self.output.format,
            timeout_secs = self.download.timeout_secs,
            token_env = %self.download.token_env,
            level = %self.logging.level,
            "Loaded Config"
        );
    }
}

/// Loads a YAML config file. An empty file yields the defaults.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path_ref = path.as_ref();
    info!(config_path = ?path_ref, "Loading configuration from file");

    let config_content = match fs::read_to_string(path_ref) {
        Ok(content) => content,
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to read config file");
            return Err(anyhow::anyhow!(
                "Failed to read config file {:?}: {}",
                path_ref,
                e
            ));
        }
    };

    if config_content.trim().is_empty() {
        info!(config_path = ?path_ref, "Config file is empty, using defaults");
        return Ok(Config::default());
    }

    let config: Config = match serde_yaml::from_str(&config_content) {
        Ok(conf) => conf,
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to parse config YAML");
            return Err(anyhow::anyhow!("Failed to parse config YAML: {e}"));
        }
    };

    Ok(config)
}

/// Loads `path` when given, otherwise returns the defaults.
pub fn resolve_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => load_config(path),
        None => Ok(Config::default()),
    }
}
