use std::path::PathBuf;

use serde::Deserialize;

/// Namespace used when the config file does not name one.
pub const DEFAULT_NAMESPACE: &str = "DynamicViewModels";

#[derive(Debug, Deserialize)]
pub struct ConfigFile {
    pub version: u32,
    /// Namespace synthesized types are declared in.
    #[serde(default)]
    pub namespace: Option<String>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub file_level: Option<String>,
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level(), file_level: None, file: None }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub namespace: String,
    pub logging: LoggingConfig,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self { namespace: DEFAULT_NAMESPACE.to_string(), logging: LoggingConfig::default() }
    }
}
