//! Configuration for the synthesizer: namespace and logging.

pub mod loader;
pub mod types;

pub use loader::{ConfigError, ConfigLoader, default_config_path};
pub use types::{DEFAULT_NAMESPACE, LoggingConfig, ResolvedConfig};
