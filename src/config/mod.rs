//! Config module.
//! Provides configuration types, default paths, XML loading, and validation.

pub mod paths;
pub mod types;
mod validate;
pub mod xml;

pub use paths::{default_config_path, default_log_path, path_has_symlink_ancestor};
pub use types::{CleanupPolicy, Config, LogLevel, RemoveOptions};
pub use xml::{load_config, load_config_from_xml_path};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "BUILD_CLEANUP_CONFIG";
pub const DEFAULT_RETRIES: u32 = 5;
pub const DEFAULT_DELAY: std::time::Duration = std::time::Duration::from_millis(500);
