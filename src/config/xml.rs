//! XML configuration support.
//! - Loads settings from config.xml (quick_xml + serde).
//! - A missing file means "use defaults"; a malformed one is an error.
//!
//! Notes:
//! - Unknown XML fields are rejected to surface typos early.
//! - Numbers tolerate surrounding whitespace.

use anyhow::{Context, Result};
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use tracing::debug;

use super::paths::default_config_path;
use super::types::{CleanupPolicy, Config, LogLevel};

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Default, Deserialize)]
#[serde(rename = "config", deny_unknown_fields)]
struct XmlConfig {
    #[serde(default, deserialize_with = "de_trimmed_opt")]
    retries: Option<u32>,
    #[serde(default, deserialize_with = "de_trimmed_opt")]
    retry_delay_ms: Option<u64>,
    #[serde(default, deserialize_with = "de_trimmed_opt")]
    ignore_errors: Option<bool>,
    #[serde(default, deserialize_with = "de_trimmed_opt")]
    shell_fallback: Option<bool>,
    #[serde(default, deserialize_with = "de_trimmed_opt")]
    fail_fast: Option<bool>,
    log_level: Option<String>,
    log_file: Option<String>,
}

// Trims surrounding whitespace before parsing; empty elements count as unset.
fn de_trimmed_opt<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    match opt.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s.parse::<T>().map(Some).map_err(serde::de::Error::custom),
    }
}

fn xml_to_config(parsed: XmlConfig) -> Result<Config> {
    let mut cfg = Config::default();
    if let Some(n) = parsed.retries {
        cfg.remove.retries = n;
    }
    if let Some(ms) = parsed.retry_delay_ms {
        cfg.remove.delay = Duration::from_millis(ms);
    }
    if let Some(b) = parsed.ignore_errors {
        cfg.remove.ignore_errors = b;
    }
    if let Some(b) = parsed.shell_fallback {
        cfg.remove.shell_fallback = b;
    }
    if parsed.fail_fast == Some(true) {
        cfg.policy = CleanupPolicy::FailFast;
    }
    if let Some(s) = parsed.log_level.as_deref() {
        cfg.log_level = s
            .parse::<LogLevel>()
            .map_err(anyhow::Error::msg)
            .context("log_level")?;
    }
    cfg.log_file = parsed
        .log_file
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(PathBuf::from);
    Ok(cfg)
}

/// Load a Config from a specific XML file path.
pub fn load_config_from_xml_path(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("read config xml '{}'", path.display()))?;
    let parsed: XmlConfig = from_xml_str(&contents)
        .with_context(|| format!("parse config xml '{}'", path.display()))?;
    xml_to_config(parsed).with_context(|| format!("invalid value in '{}'", path.display()))
}

/// Load from `$BUILD_CLEANUP_CONFIG` or the default path; defaults when no file exists.
pub fn load_config() -> Result<Config> {
    match default_config_path() {
        Some(path) if path.exists() => {
            debug!(path = %path.display(), "loading config");
            load_config_from_xml_path(&path)
        }
        Some(path) => {
            debug!(path = %path.display(), "no config file; using defaults");
            Ok(Config::default())
        }
        None => Ok(Config::default()),
    }
}
