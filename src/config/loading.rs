//! Configuration loading functionality.
//!
//! Locates `salatr.toml`, flattens it into a [`RuleConfig`] and reports any
//! values that will fall back to defaults.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use super::RuleConfig;
use super::validation::validate_config;
use crate::common::constants::*;

/// Resolve the configuration file path.
///
/// An explicit directory wins; otherwise `$XDG_CONFIG_HOME/salatr/salatr.toml`.
pub fn get_config_path(config_dir: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = config_dir {
        return Ok(dir.join(CONFIG_FILE_NAME));
    }
    let base = dirs::config_dir().context("Could not determine config directory")?;
    Ok(base.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Load configuration using automatic path detection.
///
/// A missing file in the default location is not an error: every rule has a
/// default, so the board runs with an empty configuration. A missing file in
/// an explicitly requested directory is.
pub fn load(config_dir: Option<&Path>) -> Result<(RuleConfig, PathBuf)> {
    let path = get_config_path(config_dir)?;

    if !path.exists() {
        if config_dir.is_some() {
            anyhow::bail!("Configuration file not found at {}", path.display());
        }
        log_debug!("No configuration at {}, using defaults", path.display());
        return Ok((RuleConfig::new(), path));
    }

    let config = load_from_path(&path)?;
    Ok((config, path))
}

/// Load configuration from a specific path and log any validation issues.
pub fn load_from_path(path: &Path) -> Result<RuleConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config from {}", path.display()))?;

    let value: toml::Table = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config from {}", path.display()))?;

    let config = flatten_toml(&value);

    let issues = validate_config(&config);
    if !issues.is_empty() {
        log_pipe!();
        for issue in &issues {
            log_warning!("{}", issue);
        }
    }

    Ok(config)
}

/// Flatten a TOML table into dotted keys with stringified scalar values.
///
/// Arrays are not meaningful in the rule map and are skipped.
pub fn flatten_toml(table: &toml::Table) -> RuleConfig {
    let mut config = RuleConfig::new();
    flatten_into(&mut config, None, table);
    config
}

fn flatten_into(config: &mut RuleConfig, prefix: Option<&str>, table: &toml::Table) {
    for (key, value) in table {
        let name = match prefix {
            Some(prefix) => format!("{prefix}.{key}"),
            None => key.clone(),
        };
        match value {
            toml::Value::Table(inner) => flatten_into(config, Some(&name), inner),
            toml::Value::String(s) => config.set(name, s.clone()),
            toml::Value::Integer(i) => config.set(name, i.to_string()),
            toml::Value::Float(f) => config.set(name, f.to_string()),
            toml::Value::Boolean(b) => config.set(name, b.to_string()),
            toml::Value::Datetime(dt) => config.set(name, dt.to_string()),
            toml::Value::Array(_) => {
                log_debug!("Ignoring array value for config key '{}'", name);
            }
        }
    }
}

/// Resolve the schedule file, relative paths being taken from the config directory.
pub fn schedule_path(config: &RuleConfig, config_path: &Path) -> PathBuf {
    let configured = PathBuf::from(config.string(KEY_SCHEDULE_PATH, DEFAULT_SCHEDULE_FILE_NAME));
    if configured.is_absolute() {
        return configured;
    }
    config_path
        .parent()
        .map(|dir| dir.join(&configured))
        .unwrap_or(configured)
}
