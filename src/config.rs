//! Configuration file support for license-info.
//!
//! Provides YAML-based configuration through `license-info.config.yml` files,
//! including data structures, file loading, defaults and validation.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::warn;

use crate::adapters::outbound::cache::{DEFAULT_CACHE_MAX_ENTRIES, DEFAULT_CACHE_TTL};
use crate::adapters::outbound::parsers::DEFAULT_EXTERNAL_ID_KEY;
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "license-info.config.yml";

const DEFAULT_CONTENT_DIR: &str = "attachments";
const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub cache: Option<CacheConfig>,
    pub content_dir: Option<PathBuf>,
    pub license_catalog: Option<LicenseCatalogConfig>,
    pub combined_cli_external_id_key: Option<String>,
    pub log_level: Option<String>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: BTreeMap<String, serde_yaml_ng::Value>,
}

/// Bounds of the parsing result cache.
#[derive(Debug, Deserialize, Default)]
pub struct CacheConfig {
    pub ttl_minutes: Option<u64>,
    pub max_entries: Option<usize>,
}

/// Where the license catalog with remediation todos comes from.
#[derive(Debug, Deserialize, Default)]
pub struct LicenseCatalogConfig {
    pub url: Option<String>,
    pub file: Option<PathBuf>,
}

/// Resolved license catalog source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LicenseCatalogSource {
    Http(String),
    File(PathBuf),
}

impl ConfigFile {
    pub fn cache_ttl(&self) -> Duration {
        self.cache
            .as_ref()
            .and_then(|cache| cache.ttl_minutes)
            .map(|minutes| Duration::from_secs(minutes * 60))
            .unwrap_or(DEFAULT_CACHE_TTL)
    }

    pub fn cache_max_entries(&self) -> usize {
        self.cache
            .as_ref()
            .and_then(|cache| cache.max_entries)
            .unwrap_or(DEFAULT_CACHE_MAX_ENTRIES)
    }

    pub fn content_dir(&self) -> PathBuf {
        self.content_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONTENT_DIR))
    }

    pub fn combined_cli_external_id_key(&self) -> &str {
        self.combined_cli_external_id_key
            .as_deref()
            .unwrap_or(DEFAULT_EXTERNAL_ID_KEY)
    }

    pub fn license_catalog_source(&self) -> Option<LicenseCatalogSource> {
        let catalog = self.license_catalog.as_ref()?;
        match (&catalog.url, &catalog.file) {
            (Some(url), _) => Some(LicenseCatalogSource::Http(url.clone())),
            (None, Some(file)) => Some(LicenseCatalogSource::File(file.clone())),
            (None, None) => None,
        }
    }

    /// Warn about unknown fields in the config file.
    ///
    /// Called once logging is set up, since the config may choose the level.
    pub fn warn_unknown_fields(&self) {
        for key in self.unknown_fields.keys() {
            warn!("Unknown config field '{}' will be ignored", key);
        }
    }
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if let Some(ref cache) = config.cache {
        if cache.max_entries == Some(0) {
            bail!(
                "Invalid config: cache.max_entries must be greater than 0.\n\n\
                 💡 Hint: Remove the field to use the default of {} entries.",
                DEFAULT_CACHE_MAX_ENTRIES
            );
        }
        if cache.ttl_minutes == Some(0) {
            bail!(
                "Invalid config: cache.ttl_minutes must be greater than 0.\n\n\
                 💡 Hint: Remove the field to use the default of {} minutes.",
                DEFAULT_CACHE_TTL.as_secs() / 60
            );
        }
    }

    if let Some(ref catalog) = config.license_catalog {
        if catalog.url.is_some() && catalog.file.is_some() {
            bail!(
                "Invalid config: license_catalog.url and license_catalog.file are mutually exclusive.\n\n\
                 💡 Hint: Keep only one license catalog source."
            );
        }
    }

    if let Some(ref key) = config.combined_cli_external_id_key {
        if key.trim().is_empty() {
            bail!("Invalid config: combined_cli_external_id_key must not be empty.");
        }
    }

    if let Some(ref level) = config.log_level {
        if !LOG_LEVELS.contains(&level.to_lowercase().as_str()) {
            bail!(
                "Invalid config: log_level '{}' is not recognized.\n\n\
                 💡 Hint: Use one of {}.",
                level,
                LOG_LEVELS.join(", ")
            );
        }
    }

    Ok(())
}
