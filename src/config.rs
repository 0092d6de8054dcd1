//! Configuration file support for azure-checker.
//!
//! Provides YAML-based configuration through `azure-checker.config.yml` files,
//! including data structures, file loading, and validation.

use anyhow::{bail, Context};
use azure_checker::application::dto::OutputFormat;
use azure_checker::shared::error::AuditError;
use azure_checker::shared::security::{
    validate_file_size, validate_regular_file, MAX_CONFIG_FILE_SIZE,
};
use azure_checker::shared::Result;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;

pub const CONFIG_FILENAME: &str = "azure-checker.config.yml";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    /// Customer name printed in the report title
    pub client_name: Option<String>,
    pub format: Option<String>,
    pub lookup_timeout_secs: Option<u64>,
    pub max_concurrency: Option<usize>,
    pub check_backups: Option<bool>,
    pub assess_patches: Option<bool>,
    /// Exit with a non-zero code when any lookup failed
    pub strict: Option<bool>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

impl ConfigFile {
    /// The configured format, already validated on load
    pub fn output_format(&self) -> Option<OutputFormat> {
        self.format
            .as_deref()
            .and_then(|format| OutputFormat::from_str(format).ok())
    }
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    validate_regular_file(path, "config file")?;

    let metadata = std::fs::metadata(path)
        .with_context(|| format!("Failed to read config file metadata: {}", path.display()))?;
    validate_file_size(metadata.len(), path, MAX_CONFIG_FILE_SIZE)?;

    let content = std::fs::read_to_string(path).map_err(|e| AuditError::FileReadError {
        path: path.to_path_buf(),
        details: e.to_string(),
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if std::fs::symlink_metadata(&config_path).is_err() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if let Some(ref format) = config.format {
        if let Err(message) = OutputFormat::from_str(format) {
            bail!(
                "Invalid config: format: {}\n\n💡 Hint: Use one of markdown, json or html.",
                message
            );
        }
    }

    if config.lookup_timeout_secs == Some(0) {
        bail!(
            "Invalid config: lookup_timeout_secs must be greater than 0.\n\n\
             💡 Hint: Patch assessment can take several minutes; the default is 300."
        );
    }

    if config.max_concurrency == Some(0) {
        bail!(
            "Invalid config: max_concurrency must be at least 1.\n\n\
             💡 Hint: The default is 8 concurrent lookups."
        );
    }

    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}
