//! Configuration loading from disk.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::schema::{LogFormat, ProxyConfig, RouteConfig};
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading. Always fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// On-disk configuration formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// Full proxy configuration.
    Toml,
    /// Bare JSON array of route records; everything else defaulted.
    JsonRoutes,
}

impl ConfigFormat {
    /// Pick the format from the file extension. Anything but `.json` is TOML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ConfigFormat::JsonRoutes,
            _ => ConfigFormat::Toml,
        }
    }
}

/// Command-line settings applied on top of the file, before validation.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub bind_address: Option<String>,
    pub log_format: Option<LogFormat>,
}

impl ConfigOverrides {
    pub fn apply(&self, config: &mut ProxyConfig) {
        if let Some(bind) = &self.bind_address {
            config.listener.bind_address = bind.clone();
        }
        if let Some(format) = self.log_format {
            config.logging.format = format;
        }
    }
}

/// Load and validate configuration from a TOML file or a JSON route file.
pub fn load_config(path: &Path) -> Result<ProxyConfig, ConfigError> {
    load_config_with(path, &ConfigOverrides::default())
}

/// Load a file, apply `overrides`, then validate the result.
pub fn load_config_with(
    path: &Path,
    overrides: &ConfigOverrides,
) -> Result<ProxyConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config_with(&content, ConfigFormat::from_path(path), overrides)
}

/// Parse and validate configuration text.
pub fn parse_config(content: &str, format: ConfigFormat) -> Result<ProxyConfig, ConfigError> {
    parse_config_with(content, format, &ConfigOverrides::default())
}

/// Parse configuration text, apply `overrides`, then validate.
pub fn parse_config_with(
    content: &str,
    format: ConfigFormat,
    overrides: &ConfigOverrides,
) -> Result<ProxyConfig, ConfigError> {
    let mut config = match format {
        ConfigFormat::Toml => toml::from_str::<ProxyConfig>(content)?,
        ConfigFormat::JsonRoutes => {
            let routes: Vec<RouteConfig> = serde_json::from_str(content)?;
            ProxyConfig {
                routes,
                ..ProxyConfig::default()
            }
        }
    };
    overrides.apply(&mut config);

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}
