//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::ProxyConfig;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Read(std::io::Error),

    #[error("failed to write default config file: {0}")]
    WriteDefault(std::io::Error),

    #[error("failed to serialize default config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Load configuration from a TOML file.
///
/// A missing file is replaced by a freshly written default one; a file that
/// fails to parse is ignored in favor of the defaults, with a warning.
pub fn load_or_create(path: &Path) -> Result<ProxyConfig, ConfigError> {
    if !path.exists() {
        let config = ProxyConfig::default();
        fs::write(path, toml::to_string_pretty(&config)?).map_err(ConfigError::WriteDefault)?;
        tracing::info!(path = %path.display(), "created default config file");
        return Ok(config);
    }

    let content = fs::read_to_string(path).map_err(ConfigError::Read)?;
    match toml::from_str(&content) {
        Ok(config) => Ok(config),
        Err(err) => {
            tracing::warn!(
                path = %path.display(),
                error = %err,
                "malformed config file, using defaults"
            );
            Ok(ProxyConfig::default())
        }
    }
}
