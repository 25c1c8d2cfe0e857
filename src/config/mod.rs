//! Analytics configuration
//!
//! Settings come from a TOML file, either the one given on the command line
//! or `reqevents.toml` under the platform config directory:
//!
//! ```toml
//! log-level = "info"
//!
//! [analytics]
//! project-id = "53dfa0000000000000000002"
//! write-key = "d21785d8ade08c6f5116b39eed701ff4"
//! max-batch-size = 100
//! ```
//!
//! The top-level keys `KeenioProjectId` and `KeenioWriteKey` are accepted as
//! fallbacks for configurations written for the older filter.

mod credentials;
mod error;

pub use credentials::SenderCredentials;
pub use error::{ConfigError, ConfigResult};

use crate::sender::SenderOptions;
use std::fmt;
use std::path::{Path, PathBuf};

const ANALYTICS_TABLE: &str = "analytics";
const LEGACY_PROJECT_ID_KEY: &str = "KeenioProjectId";
const LEGACY_WRITE_KEY_KEY: &str = "KeenioWriteKey";

/// Raw analytics settings before validation
#[derive(Clone, Default, PartialEq, Eq)]
pub struct AnalyticsConfig {
    pub project_id: Option<String>,
    pub write_key: Option<String>,
    pub max_batch_size: Option<usize>,
}

impl AnalyticsConfig {
    /// Extract analytics settings from a parsed configuration file
    pub fn from_toml(config: &toml::Table) -> ConfigResult<Self> {
        let analytics = match config.get(ANALYTICS_TABLE) {
            Some(value) => Some(value.as_table().ok_or_else(|| ConfigError::InvalidValue {
                key: ANALYTICS_TABLE.to_string(),
                message: "expected a table".to_string(),
            })?),
            None => None,
        };

        let project_id = match analytics {
            Some(table) => string_field(table, "project-id")?,
            None => None,
        }
        .or(string_field(config, LEGACY_PROJECT_ID_KEY)?);

        let write_key = match analytics {
            Some(table) => string_field(table, "write-key")?,
            None => None,
        }
        .or(string_field(config, LEGACY_WRITE_KEY_KEY)?);

        let max_batch_size = match analytics.and_then(|table| table.get("max-batch-size")) {
            Some(value) => Some(parse_batch_size(value)?),
            None => None,
        };

        Ok(Self {
            project_id,
            write_key,
            max_batch_size,
        })
    }

    /// Validate into credentials; either value missing disables the feature
    pub fn credentials(&self) -> ConfigResult<SenderCredentials> {
        SenderCredentials::new(
            self.project_id.as_deref().unwrap_or_default(),
            self.write_key.as_deref().unwrap_or_default(),
        )
    }

    pub fn sender_options(&self) -> SenderOptions {
        let mut options = SenderOptions::default();
        if let Some(size) = self.max_batch_size {
            options.max_batch_size = size;
        }
        options
    }
}

impl fmt::Debug for AnalyticsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnalyticsConfig")
            .field("project_id", &self.project_id)
            .field("write_key", &self.write_key.as_ref().map(|_| "<redacted>"))
            .field("max_batch_size", &self.max_batch_size)
            .finish()
    }
}

fn string_field(table: &toml::Table, key: &str) -> ConfigResult<Option<String>> {
    match table.get(key) {
        Some(toml::Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: "expected a string".to_string(),
        }),
        None => Ok(None),
    }
}

fn parse_batch_size(value: &toml::Value) -> ConfigResult<usize> {
    value
        .as_integer()
        .filter(|n| *n > 0)
        .and_then(|n| usize::try_from(n).ok())
        .ok_or_else(|| ConfigError::InvalidValue {
            key: "max-batch-size".to_string(),
            message: "expected a positive integer".to_string(),
        })
}

/// Platform default location of the configuration file
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("Reqevents").join("reqevents.toml"))
}

/// Load and parse the configuration file
///
/// An explicitly given path must exist. Without one, the default path is
/// used if present; otherwise there is no configuration and `None` is returned.
pub async fn load_config_file(config_file: Option<&Path>) -> ConfigResult<Option<toml::Table>> {
    let path = match config_file {
        Some(path) => {
            if !path.exists() {
                return Err(ConfigError::NotFound {
                    path: path.to_path_buf(),
                });
            }
            path.to_path_buf()
        }
        None => match default_config_path() {
            Some(path) if path.exists() => path,
            _ => {
                log::debug!("No configuration file found");
                return Ok(None);
            }
        },
    };

    let contents = tokio::fs::read_to_string(&path)
        .await
        .map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
    let config = toml::from_str::<toml::Table>(&contents)
        .map_err(|source| ConfigError::Parse {
            path: path.clone(),
            source,
        })?;

    log::debug!("Loaded configuration from {}", path.display());
    Ok(Some(config))
}
