//! Configuration Error Types

use crate::core::error_handling::ContextualError;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Please specify the analytics project id in the configuration: project-id = \"53dfa0000000000000000002\"")]
    MissingProjectId,

    #[error("Please specify the analytics write key in the configuration: write-key = \"d21785d8ade08c6f5116b39eed701ff4\"")]
    MissingWriteKey,

    #[error("Configuration file does not exist: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Error reading configuration file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error parsing configuration file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

impl ContextualError for ConfigError {
    fn is_user_actionable(&self) -> bool {
        true
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            ConfigError::MissingProjectId => Some("Analytics project id is not configured"),
            ConfigError::MissingWriteKey => Some("Analytics write key is not configured"),
            ConfigError::NotFound { .. } => Some("Configuration file does not exist"),
            ConfigError::Read { .. } => Some("Configuration file could not be read"),
            ConfigError::Parse { .. } => Some("Configuration file is not valid TOML"),
            ConfigError::InvalidValue { .. } => Some("Configuration file contains an invalid value"),
        }
    }
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;
