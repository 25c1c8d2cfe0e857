//! Command-line arguments for the reqevents binary
//!
//! Values given on the command line win over the configuration file; the
//! file only fills in what the command line left unset.

use crate::config::{AnalyticsConfig, ConfigError, ConfigResult};
use clap::{ArgAction, Parser};
use std::io::IsTerminal;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "reqevents")]
#[command(about = "Replay recorded requests through the analytics event hooks")]
#[command(version, long_version = crate::core::version::long_version())]
pub struct Args {
    /// Recorded requests, one JSON object per line ('-' reads stdin)
    #[arg(value_name = "REQUESTS")]
    pub input: PathBuf,

    /// Configuration file path
    #[arg(short = 'c', long = "config-file", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Append delivered batches to this file instead of stdout
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Analytics project id (overrides the configuration file)
    #[arg(long = "project-id", value_name = "ID")]
    pub project_id: Option<String>,

    /// Analytics write key (overrides the configuration file)
    #[arg(long = "write-key", value_name = "KEY")]
    pub write_key: Option<String>,

    /// Maximum number of events per delivered batch
    #[arg(long = "max-batch-size", value_name = "COUNT", value_parser = clap::value_parser!(usize))]
    pub max_batch_size: Option<usize>,

    /// Log level
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", value_parser = ["trace", "debug", "info", "warn", "error", "off"])]
    pub log_level: Option<String>,

    /// Log output format
    #[arg(long = "log-format", value_name = "FORMAT", value_parser = ["text", "ext", "json"])]
    pub log_format: Option<String>,

    /// Log file path (use 'none' to disable file logging)
    #[arg(short = 'f', long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Force colored log output
    #[arg(long = "color", action = ArgAction::SetTrue, conflicts_with = "no_color")]
    pub color: bool,

    /// Disable colored log output
    #[arg(long = "no-color", action = ArgAction::SetTrue)]
    pub no_color: bool,
}

/// Resolved options handed to `init_logging`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingOptions {
    pub level: Option<String>,
    pub format: Option<String>,
    pub file: Option<String>,
    pub color: bool,
}

impl Args {
    /// Fill unset logging options from the top level of the configuration file
    pub fn apply_toml_values(&mut self, config: &toml::Table) -> ConfigResult<()> {
        if self.log_level.is_none() {
            self.log_level = optional_string(config, "log-level")?;
        }
        if self.log_format.is_none() {
            self.log_format = optional_string(config, "log-format")?;
        }
        if self.log_file.is_none() {
            self.log_file = optional_string(config, "log-file")?.map(PathBuf::from);
        }
        if !self.color && !self.no_color {
            match config.get("color") {
                Some(toml::Value::Boolean(true)) => self.color = true,
                Some(toml::Value::Boolean(false)) => self.no_color = true,
                Some(_) => {
                    return Err(ConfigError::InvalidValue {
                        key: "color".to_string(),
                        message: "expected true or false".to_string(),
                    })
                }
                None => {}
            }
        }
        Ok(())
    }

    /// Layer command-line overrides on top of the file's analytics settings
    pub fn analytics_config(&self, from_file: AnalyticsConfig) -> AnalyticsConfig {
        AnalyticsConfig {
            project_id: self.project_id.clone().or(from_file.project_id),
            write_key: self.write_key.clone().or(from_file.write_key),
            max_batch_size: self.max_batch_size.or(from_file.max_batch_size),
        }
    }

    /// Log options after the configuration file has been applied
    pub fn logging_options(&self) -> LoggingOptions {
        LoggingOptions {
            level: self.log_level.clone(),
            format: self.log_format.clone(),
            file: self
                .log_file
                .as_ref()
                .map(|p| p.to_string_lossy().into_owned()),
            color: self.use_color(),
        }
    }

    /// Explicit flags first, then NO_COLOR, then whether stderr is a terminal
    pub fn use_color(&self) -> bool {
        if self.no_color {
            return false;
        }
        if self.color {
            return true;
        }
        std::env::var_os("NO_COLOR").is_none() && std::io::stderr().is_terminal()
    }

    pub fn reads_stdin(&self) -> bool {
        self.input.as_os_str() == "-"
    }
}

fn optional_string(config: &toml::Table, key: &str) -> ConfigResult<Option<String>> {
    match config.get(key) {
        Some(toml::Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: "expected a string".to_string(),
        }),
        None => Ok(None),
    }
}
