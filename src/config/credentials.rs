//! Validated credentials for the outbound sender

use crate::config::error::{ConfigError, ConfigResult};
use std::fmt;

/// Project id and write key, both guaranteed non-empty
#[derive(Clone, PartialEq, Eq)]
pub struct SenderCredentials {
    project_id: String,
    write_key: String,
}

impl SenderCredentials {
    /// Validate raw configuration values
    ///
    /// The project id is trimmed. Every whitespace character is removed from
    /// the write key, since long keys are easily pasted with stray spaces.
    ///
    /// ```rust
    /// use reqevents::config::SenderCredentials;
    ///
    /// let creds = SenderCredentials::new(" proj ", "ab cd\nef").unwrap();
    /// assert_eq!(creds.project_id(), "proj");
    /// assert_eq!(creds.write_key(), "abcdef");
    /// assert!(SenderCredentials::new("proj", "   ").is_err());
    /// ```
    pub fn new(project_id: impl AsRef<str>, write_key: impl AsRef<str>) -> ConfigResult<Self> {
        let project_id = project_id.as_ref().trim();
        if project_id.is_empty() {
            return Err(ConfigError::MissingProjectId);
        }

        let write_key: String = write_key
            .as_ref()
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        if write_key.is_empty() {
            return Err(ConfigError::MissingWriteKey);
        }

        Ok(Self {
            project_id: project_id.to_string(),
            write_key,
        })
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn write_key(&self) -> &str {
        &self.write_key
    }
}

impl fmt::Debug for SenderCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SenderCredentials")
            .field("project_id", &self.project_id)
            .field("write_key", &"<redacted>")
            .finish()
    }
}
