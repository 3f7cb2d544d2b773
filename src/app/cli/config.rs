//! TOML configuration file parsing and loading
//!
//! Every section and field is optional. An explicitly named file must
//! exist; the default file is only read when present. Command line flags
//! are applied on top with [`Settings::with_overrides`].

use super::args::Args;
use crate::core::error_handling::ContextualError;
use crate::core::logging::{LOG_FORMATS, LOG_LEVELS};
use crate::queue::keys::DEFAULT_ELEMENT_KIND;
use crate::queue::{BlockSize, KeepPrevious, QueueOptions};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_STORE_URL: &str = "redis://127.0.0.1/";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{message}")]
    NotFound { path: PathBuf, message: String },

    #[error("Error reading configuration file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{message}")]
    Parse { message: String },

    #[error("{message}")]
    Invalid { message: String },
}

impl ConfigError {
    fn invalid(message: impl Into<String>) -> Self {
        ConfigError::Invalid {
            message: message.into(),
        }
    }
}

impl ContextualError for ConfigError {
    fn is_user_actionable(&self) -> bool {
        !matches!(self, ConfigError::Read { .. })
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            ConfigError::NotFound { message, .. }
            | ConfigError::Parse { message }
            | ConfigError::Invalid { message } => Some(message),
            ConfigError::Read { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub store: StoreSettings,
    pub queue: QueueSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreSettings {
    /// `redis://...` or `memory://` for an in-process store
    pub url: String,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            url: DEFAULT_STORE_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QueueSettings {
    pub element_kind: String,
    /// Absent means unbounded
    pub block_size: Option<usize>,
    pub keep_previous: bool,
}

impl Default for QueueSettings {
    fn default() -> Self {
        Self {
            element_kind: DEFAULT_ELEMENT_KIND.to_string(),
            block_size: None,
            keep_previous: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingSettings {
    pub level: Option<String>,
    pub format: Option<String>,
    pub file: Option<PathBuf>,
}

/// `<config_dir>/requeues/requeues.toml`, when the platform has a config dir
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("requeues").join("requeues.toml"))
}

impl Settings {
    /// Load settings from `config_file`, or from the default file if it exists
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match config_file {
            Some(path) if !path.exists() => {
                return Err(ConfigError::NotFound {
                    path: path.to_path_buf(),
                    message: format!(
                        "The specified configuration file does not exist: {}",
                        path.display()
                    ),
                })
            }
            Some(path) => path.to_path_buf(),
            None => match default_config_path() {
                Some(path) if path.exists() => path,
                _ => {
                    log::debug!("No configuration file, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        let contents = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        Self::from_toml_str(&contents).map_err(|e| match e {
            ConfigError::Parse { message } | ConfigError::Invalid { message } => {
                ConfigError::Invalid {
                    message: format!("Error in configuration file {}: {}", path.display(), message),
                }
            }
            other => other,
        })
    }

    /// Parse and validate TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let settings: Settings = toml::from_str(contents).map_err(|e| ConfigError::Parse {
            message: e.to_string().trim_end().to_string(),
        })?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store.url.trim().is_empty() {
            return Err(ConfigError::invalid("store.url must not be empty"));
        }
        if self.queue.element_kind.trim().is_empty() {
            return Err(ConfigError::invalid("queue.element_kind must not be empty"));
        }
        if self.queue.block_size == Some(0) {
            return Err(ConfigError::invalid("queue.block_size must be at least 1"));
        }
        if let Some(level) = &self.logging.level {
            if !LOG_LEVELS.contains(&level.as_str()) {
                return Err(ConfigError::invalid(format!(
                    "logging.level must be one of {}, got '{}'",
                    LOG_LEVELS.join(", "),
                    level
                )));
            }
        }
        if let Some(format) = &self.logging.format {
            if !LOG_FORMATS.contains(&format.as_str()) {
                return Err(ConfigError::invalid(format!(
                    "logging.format must be one of {}, got '{}'",
                    LOG_FORMATS.join(", "),
                    format
                )));
            }
        }
        Ok(())
    }

    /// Apply command line flags on top of the file values and validate the result
    pub fn with_overrides(mut self, args: &Args) -> Result<Self, ConfigError> {
        if let Some(url) = &args.store_url {
            self.store.url = url.clone();
        }
        if let Some(kind) = &args.kind {
            self.queue.element_kind = kind.clone();
        }
        if args.fresh {
            self.queue.keep_previous = false;
        }
        if let Some(level) = &args.log_level {
            self.logging.level = Some(level.clone());
        }
        if let Some(format) = &args.log_format {
            self.logging.format = Some(format.clone());
        }
        if let Some(file) = &args.log_file {
            self.logging.file = Some(file.clone());
        }
        self.validate()?;
        Ok(self)
    }

    /// Queue options for the factory
    pub fn queue_options(&self) -> Result<QueueOptions, ConfigError> {
        let block_size = BlockSize::from_config(self.queue.block_size)
            .ok_or_else(|| ConfigError::invalid("queue.block_size must be at least 1"))?;
        Ok(QueueOptions::default()
            .element_kind(self.queue.element_kind.clone())
            .keep_previous(KeepPrevious::from(self.queue.keep_previous))
            .block_size(block_size))
    }
}
