//! core::config
//!
//! Configuration loading.
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. User config file
//! 3. Directory config file (`.tierlist.toml` in the working directory)
//! 4. CLI flags (not handled here)
//!
//! # User Config Locations
//!
//! Searched in order:
//! 1. `$TIERLIST_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/tierlist/config.toml`
//! 3. `~/.tierlist/config.toml` (canonical write location)
//!
//! # Example
//!
//! ```no_run
//! use tierlist::core::config::Config;
//! use std::path::Path;
//!
//! let config = Config::load(Some(Path::new("."))).unwrap();
//!
//! println!("Title: {}", config.default_title());
//! println!("Rows: {:?}", config.default_rows());
//! println!("Timeout: {:?}", config.fetch_timeout());
//! ```

pub mod schema;

pub use schema::{ConfigFile, FetchConfig};

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::debug;
use thiserror::Error;

use crate::core::model::{Palette, DEFAULT_ROWS, DEFAULT_TITLE};
use crate::core::store;

/// File name of the directory-local config.
pub const LOCAL_CONFIG_FILE: &str = ".tierlist.toml";

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_USER_AGENT: &str = concat!("tierlist/", env!("CARGO_PKG_VERSION"));

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("failed to write config file '{path}': {message}")]
    WriteError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),

    #[error("home directory not found")]
    NoHomeDir,
}

/// Merged configuration from all sources.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// User configuration
    pub user: ConfigFile,
    /// Directory configuration, if one was found
    pub local: Option<ConfigFile>,
    user_path: Option<PathBuf>,
    local_path: Option<PathBuf>,
    merged: ConfigFile,
}

impl Config {
    /// Load configuration from default locations.
    ///
    /// If `dir` is provided, `.tierlist.toml` in it overlays the user config.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be parsed or
    /// fails validation. Missing files are not an error.
    pub fn load(dir: Option<&Path>) -> Result<Config, ConfigError> {
        let (user, user_path) = Self::load_user()?;

        let (local, local_path) = match dir.map(|d| d.join(LOCAL_CONFIG_FILE)) {
            Some(path) if path.exists() => (Some(Self::read_file(&path)?), Some(path)),
            _ => (None, None),
        };

        Ok(Self::from_parts(user, user_path, local, local_path))
    }

    /// Build a config from already-parsed files.
    pub fn from_files(user: ConfigFile, local: Option<ConfigFile>) -> Config {
        Self::from_parts(user, None, local, None)
    }

    fn from_parts(
        user: ConfigFile,
        user_path: Option<PathBuf>,
        local: Option<ConfigFile>,
        local_path: Option<PathBuf>,
    ) -> Config {
        let merged = match &local {
            Some(local) => user.merged_with(local),
            None => user.clone(),
        };
        Config {
            user,
            local,
            user_path,
            local_path,
            merged,
        }
    }

    fn load_user() -> Result<(ConfigFile, Option<PathBuf>), ConfigError> {
        // 1. Check $TIERLIST_CONFIG
        if let Ok(path) = std::env::var("TIERLIST_CONFIG") {
            let path = PathBuf::from(path);
            if path.exists() {
                return Ok((Self::read_file(&path)?, Some(path)));
            }
        }

        // 2. Check $XDG_CONFIG_HOME/tierlist/config.toml
        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("tierlist/config.toml");
            if path.exists() {
                return Ok((Self::read_file(&path)?, Some(path)));
            }
        }

        // 3. Check ~/.tierlist/config.toml
        if let Some(home) = dirs::home_dir() {
            let path = home.join(".tierlist/config.toml");
            if path.exists() {
                return Ok((Self::read_file(&path)?, Some(path)));
            }
        }

        Ok((ConfigFile::default(), None))
    }

    /// Read, parse and validate one config file.
    pub fn read_file(path: &Path) -> Result<ConfigFile, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        config.validate()?;
        debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Get the canonical path for the user config.
    ///
    /// Returns `~/.tierlist/config.toml`.
    pub fn user_config_path() -> Result<PathBuf, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(home.join(".tierlist/config.toml"))
    }

    /// Write a config file atomically.
    pub fn write_file(path: &Path, config: &ConfigFile) -> Result<(), ConfigError> {
        config.validate()?;
        let contents =
            toml::to_string_pretty(config).map_err(|e| ConfigError::InvalidValue(e.to_string()))?;
        store::write_atomic(path, contents.as_bytes()).map_err(|e| ConfigError::WriteError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    // =========================================================================
    // Accessor methods with precedence
    // =========================================================================

    /// Title for new documents.
    ///
    /// Defaults to "Tierlist".
    pub fn default_title(&self) -> &str {
        self.merged.default_title.as_deref().unwrap_or(DEFAULT_TITLE)
    }

    /// Row names for new documents.
    ///
    /// Defaults to S, A, B, C, D.
    pub fn default_rows(&self) -> Vec<String> {
        match &self.merged.default_rows {
            Some(rows) => rows.clone(),
            None => DEFAULT_ROWS.iter().map(|r| r.to_string()).collect(),
        }
    }

    /// Row color palette.
    pub fn palette(&self) -> Palette {
        self.merged
            .palette
            .as_ref()
            .and_then(|colors| Palette::parse(colors).ok())
            .unwrap_or_default()
    }

    /// Backup directory, if configured.
    pub fn backup_dir(&self) -> Option<&Path> {
        self.merged.backup_dir.as_deref()
    }

    /// Check if interactive mode is enabled by default.
    ///
    /// Defaults to `true` if not configured.
    pub fn interactive(&self) -> bool {
        self.merged.interactive.unwrap_or(true)
    }

    /// Check if documents are written indented.
    ///
    /// Defaults to `true` if not configured.
    pub fn pretty(&self) -> bool {
        self.merged.pretty.unwrap_or(true)
    }

    /// Network timeout.
    pub fn fetch_timeout(&self) -> Duration {
        let secs = self
            .merged
            .fetch
            .as_ref()
            .and_then(|f| f.timeout_secs)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        Duration::from_secs(secs)
    }

    /// User-Agent for network requests.
    pub fn user_agent(&self) -> &str {
        self.merged
            .fetch
            .as_ref()
            .and_then(|f| f.user_agent.as_deref())
            .unwrap_or(DEFAULT_USER_AGENT)
    }

    /// Get the path to the loaded user config file.
    pub fn user_config_loaded_from(&self) -> Option<&Path> {
        self.user_path.as_deref()
    }

    /// Get the path to the loaded directory config file.
    pub fn local_config_loaded_from(&self) -> Option<&Path> {
        self.local_path.as_deref()
    }
}
