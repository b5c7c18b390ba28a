//! core::config::schema
//!
//! Configuration schema types.
//!
//! The same schema is used for the user config file and the per-directory
//! `.tierlist.toml`; every key is optional.
//!
//! # Validation
//!
//! Config values are validated after parsing: palette entries must be
//! `#rrggbb`, default row names must fit the row-name limit, and the fetch
//! timeout must be non-zero.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::core::model::Palette;
use crate::core::types::RowName;

/// One configuration file.
///
/// # Example
///
/// ```toml
/// default_title = "Snacks"
/// default_rows = ["S", "A", "B", "C"]
/// palette = ["#ff7f7f", "#ffbf7f", "#ffff7f", "#7fff7f"]
/// backup_dir = "/home/me/.tierlist/backups"
/// interactive = true
/// pretty = true
///
/// [fetch]
/// timeout_secs = 20
/// user_agent = "tierlist"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    /// Title for newly created documents
    pub default_title: Option<String>,

    /// Row names for newly created documents
    pub default_rows: Option<Vec<String>>,

    /// Row colors, assigned by row position and repeating
    pub palette: Option<Vec<String>>,

    /// Where batch tools put backups (default: next to the file)
    pub backup_dir: Option<PathBuf>,

    /// Default interactive mode
    pub interactive: Option<bool>,

    /// Write indented JSON
    pub pretty: Option<bool>,

    /// Remote import and image download settings
    pub fetch: Option<FetchConfig>,
}

impl ConfigFile {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(palette) = &self.palette {
            Palette::parse(palette)
                .map_err(|e| ConfigError::InvalidValue(format!("palette: {e}")))?;
        }

        if let Some(rows) = &self.default_rows {
            for name in rows {
                RowName::new(name.as_str())
                    .map_err(|e| ConfigError::InvalidValue(format!("default_rows: {e}")))?;
            }
        }

        if let Some(fetch) = &self.fetch {
            fetch.validate()?;
        }

        Ok(())
    }

    /// Overlay `other` on top of `self`; set keys in `other` win.
    pub fn merged_with(&self, other: &ConfigFile) -> ConfigFile {
        ConfigFile {
            default_title: other
                .default_title
                .clone()
                .or_else(|| self.default_title.clone()),
            default_rows: other
                .default_rows
                .clone()
                .or_else(|| self.default_rows.clone()),
            palette: other.palette.clone().or_else(|| self.palette.clone()),
            backup_dir: other.backup_dir.clone().or_else(|| self.backup_dir.clone()),
            interactive: other.interactive.or(self.interactive),
            pretty: other.pretty.or(self.pretty),
            fetch: match (&self.fetch, &other.fetch) {
                (Some(base), Some(over)) => Some(FetchConfig {
                    timeout_secs: over.timeout_secs.or(base.timeout_secs),
                    user_agent: over.user_agent.clone().or_else(|| base.user_agent.clone()),
                }),
                (base, over) => over.clone().or_else(|| base.clone()),
            },
        }
    }
}

/// Network settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FetchConfig {
    /// Request timeout in seconds
    pub timeout_secs: Option<u64>,

    /// User-Agent header
    pub user_agent: Option<String>,
}

impl FetchConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_secs == Some(0) {
            return Err(ConfigError::InvalidValue(
                "fetch.timeout_secs must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_example() {
        let config: ConfigFile = toml::from_str(
            r##"
            default_title = "Snacks"
            default_rows = ["S", "A"]
            palette = ["#ff0000", "#00ff00"]
            pretty = true

            [fetch]
            timeout_secs = 5
            "##,
        )
        .unwrap();

        assert_eq!(config.default_title.as_deref(), Some("Snacks"));
        assert_eq!(config.fetch.as_ref().and_then(|f| f.timeout_secs), Some(5));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn bad_palette_rejected() {
        let config = ConfigFile {
            palette: Some(vec!["#ff0000".into(), "red".into()]),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue(msg)) if msg.contains("palette")
        ));
    }

    #[test]
    fn zero_timeout_rejected() {
        let config = ConfigFile {
            fetch: Some(FetchConfig {
                timeout_secs: Some(0),
                user_agent: None,
            }),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn merge_prefers_overlay() {
        let base = ConfigFile {
            default_title: Some("Base".into()),
            pretty: Some(false),
            fetch: Some(FetchConfig {
                timeout_secs: Some(10),
                user_agent: Some("base-agent".into()),
            }),
            ..Default::default()
        };
        let overlay = ConfigFile {
            pretty: Some(true),
            fetch: Some(FetchConfig {
                timeout_secs: Some(3),
                user_agent: None,
            }),
            ..Default::default()
        };

        let merged = base.merged_with(&overlay);

        assert_eq!(merged.default_title.as_deref(), Some("Base"));
        assert_eq!(merged.pretty, Some(true));
        let fetch = merged.fetch.unwrap();
        assert_eq!(fetch.timeout_secs, Some(3));
        assert_eq!(fetch.user_agent.as_deref(), Some("base-agent"));
    }
}
