//! Configuration loading for crudmonkey.
//!
//! All fields are required unless explicitly marked optional. No defaults.

use crudmonkey_storage::UniqueConstraint;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Config file picked up from the working directory when nothing else is given.
pub const FALLBACK_CONFIG_FILE: &str = "crudmonkey.toml";

pub const CONFIG_ENV_VAR: &str = "CRUDMONKEY_CONFIG";

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TuiConfig {
    pub store_path: PathBuf,
    pub log_path: PathBuf,
    pub log_filter: String,
    pub tick_rate_ms: u64,
    pub persistence_path: PathBuf,
    pub seed_demo_data: bool,
    pub theme: ThemeConfig,
    /// Optional per-table unique columns.
    #[serde(default)]
    pub unique: Vec<UniqueConstraint>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThemeConfig {
    pub name: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing configuration file path (use --config, CRUDMONKEY_CONFIG or ./crudmonkey.toml)")]
    MissingConfigPath,
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid config value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

impl TuiConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let path = resolve_config_path(
            std::env::args().skip(1),
            std::env::var(CONFIG_ENV_VAR).ok(),
            Path::new(FALLBACK_CONFIG_FILE),
        )
        .ok_or(ConfigError::MissingConfigPath)?;
        let config = Self::from_path(&path)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: TuiConfig = toml::from_str(contents)?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store_path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "store_path",
                reason: "must not be empty".to_string(),
            });
        }
        if self.log_path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "log_path",
                reason: "must not be empty".to_string(),
            });
        }
        if self.persistence_path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "persistence_path",
                reason: "must not be empty".to_string(),
            });
        }
        if let Err(err) = tracing_subscriber::EnvFilter::try_new(&self.log_filter) {
            return Err(ConfigError::InvalidValue {
                field: "log_filter",
                reason: err.to_string(),
            });
        }
        if self.tick_rate_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "tick_rate_ms",
                reason: "must be > 0".to_string(),
            });
        }
        if self.theme.name.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "theme.name",
                reason: "must not be empty".to_string(),
            });
        }
        if self.theme.name.to_ascii_lowercase() != "synthbrute" {
            return Err(ConfigError::InvalidValue {
                field: "theme.name",
                reason: "only 'synthbrute' is supported".to_string(),
            });
        }
        for constraint in &self.unique {
            if constraint.table.trim().is_empty() || constraint.column.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "unique",
                    reason: "table and column must not be empty".to_string(),
                });
            }
        }
        Ok(())
    }
}

/// `--config <path>` wins over the environment; the fallback file is used only if it exists.
pub fn resolve_config_path(
    args: impl Iterator<Item = String>,
    env_value: Option<String>,
    fallback: &Path,
) -> Option<PathBuf> {
    config_path_from_args(args)
        .or_else(|| env_value.filter(|v| !v.trim().is_empty()).map(PathBuf::from))
        .or_else(|| fallback.exists().then(|| fallback.to_path_buf()))
}

fn config_path_from_args(mut args: impl Iterator<Item = String>) -> Option<PathBuf> {
    while let Some(arg) = args.next() {
        if arg == "--config" {
            return args.next().map(PathBuf::from);
        }
        if let Some(path) = arg.strip_prefix("--config=") {
            return Some(PathBuf::from(path));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
store_path = "data/crudmonkey.json"
log_path = "crudmonkey.log"
log_filter = "info,crudmonkey_tui=debug"
tick_rate_ms = 250
persistence_path = "state.json"
seed_demo_data = true

[theme]
name = "synthbrute"

[[unique]]
table = "users"
column = "email"
"#;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .into_iter()
    }

    #[test]
    fn test_sample_config_parses_and_validates() {
        let config = TuiConfig::from_toml(SAMPLE).unwrap();
        config.validate().unwrap();
        assert_eq!(config.tick_rate_ms, 250);
        assert_eq!(config.unique, vec![UniqueConstraint::new("users", "email")]);
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let contents = SAMPLE.replace("[theme]", "bogus = 1\n[theme]");
        assert!(matches!(
            TuiConfig::from_toml(&contents),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_unique_is_optional() {
        let trimmed = SAMPLE.split("[[unique]]").next().unwrap();
        let config = TuiConfig::from_toml(trimmed).unwrap();
        assert!(config.unique.is_empty());
    }

    #[test]
    fn test_zero_tick_rate_is_invalid() {
        let mut config = TuiConfig::from_toml(SAMPLE).unwrap();
        config.tick_rate_ms = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field: "tick_rate_ms", .. })
        ));
    }

    #[test]
    fn test_unknown_theme_is_invalid() {
        let mut config = TuiConfig::from_toml(SAMPLE).unwrap();
        config.theme.name = "solarized".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field: "theme.name", .. })
        ));
    }

    #[test]
    fn test_bad_log_filter_is_invalid() {
        let mut config = TuiConfig::from_toml(SAMPLE).unwrap();
        config.log_filter = "crudmonkey=[".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field: "log_filter", .. })
        ));
    }

    #[test]
    fn test_path_resolution_order() {
        let missing = Path::new("/definitely/not/here.toml");
        assert_eq!(
            resolve_config_path(args(&["--config", "a.toml"]), Some("b.toml".into()), missing),
            Some(PathBuf::from("a.toml"))
        );
        assert_eq!(
            resolve_config_path(args(&["--config=c.toml"]), None, missing),
            Some(PathBuf::from("c.toml"))
        );
        assert_eq!(
            resolve_config_path(args(&[]), Some("b.toml".into()), missing),
            Some(PathBuf::from("b.toml"))
        );
        assert_eq!(resolve_config_path(args(&[]), None, missing), None);
    }

    #[test]
    fn test_fallback_used_only_when_present() {
        let dir = tempfile::tempdir().unwrap();
        let fallback = dir.path().join(FALLBACK_CONFIG_FILE);
        assert_eq!(resolve_config_path(args(&[]), None, &fallback), None);

        std::fs::write(&fallback, SAMPLE).unwrap();
        assert_eq!(
            resolve_config_path(args(&[]), None, &fallback),
            Some(fallback.clone())
        );
        assert!(TuiConfig::from_path(&fallback).is_ok());
    }
}
