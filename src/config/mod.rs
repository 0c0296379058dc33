use serde::{Deserialize, Serialize};
use std::{
    env, fs,
    path::{Path, PathBuf},
};

use crate::errors::{BudgetError, Result};
use crate::utils::{files::replace_file, DEFAULT_LOG_DIRECTIVE};

const CONFIG_FILE: &str = "config.json";
const DEFAULT_DIR_NAME: &str = "budget_store";
const FALLBACK_DIR_NAME: &str = ".budget_store";

/// Environment variable overriding the storage directory.
pub const HOME_ENV: &str = "BUDGET_STORE_HOME";

/// Settings for the persistence backend and logging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory for the file backend. Resolved through [`Config::resolve_storage_root`] when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_root: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_quota_bytes: Option<usize>,
    #[serde(default = "Config::default_log_directive")]
    pub log_directive: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_root: None,
            storage_quota_bytes: None,
            log_directive: Self::default_log_directive(),
        }
    }
}

impl Config {
    pub fn default_log_directive() -> String {
        DEFAULT_LOG_DIRECTIVE.into()
    }

    /// Explicit root, then `$BUDGET_STORE_HOME`, then the platform data directory.
    pub fn resolve_storage_root(&self) -> PathBuf {
        if let Some(path) = &self.storage_root {
            return path.clone();
        }
        if let Some(custom) = env::var_os(HOME_ENV) {
            return PathBuf::from(custom);
        }
        match dirs::data_dir() {
            Some(base) => base.join(DEFAULT_DIR_NAME),
            None => PathBuf::from(".").join(FALLBACK_DIR_NAME),
        }
    }
}

/// Loads and saves [`Config`] as JSON inside a base directory.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base)?;
        Ok(Self::new(base.join(CONFIG_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns defaults when no config file exists yet.
    pub fn load(&self) -> Result<Config> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            serde_json::from_str(&data).map_err(|err| BudgetError::Config(err.to_string()))
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        let json = serde_json::to_string_pretty(config)?;
        replace_file(&self.path, &json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        assert_eq!(manager.load().unwrap(), Config::default());
    }

    #[test]
    fn explicit_root_wins_over_environment() {
        let config = Config {
            storage_root: Some(PathBuf::from("/srv/budget")),
            ..Config::default()
        };
        assert_eq!(config.resolve_storage_root(), PathBuf::from("/srv/budget"));
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        fs::write(manager.path(), r#"{"storage_quota_bytes": 5242880}"#).unwrap();
        let config = manager.load().unwrap();
        assert_eq!(config.storage_quota_bytes, Some(5_242_880));
        assert_eq!(config.log_directive, DEFAULT_LOG_DIRECTIVE);
        assert!(config.storage_root.is_none());
    }

    #[test]
    fn invalid_file_reports_config_error() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        fs::write(manager.path(), "not json").unwrap();
        assert!(matches!(manager.load(), Err(BudgetError::Config(_))));
    }
}
