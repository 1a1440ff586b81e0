use crate::error::{MarknotesError, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";
const HOME_ENV: &str = "MARKNOTES_HOME";
const DEFAULT_RETENTION_DAYS: u32 = 30;
const DEFAULT_RECENT_DAYS: u32 = 7;

/// Client configuration, stored in `<data dir>/config.json`.
///
/// Display and editor preferences are not here: they are app settings and
/// live in the notebook state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MarknotesConfig {
    /// Trashed items older than this many days are purged on startup.
    #[serde(default = "default_retention_days")]
    pub trash_retention_days: u32,

    /// Where `export` writes when no path is given. Current directory if unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_dir: Option<PathBuf>,

    /// Window used by "recent" listings and searches.
    #[serde(default = "default_recent_days")]
    pub recent_days: u32,
}

fn default_retention_days() -> u32 {
    DEFAULT_RETENTION_DAYS
}

fn default_recent_days() -> u32 {
    DEFAULT_RECENT_DAYS
}

impl Default for MarknotesConfig {
    fn default() -> Self {
        Self {
            trash_retention_days: DEFAULT_RETENTION_DAYS,
            export_dir: None,
            recent_days: DEFAULT_RECENT_DAYS,
        }
    }
}

impl MarknotesConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: MarknotesConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        fs::create_dir_all(config_dir)?;

        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_dir.join(CONFIG_FILENAME), content)?;
        Ok(())
    }
}

/// `$MARKNOTES_HOME` if set, otherwise the platform data directory.
pub fn data_dir() -> Result<PathBuf> {
    if let Some(home) = std::env::var_os(HOME_ENV) {
        if !home.is_empty() {
            return Ok(PathBuf::from(home));
        }
    }
    ProjectDirs::from("com", "marknotes", "marknotes")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| MarknotesError::Store("Cannot determine a data directory".to_string()))
}
