use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::pagination::{WindowSize, DEFAULT_WINDOW_SIZE};
use crate::{TimelineError, TimelineResult};

const DEFAULT_PAGE_SIZE: usize = 40;
const DEFAULT_HOME_COOLDOWN_SECS: u64 = 60;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Initial number of visible items per view.
    #[serde(default)]
    pub window_size: Option<usize>,
    /// Items requested per fetch.
    #[serde(default)]
    pub page_size: Option<usize>,
    /// Client-side cool-down between home feed refreshes. Zero disables it.
    #[serde(default)]
    pub home_cooldown_secs: Option<u64>,
}

impl AppConfig {
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(target_os = "macos")]
        {
            dirs::home_dir().map(|home| home.join(".config/timeline/config.toml"))
        }
        #[cfg(target_os = "linux")]
        {
            dirs::config_dir().map(|config| config.join("timeline/config.toml"))
        }
        #[cfg(target_os = "windows")]
        {
            dirs::config_dir().map(|config| config.join("timeline\\config.toml"))
        }
        #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
        {
            None
        }
    }

    /// Default location of the saved view catalog, next to the config file.
    pub fn catalog_path() -> Option<PathBuf> {
        Self::config_path().map(|path| path.with_file_name("catalog.json"))
    }

    /// Load from the platform config path, falling back to defaults.
    pub fn load() -> Self {
        if let Some(config_path) = Self::config_path() {
            if config_path.exists() {
                match Self::load_from(&config_path) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("Ignoring {}: {}", config_path.display(), e);
                    }
                }
            }
        }
        Self::default()
    }

    pub fn load_from(path: &Path) -> TimelineResult<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| TimelineError::Config(e.to_string()))
    }

    pub fn effective_window_size(&self) -> WindowSize {
        WindowSize::new(self.window_size.unwrap_or(DEFAULT_WINDOW_SIZE))
    }

    pub fn effective_page_size(&self) -> usize {
        self.page_size.unwrap_or(DEFAULT_PAGE_SIZE).max(1)
    }

    pub fn effective_home_cooldown(&self) -> Option<Duration> {
        match self.home_cooldown_secs.unwrap_or(DEFAULT_HOME_COOLDOWN_SECS) {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }
}
