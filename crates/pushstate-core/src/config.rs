//! Application configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use pushstate_history::{HistoryConfig, NavigationState};
use pushstate_host::NavigationHost;

use crate::error::CoreError;
use crate::Result;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// History façade settings
    pub history: HistoryConfig,
    /// Default tracing filter when `RUST_LOG` is unset
    pub log_filter: Option<String>,
}

impl Config {
    /// File name looked up by [`Config::discover`]
    pub const FILE_NAME: &'static str = "pushstate.json";

    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            CoreError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;

        let config = Self::from_json(&content)?;
        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Load `pushstate.json` from `dir` if present, defaults otherwise.
    pub fn discover<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let path = Self::path_in(dir);
        if path.is_file() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn path_in<P: AsRef<Path>>(dir: P) -> PathBuf {
        dir.as_ref().join(Self::FILE_NAME)
    }

    /// Build the history façade over `host`, validating the history settings.
    pub fn open_history(&self, host: Arc<dyn NavigationHost>) -> Result<NavigationState> {
        Ok(NavigationState::new(host, self.history.clone())?)
    }
}
