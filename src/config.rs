//! Team-building rule defaults, optionally overridden from a YAML file.
//!
//! ```yaml
//! total_cap: 76
//! composition: "8:3,7+:1"
//! require_reserve: true
//! search_url: "https://www.google.com/search?q=Marvel+OverPower+{query}"
//! output_dir: "out"
//! ```

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;
use crate::present::html::DEFAULT_SEARCH_URL;
use crate::teams::composition::TierComposition;
use crate::teams::DEFAULT_TOTAL_CAP;

/// Environment variable naming a config file when `--config` is not given.
pub const CONFIG_ENV_VAR: &str = "OVERPOWER_CONFIG";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub total_cap: u32,
    pub composition: TierComposition,
    pub require_reserve: bool,
    pub search_url: String,
    pub output_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            total_cap: DEFAULT_TOTAL_CAP,
            composition: TierComposition::default(),
            require_reserve: true,
            search_url: DEFAULT_SEARCH_URL.to_string(),
            output_dir: PathBuf::from("."),
        }
    }
}

impl AppConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_yaml(raw: &str) -> Result<Self, serde_yaml::Error> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(raw)
    }

    /// Explicit path first, then [CONFIG_ENV_VAR], then built-in defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let from_env = env::var_os(CONFIG_ENV_VAR)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);
        match explicit.map(Path::to_path_buf).or(from_env) {
            Some(path) => {
                debug!(path = %path.display(), "loading config");
                Self::from_file(path)
            }
            None => Ok(Self::default()),
        }
    }
}
