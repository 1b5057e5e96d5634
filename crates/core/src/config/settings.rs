use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::mbed_file::ConfigFiles;

/// Name of the optional settings file looked up from the working directory
pub const SETTINGS_FILE: &str = ".mbed-runner.json";

/// Settings for mbed-runner itself, as opposed to mbed's own `.mbed` files
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct Settings {
    /// Executable to run instead of `mbed`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_config: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_config: Option<PathBuf>,
}

impl Settings {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        serde_json::from_str(&contents).map_err(|e| {
            Error::SettingsError(format!("Failed to parse {}: {e}", path.display()))
        })
    }

    pub fn find_settings_file(start_path: &Path) -> Option<PathBuf> {
        start_path
            .ancestors()
            .map(|dir| dir.join(SETTINGS_FILE))
            .find(|path| path.is_file())
    }

    /// Load the nearest settings file, or defaults when there is none
    pub fn discover(start_path: &Path) -> Result<Self> {
        match Self::find_settings_file(start_path) {
            Some(path) => Self::load_from_file(&path),
            None => Ok(Self::default()),
        }
    }

    /// Config file locations with the configured paths taking precedence
    pub fn config_files(&self, cwd: &Path) -> ConfigFiles {
        let discovered = ConfigFiles::discover(cwd);
        ConfigFiles {
            global: self.global_config.clone().or(discovered.global),
            local: self.local_config.clone().or(discovered.local),
        }
    }
}
