//! Reading `TARGET=` / `TOOLCHAIN=` defaults from mbed's plain-text config files

use crate::error::Result;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::{debug, warn};

/// File name mbed uses for both the per-project and the global config
pub const MBED_CONFIG_FILE: &str = ".mbed";

static TARGET_RE: OnceLock<Regex> = OnceLock::new();
static TOOLCHAIN_RE: OnceLock<Regex> = OnceLock::new();

/// Values found in one config file. Missing keys stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MbedConfigFile {
    pub target: Option<String>,
    pub toolchain: Option<String>,
}

impl MbedConfigFile {
    pub fn parse(contents: &str) -> Self {
        let target_re =
            TARGET_RE.get_or_init(|| Regex::new(r"(?m)^TARGET=(.*)$").expect("valid TARGET regex"));
        let toolchain_re = TOOLCHAIN_RE
            .get_or_init(|| Regex::new(r"(?m)^TOOLCHAIN=(.*)$").expect("valid TOOLCHAIN regex"));

        Self {
            target: capture_value(target_re, contents),
            toolchain: capture_value(toolchain_re, contents),
        }
    }

    /// Load a config file, returning `None` if it does not exist
    pub fn load(path: &Path) -> Result<Option<Self>> {
        if !path.is_file() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(path)?;
        let parsed = Self::parse(&contents);
        debug!("Loaded {:?}: {:?}", path, parsed);
        Ok(Some(parsed))
    }

    /// Layer `other` on top of `self`; keys present in `other` win
    pub fn merge(self, other: MbedConfigFile) -> Self {
        Self {
            target: other.target.or(self.target),
            toolchain: other.toolchain.or(self.toolchain),
        }
    }
}

// Last occurrence wins, matching how mbed rewrites the file
fn capture_value(re: &Regex, contents: &str) -> Option<String> {
    re.captures_iter(contents)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|value| !value.is_empty())
        .last()
}

/// Locations of the user-global and project-local config files
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigFiles {
    pub global: Option<PathBuf>,
    pub local: Option<PathBuf>,
}

impl ConfigFiles {
    pub fn new(global: Option<PathBuf>, local: Option<PathBuf>) -> Self {
        Self { global, local }
    }

    /// Default locations: `~/.mbed/.mbed` and the nearest `.mbed` above `cwd`
    pub fn discover(cwd: &Path) -> Self {
        let global = dirs::home_dir().map(|home| home.join(".mbed").join(MBED_CONFIG_FILE));
        let local = find_project_root(cwd)
            .unwrap_or_else(|| cwd.to_path_buf())
            .join(MBED_CONFIG_FILE);
        Self {
            global,
            local: Some(local),
        }
    }

    /// Read global then local; the local file overrides the global one.
    /// A file that cannot be read is skipped without affecting the other.
    pub fn load(&self) -> MbedConfigFile {
        let mut merged = MbedConfigFile::default();
        for path in [&self.global, &self.local].into_iter().flatten() {
            match MbedConfigFile::load(path) {
                Ok(Some(file)) => merged = merged.merge(file),
                Ok(None) => {}
                Err(e) => warn!("Skipping unreadable mbed config {:?}: {}", path, e),
            }
        }
        merged
    }
}

/// Nearest ancestor of `start` holding an mbed project config
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(MBED_CONFIG_FILE).is_file())
        .map(Path::to_path_buf)
}
