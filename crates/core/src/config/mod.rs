//! Configuration management for mbed-runner

pub mod mbed_file;
mod session;
mod settings;

// Re-export main types
pub use mbed_file::{ConfigFiles, MBED_CONFIG_FILE, MbedConfigFile, find_project_root};
pub use session::{SUPPORTED_TOOLCHAINS, SessionConfig, WindowConfigs, WindowId};
pub use settings::{SETTINGS_FILE, Settings};
