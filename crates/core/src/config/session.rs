use std::collections::HashMap;

/// Toolchains the mbed CLI accepts for `-t`
pub const SUPPORTED_TOOLCHAINS: [&str; 3] = ["ARM", "GCC_ARM", "IAR"];

/// Opaque identifier of an editor window
pub type WindowId = u64;

/// Target and toolchain for one window. An empty string means unresolved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionConfig {
    pub target: String,
    pub toolchain: String,
}

impl SessionConfig {
    pub fn new(target: impl Into<String>, toolchain: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            toolchain: toolchain.into(),
        }
    }

    pub fn is_resolved(&self) -> bool {
        !self.target.is_empty() && !self.toolchain.is_empty()
    }
}

/// Per-window configurations, created lazily on first access
#[derive(Debug, Default)]
pub struct WindowConfigs {
    configs: HashMap<WindowId, SessionConfig>,
}

impl WindowConfigs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, window: WindowId) -> Option<&SessionConfig> {
        self.configs.get(&window)
    }

    pub fn get_or_create(&mut self, window: WindowId) -> &mut SessionConfig {
        self.configs.entry(window).or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_windows_are_isolated() {
        let mut configs = WindowConfigs::new();
        configs.get_or_create(1).target = "K64F".to_string();

        assert!(configs.get(2).is_none());
        assert_eq!(configs.get_or_create(2), &SessionConfig::default());
        assert_eq!(configs.get(1).map(|c| c.target.as_str()), Some("K64F"));
    }

    #[test]
    fn test_resolved_requires_both_values() {
        assert!(!SessionConfig::new("K64F", "").is_resolved());
        assert!(SessionConfig::new("K64F", "ARM").is_resolved());
    }
}
