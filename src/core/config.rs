//! Service configuration
//!
//! Paths and toggles for the surrounding deployment are collected here.
//! The engine itself takes its catalogs and stores by injection, so this
//! struct is consumed at wiring time (the dev console, a server binary)
//! rather than read from inside the core.

use std::path::PathBuf;

/// Configuration for wiring up the class engine
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Directory scanned for extension pack TOML files
    ///
    /// A missing directory means no extensions, which is the common case
    /// for a vanilla install.
    pub extension_dir: PathBuf,

    /// Directory where the JSON file store keeps per-agent state
    ///
    /// Created on first save.
    pub state_dir: PathBuf,

    /// Persist agent state after every successful mutation
    ///
    /// Disconnect always saves regardless. Turning this off trades crash
    /// durability for fewer writes.
    pub autosave: bool,

    /// Tracing env-filter directive used by binaries at startup
    pub log_filter: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            extension_dir: PathBuf::from("data/extensions"),
            state_dir: PathBuf::from("data/agents"),
            autosave: true,
            log_filter: "arcanum=debug".to_string(),
        }
    }
}

impl ServiceConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<(), String> {
        // The state dir holds agent JSON; sharing it with the pack dir
        // would mix mod content with save data
        if self.extension_dir == self.state_dir {
            return Err(format!(
                "extension_dir and state_dir must differ (both are {})",
                self.extension_dir.display()
            ));
        }

        if self.log_filter.trim().is_empty() {
            return Err("log_filter must not be empty".into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ServiceConfig::default().validate().is_ok());
    }

    #[test]
    fn test_shared_dirs_rejected() {
        let config = ServiceConfig {
            extension_dir: PathBuf::from("data/shared"),
            state_dir: PathBuf::from("data/shared"),
            ..ServiceConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_blank_log_filter_rejected() {
        let config = ServiceConfig {
            log_filter: "  ".to_string(),
            ..ServiceConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
