//! Configuration for the harness: which tool to drive and how sandboxes behave.

use crate::error::{HarnessError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Harness configuration.
///
/// Every field has a default, so an empty TOML file (or no file at all) is valid.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    /// Executable invoked for every operation (default: `uniweb`).
    pub tool: PathBuf,

    /// Arguments placed before each operation's argv (default: empty).
    /// Lets the tool be launched through a wrapper such as `npx`.
    pub tool_prefix_args: Vec<String>,

    /// Prefix of the sandbox directory name (default: `uniweb-test-`).
    /// A random suffix is always appended.
    pub temp_prefix: String,

    /// Leave the sandbox on disk after cleanup (default: false).
    pub keep_sandbox: bool,

    /// Check each fluent operation's filesystem effect after the tool
    /// succeeds (default: true).
    pub verify_effects: bool,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            tool: PathBuf::from("uniweb"),
            tool_prefix_args: Vec::new(),
            temp_prefix: "uniweb-test-".to_string(),
            keep_sandbox: false,
            verify_effects: true,
        }
    }
}

impl HarnessConfig {
    /// Default configuration driving the given executable.
    pub fn with_tool(tool: impl Into<PathBuf>) -> Self {
        Self {
            tool: tool.into(),
            ..Self::default()
        }
    }

    /// Load configuration from a TOML file. A missing file yields defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .map_err(|e| HarnessError::Config(format!("failed to read config: {}", e)))?;
        toml::from_str(&content)
            .map_err(|e| HarnessError::Config(format!("failed to parse config: {}", e)))
    }

    /// Save configuration as TOML.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| HarnessError::Config(format!("failed to serialize config: {}", e)))?;
        fs::write(path, content)
            .map_err(|e| HarnessError::Config(format!("failed to write config: {}", e)))?;
        Ok(())
    }
}
