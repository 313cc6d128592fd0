//! Configuration file handling for the form's validation limits.
//!
//! Every key is optional; missing keys fall back to the built-in defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::validation::ValidationRules;

/// Longest debounce the form will accept, in milliseconds
pub const MAX_DEBOUNCE_MS: u64 = 10_000;

/// Validation limits that can be saved/loaded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormConfig {
    pub username_min_len: usize,
    pub username_max_len: usize,
    pub password_min_len: usize,
    pub debounce_ms: u64,
}

impl Default for FormConfig {
    fn default() -> Self {
        let rules = ValidationRules::default();
        Self {
            username_min_len: rules.username_min_len,
            username_max_len: rules.username_max_len,
            password_min_len: rules.password_min_len,
            debounce_ms: rules.debounce.as_millis() as u64,
        }
    }
}

impl FormConfig {
    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize configuration to JSON")?;

        fs::write(&path, json)
            .with_context(|| format!("Failed to write configuration to {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Load configuration from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read configuration from {:?}", path.as_ref()))?;

        let config: Self =
            serde_json::from_str(&content).context("Failed to parse configuration JSON")?;

        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.username_min_len == 0 {
            anyhow::bail!("username_min_len must be at least 1");
        }

        if self.username_min_len > self.username_max_len {
            anyhow::bail!(
                "username_min_len ({}) exceeds username_max_len ({})",
                self.username_min_len,
                self.username_max_len
            );
        }

        if self.password_min_len == 0 {
            anyhow::bail!("password_min_len must be at least 1");
        }

        if self.debounce_ms > MAX_DEBOUNCE_MS {
            anyhow::bail!(
                "debounce_ms ({}) exceeds the {} ms limit",
                self.debounce_ms,
                MAX_DEBOUNCE_MS
            );
        }

        Ok(())
    }

    /// Limits in the form the engine consumes
    pub fn rules(&self) -> ValidationRules {
        ValidationRules {
            username_min_len: self.username_min_len,
            username_max_len: self.username_max_len,
            password_min_len: self.password_min_len,
            debounce: Duration::from_millis(self.debounce_ms),
        }
    }
}
