//! Configuration for AtlasKV lazy values
//!
//! Centralized configuration with sensible defaults.

use crate::error::{AtlasError, Result};

/// Main configuration for the lazy value layer
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Fetch Configuration
    // -------------------------------------------------------------------------
    /// Deadline applied to fetch contexts built from this config (milliseconds).
    /// `None` means fetches are bounded only by explicit cancellation.
    pub fetch_timeout_ms: Option<u64>,

    // -------------------------------------------------------------------------
    // Clone Configuration
    // -------------------------------------------------------------------------
    /// Number of clone slots in a pool, i.e. how many cloned values a caller
    /// can hold at once
    pub clone_pool_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fetch_timeout_ms: None,
            clone_pool_size: 4,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Check the config for values that can never work
    pub fn validate(&self) -> Result<()> {
        if self.clone_pool_size == 0 {
            return Err(AtlasError::Config(
                "clone_pool_size must be at least 1".to_string(),
            ));
        }
        if self.fetch_timeout_ms == Some(0) {
            return Err(AtlasError::Config(
                "fetch_timeout_ms must be positive when set".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the fetch timeout (in milliseconds)
    pub fn fetch_timeout_ms(mut self, ms: u64) -> Self {
        self.config.fetch_timeout_ms = Some(ms);
        self
    }

    /// Remove any fetch timeout
    pub fn no_fetch_timeout(mut self) -> Self {
        self.config.fetch_timeout_ms = None;
        self
    }

    /// Set the number of clone slots per pool
    pub fn clone_pool_size(mut self, count: usize) -> Self {
        self.config.clone_pool_size = count;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
