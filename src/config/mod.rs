//! Configuration management for relaybox
//!
//! This module provides a layered configuration system that loads settings from:
//! 1. Default values (embedded in structs)
//! 2. TOML configuration file
//! 3. Environment variables (highest priority)
//!
//! # Usage
//!
//! ```no_run
//! use relaybox::config::Config;
//!
//! let config = Config::load().expect("Failed to load configuration");
//! let chain = config.build_chain().expect("Invalid chain configuration");
//! ```
//!
//! # Environment Variables
//!
//! Configuration can be overridden using environment variables with the pattern:
//! `RELAYBOX__<section>__<key>`
//!
//! Examples:
//! - `RELAYBOX__CHAIN__MODE=first-match`
//! - `RELAYBOX__SINKS__NOTIFY__RECIPIENT=oncall@example.com`
//!
//! # Configuration File
//!
//! By default, the configuration is loaded from `config/relaybox.toml`.
//! This can be overridden using the `RELAYBOX_CONFIG` environment variable.

mod models;
mod sources;
mod validation;

pub use models::{
    ChainConfig, Config, FileSinkConfig, HandlerSpec, NotifySinkConfig, SinksConfig,
};
pub use validation::ValidationError;

use std::sync::Arc;
use thiserror::Error;

use crate::chain::{ChainBuilder, ConfigurationError, HandlerChain};
use crate::sinks::{FileSink, NotifySink, SinkRegistry};

#[derive(Debug, Error)]
pub enum ChainConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] ValidationError),

    #[error("Chain construction failed: {0}")]
    BuildError(#[from] ConfigurationError),
}

impl Config {
    /// Load configuration from all sources (file + environment)
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables (`RELAYBOX__*`)
    /// 2. TOML file (default: `config/relaybox.toml`)
    /// 3. Default values
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file is malformed or validation
    /// fails (empty handler ids, unknown sink references, negative thresholds).
    pub fn load() -> Result<Self, ChainConfigError> {
        let config = sources::load()?;
        validation::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific path
    ///
    /// Useful for testing with custom configuration files.
    pub fn load_from_path(path: std::path::PathBuf) -> Result<Self, ChainConfigError> {
        let config = sources::load_from_sources(path)?;
        validation::validate(&config)?;
        Ok(config)
    }

    /// Build the sink registry this configuration describes
    ///
    /// The console sink is always registered; file and notify sinks are
    /// registered when their sections are present.
    pub fn sink_registry(&self) -> SinkRegistry {
        let mut registry = SinkRegistry::with_defaults();
        if let Some(file) = &self.sinks.file {
            registry.register("file", Arc::new(FileSink::new(&file.path)));
        }
        if let Some(notify) = &self.sinks.notify {
            registry.register("notify", Arc::new(NotifySink::new(&notify.recipient)));
        }
        registry
    }

    /// Build the configured handler chain against this config's sinks
    pub fn build_chain(&self) -> Result<HandlerChain, ChainConfigError> {
        let registry = self.sink_registry();
        Ok(ChainBuilder::from_config(&self.chain, &registry)?)
    }
}
